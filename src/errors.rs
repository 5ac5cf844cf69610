//! Compilation error taxonomy
//!
//! Each pipeline phase has its own error type next to the code that raises it
//! ([`LexError`], [`ParseError`], [`SemanticError`], [`CodegenError`]).
//! [`CompileError`] unifies them for callers of [`crate::compile`].
//!
//! All errors are fatal: the first one raised by any phase ends the
//! compilation, and every variant that stems from the source program carries
//! the line at which it occurred.

use crate::codegen::CodegenError;
use crate::parser::lexer::LexError;
use crate::parser::parse::ParseError;
use crate::semantic::SemanticError;
use std::io;
use thiserror::Error;

/// First fatal error encountered by a compilation
#[derive(Debug, Error)]
pub enum CompileError {
    /// Unterminated string literal, unrecognized character, oversized identifier
    #[error("Lexical error at line {line}: {message}")]
    Lexical { message: String, line: usize },

    /// Expected-token mismatch or unexpected token at a grammar position
    #[error("Syntax error at line {line}: {message}")]
    Syntax { message: String, line: usize },

    /// Reference to a name that was never declared
    #[error("Semantic error at line {line}: undeclared variable '{name}'")]
    Semantic { name: String, line: usize },

    /// Generator reached a node it cannot emit; a defect, not a user error
    #[error("Internal error at line {line}: {message}")]
    Internal { message: String, line: usize },

    /// The output sink rejected a write
    #[error("Failed to write generated code: {0}")]
    Io(#[from] io::Error),
}

impl CompileError {
    /// Source line the error refers to, if it stems from the program text
    pub fn line(&self) -> Option<usize> {
        match self {
            CompileError::Lexical { line, .. }
            | CompileError::Syntax { line, .. }
            | CompileError::Semantic { line, .. }
            | CompileError::Internal { line, .. } => Some(*line),
            CompileError::Io(_) => None,
        }
    }

    /// Short phase label used by the driver ("lexical", "syntax", ...)
    pub fn kind(&self) -> &'static str {
        match self {
            CompileError::Lexical { .. } => "lexical",
            CompileError::Syntax { .. } => "syntax",
            CompileError::Semantic { .. } => "semantic",
            CompileError::Internal { .. } => "internal",
            CompileError::Io(_) => "io",
        }
    }
}

impl From<LexError> for CompileError {
    fn from(err: LexError) -> Self {
        CompileError::Lexical {
            message: err.message,
            line: err.line,
        }
    }
}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        CompileError::Syntax {
            message: err.message,
            line: err.line,
        }
    }
}

impl From<SemanticError> for CompileError {
    fn from(err: SemanticError) -> Self {
        match err {
            SemanticError::UndeclaredVariable { name, line } => {
                CompileError::Semantic { name, line }
            }
        }
    }
}

impl From<CodegenError> for CompileError {
    fn from(err: CodegenError) -> Self {
        match err {
            CodegenError::Internal { message, line } => {
                CompileError::Internal { message, line }
            }
            CodegenError::Io(e) => CompileError::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_line() {
        let err = CompileError::from(LexError {
            message: "Unterminated string literal".to_string(),
            line: 3,
        });
        assert_eq!(
            err.to_string(),
            "Lexical error at line 3: Unterminated string literal"
        );
        assert_eq!(err.line(), Some(3));
        assert_eq!(err.kind(), "lexical");
    }

    #[test]
    fn test_semantic_error_names_variable() {
        let err = CompileError::from(SemanticError::UndeclaredVariable {
            name: "ಕ".to_string(),
            line: 7,
        });
        assert_eq!(
            err.to_string(),
            "Semantic error at line 7: undeclared variable 'ಕ'"
        );
    }

    #[test]
    fn test_io_error_has_no_line() {
        let err = CompileError::from(io::Error::other("disk full"));
        assert_eq!(err.line(), None);
        assert_eq!(err.kind(), "io");
    }
}
