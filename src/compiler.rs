//! Compilation pipeline
//!
//! [`compile`] runs lexing, parsing, semantic checking and code generation in
//! that order and stops at the first error. Code is only generated once the
//! whole program has been checked, so a failed compilation writes nothing.
//!
//! The individual phases are public for callers that want to inspect the
//! intermediate results (the command-line driver uses them for its dump
//! options).

use crate::codegen::CodeGenerator;
use crate::constants::{DEFAULT_INDENT_WIDTH, SYMBOL_TABLE_BUCKETS};
use crate::errors::CompileError;
use crate::parser::ast::AstNode;
use crate::parser::lexer::{Lexer, Token};
use crate::parser::parse::Parser;
use crate::semantic::{SemanticChecker, SymbolTable};
use std::io::Write;
use tracing::info_span;

/// Per-compilation settings
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Bucket count of the symbol table
    pub bucket_count: usize,
    /// Spaces per nesting level in generated blocks
    pub indent_width: usize,
    /// Names treated as declared before the program starts
    pub predeclared: Vec<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            bucket_count: SYMBOL_TABLE_BUCKETS,
            indent_width: DEFAULT_INDENT_WIDTH,
            predeclared: Vec::new(),
        }
    }
}

pub fn lex(source: &str) -> Result<Vec<Token>, CompileError> {
    Ok(Lexer::new(source).tokenize()?)
}

pub fn parse(tokens: Vec<Token>) -> Result<AstNode, CompileError> {
    Ok(Parser::new(tokens).parse_program()?)
}

/// Run the declaration check and return the populated symbol table.
pub fn check(program: &AstNode, options: &CompileOptions) -> Result<SymbolTable, CompileError> {
    let mut checker = SemanticChecker::new(SymbolTable::new(options.bucket_count));
    for name in &options.predeclared {
        checker.declare(name);
    }
    checker.check(program)?;
    Ok(checker.into_symbol_table())
}

/// Write target code for `program` to `output` and hand the sink back.
pub fn generate<W: Write>(
    program: &AstNode,
    output: W,
    options: &CompileOptions,
) -> Result<W, CompileError> {
    let mut generator = CodeGenerator::new(output, options.indent_width);
    generator.generate(program)?;
    Ok(generator.into_inner())
}

/// Compile `source` with default options, writing target code to `output`.
pub fn compile<W: Write>(source: &str, output: W) -> Result<(), CompileError> {
    compile_with_options(source, output, &CompileOptions::default())
}

pub fn compile_with_options<W: Write>(
    source: &str,
    output: W,
    options: &CompileOptions,
) -> Result<(), CompileError> {
    let _span = info_span!("compile", bytes = source.len()).entered();

    let tokens = lex(source)?;
    let program = parse(tokens)?;
    check(&program, options)?;
    generate(&program, output, options)?;
    Ok(())
}

/// Compile `source` with default options and return the generated text.
pub fn compile_to_string(source: &str) -> Result<String, CompileError> {
    let mut output = Vec::new();
    compile(source, &mut output)?;
    Ok(String::from_utf8_lossy(&output).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_stop_before_output() {
        let mut output = Vec::new();
        let err = compile("ಕ = ೧;\nಮುದ್ರಿಸು ಖ;", &mut output).unwrap_err();

        assert!(matches!(err, CompileError::Semantic { ref name, line: 2 } if name == "ಖ"));
        assert!(output.is_empty());
    }

    #[test]
    fn test_predeclared_names() {
        let options = CompileOptions {
            predeclared: vec!["ಕ".to_string()],
            ..CompileOptions::default()
        };
        let mut output = Vec::new();
        compile_with_options("ಮುದ್ರಿಸು ಕ;", &mut output, &options).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "print(ಕ);\n");
    }

    #[test]
    fn test_phase_helpers() {
        let tokens = lex("ಕ = ೧;").unwrap();
        assert_eq!(tokens.len(), 5);

        let program = parse(tokens).unwrap();
        let symbols = check(&program, &CompileOptions::default()).unwrap();
        assert!(symbols.contains("ಕ"));

        let output = generate(&program, Vec::new(), &CompileOptions::default()).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "ಕ = 1;\n");
    }
}
