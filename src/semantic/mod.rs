//! Semantic analysis
//!
//! - [`symbol_table`]: declared-name table with most-recent-wins lookup
//! - [`checker`]: declaration check over the AST
//!
//! # Declaration Model
//!
//! There is a single flat scope for the whole program. A name becomes
//! declared when an assignment to it has been checked, in textual order,
//! regardless of the block the assignment sits in. Reading a name before
//! its first assignment is an error.

pub mod checker;
pub mod symbol_table;

use thiserror::Error;

pub use checker::SemanticChecker;
pub use symbol_table::{Symbol, SymbolKind, SymbolTable};

/// Semantic error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("Undeclared variable '{name}' at line {line}")]
    UndeclaredVariable { name: String, line: usize },
}

impl SemanticError {
    pub fn line(&self) -> usize {
        match self {
            SemanticError::UndeclaredVariable { line, .. } => *line,
        }
    }
}
