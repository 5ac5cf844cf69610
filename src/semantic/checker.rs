//! Declaration checking pass
//!
//! A single depth-first walk over the AST. `Variable` references must
//! resolve in the symbol table; `Assign` checks its value first and then
//! declares its target if the name is not yet visible, so `ಕ = ಕ + ೧;` is
//! rejected when `ಕ` has no earlier assignment.

use crate::parser::ast::AstNode;
use crate::semantic::symbol_table::{SymbolKind, SymbolTable};
use crate::semantic::SemanticError;
use tracing::{debug, trace};

pub struct SemanticChecker {
    symbols: SymbolTable,
}

impl SemanticChecker {
    pub fn new(symbols: SymbolTable) -> Self {
        Self { symbols }
    }

    /// Declare `name` as a variable before checking, e.g. for names the
    /// target environment provides.
    pub fn declare(&mut self, name: &str) {
        self.symbols.insert(name, SymbolKind::Variable, 0);
    }

    /// Check `node` and everything below it, stopping at the first
    /// undeclared reference.
    pub fn check(&mut self, node: &AstNode) -> Result<(), SemanticError> {
        self.visit(node)?;
        debug!(symbols = self.symbols.len(), "semantic check passed");
        Ok(())
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn into_symbol_table(self) -> SymbolTable {
        self.symbols
    }

    fn visit(&mut self, node: &AstNode) -> Result<(), SemanticError> {
        match node {
            AstNode::Program { statements, .. } | AstNode::Block { statements, .. } => {
                for stmt in statements {
                    self.visit(stmt)?;
                }
            }
            AstNode::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.visit(condition)?;
                self.visit(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.visit(else_branch)?;
                }
            }
            AstNode::While {
                condition, body, ..
            } => {
                self.visit(condition)?;
                self.visit(body)?;
            }
            AstNode::Print { expr, .. } => self.visit(expr)?,
            AstNode::Assign { name, value, line } => {
                self.visit(value)?;
                if !self.symbols.contains(name) {
                    trace!(name = %name, line, "declared by assignment");
                    self.symbols.insert(name, SymbolKind::Variable, *line);
                }
            }
            AstNode::BinaryOp { left, right, .. } => {
                self.visit(left)?;
                self.visit(right)?;
            }
            AstNode::UnaryOp { operand, .. } => self.visit(operand)?,
            AstNode::Variable { name, line } => {
                if !self.symbols.contains(name) {
                    return Err(SemanticError::UndeclaredVariable {
                        name: name.clone(),
                        line: *line,
                    });
                }
            }
            AstNode::NumberLiteral { .. }
            | AstNode::StringLiteral { .. }
            | AstNode::BooleanLiteral { .. } => {}
        }

        Ok(())
    }
}

impl Default for SemanticChecker {
    fn default() -> Self {
        Self::new(SymbolTable::default())
    }
}

/// Check `program` against a fresh table and return the populated table.
pub fn check_program(program: &AstNode, bucket_count: usize) -> Result<SymbolTable, SemanticError> {
    let mut checker = SemanticChecker::new(SymbolTable::new(bucket_count));
    checker.check(program)?;
    Ok(checker.into_symbol_table())
}
