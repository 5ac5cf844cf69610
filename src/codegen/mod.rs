//! Target-syntax code generation
//!
//! [`CodeGenerator`] walks a checked AST depth-first and writes C-like text
//! to any [`Write`] sink as it goes:
//!
//! ```text
//! ಕ = ೫;                 ಕ = 5;
//! ಯದಿ ಕ == ೫ {            if (ಕ == 5) {
//!     ಮುದ್ರಿಸು ಕ + ೩;   →       print(ಕ + 3);
//! }                      }
//! ```
//!
//! Binary operands are parenthesized only when needed to keep the tree's
//! precedence and left associativity, so `(ಅ + ಬ) * ಚ` and `ಅ - (ಬ - ಚ)`
//! survive the round trip. The AST is never modified.

use crate::parser::ast::AstNode;
use std::io::{self, Write};
use thiserror::Error;
use tracing::debug;

/// Code generation error type
#[derive(Debug, Error)]
pub enum CodegenError {
    /// A node appeared where the generator cannot emit it
    #[error("Internal error at line {line}: {message}")]
    Internal { message: String, line: usize },

    #[error("Failed to write generated code: {0}")]
    Io(#[from] io::Error),
}

pub struct CodeGenerator<W: Write> {
    out: W,
    indent_width: usize,
    depth: usize,
}

impl<W: Write> CodeGenerator<W> {
    pub fn new(out: W, indent_width: usize) -> Self {
        Self {
            out,
            indent_width,
            depth: 0,
        }
    }

    /// Emit `root` and flush the sink. A `Program` root emits its statements
    /// in order; a single statement node is emitted on its own.
    pub fn generate(&mut self, root: &AstNode) -> Result<(), CodegenError> {
        match root {
            AstNode::Program { statements, .. } => {
                for stmt in statements {
                    self.emit_statement(stmt)?;
                }
                debug!(statements = statements.len(), "generated program");
            }
            other => self.emit_statement(other)?,
        }

        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit_statement(&mut self, node: &AstNode) -> Result<(), CodegenError> {
        match node {
            AstNode::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.write_indent()?;
                write!(self.out, "if (")?;
                self.emit_expr(condition)?;
                writeln!(self.out, ") {{")?;
                self.emit_block_body(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.write_indent()?;
                    writeln!(self.out, "}} else {{")?;
                    self.emit_block_body(else_branch)?;
                }
                self.write_indent()?;
                writeln!(self.out, "}}")?;
            }
            AstNode::While {
                condition, body, ..
            } => {
                self.write_indent()?;
                write!(self.out, "while (")?;
                self.emit_expr(condition)?;
                writeln!(self.out, ") {{")?;
                self.emit_block_body(body)?;
                self.write_indent()?;
                writeln!(self.out, "}}")?;
            }
            AstNode::Print { expr, .. } => {
                self.write_indent()?;
                write!(self.out, "print(")?;
                self.emit_expr(expr)?;
                writeln!(self.out, ");")?;
            }
            AstNode::Assign { name, value, .. } => {
                self.write_indent()?;
                write!(self.out, "{} = ", name)?;
                self.emit_expr(value)?;
                writeln!(self.out, ";")?;
            }
            AstNode::Program { line, .. } => {
                return Err(CodegenError::Internal {
                    message: "program node nested inside another node".to_string(),
                    line: *line,
                });
            }
            AstNode::Block { line, .. } => {
                return Err(CodegenError::Internal {
                    message: "block in statement position".to_string(),
                    line: *line,
                });
            }
            expr => {
                return Err(CodegenError::Internal {
                    message: "expression in statement position".to_string(),
                    line: expr.line(),
                });
            }
        }

        Ok(())
    }

    /// Emit the statements of a block one level deeper than the current one.
    fn emit_block_body(&mut self, block: &AstNode) -> Result<(), CodegenError> {
        self.depth += 1;
        let result = match block {
            AstNode::Block { statements, .. } => statements
                .iter()
                .try_for_each(|stmt| self.emit_statement(stmt)),
            other => Err(CodegenError::Internal {
                message: "statement body is not a block".to_string(),
                line: other.line(),
            }),
        };
        self.depth -= 1;
        result
    }

    fn emit_expr(&mut self, node: &AstNode) -> Result<(), CodegenError> {
        match node {
            AstNode::BinaryOp {
                op, left, right, ..
            } => {
                let precedence = op.precedence();
                self.emit_operand(left, precedence, false)?;
                write!(self.out, " {} ", op.symbol())?;
                self.emit_operand(right, precedence, true)?;
            }
            AstNode::UnaryOp { op, operand, .. } => {
                write!(self.out, "{}", op.symbol())?;
                let wrap = match operand.as_ref() {
                    AstNode::BinaryOp { .. } | AstNode::UnaryOp { .. } => true,
                    AstNode::NumberLiteral { value, .. } => *value < 0,
                    _ => false,
                };
                self.emit_wrapped(operand, wrap)?;
            }
            AstNode::Variable { name, .. } => write!(self.out, "{}", name)?,
            AstNode::NumberLiteral { value, .. } => write!(self.out, "{}", value)?,
            AstNode::StringLiteral { value, .. } => {
                write!(self.out, "\"{}\"", escape_string(value))?
            }
            AstNode::BooleanLiteral { value, .. } => {
                write!(self.out, "{}", if *value { "true" } else { "false" })?
            }
            statement => {
                return Err(CodegenError::Internal {
                    message: "statement node in expression position".to_string(),
                    line: statement.line(),
                });
            }
        }

        Ok(())
    }

    /// Emit one side of a binary operator whose precedence is `parent`.
    /// Negative literals are wrapped so `ಕ - (-5)` never reads as `ಕ - -5`.
    fn emit_operand(
        &mut self,
        node: &AstNode,
        parent: u8,
        is_right: bool,
    ) -> Result<(), CodegenError> {
        let wrap = match node {
            AstNode::BinaryOp { op, .. } => {
                op.precedence() < parent || (is_right && op.precedence() == parent)
            }
            AstNode::NumberLiteral { value, .. } => *value < 0,
            _ => false,
        };
        self.emit_wrapped(node, wrap)
    }

    fn emit_wrapped(&mut self, node: &AstNode, wrap: bool) -> Result<(), CodegenError> {
        if wrap {
            write!(self.out, "(")?;
            self.emit_expr(node)?;
            write!(self.out, ")")?;
            Ok(())
        } else {
            self.emit_expr(node)
        }
    }

    fn write_indent(&mut self) -> io::Result<()> {
        write!(self.out, "{:width$}", "", width = self.depth * self.indent_width)
    }
}

/// Escape a string literal's contents for a double-quoted target literal.
pub fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
