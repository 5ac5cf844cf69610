//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, token-cursor helpers, and the program entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: Parsing blocks and the four statement forms
//! - `expressions`: Parsing expressions, one routine per precedence tier
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! The parser works on a fully materialized token vector and never backtracks
//! beyond a single token of lookahead. The first mismatch is fatal.
//!
//! Nesting of parentheses and blocks is capped at [`MAX_NESTING_DEPTH`], and
//! the binary operators of one statement at [`MAX_EXPRESSION_OPERATORS`], so
//! the trees handed to the later passes stay shallow enough to walk
//! recursively.

use crate::constants::{MAX_EXPRESSION_OPERATORS, MAX_NESTING_DEPTH};
use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use thiserror::Error;
use tracing::debug;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at line {line}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
}

/// Recursive descent parser
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    /// Open parentheses and blocks enclosing the current token
    nesting_depth: usize,
    /// Binary operators folded into the current statement so far
    operator_count: usize,
}

impl Parser {
    /// Create a parser over an already lexed token sequence.
    ///
    /// An end-of-input token is appended if the sequence does not end with one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::new(TokenKind::Eof, line));
        }

        Self {
            tokens,
            position: 0,
            nesting_depth: 0,
            operator_count: 0,
        }
    }

    /// Lex `source` and create a parser over the result.
    pub fn from_source(source: &str) -> Result<Self, LexError> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self::new(tokens))
    }

    /// Parse the entire program: statements until end of input
    pub fn parse_program(&mut self) -> Result<AstNode, ParseError> {
        let line = self.current_line();
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        debug!(statements = statements.len(), "parsed program");
        Ok(AstNode::Program { statements, line })
    }

    // ===== Helper methods =====

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    pub(crate) fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token and return it. At end of input the cursor
    /// stays on the end-of-input token.
    pub(crate) fn advance(&mut self) -> &Token {
        let index = self.position;
        if !self.is_at_end() {
            self.position += 1;
        }
        &self.tokens[index]
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn current_line(&self) -> usize {
        self.peek().line
    }

    /// Advance past the current token only if it has the expected kind
    pub(crate) fn consume(
        &mut self,
        kind: &TokenKind,
        message: &str,
    ) -> Result<&Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_at_current(message))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<(String, usize), ParseError> {
        if let TokenKind::Identifier(name) = &self.peek().kind {
            let name = name.clone();
            let line = self.advance().line;
            Ok((name, line))
        } else {
            Err(self.error_at_current("Expected identifier"))
        }
    }

    /// Enter one level of parentheses or braces. Fails once the depth
    /// exceeds [`MAX_NESTING_DEPTH`]; pair every success with
    /// [`Parser::leave_nesting`].
    pub(crate) fn enter_nesting(&mut self, line: usize) -> Result<(), ParseError> {
        if self.nesting_depth >= MAX_NESTING_DEPTH {
            return Err(ParseError {
                message: format!("Nesting too deep (maximum {} levels)", MAX_NESTING_DEPTH),
                line,
            });
        }
        self.nesting_depth += 1;
        Ok(())
    }

    pub(crate) fn leave_nesting(&mut self) {
        self.nesting_depth = self.nesting_depth.saturating_sub(1);
    }

    /// Start counting binary operators for a new statement.
    pub(crate) fn reset_operator_count(&mut self) {
        self.operator_count = 0;
    }

    /// Record one binary operator of the current statement.
    pub(crate) fn count_operator(&mut self, line: usize) -> Result<(), ParseError> {
        self.operator_count += 1;
        if self.operator_count > MAX_EXPRESSION_OPERATORS {
            return Err(ParseError {
                message: format!(
                    "Expression too long (maximum {} operators per statement)",
                    MAX_EXPRESSION_OPERATORS
                ),
                line,
            });
        }
        Ok(())
    }

    pub(crate) fn error_at_current(&self, message: &str) -> ParseError {
        ParseError {
            message: format!("{}, found {}", message, self.peek()),
            line: self.current_line(),
        }
    }
}
