//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! block      ::= '{' statement* '}'
//! statement  ::= if_stmt | while_stmt | print_stmt | assign_stmt
//! if_stmt    ::= 'ಯದಿ' expression block ('ಅನ್ಯಥಾ' block)?
//! while_stmt ::= 'ಆಗಿರುವ' expression block
//! print_stmt ::= 'ಮುದ್ರಿಸು' expression ';'
//! assign_stmt::= identifier '=' expression ';'
//! ```
//!
//! An identifier at statement position always starts an assignment; there
//! are no expression statements.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a braced block
    pub(crate) fn parse_block(&mut self) -> Result<AstNode, ParseError> {
        let line = self
            .consume(&TokenKind::LBrace, "Expected '{' at the beginning of a block")?
            .line;

        self.enter_nesting(line)?;
        let statements = self.parse_block_statements();
        self.leave_nesting();
        let statements = statements?;

        self.consume(&TokenKind::RBrace, "Expected '}' at the end of a block")?;

        Ok(AstNode::Block { statements, line })
    }

    fn parse_block_statements(&mut self) -> Result<Vec<AstNode>, ParseError> {
        let mut statements = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        self.reset_operator_count();
        match self.peek().kind {
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Print => self.parse_print_statement(),
            TokenKind::Identifier(_) => self.parse_assign_statement(),
            _ => Err(ParseError {
                message: format!("Unexpected {} at start of statement", self.peek()),
                line: self.current_line(),
            }),
        }
    }

    fn parse_if_statement(&mut self) -> Result<AstNode, ParseError> {
        let line = self.consume(&TokenKind::If, "Expected 'if'")?.line;

        let condition = self.parse_expression()?;
        let then_branch = self.parse_block()?;
        let else_branch = if self.match_token(&TokenKind::Else) {
            Some(Box::new(self.parse_block()?))
        } else {
            None
        };

        Ok(AstNode::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch,
            line,
        })
    }

    fn parse_while_statement(&mut self) -> Result<AstNode, ParseError> {
        let line = self.consume(&TokenKind::While, "Expected 'while'")?.line;

        let condition = self.parse_expression()?;
        let body = self.parse_block()?;

        Ok(AstNode::While {
            condition: Box::new(condition),
            body: Box::new(body),
            line,
        })
    }

    fn parse_print_statement(&mut self) -> Result<AstNode, ParseError> {
        let line = self.consume(&TokenKind::Print, "Expected 'print'")?.line;

        let expr = self.parse_expression()?;
        self.consume(&TokenKind::Semicolon, "Expected ';' after print statement")?;

        Ok(AstNode::Print {
            expr: Box::new(expr),
            line,
        })
    }

    fn parse_assign_statement(&mut self) -> Result<AstNode, ParseError> {
        let (name, line) = self.expect_identifier()?;

        self.consume(&TokenKind::Assign, "Expected '=' after identifier")?;
        let value = self.parse_expression()?;
        self.consume(&TokenKind::Semicolon, "Expected ';' after assignment")?;

        Ok(AstNode::Assign {
            name,
            value: Box::new(value),
            line,
        })
    }
}
