//! Expression parsing implementation
//!
//! One routine per precedence tier, lowest first:
//!
//! ```text
//! expression ::= additive ('==' additive)*
//! additive   ::= term (('+' | '-') term)*
//! term       ::= factor (('*' | '/') factor)*
//! factor     ::= '-' primary | primary
//! primary    ::= number | string | 'ನಿಜ' | 'ಸುಳ್ಳು' | identifier | '(' expression ')'
//! ```
//!
//! Every binary tier is left-associative: the loop folds each new operand
//! into the tree built so far. Unary minus applies to a primary only, so
//! `--x` is rejected while `-(-x)` is accepted.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        self.parse_equality()
    }

    /// Parse equality (==)
    fn parse_equality(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_additive()?;

        while self.check(&TokenKind::EqualEqual) {
            let line = self.advance().line;
            self.count_operator(line)?;
            let right = self.parse_additive()?;
            left = AstNode::binary(BinOp::Eq, left, right, line);
        }

        Ok(left)
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_term()?;

        loop {
            let op = if self.check(&TokenKind::Plus) {
                BinOp::Add
            } else if self.check(&TokenKind::Minus) {
                BinOp::Sub
            } else {
                break;
            };

            let line = self.advance().line;
            self.count_operator(line)?;
            let right = self.parse_term()?;
            left = AstNode::binary(op, left, right, line);
        }

        Ok(left)
    }

    /// Parse multiplicative (* /)
    fn parse_term(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_factor()?;

        loop {
            let op = if self.check(&TokenKind::Star) {
                BinOp::Mul
            } else if self.check(&TokenKind::Slash) {
                BinOp::Div
            } else {
                break;
            };

            let line = self.advance().line;
            self.count_operator(line)?;
            let right = self.parse_factor()?;
            left = AstNode::binary(op, left, right, line);
        }

        Ok(left)
    }

    /// Parse unary minus
    fn parse_factor(&mut self) -> Result<AstNode, ParseError> {
        if self.check(&TokenKind::Minus) {
            let line = self.advance().line;
            let operand = self.parse_primary()?;
            return Ok(AstNode::unary(UnOp::Neg, operand, line));
        }

        self.parse_primary()
    }

    /// Parse primary (literals, variables, parenthesized expressions)
    fn parse_primary(&mut self) -> Result<AstNode, ParseError> {
        let token = self.advance().clone();
        let line = token.line;

        match token.kind {
            TokenKind::Number(value) => Ok(AstNode::NumberLiteral { value, line }),
            TokenKind::Str(value) => Ok(AstNode::StringLiteral { value, line }),
            TokenKind::True => Ok(AstNode::BooleanLiteral { value: true, line }),
            TokenKind::False => Ok(AstNode::BooleanLiteral { value: false, line }),
            TokenKind::Identifier(name) => Ok(AstNode::Variable { name, line }),
            TokenKind::LParen => {
                self.enter_nesting(line)?;
                let expr = self.parse_expression();
                self.leave_nesting();
                let expr = expr?;
                self.consume(&TokenKind::RParen, "Expected ')' after expression")?;
                Ok(expr)
            }
            other => Err(ParseError {
                message: format!("Unexpected {} in expression", other),
                line,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::Parser;

    /// Parses `ಮುದ್ರಿಸು <expr>;` and returns the printed expression.
    fn parse_expr(expr: &str) -> AstNode {
        let source = format!("ಮುದ್ರಿಸು {};", expr);
        let mut parser = Parser::from_source(&source).unwrap();
        let program = parser.parse_program().unwrap();

        match program.statements() {
            [AstNode::Print { expr, .. }] => (**expr).clone(),
            other => panic!("Expected a single print, got {:?}", other),
        }
    }

    fn var(name: &str) -> AstNode {
        AstNode::Variable {
            name: name.to_string(),
            line: 1,
        }
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        // ಅ - ಬ - ಚ  ==  (ಅ - ಬ) - ಚ
        let expr = parse_expr("ಅ - ಬ - ಚ");
        let expected = AstNode::binary(
            BinOp::Sub,
            AstNode::binary(BinOp::Sub, var("ಅ"), var("ಬ"), 1),
            var("ಚ"),
            1,
        );
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        // ಅ + ಬ * ಚ  ==  ಅ + (ಬ * ಚ)
        let expr = parse_expr("ಅ + ಬ * ಚ");
        let expected = AstNode::binary(
            BinOp::Add,
            var("ಅ"),
            AstNode::binary(BinOp::Mul, var("ಬ"), var("ಚ"), 1),
            1,
        );
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let expr = parse_expr("(ಅ + ಬ) * ಚ");
        assert!(matches!(
            expr,
            AstNode::BinaryOp { op: BinOp::Mul, ref left, .. }
                if matches!(**left, AstNode::BinaryOp { op: BinOp::Add, .. })
        ));
    }

    #[test]
    fn test_equality_is_lowest() {
        let expr = parse_expr("ಅ + ೧ == ಬ * ೨");
        match expr {
            AstNode::BinaryOp { op, left, right, .. } => {
                assert_eq!(op, BinOp::Eq);
                assert!(matches!(*left, AstNode::BinaryOp { op: BinOp::Add, .. }));
                assert!(matches!(*right, AstNode::BinaryOp { op: BinOp::Mul, .. }));
            }
            other => panic!("Expected equality, got {:?}", other),
        }
    }

    #[test]
    fn test_unary_minus() {
        let expr = parse_expr("-ಅ * ೨");
        match expr {
            AstNode::BinaryOp { op: BinOp::Mul, left, .. } => {
                assert!(matches!(*left, AstNode::UnaryOp { op: UnOp::Neg, .. }));
            }
            other => panic!("Expected multiplication, got {:?}", other),
        }
    }

    #[test]
    fn test_double_minus_needs_parentheses() {
        let mut parser = Parser::from_source("ಮುದ್ರಿಸು --ಅ;").unwrap();
        let err = parser.parse_program().unwrap_err();
        assert_eq!(err.message, "Unexpected '-' in expression");

        let expr = parse_expr("-(-ಅ)");
        assert!(matches!(
            expr,
            AstNode::UnaryOp { ref operand, .. }
                if matches!(**operand, AstNode::UnaryOp { .. })
        ));
    }

    #[test]
    fn test_literals() {
        assert!(matches!(parse_expr("ನಿಜ"), AstNode::BooleanLiteral { value: true, .. }));
        assert!(matches!(parse_expr("ಸುಳ್ಳು"), AstNode::BooleanLiteral { value: false, .. }));
        assert!(matches!(parse_expr("\"ಹಲೋ\""), AstNode::StringLiteral { ref value, .. } if value == "ಹಲೋ"));
        assert!(matches!(parse_expr("೪೨"), AstNode::NumberLiteral { value: 42, .. }));
    }

    #[test]
    fn test_none_is_not_an_expression() {
        let mut parser = Parser::from_source("ಮುದ್ರಿಸು ಶೂನ್ಯ;").unwrap();
        let err = parser.parse_program().unwrap_err();
        assert!(err.message.contains("(none)"));
    }

    #[test]
    fn test_missing_close_paren() {
        let mut parser = Parser::from_source("ಮುದ್ರಿಸು (ಅ + ೧;").unwrap();
        let err = parser.parse_program().unwrap_err();
        assert!(err.message.starts_with("Expected ')' after expression"));
    }
}
