//! Source parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parser struct and helpers (tokens → AST)
//! - [`statements`] / [`expressions`]: grammar rules, as `impl Parser` blocks
//! - [`ast`]: AST node definitions
//!
//! # Source Language
//!
//! Keywords, identifiers and integer literals are written in the Kannada
//! script; operators and delimiters are ASCII:
//!
//! | Keyword    | Meaning |
//! |------------|---------|
//! | `ಯದಿ`      | if      |
//! | `ಅನ್ಯಥಾ`    | else    |
//! | `ಆಗಿರುವ`    | while   |
//! | `ಮುದ್ರಿಸು`   | print   |
//! | `ನಿಜ`      | true    |
//! | `ಸುಳ್ಳು`     | false   |
//! | `ಶೂನ್ಯ`     | none (reserved) |
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent, one routine per precedence tier.
//! No external parser generator dependencies.

pub mod ast;
pub mod expressions;
pub mod lexer;
pub mod parse;
pub mod statements;
