//! # Introduction
//!
//! kannadapy transpiles a small imperative scripting language whose keywords
//! are written in the Kannada script into equivalent C-like source text.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Semantic Checker → Code Generator → Output
//! ```
//!
//! 1. [`parser`]: decodes the UTF-8 source into tokens and builds an AST.
//! 2. [`semantic`]: checks that every name is assigned before it is read,
//!    using a flat [`semantic::SymbolTable`].
//! 3. [`codegen`]: writes the checked AST as target text to any
//!    [`std::io::Write`] sink.
//! 4. [`compiler`]: runs the phases in order; the first error ends the
//!    compilation and is returned as a [`CompileError`].
//!
//! ## Example
//!
//! ```
//! let output = kannadapy::compiler::compile_to_string("ಕ = ೫;\nಮುದ್ರಿಸು ಕ + ೩;").unwrap();
//! assert_eq!(output, "ಕ = 5;\nprint(ಕ + 3);\n");
//! ```
//!
//! ## Supported subset
//!
//! Statements: assignment, `ಯದಿ`/`ಅನ್ಯಥಾ` (if/else), `ಆಗಿರುವ` (while),
//! `ಮುದ್ರಿಸು` (print). Expressions: integer, string and boolean literals,
//! variables, `+ - * /`, `==`, unary `-`, parentheses.

pub mod codegen;
pub mod compiler;
pub mod constants;
pub mod errors;
pub mod parser;
pub mod semantic;

pub use compiler::{compile, compile_with_options, CompileOptions};
pub use errors::CompileError;
