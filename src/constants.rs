// Constants for the kannadapy transpiler

/// Name reported by the command-line driver
pub const COMPILER_NAME: &str = "KannadaPython";

/// Longest identifier the lexer accepts, in bytes of UTF-8 text
pub const MAX_IDENTIFIER_LENGTH: usize = 255;

/// Bucket count of the symbol table created for each compilation
pub const SYMBOL_TABLE_BUCKETS: usize = 128;

/// Spaces per nesting level in generated blocks
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// First code point of the Kannada digit range (೦)
pub const KANNADA_DIGIT_ZERO: u32 = 0x0CE6;

/// Last code point of the Kannada digit range (೯)
pub const KANNADA_DIGIT_NINE: u32 = 0x0CEF;

/// Deepest nesting of parentheses and blocks the parser accepts
pub const MAX_NESTING_DEPTH: usize = 64;

/// Most binary operators a single statement's expressions may contain
pub const MAX_EXPRESSION_OPERATORS: usize = 1024;
