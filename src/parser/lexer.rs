//! Lexer (tokenizer) for Kannada-keyword source text
//!
//! Converts the raw UTF-8 source buffer into a flat [`Token`] stream consumed
//! by the parser. Keywords, identifiers and integer literals are written in
//! the Kannada script, so the lexer decodes multi-byte code points at the
//! cursor to classify them. Operators and delimiters are single ASCII bytes.
//!
//! [`Lexer::next_token`] never fails: malformed input yields a
//! [`TokenKind::Error`] token and the cursor still moves forward.
//! [`Lexer::tokenize`] turns the first such token into a [`LexError`].

use crate::constants::{KANNADA_DIGIT_NINE, KANNADA_DIGIT_ZERO, MAX_IDENTIFIER_LENGTH};
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Substituted for byte sequences cut short by the end of the buffer.
const REPLACEMENT_CHARACTER: u32 = 0xFFFD;

/// Token variants produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Eof,
    /// Malformed input; carries the diagnostic message
    Error(String),

    // Literals
    Identifier(String),
    Number(i32),
    Str(String),

    // Keywords
    If,
    Else,
    While,
    Print,
    True,
    False,
    None,

    // Operators
    Plus,       // +
    Minus,      // -
    Star,       // *
    Slash,      // /
    Assign,     // =
    EqualEqual, // ==

    // Delimiters
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    Semicolon, // ;
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Eof => write!(f, "end of file"),
            TokenKind::Error(message) => write!(f, "invalid token ({})", message),
            TokenKind::Identifier(name) => write!(f, "identifier '{}'", name),
            TokenKind::Number(n) => write!(f, "number {}", n),
            TokenKind::Str(s) => write!(f, "string literal \"{}\"", s),
            TokenKind::If => write!(f, "'ಯದಿ' (if)"),
            TokenKind::Else => write!(f, "'ಅನ್ಯಥಾ' (else)"),
            TokenKind::While => write!(f, "'ಆಗಿರುವ' (while)"),
            TokenKind::Print => write!(f, "'ಮುದ್ರಿಸು' (print)"),
            TokenKind::True => write!(f, "'ನಿಜ' (true)"),
            TokenKind::False => write!(f, "'ಸುಳ್ಳು' (false)"),
            TokenKind::None => write!(f, "'ಶೂನ್ಯ' (none)"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Assign => write!(f, "'='"),
            TokenKind::EqualEqual => write!(f, "'=='"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::Semicolon => write!(f, "';'"),
        }
    }
}

/// A token and the 1-based line on which it started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize) -> Self {
        Self { kind, line }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at line {line}: {message}")]
pub struct LexError {
    pub message: String,
    pub line: usize,
}

/// Looks up the keyword spelled by `text`, if any.
fn keyword(text: &str) -> Option<TokenKind> {
    let kind = match text {
        "ಯದಿ" => TokenKind::If,
        "ಅನ್ಯಥಾ" => TokenKind::Else,
        "ಆಗಿರುವ" => TokenKind::While,
        "ಮುದ್ರಿಸು" => TokenKind::Print,
        "ನಿಜ" => TokenKind::True,
        "ಸುಳ್ಳು" => TokenKind::False,
        "ಶೂನ್ಯ" => TokenKind::None,
        _ => return None,
    };
    Some(kind)
}

pub fn is_kannada_digit(cp: u32) -> bool {
    (KANNADA_DIGIT_ZERO..=KANNADA_DIGIT_NINE).contains(&cp)
}

/// Kannada block (minus its digits) plus the Vedic extensions block.
pub fn is_kannada_letter(cp: u32) -> bool {
    ((0x0C80..=0x0CFF).contains(&cp) && !is_kannada_digit(cp))
        || (0x1CD0..=0x1CFA).contains(&cp)
}

fn kannada_digit_value(cp: u32) -> i32 {
    (cp - KANNADA_DIGIT_ZERO) as i32
}

/// Decodes the code point starting at `bytes[0]` and returns it with its
/// encoded width.
///
/// The width is chosen from the leading byte alone (`< 0x80` → 1, `< 0xE0` →
/// 2, `< 0xF0` → 3, otherwise 4). A sequence cut short by the end of the
/// slice decodes to U+FFFD and consumes whatever bytes remain.
pub fn decode_utf8(bytes: &[u8]) -> Option<(u32, usize)> {
    let lead = *bytes.first()?;
    let width = if lead < 0x80 {
        1
    } else if lead < 0xE0 {
        2
    } else if lead < 0xF0 {
        3
    } else {
        4
    };

    if bytes.len() < width {
        return Some((REPLACEMENT_CHARACTER, bytes.len()));
    }

    let cont = |i: usize| (bytes[i] & 0x3F) as u32;
    let cp = match width {
        1 => lead as u32,
        2 => ((lead & 0x1F) as u32) << 6 | cont(1),
        3 => ((lead & 0x0F) as u32) << 12 | cont(1) << 6 | cont(2),
        _ => ((lead & 0x07) as u32) << 18 | cont(1) << 12 | cont(2) << 6 | cont(3),
    };

    Some((cp, width))
}

/// Lexer over a borrowed source buffer
pub struct Lexer<'a> {
    source: &'a str,
    input: &'a [u8],
    position: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source string.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            input: source.as_bytes(),
            position: 0,
            line: 1,
        }
    }

    /// Tokenize the entire input, stopping at the first malformed token.
    ///
    /// On success the returned vector ends with exactly one [`TokenKind::Eof`].
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();

            if let TokenKind::Error(message) = &token.kind {
                return Err(LexError {
                    message: message.clone(),
                    line: token.line,
                });
            }

            let done = token.is_eof();
            tokens.push(token);
            if done {
                break;
            }
        }

        debug!(tokens = tokens.len(), lines = self.line, "tokenized source");
        Ok(tokens)
    }

    /// Produce the next token. Repeated calls at end of input keep
    /// returning [`TokenKind::Eof`].
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let Some((cp, _)) = self.peek_char() else {
            return Token::new(TokenKind::Eof, self.line);
        };

        let token = if is_kannada_digit(cp) {
            self.number_literal()
        } else if is_kannada_letter(cp) {
            self.identifier_or_keyword()
        } else if cp == '"' as u32 {
            self.string_literal()
        } else {
            self.punctuation(cp)
        };

        trace!(line = token.line, token = %token, "lexed token");
        token
    }

    /// Current 1-based line number
    pub fn line(&self) -> usize {
        self.line
    }

    /// Parse a run of Kannada digits. Overflow wraps.
    fn number_literal(&mut self) -> Token {
        let line = self.line;
        let mut value: i32 = 0;

        while let Some((cp, width)) = self.peek_char() {
            if !is_kannada_digit(cp) {
                break;
            }
            value = value
                .wrapping_mul(10)
                .wrapping_add(kannada_digit_value(cp));
            self.position += width;
        }

        Token::new(TokenKind::Number(value), line)
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self) -> Token {
        let line = self.line;
        let start = self.position;

        while let Some((cp, width)) = self.peek_char() {
            if is_kannada_letter(cp) || is_kannada_digit(cp) {
                self.position += width;
            } else {
                break;
            }
        }

        let Some(text) = self.source.get(start..self.position) else {
            return self.error("Invalid UTF-8 sequence in identifier".to_string(), line);
        };

        if text.len() > MAX_IDENTIFIER_LENGTH {
            return self.error(
                format!(
                    "Identifier exceeds maximum length of {} bytes",
                    MAX_IDENTIFIER_LENGTH
                ),
                line,
            );
        }

        let kind = keyword(text).unwrap_or_else(|| TokenKind::Identifier(text.to_string()));
        Token::new(kind, line)
    }

    /// Parse string literal. The token keeps the line of the opening quote.
    fn string_literal(&mut self) -> Token {
        let line = self.line;
        self.position += 1; // opening quote
        let start = self.position;

        loop {
            match self.input.get(self.position) {
                None => {
                    return self.error("Unterminated string literal".to_string(), line);
                }
                Some(b'"') => break,
                Some(b'\n') => {
                    self.line += 1;
                    self.position += 1;
                }
                Some(_) => self.position += 1,
            }
        }

        let value = self
            .source
            .get(start..self.position)
            .unwrap_or_default()
            .to_string();
        self.position += 1; // closing quote

        Token::new(TokenKind::Str(value), line)
    }

    /// Single-byte operators and delimiters; anything else is an error that
    /// still consumes one byte.
    fn punctuation(&mut self, cp: u32) -> Token {
        let line = self.line;
        let byte = self.input[self.position];
        self.position += 1;

        let kind = match byte {
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'=' => {
                if self.input.get(self.position) == Some(&b'=') {
                    self.position += 1;
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Assign
                }
            }
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b';' => TokenKind::Semicolon,
            _ => {
                let ch = char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER);
                return self.error(format!("Unexpected character: '{}'", ch), line);
            }
        };

        Token::new(kind, line)
    }

    fn error(&self, message: String, line: usize) -> Token {
        warn!(line, "{}", message);
        Token::new(TokenKind::Error(message), line)
    }

    fn skip_whitespace(&mut self) {
        while let Some(&byte) = self.input.get(self.position) {
            match byte {
                b'\n' => self.line += 1,
                b' ' | b'\t' | b'\r' => {}
                _ => break,
            }
            self.position += 1;
        }
    }

    /// Peek at the code point under the cursor without consuming it
    fn peek_char(&self) -> Option<(u32, usize)> {
        decode_utf8(self.input.get(self.position..)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_assignment() {
        let tokens = kinds("ಕ = ೫;");

        assert!(matches!(tokens[0], TokenKind::Identifier(ref s) if s == "ಕ"));
        assert!(matches!(tokens[1], TokenKind::Assign));
        assert!(matches!(tokens[2], TokenKind::Number(5)));
        assert!(matches!(tokens[3], TokenKind::Semicolon));
        assert!(matches!(tokens[4], TokenKind::Eof));
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn test_keywords() {
        let tokens = kinds("ಯದಿ ಅನ್ಯಥಾ ಆಗಿರುವ ಮುದ್ರಿಸು ನಿಜ ಸುಳ್ಳು ಶೂನ್ಯ");

        assert_eq!(
            tokens,
            vec![
                TokenKind::If,
                TokenKind::Else,
                TokenKind::While,
                TokenKind::Print,
                TokenKind::True,
                TokenKind::False,
                TokenKind::None,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        // "ಯದಿಕ" starts with the keyword for if but is one identifier
        let tokens = kinds("ಯದಿಕ");
        assert!(matches!(tokens[0], TokenKind::Identifier(ref s) if s == "ಯದಿಕ"));
    }

    #[test]
    fn test_multi_digit_number() {
        let tokens = kinds("೧೨೩ ೦");
        assert!(matches!(tokens[0], TokenKind::Number(123)));
        assert!(matches!(tokens[1], TokenKind::Number(0)));
    }

    #[test]
    fn test_number_overflow_wraps() {
        // 2147483648 does not fit in i32
        let tokens = kinds("೨೧೪೭೪೮೩೬೪೮");
        assert!(matches!(tokens[0], TokenKind::Number(i32::MIN)));
    }

    #[test]
    fn test_identifier_may_contain_digits() {
        let tokens = kinds("ಕ೧");
        assert!(matches!(tokens[0], TokenKind::Identifier(ref s) if s == "ಕ೧"));
    }

    #[test]
    fn test_operators() {
        let tokens = kinds("+ - * / = == ( ) { } ;");

        assert_eq!(
            tokens,
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Assign,
                TokenKind::EqualEqual,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_literal() {
        let tokens = kinds(r#""ನಮಸ್ಕಾರ world""#);

        match &tokens[0] {
            TokenKind::Str(s) => assert_eq!(s, "ನಮಸ್ಕಾರ world"),
            other => panic!("Expected string literal, got {:?}", other),
        }
    }

    #[test]
    fn test_line_numbers() {
        let mut lexer = Lexer::new("ಕ\n\n= \"a\nb\" ;\n");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 3);
        // string opens on line 3 and closes on line 4
        assert_eq!(tokens[2].line, 3);
        assert_eq!(tokens[3].line, 4);
        // trailing newline is counted before end of input
        assert_eq!(lexer.line(), 5);
        assert_eq!(tokens[4].line, 5);
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("ಕ = ೧;\n\"open\n\n").tokenize().unwrap_err();

        assert_eq!(err.message, "Unterminated string literal");
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_unknown_character_advances() {
        let mut lexer = Lexer::new("@ಕ");

        let token = lexer.next_token();
        assert!(matches!(token.kind, TokenKind::Error(_)));
        let token = lexer.next_token();
        assert!(matches!(token.kind, TokenKind::Identifier(ref s) if s == "ಕ"));
    }

    #[test]
    fn test_latin_letters_rejected() {
        let err = Lexer::new("x = ೧;").tokenize().unwrap_err();
        assert_eq!(err.message, "Unexpected character: 'x'");
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_eof_is_idempotent() {
        let mut lexer = Lexer::new("  ");

        for _ in 0..3 {
            assert!(lexer.next_token().is_eof());
        }
    }

    #[test]
    fn test_identifier_length_limit() {
        let long = "ಕ".repeat(MAX_IDENTIFIER_LENGTH / 3 + 1);
        let err = Lexer::new(&long).tokenize().unwrap_err();
        assert!(err.message.contains("maximum length"));
    }

    #[test]
    fn test_decode_widths() {
        assert_eq!(decode_utf8(b"a"), Some(('a' as u32, 1)));
        assert_eq!(decode_utf8("é".as_bytes()), Some((0xE9, 2)));
        assert_eq!(decode_utf8("ಕ".as_bytes()), Some((0x0C95, 3)));
        assert_eq!(decode_utf8("😀".as_bytes()), Some((0x1F600, 4)));
        assert_eq!(decode_utf8(&[0xE0, 0xB2]), Some((REPLACEMENT_CHARACTER, 2)));
        assert_eq!(decode_utf8(&[]), None);
    }
}
