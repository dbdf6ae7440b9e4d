//! Scanner for the Lox scripting language.

use std::iter::FusedIterator;

use thiserror::Error;
use tracing::{debug, trace};

use crate::token::{Token, TokenKind, lookup_identifier};

/// Errors that can occur during scanning.
///
/// The `Display` form is the diagnostic line reported to users.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("[line {line}] Error: Unterminated string.")]
    UnterminatedString { line: usize },

    #[error("[line {line}] Error: Invalid number: {lexeme}")]
    InvalidNumber { lexeme: String, line: usize },

    #[error("[line {line}] Error: Unexpected character: {lexeme}")]
    UnexpectedCharacter { lexeme: String, line: usize },
}

impl LexError {
    /// 1-indexed line the error was detected on.
    pub fn line(&self) -> usize {
        match self {
            LexError::UnterminatedString { line }
            | LexError::InvalidNumber { line, .. }
            | LexError::UnexpectedCharacter { line, .. } => *line,
        }
    }

    /// The fixed category message.
    pub fn message(&self) -> &'static str {
        match self {
            LexError::UnterminatedString { .. } => "Unterminated string",
            LexError::InvalidNumber { .. } => "Invalid number",
            LexError::UnexpectedCharacter { .. } => "Unexpected character",
        }
    }

    /// The offending text, empty when there is none.
    pub fn lexeme(&self) -> &str {
        match self {
            LexError::UnterminatedString { .. } => "",
            LexError::InvalidNumber { lexeme, .. }
            | LexError::UnexpectedCharacter { lexeme, .. } => lexeme,
        }
    }
}

/// What to do after an unterminated string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringRecovery {
    /// Abandon the rest of the input.
    #[default]
    Abort,
    /// Resume at the newline following the opening quote.
    SkipLine,
}

/// Configuration for the scanner.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScannerConfig {
    pub string_recovery: StringRecovery,
}

/// Scanner turns Lox source bytes into tokens.
///
/// Iterating yields tokens and errors in source order and stops after the
/// end-of-input token.
pub struct Scanner<'a> {
    source: &'a [u8],
    config: ScannerConfig,
    cursor: usize,
    line: usize,
    finished: bool,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner with the default configuration.
    pub fn new(source: &'a [u8]) -> Self {
        Self::with_config(source, ScannerConfig::default())
    }

    /// Create a new scanner with the given configuration.
    pub fn with_config(source: &'a [u8], config: ScannerConfig) -> Self {
        Self {
            source,
            config,
            cursor: 0,
            line: 0,
            finished: false,
        }
    }

    /// The 1-indexed line the cursor is on.
    pub fn line_number(&self) -> usize {
        self.line + 1
    }

    fn peek(&self) -> Option<u8> {
        self.source.get(self.cursor).copied()
    }

    fn peek_next(&self) -> Option<u8> {
        self.source.get(self.cursor + 1).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.cursor += 1;
        Some(byte)
    }

    /// Consume the next byte if it is `expected`.
    fn match_byte(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Emit `combined` if an `=` follows, otherwise `single`.
    fn with_equal(&mut self, single: TokenKind, combined: TokenKind) -> Token {
        let kind = if self.match_byte(b'=') {
            combined
        } else {
            single
        };
        Token::from_kind(kind, self.line_number())
    }

    /// Move the cursor to the next newline (not consuming it), or to the end.
    fn skip_to_end_of_line(&mut self) {
        self.cursor = self.source[self.cursor..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(self.source.len(), |offset| self.cursor + offset);
    }

    fn text(&self, start: usize, end: usize) -> String {
        let bytes = &self.source[start..end];
        String::from_utf8_lossy(bytes).into_owned()
    }

    /// Read a string literal. `start` is the offset of the opening quote.
    fn read_string(&mut self, start: usize) -> Result<Token, LexError> {
        let line = self.line_number();
        let body = self.cursor;

        let Some(len) = self.source[body..].iter().position(|&b| b == b'"') else {
            match self.config.string_recovery {
                StringRecovery::Abort => self.cursor = self.source.len(),
                StringRecovery::SkipLine => self.skip_to_end_of_line(),
            }
            return Err(LexError::UnterminatedString { line });
        };

        self.cursor = body + len + 1;
        let lexeme = self.text(start, self.cursor);
        let value = self.text(body, body + len);
        Ok(Token::string(lexeme, value, line))
    }

    /// Read a number literal. `start` is the offset of its first digit.
    fn read_number(&mut self, start: usize) -> Result<Token, LexError> {
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.cursor += 1;
        }

        // A trailing `.` stays behind to be scanned as its own token.
        if self.peek() == Some(b'.') && self.peek_next().is_some_and(|b| b.is_ascii_digit()) {
            self.cursor += 1;
            while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                self.cursor += 1;
            }
        }

        let lexeme = self.text(start, self.cursor);
        let line = self.line_number();
        match lexeme.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Token::number(lexeme, value, line)),
            _ => Err(LexError::InvalidNumber { lexeme, line }),
        }
    }

    /// Read an identifier or keyword. `start` is the offset of its first byte.
    fn read_identifier(&mut self, start: usize) -> Token {
        while self.peek().is_some_and(is_alphanumeric) {
            self.cursor += 1;
        }
        let lexeme = self.text(start, self.cursor);
        let line = self.line_number();
        match lookup_identifier(&lexeme) {
            TokenKind::Identifier => Token::identifier(lexeme, line),
            keyword => Token::from_kind(keyword, line),
        }
    }

    /// Scan the next item, skipping whitespace and comments.
    fn scan_item(&mut self) -> Option<Result<Token, LexError>> {
        loop {
            let start = self.cursor;
            let byte = self.advance()?;

            if let Some(kind) = single_char_kind(byte) {
                return Some(Ok(Token::from_kind(kind, self.line_number())));
            }

            let item = match byte {
                b'\n' => {
                    self.line += 1;
                    continue;
                }
                b' ' | b'\r' | b'\t' => continue,
                b'=' => Ok(self.with_equal(TokenKind::Equal, TokenKind::EqualEqual)),
                b'!' => Ok(self.with_equal(TokenKind::Bang, TokenKind::BangEqual)),
                b'<' => Ok(self.with_equal(TokenKind::Less, TokenKind::LessEqual)),
                b'>' => Ok(self.with_equal(TokenKind::Greater, TokenKind::GreaterEqual)),
                b'/' => {
                    if self.match_byte(b'/') {
                        self.skip_to_end_of_line();
                        continue;
                    }
                    Ok(Token::from_kind(TokenKind::Slash, self.line_number()))
                }
                b'"' => self.read_string(start),
                b if b.is_ascii_digit() => self.read_number(start),
                b if is_letter(b) => Ok(self.read_identifier(start)),
                other => Err(LexError::UnexpectedCharacter {
                    lexeme: char::from(other).to_string(),
                    line: self.line_number(),
                }),
            };
            return Some(item);
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let item = self.scan_item().unwrap_or_else(|| {
            self.finished = true;
            Ok(Token::eof(self.line_number()))
        });

        match &item {
            Ok(token) => trace!(kind = %token.kind(), line = token.line(), "token"),
            Err(error) => trace!(%error, "lexical error"),
        }
        Some(item)
    }
}

impl FusedIterator for Scanner<'_> {}

/// Map single-character punctuation to its kind.
fn single_char_kind(byte: u8) -> Option<TokenKind> {
    match byte {
        b'(' => Some(TokenKind::LeftParen),
        b')' => Some(TokenKind::RightParen),
        b'{' => Some(TokenKind::LeftBrace),
        b'}' => Some(TokenKind::RightBrace),
        b',' => Some(TokenKind::Comma),
        b'.' => Some(TokenKind::Dot),
        b'-' => Some(TokenKind::Minus),
        b'+' => Some(TokenKind::Plus),
        b';' => Some(TokenKind::Semicolon),
        b'*' => Some(TokenKind::Star),
        _ => None,
    }
}

/// Check if a byte may start an identifier.
fn is_letter(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

/// Check if a byte may continue an identifier.
fn is_alphanumeric(byte: u8) -> bool {
    is_letter(byte) || byte.is_ascii_digit()
}

/// The tokens and errors produced by one scan.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanOutput {
    /// Recognized tokens, always ending with exactly one `Eof`.
    pub tokens: Vec<Token>,
    /// Lexical errors in the order they were found.
    pub errors: Vec<LexError>,
}

impl ScanOutput {
    /// True when no lexical errors occurred.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

impl FromIterator<Result<Token, LexError>> for ScanOutput {
    fn from_iter<I: IntoIterator<Item = Result<Token, LexError>>>(iter: I) -> Self {
        let mut output = ScanOutput::default();
        for item in iter {
            match item {
                Ok(token) => output.tokens.push(token),
                Err(error) => output.errors.push(error),
            }
        }
        output
    }
}

/// Scan source bytes with the default configuration.
pub fn scan(source: &[u8]) -> ScanOutput {
    scan_with_config(source, ScannerConfig::default())
}

/// Scan source bytes with the given configuration.
pub fn scan_with_config(source: &[u8], config: ScannerConfig) -> ScanOutput {
    let output: ScanOutput = Scanner::with_config(source, config).collect();
    debug!(
        bytes = source.len(),
        tokens = output.tokens.len(),
        errors = output.errors.len(),
        "scan finished"
    );
    output
}
