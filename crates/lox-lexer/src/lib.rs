//! Lox lexer - tokenization for the Lox scripting language.
//!
//! This crate turns Lox source bytes into tokens. Scanning never stops at the
//! first problem: lexical errors are collected next to the tokens that were
//! recognized.
//!
//! # Example
//!
//! ```
//! use lox_lexer::{TokenKind, scan};
//!
//! let output = scan(b"var x = 42;");
//! assert!(output.is_ok());
//! assert_eq!(output.tokens[0].kind(), TokenKind::Var);
//! assert_eq!(output.tokens[3].to_string(), "NUMBER 42 42.0");
//! ```

pub mod scanner;
pub mod token;

pub use scanner::{
    LexError, ScanOutput, Scanner, ScannerConfig, StringRecovery, scan, scan_with_config,
};
pub use token::{Literal, Token, TokenKind, format_number, lookup_identifier};
