//! The `tokenize` command.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use lox_lexer::{Scanner, ScannerConfig, StringRecovery, Token};
use tracing::{debug, info};

/// Exit code used when the source had lexical errors.
pub const EXIT_LEXICAL_ERROR: u8 = 65;

/// Options for the tokenize command.
#[derive(Debug, Clone)]
pub struct TokenizeOptions {
    pub path: PathBuf,
    pub recover_strings: bool,
}

impl TokenizeOptions {
    fn scanner_config(&self) -> ScannerConfig {
        let string_recovery = if self.recover_strings {
            StringRecovery::SkipLine
        } else {
            StringRecovery::Abort
        };
        ScannerConfig { string_recovery }
    }
}

/// Tokenize a file, printing tokens to stdout and diagnostics to stderr.
///
/// Diagnostics are written as they are found; tokens are printed once the
/// scan is complete, including when errors occurred.
pub fn run_tokenize(options: &TokenizeOptions) -> anyhow::Result<ExitCode> {
    let source = fs::read(&options.path)
        .with_context(|| format!("failed to read {}", options.path.display()))?;
    info!(path = %options.path.display(), bytes = source.len(), "tokenizing");

    let mut stderr = io::stderr().lock();
    let mut tokens = Vec::new();
    let mut error_count = 0usize;
    for item in Scanner::with_config(&source, options.scanner_config()) {
        match item {
            Ok(token) => tokens.push(token),
            Err(error) => {
                error_count += 1;
                writeln!(stderr, "{error}").context("failed to write diagnostic")?;
            }
        }
    }
    drop(stderr);

    let mut stdout = BufWriter::new(io::stdout().lock());
    write_tokens(&mut stdout, &tokens).context("failed to write tokens")?;
    stdout.flush().context("failed to write tokens")?;

    debug!(tokens = tokens.len(), errors = error_count, "tokenize finished");
    if error_count > 0 {
        Ok(ExitCode::from(EXIT_LEXICAL_ERROR))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Write one line per token.
pub fn write_tokens<W: Write>(out: &mut W, tokens: &[Token]) -> io::Result<()> {
    for token in tokens {
        writeln!(out, "{token}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lox_lexer::scan;

    #[test]
    fn test_write_tokens() {
        let output = scan(b"print \"a\" 1;");
        let mut buf = Vec::new();
        write_tokens(&mut buf, &output.tokens).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "PRINT print null\nSTRING \"a\" a\nNUMBER 1 1.0\nSEMICOLON ; null\nEOF  null\n"
        );
    }

    #[test]
    fn test_scanner_config() {
        let mut options = TokenizeOptions {
            path: PathBuf::from("x.lox"),
            recover_strings: false,
        };
        let recovery = options.scanner_config().string_recovery;
        assert_eq!(recovery, StringRecovery::Abort);
        options.recover_strings = true;
        let recovery = options.scanner_config().string_recovery;
        assert_eq!(recovery, StringRecovery::SkipLine);
    }
}
