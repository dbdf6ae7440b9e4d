//! Lox CLI - command-line interface for the Lox tokenizer.

mod tokenize;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tokenize::{TokenizeOptions, run_tokenize};

/// Environment variable that overrides the log filter.
const LOG_ENV: &str = "LOX_LOG";

/// Lox - tools for the Lox scripting language
#[derive(Parser, Debug)]
#[command(name = "lox")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tools for the Lox scripting language", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging on stderr
    #[arg(short, long, global = true, env = "LOX_VERBOSE")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the tokens of a source file
    ///
    /// Lexical errors are reported on stderr as they are found. The exit
    /// code is 65 when any occurred.
    Tokenize(TokenizeCommand),

    /// Print a shell completion script to stdout
    Completions {
        /// Shell to generate the script for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TokenizeCommand {
    /// File to tokenize
    #[arg(
        value_name = "FILE",
        required_unless_present = "file",
        conflicts_with = "file"
    )]
    path: Option<PathBuf>,

    /// File to tokenize (alternative to the positional argument)
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Keep scanning after an unterminated string, from the next line
    #[arg(long)]
    recover_strings: bool,
}

impl TokenizeCommand {
    fn into_options(self) -> Option<TokenizeOptions> {
        let path = self.path.or(self.file)?;
        Some(TokenizeOptions {
            path,
            recover_strings: self.recover_strings,
        })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }

    match execute_command(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Install the stderr log subscriber.
///
/// The default level is `warn` so that lexical diagnostics are the only
/// thing written to stderr.
fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new("debug"),
        Err(_) => EnvFilter::new("warn"),
    };

    let layer = fmt::layer().with_writer(io::stderr).with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .context("failed to initialize logging")
}

fn execute_command(command: Commands) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Tokenize(args) => {
            let options = args.into_options().context("no input file given")?;
            run_tokenize(&options)
        }
        Commands::Completions { shell } => {
            write_completions(shell, &mut io::stdout());
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Write the completion script for `shell`.
fn write_completions<W: io::Write>(shell: Shell, out: &mut W) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize_args(argv: &[&str]) -> TokenizeCommand {
        match Cli::parse_from(argv).command {
            Commands::Tokenize(args) => args,
            other => panic!("expected tokenize, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_tokenize_positional() {
        let args = tokenize_args(&["lox", "tokenize", "test.lox"]);
        let options = args.into_options().unwrap();
        assert_eq!(options.path, PathBuf::from("test.lox"));
        assert!(!options.recover_strings);
    }

    #[test]
    fn test_cli_parse_tokenize_file_flag() {
        let args = tokenize_args(&["lox", "tokenize", "-f", "test.lox"]);
        let path = args.into_options().unwrap().path;
        assert_eq!(path, PathBuf::from("test.lox"));

        let args = tokenize_args(&["lox", "tokenize", "--file", "other.lox"]);
        let path = args.into_options().unwrap().path;
        assert_eq!(path, PathBuf::from("other.lox"));
    }

    #[test]
    fn test_cli_parse_recover_strings() {
        let argv = ["lox", "tokenize", "--recover-strings", "test.lox"];
        let args = tokenize_args(&argv);
        assert!(args.into_options().unwrap().recover_strings);
    }

    #[test]
    fn test_cli_parse_global_verbose() {
        let cli = Cli::parse_from(["lox", "--verbose", "tokenize", "test.lox"]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["lox", "tokenize"]).is_err());
    }

    #[test]
    fn test_cli_rejects_both_inputs() {
        let argv = ["lox", "tokenize", "a.lox", "-f", "b.lox"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_cli_parse_completions() {
        let cli = Cli::parse_from(["lox", "completions", "zsh"]);
        assert!(matches!(cli.command, Commands::Completions { shell: Shell::Zsh }));
    }

    #[test]
    fn test_write_completions() {
        let mut buf = Vec::new();
        write_completions(Shell::Bash, &mut buf);
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("_lox()"));
        assert!(script.contains("tokenize"));
        assert!(script.contains("--recover-strings"));
    }
}
