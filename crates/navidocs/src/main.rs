//! navidocs CLI - Navi documentation site.
//!
//! Provides commands for:
//! - `serve`: Start the documentation API server
//! - `routes`: Print the route table
//! - `check`: Resolve every page in every declared language

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, RoutesArgs, ServeArgs};
use error::CliError;
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// navidocs - Navi documentation site.
#[derive(Parser)]
#[command(name = "navidocs", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the documentation API server.
    Serve(ServeArgs),
    /// Print the route table.
    Routes(RoutesArgs),
    /// Resolve every page and report missing content.
    Check(CheckArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Serve(args) => args.verbose,
            Self::Check(args) => args.verbose,
            Self::Routes(_) => false,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Serve(args) => block_on(args.execute(VERSION)),
        Commands::Routes(args) => args.execute(VERSION),
        Commands::Check(args) => block_on(args.execute(VERSION)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}

fn block_on(future: impl Future<Output = Result<(), CliError>>) -> Result<(), CliError> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(future)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from([
            "navidocs", "serve", "-c", "navidocs.toml", "-p", "9000", "--routes", "routes.yaml",
            "-v",
        ])
        .unwrap();

        assert!(cli.command.verbose());
        assert!(matches!(cli.command, Commands::Serve(_)));
    }

    #[test]
    fn test_parse_routes_with_language() {
        let cli = Cli::try_parse_from(["navidocs", "routes", "--lang", "ja"]).unwrap();

        assert!(!cli.command.verbose());
        assert!(matches!(cli.command, Commands::Routes(_)));
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["navidocs", "check", "-s", "content"]).unwrap();

        assert!(matches!(cli.command, Commands::Check(_)));
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(Cli::try_parse_from(["navidocs", "publish"]).is_err());
    }
}
