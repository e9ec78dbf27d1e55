//! Command line entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
};
use ioblate::Workspace;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "ioblate", version)]
#[command(about = "Moves translation dictionaries between sources and per-locale JSON files")]
struct Cli {
    /// Workspace root
    #[arg(short = 'C', long = "directory", default_value = ".")]
    directory: PathBuf,

    /// What to run.
    #[command(subcommand)]
    command: Command,
}

/// The two directions translations move in.
#[derive(Debug, Subcommand)]
enum Command {
    /// Collect dictionary literals into the per-locale datasets
    Load,
    /// Write the dataset translations back into the sources
    Save,
}

/// Runs one command and maps its outcome to the exit status.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let workspace = match Workspace::open(&cli.directory) {
        Ok(workspace) => workspace,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::Load => {
            let report = workspace.load();
            tracing::info!(
                files = report.scanned_files,
                literals = report.literals,
                created = report.created.len(),
                updated = report.updated.len(),
                errors = report.errors.len(),
                "Load finished"
            );
        }
        Command::Save => {
            let report = workspace.save();
            tracing::info!(
                updated = report.updated_files.len(),
                unchanged = report.unchanged_files.len(),
                sections = report.replaced_sections,
                errors = report.errors.len(),
                "Save finished"
            );
        }
    }

    ExitCode::SUCCESS
}
