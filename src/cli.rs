//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};


/// Msglens - CLI for message delivery log analytics and reporting
#[derive(Parser)]
#[command(name = "mlg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}


#[derive(Subcommand)]
enum Commands {
    /// Build a delivery report from JSONL log files
    Report {
        /// Reporting range: 24h, 7d or 30d
        #[arg(short, long, default_value = "24h")]
        range: String,

        /// Reference instant as RFC 3339 (default: now)
        #[arg(long)]
        at: Option<String>,

        /// Print the report as JSON instead of the terminal view
        #[arg(long)]
        json: bool,

        /// JSONL delivery log files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}


/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Report { range, at, json, files }) => {
            crate::commands::report::run(&range, &files, at.as_deref(), json)
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
