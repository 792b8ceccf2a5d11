//! ballot-cli — replay an election file and report the standings.

mod config;
mod error;
mod replay;

use std::path::{Path, PathBuf};

use ballot_utils::LogFormat;
use clap::Parser;

use config::ElectionFile;
use error::CliError;

#[derive(Parser)]
#[command(name = "ballot-cli", about = "Single-election voting ledger")]
struct Cli {
    /// Log level: "trace", "debug", "info", "warn", "error".
    /// Overrides the election file's `log_level`.
    #[arg(long, env = "BALLOT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json". Overrides the election file's `log_format`.
    #[arg(long, env = "BALLOT_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Replay the election's actions and print the tally.
    Run {
        /// Path to the TOML election file.
        #[arg(long)]
        election: PathBuf,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,

        /// Continue past rejected actions instead of stopping.
        #[arg(long)]
        keep_going: bool,
    },
    /// Validate an election file without replaying it.
    Check {
        /// Path to the TOML election file.
        #[arg(long)]
        election: PathBuf,
    },
    /// Print a starter election file.
    Template,
}

fn load(cli: &Cli, path: &Path) -> anyhow::Result<ElectionFile> {
    let file = ElectionFile::from_toml_file(path)?;
    let format = cli.log_format.unwrap_or(file.log_format);
    let level = cli.log_level.as_deref().unwrap_or(&file.log_level);
    ballot_utils::init_logging(format, level)?;
    tracing::info!("Loaded election from {}", path.display());

    file.validate()?;
    Ok(file)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Template => {
            print!("{}", ElectionFile::template().to_toml_string()?);
        }
        Command::Check { election } => {
            let file = load(&cli, election)?;
            println!(
                "ok: {} proposals, {} actions",
                file.proposals.len(),
                file.actions.len()
            );
        }
        Command::Run {
            election,
            json,
            keep_going,
        } => {
            let file = load(&cli, election)?;
            let mut ledger = replay::open_ledger(&file)?;
            let outcome = replay::replay(&mut ledger, &file.actions, *keep_going)?;
            let report = ledger.report();

            if *json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for entry in &report.entries {
                    println!("{:>3}  {:<32} {}", entry.index, entry.name, entry.vote_count);
                }
                println!(
                    "winner: {} ({})",
                    report.winning_proposal, report.winner_name
                );
                println!(
                    "weight: cast {}, pending {}, granted {}",
                    report.cast_weight, report.pending_weight, report.granted_weight
                );
                for (step, err) in &outcome.rejected {
                    println!("rejected action {step}: {err}");
                }
            }
        }
    }
    Ok(())
}
