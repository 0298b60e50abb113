use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use contrib_core::ContributionType;

/// Preview and commit retirement contribution changes.
///
/// Loads the plan from the configured settings backend, applies the requested
/// edits to a pending election, and shows the projected balance at retirement
/// next to the change relative to the saved election.
#[derive(Debug, Parser)]
#[command(name = "contrib", version)]
pub struct Cli {
    /// TOML configuration file. Defaults to `./contrib.toml` when present.
    #[arg(long, env = "CONTRIB_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Settings backend (`sqlite` or `http`). Overrides the config file.
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Backend connection string: a database path for `sqlite`, a base URL
    /// for `http`. Overrides the config file.
    #[arg(long, global = true)]
    pub connection: Option<String>,

    /// Log filter, e.g. `debug` or `contrib_core=trace`. `RUST_LOG` wins when set.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show the plan, the saved election and its projection.
    Show,
    /// Apply edits to a pending election and show its impact without saving.
    Preview(EditArgs),
    /// Apply edits and submit them to the settings backend.
    Save(EditArgs),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct EditArgs {
    /// Contribution mode: `percent` or `dollar`.
    #[arg(long = "type", value_parser = parse_contribution_type)]
    pub contribution_type: Option<ContributionType>,

    /// Contribution value: a percentage of salary or a per-paycheck amount.
    #[arg(long, allow_hyphen_values = true)]
    pub value: Option<String>,
}

fn parse_contribution_type(s: &str) -> Result<ContributionType, String> {
    ContributionType::parse(s).ok_or_else(|| format!("'{s}' is not one of: percent, dollar"))
}
