//! CLI command definitions
//!
//! Defines the clap commands for the story harness CLI.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the ordered story scenario against the API
    Run {
        /// API base URL (overrides config and STORY_HARNESS_BASE_URL)
        #[arg(long)]
        base_url: Option<String>,

        /// Login username
        #[arg(long, short)]
        username: Option<String>,

        /// Login password
        #[arg(long, short)]
        password: Option<String>,

        /// YAML file overriding the request payloads
        #[arg(long)]
        fixtures: Option<PathBuf>,

        /// Delete the created story a second time and expect 400
        #[arg(long)]
        idempotence_check: bool,

        /// Print the report as JSON instead of progress lines
        #[arg(long)]
        json: bool,

        /// Verbose output
        #[arg(long, short)]
        verbose: bool,
    },

    /// List the steps of the scenario in execution order
    Steps {
        /// Include the repeat-delete step
        #[arg(long)]
        idempotence_check: bool,
    },

    /// Show the effective configuration
    Config {
        /// Only print the configuration file location
        #[arg(long)]
        path: bool,
    },
}

impl Commands {
    /// Whether debug-level logging was requested
    pub fn verbose(&self) -> bool {
        matches!(self, Commands::Run { verbose: true, .. })
    }
}
