//! Story harness CLI
//!
//! Runs the ordered Story API scenario and exits non-zero when
//! authentication or any step fails.

use clap::Parser;
use story_harness::{cli, commands::Commands, common::logging};

#[derive(Parser)]
#[command(name = "story-harness", about = "End-to-end test harness for the Story API")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_cli(cli.command.verbose());

    if let Err(e) = cli::dispatch(cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
