//! CLI command handling
//!
//! Resolves configuration and dispatches commands to the scenario runner.

use colored::Colorize;

use crate::api::Credentials;
use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::{paths, Error, Result};
use crate::testing::{self, HarnessSettings, RunOptions, ScenarioFixtures, StepPlan};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            base_url,
            username,
            password,
            fixtures,
            idempotence_check,
            json,
            verbose,
        } => {
            let mut config = load_config()?;
            if let Some(base_url) = base_url {
                config.api.base_url = base_url;
            }
            if let Some(username) = username {
                config.credentials.username = username;
            }
            if let Some(password) = password {
                config.credentials.password = password;
            }
            if fixtures.is_some() {
                config.scenario.fixtures = fixtures;
            }
            config.scenario.idempotence_check |= idempotence_check;
            config.validate()?;

            let fixtures = match &config.scenario.fixtures {
                Some(path) => ScenarioFixtures::load(path)?,
                None => ScenarioFixtures::default(),
            };

            let settings = HarnessSettings {
                base_url: config.api.base_url.clone(),
                credentials: Credentials::new(
                    config.credentials.username.clone(),
                    config.credentials.password.clone(),
                ),
                http: config.http.clone(),
            };
            let options = RunOptions {
                plan: build_plan(config.scenario.idempotence_check),
                fixtures,
                live_output: !json,
                verbose,
            };

            let report = testing::run_scenario(&settings, &options).await?;

            if json {
                println!("{}", report.to_json()?);
            } else {
                report.print_summary();
            }

            if report.all_passed() {
                Ok(())
            } else {
                Err(Error::ScenarioFailed {
                    failed: report.failed_count(),
                    total: report.total(),
                })
            }
        }

        Commands::Steps { idempotence_check } => {
            let config = load_config()?;
            let plan = build_plan(config.scenario.idempotence_check || idempotence_check);
            println!("{}", "Scenario steps:".cyan());
            for step in plan.steps() {
                println!(
                    "  {:>2}. {}\n      {}",
                    step.number,
                    step.name,
                    step.kind.describe().dimmed()
                );
            }
            Ok(())
        }

        Commands::Config { path } => {
            if path {
                match paths::config_path() {
                    Some(p) => println!("{}", p.display()),
                    None => println!("No configuration directory available on this platform"),
                }
                return Ok(());
            }

            let config = load_config()?;
            println!("[api]");
            println!("base_url = \"{}\"", config.api.base_url);
            println!("\n[credentials]");
            println!("username = \"{}\"", config.credentials.username);
            println!("password = \"<redacted>\"");
            println!("\n[http]");
            match config.http.timeout_secs {
                Some(secs) => println!("timeout_secs = {}", secs),
                None => println!("# timeout_secs unset (client default)"),
            }
            println!("user_agent = \"{}\"", config.http.user_agent);
            println!("\n[scenario]");
            println!("idempotence_check = {}", config.scenario.idempotence_check);
            if let Some(fixtures) = &config.scenario.fixtures {
                println!("fixtures = \"{}\"", fixtures.display());
            }
            Ok(())
        }
    }
}

/// Config file layered under `STORY_HARNESS_*` variables
fn load_config() -> Result<Config> {
    Config::load()?.with_env_overrides()
}

fn build_plan(idempotence_check: bool) -> StepPlan {
    if idempotence_check {
        StepPlan::standard().with_idempotence_check()
    } else {
        StepPlan::standard()
    }
}
