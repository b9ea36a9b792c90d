//! Scenario runner
//!
//! Authenticates once, builds the authenticated client, then drives the step
//! plan strictly in order. A failing step is recorded and the loop moves on;
//! only authentication failures abort the run.

use std::time::Instant;

use colored::Colorize;
use tracing::Instrument;

use crate::api::{CredentialProvider, Credentials, LoginEndpoint, StoryClient};
use crate::common::config::{validate_base_url, HttpConfig};
use crate::common::Result;

use super::config::ScenarioFixtures;
use super::context::ScenarioContext;
use super::report::{RunReport, StepOutcome};
use super::steps::{execute_step, StepPlan};

/// Where the run connects and as whom
#[derive(Debug, Clone)]
pub struct HarnessSettings {
    pub base_url: String,
    pub credentials: Credentials,
    pub http: HttpConfig,
}

/// What the run executes and how it reports
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub plan: StepPlan,
    pub fixtures: ScenarioFixtures,
    /// Print progress lines while steps run
    pub live_output: bool,
    pub verbose: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            plan: StepPlan::standard(),
            fixtures: ScenarioFixtures::default(),
            live_output: false,
            verbose: false,
        }
    }
}

/// Run the scenario against the API's own login endpoint
pub async fn run_scenario(settings: &HarnessSettings, options: &RunOptions) -> Result<RunReport> {
    validate_base_url(&settings.base_url)?;
    let provider = LoginEndpoint::new(&settings.base_url, &settings.http)?;
    run_scenario_with(&provider, settings, options).await
}

/// Run the scenario with an arbitrary credential provider
///
/// Returns `Err` only when no token could be obtained; step failures are
/// reported inside the [`RunReport`].
pub async fn run_scenario_with(
    provider: &dyn CredentialProvider,
    settings: &HarnessSettings,
    options: &RunOptions,
) -> Result<RunReport> {
    if options.live_output {
        println!(
            "\n{} {}",
            "Running Scenario:".blue().bold(),
            settings.base_url.white().bold()
        );
    }

    let token = provider.authenticate(&settings.credentials).await?;
    let client = StoryClient::build(&settings.base_url, &token, &settings.http)?;

    if options.live_output {
        println!("  {} Authenticated as {}", "✓".green(), settings.credentials.username);
        println!("\n{}", "Steps:".cyan());
    }

    let report = run_plan(&client, options).await;

    // Released before the report is returned, whatever the outcome
    drop(client);

    Ok(report)
}

/// Execute every step of the plan in order with a fresh context
pub async fn run_plan(client: &StoryClient, options: &RunOptions) -> RunReport {
    let mut ctx = ScenarioContext::new();
    let mut outcomes = Vec::with_capacity(options.plan.len());

    for step in options.plan.steps() {
        let span = tracing::info_span!("step", number = step.number, name = step.name);
        let started = Instant::now();

        let result = execute_step(client, &mut ctx, &options.fixtures, step)
            .instrument(span)
            .await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let outcome = match result {
            Ok(detail) => {
                tracing::info!(step = step.number, name = step.name, elapsed_ms, "Step passed");
                StepOutcome::passed(step, detail, elapsed_ms)
            }
            Err(e) => {
                tracing::warn!(step = step.number, name = step.name, error = %e, "Step failed");
                StepOutcome::failed(step, e.to_string(), elapsed_ms)
            }
        };

        if options.live_output {
            outcome.print(options.verbose);
        }
        outcomes.push(outcome);
    }

    RunReport {
        base_url: client.base_url().to_string(),
        story_id: ctx.created_story_id().map(str::to_string),
        steps: outcomes,
    }
}
