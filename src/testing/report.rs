//! Per-step pass/fail report

use colored::Colorize;
use serde::Serialize;

use crate::common::Result;

use super::steps::{ScenarioStep, StepKind};

/// Result of one executed step
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub number: usize,
    pub name: String,
    pub kind: StepKind,
    pub passed: bool,
    /// Short description of what was observed on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Failure message, including observed status and body where available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub elapsed_ms: u64,
}

impl StepOutcome {
    pub fn passed(step: &ScenarioStep, detail: String, elapsed_ms: u64) -> Self {
        Self {
            number: step.number,
            name: step.name.to_string(),
            kind: step.kind,
            passed: true,
            detail: Some(detail),
            error: None,
            elapsed_ms,
        }
    }

    pub fn failed(step: &ScenarioStep, error: String, elapsed_ms: u64) -> Self {
        Self {
            number: step.number,
            name: step.name.to_string(),
            kind: step.kind,
            passed: false,
            detail: None,
            error: Some(error),
            elapsed_ms,
        }
    }

    /// Print the live progress line for this step
    pub fn print(&self, verbose: bool) {
        if self.passed {
            let detail = if verbose {
                self.detail.as_deref().unwrap_or("")
            } else {
                ""
            };
            println!(
                "  {} Step {}: {} {}",
                "✓".green(),
                self.number,
                self.name,
                detail.dimmed()
            );
        } else {
            println!(
                "  {} Step {}: {}",
                "✗".red(),
                self.number,
                self.name.red()
            );
            if let Some(error) = &self.error {
                println!("      {}", error);
            }
        }
    }
}

/// Outcome of a full run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub base_url: String,
    /// Id recorded by the create step, if it succeeded
    pub story_id: Option<String>,
    pub steps: Vec<StepOutcome>,
}

impl RunReport {
    pub fn total(&self) -> usize {
        self.steps.len()
    }

    pub fn passed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.total() - self.passed_count()
    }

    pub fn all_passed(&self) -> bool {
        self.steps.iter().all(|s| s.passed)
    }

    /// Outcome of the step with this number
    pub fn step(&self, number: usize) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.number == number)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Print the closing summary line
    pub fn print_summary(&self) {
        if self.all_passed() {
            println!(
                "\n{} {}\n",
                "✓".green().bold(),
                format!("All {} steps passed", self.total()).green().bold()
            );
        } else {
            println!(
                "\n{} {}\n",
                "✗".red().bold(),
                format!(
                    "{} passed, {} failed of {} steps",
                    self.passed_count(),
                    self.failed_count(),
                    self.total()
                )
                .red()
                .bold()
            );
        }
    }
}
