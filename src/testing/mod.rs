//! Story scenario engine
//!
//! Runs the ordered create/edit/list/delete lifecycle plus negative paths
//! against a live Story API, asserting on status codes and decoded bodies.

pub mod assertions;
mod config;
mod context;
mod report;
mod runner;
mod steps;

pub use config::ScenarioFixtures;
pub use context::ScenarioContext;
pub use report::{RunReport, StepOutcome};
pub use runner::{run_plan, run_scenario, run_scenario_with, HarnessSettings, RunOptions};
pub use steps::*;
