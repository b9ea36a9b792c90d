//! Ordered scenario steps
//!
//! A [`StepPlan`] is an explicit, numbered list of steps. Later steps depend
//! on state written by earlier ones through the [`ScenarioContext`]; the
//! dependency is carried by position in the list, not detected at runtime.

use reqwest::StatusCode;
use serde::Serialize;
use uuid::Uuid;

use crate::api::StoryClient;
use crate::common::Result;

use super::assertions::{self, BodyPolicy};
use super::config::ScenarioFixtures;
use super::context::ScenarioContext;

pub const EDITED_MESSAGE: &str = "Successfully edited";
pub const DELETED_MESSAGE: &str = "Deleted successfully!";
pub const NOT_FOUND_MESSAGE: &str = "No spoilers...";
pub const DELETE_FAILED_MESSAGE: &str = "Unable to delete this story spoiler!";

/// Field of the create response holding the new story's id
pub const STORY_ID_FIELD: &str = "storyId";

/// The operation a step performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Create a story and record its id
    CreateStory,
    /// Edit the recorded story
    EditStory,
    /// List all stories
    ListStories,
    /// Delete the recorded story
    DeleteStory,
    /// Create with empty title and description
    CreateMissingFields,
    /// Edit a random id that does not exist
    EditNonExisting,
    /// Delete a random id that does not exist
    DeleteNonExisting,
    /// Delete the recorded story a second time
    DeleteAlreadyDeleted,
}

impl StepKind {
    /// Name shown in reports
    pub fn name(self) -> &'static str {
        match self {
            Self::CreateStory => "create_story_returns_created",
            Self::EditStory => "edit_story_title_returns_ok",
            Self::ListStories => "list_stories_returns_all_items",
            Self::DeleteStory => "delete_story_returns_ok",
            Self::CreateMissingFields => "create_story_missing_fields_returns_bad_request",
            Self::EditNonExisting => "edit_non_existing_story_returns_not_found",
            Self::DeleteNonExisting => "delete_non_existing_story_returns_bad_request",
            Self::DeleteAlreadyDeleted => "delete_story_twice_returns_bad_request",
        }
    }

    /// One-line summary of the request and expectation
    pub fn describe(self) -> &'static str {
        match self {
            Self::CreateStory => "POST /api/Story/Create -> 201 + storyId",
            Self::EditStory => "PUT /api/Story/Edit/{id} -> 200 + \"Successfully edited\"",
            Self::ListStories => "GET /api/Story/All -> 200 + non-empty list",
            Self::DeleteStory => "DELETE /api/Story/Delete/{id} -> 200 + \"Deleted successfully!\"",
            Self::CreateMissingFields => "POST /api/Story/Create (empty fields) -> 400",
            Self::EditNonExisting => "PUT /api/Story/Edit/{random} -> 404",
            Self::DeleteNonExisting => "DELETE /api/Story/Delete/{random} -> 400",
            Self::DeleteAlreadyDeleted => "DELETE /api/Story/Delete/{id} again -> 400",
        }
    }

    /// Whether the step reads the recorded story id
    pub fn reads_story_id(self) -> bool {
        matches!(
            self,
            Self::EditStory | Self::DeleteStory | Self::DeleteAlreadyDeleted
        )
    }
}

/// A step with its fixed position in the sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScenarioStep {
    pub number: usize,
    pub name: &'static str,
    pub kind: StepKind,
}

/// Explicit ordered list of steps
#[derive(Debug, Clone)]
pub struct StepPlan {
    steps: Vec<ScenarioStep>,
}

impl StepPlan {
    /// The seven-step lifecycle and negative-path sequence
    pub fn standard() -> Self {
        Self::from_kinds(&[
            StepKind::CreateStory,
            StepKind::EditStory,
            StepKind::ListStories,
            StepKind::DeleteStory,
            StepKind::CreateMissingFields,
            StepKind::EditNonExisting,
            StepKind::DeleteNonExisting,
        ])
    }

    /// Append a repeat delete of the story removed by the delete step
    pub fn with_idempotence_check(mut self) -> Self {
        self.push(StepKind::DeleteAlreadyDeleted);
        self
    }

    /// Build a plan numbering `kinds` from 1 in the given order
    pub fn from_kinds(kinds: &[StepKind]) -> Self {
        let mut plan = Self { steps: Vec::new() };
        for kind in kinds {
            plan.push(*kind);
        }
        plan
    }

    fn push(&mut self, kind: StepKind) {
        self.steps.push(ScenarioStep {
            number: self.steps.len() + 1,
            name: kind.name(),
            kind,
        });
    }

    pub fn steps(&self) -> &[ScenarioStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Execute a single step, returning a short detail line on success
pub async fn execute_step(
    client: &StoryClient,
    ctx: &mut ScenarioContext,
    fixtures: &ScenarioFixtures,
    step: &ScenarioStep,
) -> Result<String> {
    match step.kind {
        StepKind::CreateStory => execute_create_step(client, ctx, fixtures).await,
        StepKind::EditStory => execute_edit_step(client, ctx, fixtures, step.name).await,
        StepKind::ListStories => execute_list_step(client).await,
        StepKind::DeleteStory => execute_delete_step(client, ctx, step.name).await,
        StepKind::CreateMissingFields => execute_create_invalid_step(client, fixtures).await,
        StepKind::EditNonExisting => execute_edit_missing_step(client, fixtures).await,
        StepKind::DeleteNonExisting => {
            let id = random_story_id();
            execute_delete_missing_step(client, &id).await
        }
        StepKind::DeleteAlreadyDeleted => {
            let id = ctx.require_story_id(step.name)?.to_string();
            execute_delete_missing_step(client, &id).await
        }
    }
}

/// Id that no story can have been assigned yet
pub fn random_story_id() -> String {
    Uuid::new_v4().to_string()
}

async fn execute_create_step(
    client: &StoryClient,
    ctx: &mut ScenarioContext,
    fixtures: &ScenarioFixtures,
) -> Result<String> {
    let response = client.create_story(&fixtures.create).await?;

    assertions::expect_status(&response, StatusCode::CREATED)?;
    let json = assertions::decode_json(&response)?;
    let id = assertions::expect_non_empty_string(&json, STORY_ID_FIELD, &response)?;

    ctx.record_story_id(id.clone());
    Ok(format!("created story {}", id))
}

async fn execute_edit_step(
    client: &StoryClient,
    ctx: &ScenarioContext,
    fixtures: &ScenarioFixtures,
    step_name: &str,
) -> Result<String> {
    let id = ctx.require_story_id(step_name)?;
    let response = client.edit_story(id, &fixtures.edit).await?;

    assertions::expect_status(&response, StatusCode::OK)?;
    assertions::expect_message(&response, EDITED_MESSAGE, BodyPolicy::Required)?;

    Ok(format!("edited story {}", id))
}

async fn execute_list_step(client: &StoryClient) -> Result<String> {
    let response = client.list_stories().await?;

    assertions::expect_status(&response, StatusCode::OK)?;
    let count = assertions::expect_non_empty_list(&response)?;

    Ok(format!("{} stories listed", count))
}

async fn execute_delete_step(
    client: &StoryClient,
    ctx: &ScenarioContext,
    step_name: &str,
) -> Result<String> {
    let id = ctx.require_story_id(step_name)?;
    let response = client.delete_story(id).await?;

    assertions::expect_status(&response, StatusCode::OK)?;
    assertions::expect_body_contains(&response, DELETED_MESSAGE)?;

    Ok(format!("deleted story {}", id))
}

async fn execute_create_invalid_step(
    client: &StoryClient,
    fixtures: &ScenarioFixtures,
) -> Result<String> {
    let response = client.create_story(&fixtures.invalid_create).await?;

    assertions::expect_status(&response, StatusCode::BAD_REQUEST)?;

    Ok("rejected".to_string())
}

async fn execute_edit_missing_step(
    client: &StoryClient,
    fixtures: &ScenarioFixtures,
) -> Result<String> {
    let id = random_story_id();
    let response = client.edit_story(&id, &fixtures.edit_missing).await?;

    assertions::expect_status(&response, StatusCode::NOT_FOUND)?;
    let checked = assertions::expect_message(&response, NOT_FOUND_MESSAGE, BodyPolicy::IfPresent)?;

    Ok(outcome_detail(&id, checked))
}

async fn execute_delete_missing_step(client: &StoryClient, id: &str) -> Result<String> {
    let response = client.delete_story(id).await?;

    assertions::expect_status(&response, StatusCode::BAD_REQUEST)?;
    let checked =
        assertions::expect_message(&response, DELETE_FAILED_MESSAGE, BodyPolicy::IfPresent)?;

    Ok(outcome_detail(id, checked))
}

fn outcome_detail(id: &str, body_checked: bool) -> String {
    if body_checked {
        format!("id {}", id)
    } else {
        format!("id {} (empty body, message not checked)", id)
    }
}
