//! In-process mock of the Story API
//!
//! Serves the login and story endpoints on an ephemeral port from its own
//! thread and runtime, so it can back both async tests and blocking CLI runs.

use std::net::TcpListener as StdTcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::runtime::Builder;
use tokio::sync::oneshot;

pub const USERNAME: &str = "tester";
pub const PASSWORD: &str = "secret";
pub const TOKEN: &str = "mock-token-123";
const BEARER: &str = "Bearer mock-token-123";

/// Deviations from the well-behaved API
#[derive(Debug, Clone, Default)]
pub struct MockBehavior {
    /// Error responses carry no body at all
    pub empty_error_bodies: bool,
    /// Every create fails with 500
    pub reject_creates: bool,
    /// Successful edits answer with plain text instead of JSON
    pub malformed_edit_body: bool,
    /// Error responses carry a well-formed body with an unexpected message
    pub wrong_error_messages: bool,
}

#[derive(Debug, Clone)]
struct Story {
    id: String,
    title: String,
    description: String,
    url: String,
}

struct MockState {
    behavior: MockBehavior,
    stories: Mutex<Vec<Story>>,
    requests: Mutex<Vec<String>>,
}

impl MockState {
    fn record(&self, line: String) {
        self.requests.lock().unwrap().push(line);
    }

    fn error(&self, status: StatusCode, msg: &str) -> Response {
        if self.behavior.empty_error_bodies {
            status.into_response()
        } else if self.behavior.wrong_error_messages {
            (status, Json(json!({ "msg": "Something went wrong" }))).into_response()
        } else {
            (status, Json(json!({ "msg": msg }))).into_response()
        }
    }
}

/// Handle for the mock server; shuts it down on drop
pub struct MockStoryApi {
    base_url: String,
    state: Arc<MockState>,
    shutdown: Option<oneshot::Sender<()>>,
    join: Option<thread::JoinHandle<()>>,
}

impl MockStoryApi {
    pub fn spawn() -> Self {
        Self::spawn_with(MockBehavior::default())
    }

    pub fn spawn_with(behavior: MockBehavior) -> Self {
        let listener = StdTcpListener::bind("127.0.0.1:0").expect("mock api bind");
        listener
            .set_nonblocking(true)
            .expect("mock api listener nonblocking");
        let addr = listener.local_addr().expect("mock api local addr");

        let state = Arc::new(MockState {
            behavior,
            stories: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/User/Authentication", post(login))
            .route("/api/Story/Create", post(create_story))
            .route("/api/Story/Edit/:id", put(edit_story))
            .route("/api/Story/All", get(list_stories))
            .route("/api/Story/Delete/:id", delete(delete_story))
            .with_state(Arc::clone(&state));

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let join = thread::spawn(move || {
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("mock api runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener)
                    .expect("mock api listener from_std");
                let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                });
                let _ = server.await;
            });
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            shutdown: Some(shutdown_tx),
            join: Some(join),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `METHOD /path` of every request received, in arrival order
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn story_count(&self) -> usize {
        self.state.stories.lock().unwrap().len()
    }

    pub fn story_titles(&self) -> Vec<String> {
        self.state
            .stories
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.title.clone())
            .collect()
    }
}

impl Drop for MockStoryApi {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) == Some(BEARER)
}

fn text_field(body: &Value, field: &str) -> String {
    body.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

async fn login(State(state): State<Arc<MockState>>, body: Bytes) -> Response {
    state.record("POST /api/User/Authentication".to_string());

    let Ok(creds) = serde_json::from_slice::<Value>(&body) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    if creds["username"] == USERNAME && creds["password"] == PASSWORD {
        Json(json!({ "username": USERNAME, "accessToken": TOKEN })).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "msg": "Invalid username or password" })),
        )
            .into_response()
    }
}

async fn create_story(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.record("POST /api/Story/Create".to_string());
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if state.behavior.reject_creates {
        return state.error(StatusCode::INTERNAL_SERVER_ERROR, "Create is disabled");
    }

    let Ok(payload) = serde_json::from_slice::<Value>(&body) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let title = text_field(&payload, "Title");
    let description = text_field(&payload, "Description");
    if title.is_empty() || description.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "errors": { "Title": ["The Title field is required."] } })),
        )
            .into_response();
    }

    let id = uuid::Uuid::new_v4().to_string();
    state.stories.lock().unwrap().push(Story {
        id: id.clone(),
        title,
        description,
        url: text_field(&payload, "Url"),
    });

    (
        StatusCode::CREATED,
        Json(json!({ "storyId": id, "msg": "Successfully created!" })),
    )
        .into_response()
}

async fn edit_story(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.record(format!("PUT /api/Story/Edit/{}", id));
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    let found = {
        let mut stories = state.stories.lock().unwrap();
        match stories.iter_mut().find(|s| s.id == id) {
            Some(story) => {
                story.title = text_field(&payload, "Title");
                story.description = text_field(&payload, "Description");
                true
            }
            None => false,
        }
    };
    if !found {
        return state.error(StatusCode::NOT_FOUND, "No spoilers...");
    }

    if state.behavior.malformed_edit_body {
        return (StatusCode::OK, "Successfully edited").into_response();
    }
    Json(json!({ "msg": "Successfully edited" })).into_response()
}

async fn list_stories(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.record("GET /api/Story/All".to_string());
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let stories: Vec<Value> = state
        .stories
        .lock()
        .unwrap()
        .iter()
        .map(|s| json!({ "id": s.id, "title": s.title, "description": s.description, "url": s.url }))
        .collect();
    Json(Value::Array(stories)).into_response()
}

async fn delete_story(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    state.record(format!("DELETE /api/Story/Delete/{}", id));
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let removed = {
        let mut stories = state.stories.lock().unwrap();
        let before = stories.len();
        stories.retain(|s| s.id != id);
        stories.len() != before
    };

    if removed {
        Json(json!({ "msg": "Deleted successfully!" })).into_response()
    } else {
        state.error(StatusCode::BAD_REQUEST, "Unable to delete this story spoiler!")
    }
}
