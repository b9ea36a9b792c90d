//! Shared helpers for the integration tests
#![allow(dead_code)]

pub mod mock_api;

use story_harness::common::config::HttpConfig;
use story_harness::{Credentials, HarnessSettings};

pub use mock_api::{MockBehavior, MockStoryApi, PASSWORD, TOKEN, USERNAME};

/// Settings pointing at a mock server with valid credentials
pub fn settings_for(api: &MockStoryApi) -> HarnessSettings {
    HarnessSettings {
        base_url: api.base_url().to_string(),
        credentials: Credentials::new(USERNAME, PASSWORD),
        http: HttpConfig::default(),
    }
}

/// A local URL nothing is listening on
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind closed port");
    let addr = listener.local_addr().expect("closed port local addr");
    drop(listener);
    format!("http://{}", addr)
}

/// A listener whose connections are accepted by the kernel but never answered
pub fn silent_listener() -> (std::net::TcpListener, String) {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind silent listener");
    let url = format!("http://{}", listener.local_addr().expect("silent local addr"));
    (listener, url)
}
