//! Mock generation endpoint for integration tests

use json_render_playground::{GenerationClient, Playground, PlaygroundConfig, PlaygroundHandle};
use mockito::{Matcher, Mock, Server, ServerGuard};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

pub const GENERATE_PATH: &str = "/api/generate";

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: Arc<Mutex<ServerGuard>>,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self {
            server: Arc::new(Mutex::new(server)),
            base_url,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, GENERATE_PATH)
    }

    /// Config pointing at the mock, with scripted delays disabled.
    pub fn config(&self) -> PlaygroundConfig {
        PlaygroundConfig {
            endpoint: self.endpoint(),
            timeout_secs: 5,
            typing_delay_ms: 0,
            step_delay_ms: 0,
            ..Default::default()
        }
    }

    /// Start a playground loop talking to this server.
    pub fn spawn_playground(&self) -> PlaygroundHandle {
        let config = self.config();
        let client = GenerationClient::new(&config).expect("client");
        let playground = Playground::new(config, client);
        let handle = playground.handle();
        tokio::spawn(playground.run());
        handle
    }

    /// Respond to any prompt with `lines`, newline-terminated.
    pub async fn mock_patch_stream(&self, lines: &[&str]) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("POST", GENERATE_PATH)
            .with_status(200)
            .with_header("content-type", "text/plain; charset=utf-8")
            .with_body(ndjson(lines))
            .create_async()
            .await
    }

    /// Respond only to `prompt`, after `delay`.
    pub async fn mock_slow_stream(&self, prompt: &str, delay: Duration, lines: &[&str]) -> Mock {
        let body = ndjson(lines);
        let mut server = self.server.lock().await;
        server
            .mock("POST", GENERATE_PATH)
            .match_body(Matcher::PartialJson(serde_json::json!({ "prompt": prompt })))
            .with_status(200)
            .with_header("content-type", "text/plain; charset=utf-8")
            .with_chunked_body(move |w| {
                std::thread::sleep(delay);
                w.write_all(body.as_bytes())
            })
            .create_async()
            .await
    }

    /// Respond only to `prompt`, immediately.
    pub async fn mock_stream_for(&self, prompt: &str, lines: &[&str]) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("POST", GENERATE_PATH)
            .match_body(Matcher::PartialJson(serde_json::json!({ "prompt": prompt })))
            .with_status(200)
            .with_header("content-type", "text/plain; charset=utf-8")
            .with_body(ndjson(lines))
            .create_async()
            .await
    }

    /// Send `lines`, then drop the connection mid-body.
    pub async fn mock_broken_stream(&self, lines: &[&str]) -> Mock {
        let body = ndjson(lines);
        let mut server = self.server.lock().await;
        server
            .mock("POST", GENERATE_PATH)
            .with_status(200)
            .with_header("content-type", "text/plain; charset=utf-8")
            .with_chunked_body(move |w| {
                w.write_all(body.as_bytes())?;
                w.flush()?;
                // Let the written lines reach the client before the body aborts.
                std::thread::sleep(Duration::from_millis(200));
                Err(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "upstream closed",
                ))
            })
            .create_async()
            .await
    }

    /// Create a mock for an error response
    pub async fn mock_error_response(&self, status: usize, body: &str) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("POST", GENERATE_PATH)
            .with_status(status)
            .with_header("content-type", "text/plain")
            .with_body(body)
            .create_async()
            .await
    }
}

pub fn ndjson(lines: &[&str]) -> String {
    lines.iter().map(|l| format!("{}\n", l)).collect()
}
