use crate::config::PlaygroundConfig;
use crate::{BoxStream, Error, ErrorContext, Result};
use bytes::Bytes;
use futures::TryStreamExt;
use reqwest::Proxy;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

/// Client for the external generation endpoint.
///
/// Posts `{ "prompt": ... }` and hands back the raw streamed body; decoding
/// the patch lines is the pipeline's job.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    client: reqwest::Client,
    endpoint: String,
    max_prompt_chars: usize,
}

impl GenerationClient {
    pub fn new(config: &PlaygroundConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
            .pool_idle_timeout(Some(Duration::from_secs(90)));

        if let Some(proxy_url) = &config.proxy {
            match Proxy::all(proxy_url.as_str()) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => {
                    return Err(Error::configuration_with_context(
                        format!("invalid proxy url: {}", e),
                        ErrorContext::new()
                            .with_field_path("proxy")
                            .with_source("generation_client"),
                    ))
                }
            }
        }

        let client = builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            max_prompt_chars: config.max_prompt_chars,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send the prompt and return the response once headers arrive.
    ///
    /// Non-2xx responses are turned into [`Error::Remote`] with the body text.
    pub async fn execute_stream_response(
        &self,
        prompt: &str,
        request_id: Option<&str>,
    ) -> Result<reqwest::Response> {
        let prompt = truncate_prompt(prompt, self.max_prompt_chars);
        let request_id = request_id
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        info!(endpoint = %self.endpoint, request_id = %request_id, chars = prompt.chars().count(), "starting generation");

        let resp = self
            .client
            .post(&self.endpoint)
            .header("x-request-id", request_id.as_str())
            .header("accept", "text/plain")
            .json(&serde_json::json!({ "prompt": prompt }))
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), body = %message, "generation endpoint rejected request");
            return Err(Error::Remote {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp)
    }

    /// Send the prompt and return the streamed body as bytes.
    pub async fn execute_stream(&self, prompt: &str) -> Result<BoxStream<'static, Bytes>> {
        let resp = self.execute_stream_response(prompt, None).await?;

        let byte_stream = resp
            .bytes_stream()
            .map_err(|e| Error::Transport(TransportError::Http(e)));
        Ok(Box::pin(byte_stream))
    }
}

/// At most `max_chars` characters, cut on a character boundary.
pub fn truncate_prompt(prompt: &str, max_chars: usize) -> &str {
    match prompt.char_indices().nth(max_chars) {
        Some((idx, _)) => &prompt[..idx],
        None => prompt,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
