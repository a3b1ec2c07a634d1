//! Runtime configuration.
//!
//! Resolution order: built-in defaults, then an optional YAML file, then
//! environment variables (env wins).
//!
//! | Field | Env | Default |
//! |-------|-----|---------|
//! | `endpoint` | `PLAYGROUND_ENDPOINT` | `http://localhost:3000/api/generate` |
//! | `timeout_secs` | `PLAYGROUND_HTTP_TIMEOUT_SECS` | 60 |
//! | `proxy` | `PLAYGROUND_PROXY_URL` | none |
//! | `typing_delay_ms` | `PLAYGROUND_TYPING_DELAY_MS` | 20 |
//! | `step_delay_ms` | `PLAYGROUND_STEP_DELAY_MS` | 400 |
//! | `max_prompt_chars` | | 140 |

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/generate";
pub const MAX_PROMPT_CHARS: usize = 140;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Generation endpoint receiving `POST { "prompt": ... }`.
    pub endpoint: String,
    pub timeout_secs: u64,
    pub proxy: Option<String>,
    /// Delay between typed characters in the scripted demo.
    pub typing_delay_ms: u64,
    /// Delay between revealed patch lines in the scripted demo.
    pub step_delay_ms: u64,
    pub max_prompt_chars: usize,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 60,
            proxy: None,
            typing_delay_ms: 20,
            step_delay_ms: 400,
            max_prompt_chars: MAX_PROMPT_CHARS,
        }
    }
}

impl PlaygroundConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    /// Defaults or `path`, then process environment, then validation.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        let cfg = base.with_overrides(|name| std::env::var(name).ok());
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `PLAYGROUND_*` overrides from `lookup`. Unparsable numbers are
    /// ignored with a warning.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PLAYGROUND_ENDPOINT") {
            self.endpoint = v;
        }
        if let Some(v) = lookup("PLAYGROUND_PROXY_URL") {
            self.proxy = if v.trim().is_empty() { None } else { Some(v) };
        }
        if let Some(v) = parse_var(&lookup, "PLAYGROUND_HTTP_TIMEOUT_SECS") {
            self.timeout_secs = v;
        }
        if let Some(v) = parse_var(&lookup, "PLAYGROUND_TYPING_DELAY_MS") {
            self.typing_delay_ms = v;
        }
        if let Some(v) = parse_var(&lookup, "PLAYGROUND_STEP_DELAY_MS") {
            self.step_delay_ms = v;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.endpoint).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid endpoint url: {}", e),
                ErrorContext::new()
                    .with_field_path("endpoint")
                    .with_details(self.endpoint.clone())
                    .with_source("config_loader"),
            )
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::configuration_with_context(
                "endpoint must be http or https",
                ErrorContext::new()
                    .with_field_path("endpoint")
                    .with_details(url.scheme().to_string())
                    .with_source("config_loader"),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::configuration_with_context(
                "timeout must be at least one second",
                ErrorContext::new()
                    .with_field_path("timeout_secs")
                    .with_source("config_loader"),
            ));
        }
        if self.max_prompt_chars == 0 {
            return Err(Error::configuration_with_context(
                "max_prompt_chars must be positive",
                ErrorContext::new()
                    .with_field_path("max_prompt_chars")
                    .with_source("config_loader"),
            ));
        }
        Ok(())
    }

    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

fn parse_var<F, T>(lookup: &F, name: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(name)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(var = name, value = %raw, "ignoring unparsable environment override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = PlaygroundConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.max_prompt_chars, 140);
        assert_eq!(cfg.step_delay(), Duration::from_millis(400));
    }

    #[test]
    fn test_yaml_partial_file_keeps_defaults() {
        let cfg = PlaygroundConfig::from_yaml_str("endpoint: https://example.com/api/generate\nstep_delay_ms: 5\n")
            .unwrap();
        assert_eq!(cfg.endpoint, "https://example.com/api/generate");
        assert_eq!(cfg.step_delay_ms, 5);
        assert_eq!(cfg.typing_delay_ms, 20);
    }

    #[test]
    fn test_env_overrides_win() {
        let env: HashMap<&str, &str> = [
            ("PLAYGROUND_ENDPOINT", "http://127.0.0.1:9/gen"),
            ("PLAYGROUND_TYPING_DELAY_MS", "1"),
            ("PLAYGROUND_STEP_DELAY_MS", "soon"),
        ]
        .into_iter()
        .collect();
        let cfg = PlaygroundConfig::default().with_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.endpoint, "http://127.0.0.1:9/gen");
        assert_eq!(cfg.typing_delay_ms, 1);
        assert_eq!(cfg.step_delay_ms, 400);
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let cfg = PlaygroundConfig {
            endpoint: "ftp://example.com".into(),
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("endpoint"));

        let cfg = PlaygroundConfig {
            endpoint: "not a url".into(),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
