//! Relay configuration.
//!
//! Nothing here is read from ambient globals at call time: the binary resolves
//! the values once and hands them to the client and orchestrator.

use std::time::Duration;

use url::Url;

use crate::error::{RelayError, RelayResult};
use crate::pricing::Pricing;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Credentials and endpoint for the remote assistant API.
#[derive(Clone)]
pub struct OpenAiConfig {
    /// Bearer credential sent on every call.
    pub api_key: String,
    /// API root, e.g. `https://api.openai.com/v1`.
    pub base_url: Url,
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>, base_url: &str) -> RelayResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(RelayError::Config("OPENAI_API_KEY is required".to_string()));
        }
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| RelayError::Config(format!("invalid base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(RelayError::Config(format!(
                "base URL '{base_url}' cannot hold a path"
            )));
        }
        Ok(Self { api_key, base_url })
    }

    /// Reads configuration from environment variables.
    ///
    /// | Variable          | Default                      |
    /// |-------------------|------------------------------|
    /// | `OPENAI_API_KEY`  | required                     |
    /// | `OPENAI_BASE_URL` | `https://api.openai.com/v1`  |
    pub fn from_env() -> RelayResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> RelayResult<Self> {
        let api_key = lookup("OPENAI_API_KEY")
            .ok_or_else(|| RelayError::Config("OPENAI_API_KEY is required".to_string()))?;
        let base_url =
            lookup("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());
        Self::new(api_key, &base_url)
    }

    /// Absolute URL for an API path given as segments, e.g.
    /// `["threads", thread_id, "runs"]`.
    ///
    /// Each segment is percent-encoded on its own, so `/`, `?` and `#` inside
    /// an id cannot change which resource is addressed.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Timing and pricing knobs for the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrchestratorConfig {
    /// Hard cap on time spent polling a run.
    pub run_timeout: Duration,
    /// Delay between status polls.
    pub poll_interval: Duration,
    pub pricing: Pricing,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            run_timeout: DEFAULT_RUN_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            pricing: Pricing::DEFAULT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_horizon() {
        let config = OrchestratorConfig::default();
        assert_eq!(config.run_timeout, Duration::from_millis(60_000));
        assert_eq!(config.poll_interval, Duration::from_millis(1_000));
        assert_eq!(config.pricing, Pricing::DEFAULT);
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = OpenAiConfig::new("sk-test", "https://api.openai.com/v1/").unwrap();
        assert_eq!(
            config.endpoint(&["threads", "t1", "runs"]).as_str(),
            "https://api.openai.com/v1/threads/t1/runs"
        );
    }

    #[test]
    fn endpoint_on_bare_host() {
        let config = OpenAiConfig::new("sk-test", "http://127.0.0.1:8080/").unwrap();
        assert_eq!(
            config.endpoint(&["assistants", "asst_1"]).as_str(),
            "http://127.0.0.1:8080/assistants/asst_1"
        );
    }

    #[test]
    fn endpoint_encodes_each_id_as_one_segment() {
        let config = OpenAiConfig::new("sk-test", DEFAULT_OPENAI_BASE_URL).unwrap();
        let url = config.endpoint(&["threads", "../assistants/asst_1?x=1#frag"]);
        assert_eq!(url.path(), "/v1/threads/..%2Fassistants%2Fasst_1%3Fx=1%23frag");
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[test]
    fn from_lookup_requires_api_key() {
        let err = OpenAiConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, RelayError::Config(_)));
        assert_eq!(err.to_string(), "Config error: OPENAI_API_KEY is required");
    }

    #[test]
    fn from_lookup_defaults_base_url() {
        let config = OpenAiConfig::from_lookup(|key| {
            (key == "OPENAI_API_KEY").then(|| "sk-env".to_string())
        })
        .unwrap();
        assert_eq!(config.api_key, "sk-env");
        assert_eq!(config.base_url.as_str(), DEFAULT_OPENAI_BASE_URL);
    }

    #[test]
    fn from_lookup_reads_base_url_override() {
        let config = OpenAiConfig::from_lookup(|key| match key {
            "OPENAI_API_KEY" => Some("sk-env".to_string()),
            "OPENAI_BASE_URL" => Some("http://localhost:9000/v1/".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:9000/v1");
    }

    #[test]
    fn cannot_be_a_base_url_rejected() {
        assert!(OpenAiConfig::new("sk-test", "mailto:ops@example.com").is_err());
    }

    #[test]
    fn empty_api_key_rejected() {
        let err = OpenAiConfig::new("  ", DEFAULT_OPENAI_BASE_URL).unwrap_err();
        assert!(matches!(err, RelayError::Config(_)));
    }

    #[test]
    fn invalid_base_url_rejected() {
        assert!(OpenAiConfig::new("sk-test", "not a url").is_err());
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = OpenAiConfig::new("sk-secret", DEFAULT_OPENAI_BASE_URL).unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("sk-secret"));
    }
}
