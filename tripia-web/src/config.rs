//! Frontend configuration module
//!
//! Connection settings for the agent server, fixed at compile time.

const DEFAULT_API_URL: &str = "http://localhost:2024";
const DEFAULT_ASSISTANT_ID: &str = "agent";

/// Where the agent server lives and which graph to talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendConfig {
    /// Base URL of the agent server.
    pub api_url: String,
    /// Assistant (graph) id the runs are started on.
    pub assistant_id: String,
    /// Optional `X-Api-Key` sent with every request.
    pub api_key: Option<String>,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self::from_values(
            option_env!("TRIPIA_API_URL"),
            option_env!("TRIPIA_ASSISTANT_ID"),
            option_env!("TRIPIA_API_KEY"),
        )
    }
}

impl FrontendConfig {
    /// Builds a configuration from raw values; blank values use the defaults.
    pub fn from_values(
        api_url: Option<&str>,
        assistant_id: Option<&str>,
        api_key: Option<&str>,
    ) -> Self {
        let non_blank = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        Self {
            api_url: non_blank(api_url)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            assistant_id: non_blank(assistant_id)
                .unwrap_or_else(|| DEFAULT_ASSISTANT_ID.to_string()),
            api_key: non_blank(api_key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = FrontendConfig::from_values(Some("  "), None, Some(""));
        assert_eq!(config.api_url, "http://localhost:2024");
        assert_eq!(config.assistant_id, "agent");
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn trailing_slash_is_removed_from_api_url() {
        let config =
            FrontendConfig::from_values(Some("https://agent.example.com/"), Some("trip"), Some("k"));
        assert_eq!(config.api_url, "https://agent.example.com");
        assert_eq!(config.assistant_id, "trip");
        assert_eq!(config.api_key.as_deref(), Some("k"));
    }
}
