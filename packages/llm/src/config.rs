use serde::Deserialize;

/// Default Anthropic API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";

/// Default model for every closet prompt.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

pub const DEFAULT_MAX_TOKENS: u32 = 2000;

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable consulted when no key is configured.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Hosted model configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    /// API key. AI features are disabled when absent.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds. Default: 60.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_model() -> String {
    DEFAULT_MODEL.into()
}
fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// Fill a missing key from `ANTHROPIC_API_KEY`.
    pub fn with_env_fallback(mut self) -> Self {
        if self.api_key().is_none() {
            self.api_key = std::env::var(API_KEY_ENV).ok();
        }
        self
    }

    /// The configured key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}
