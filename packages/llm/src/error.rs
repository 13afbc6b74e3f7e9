use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Anthropic API key not configured")]
    NotConfigured,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Model reply contained no text")]
    EmptyReply,

    #[error("Unexpected reply shape: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        Self::Request(e.to_string())
    }
}
