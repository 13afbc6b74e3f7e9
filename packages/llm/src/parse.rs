//! Turning model reply text into typed values.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::LlmError;

/// Remove Markdown code fence markers from a reply.
///
/// Every ```` ```json ```` and ```` ``` ```` marker goes, together with one
/// newline right after it. The remainder is trimmed.
pub fn strip_code_fences(reply: &str) -> String {
    reply
        .replace("```json\n", "")
        .replace("```json", "")
        .replace("```\n", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Parse a reply into `T` after stripping fences.
pub fn parse_reply<T: DeserializeOwned>(reply: &str) -> Result<T, LlmError> {
    let cleaned = strip_code_fences(reply);
    serde_json::from_str(&cleaned).map_err(|e| {
        warn!(error = %e, reply = %reply, "Failed to parse model reply");
        LlmError::Parse(e.to_string())
    })
}
