//! Hosted-model gateway for closet items: recognition, pricing and listing copy.

pub mod backend;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod parse;
pub mod prompts;
pub mod types;

pub use backend::{AnthropicBackend, CompletionBackend, ImageInput, Prompt};
pub use config::LlmConfig;
pub use error::LlmError;
pub use gateway::Gateway;
pub use models::*;
