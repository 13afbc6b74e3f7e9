use std::sync::Arc;

use common::storage::{PhotoStore, PhotoUrlPolicy};
use llm::Gateway;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub photo_store: Arc<dyn PhotoStore>,
    pub photo_urls: Arc<PhotoUrlPolicy>,
    /// `None` when no API key is configured.
    pub ai: Option<Arc<Gateway>>,
}

impl AppState {
    pub fn gateway(&self) -> Result<&Gateway, AppError> {
        self.ai.as_deref().ok_or(AppError::AiUnavailable)
    }
}
