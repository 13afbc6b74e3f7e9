use serde::Deserialize;

use crate::storage::RemotePattern;

/// Photo storage configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding uploaded photos. Default: "./data/photos".
    #[serde(default = "default_storage_root")]
    pub root: String,
    /// Upper bound for a single photo in bytes. Default: 20 MiB.
    #[serde(default = "default_max_photo_size")]
    pub max_photo_size: u64,
    /// Origin that clients use to reach this service. Default: "http://127.0.0.1:3000".
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Extra hosts item photo URLs may point at.
    #[serde(default)]
    pub remote_patterns: Vec<RemotePattern>,
}

fn default_storage_root() -> String {
    "./data/photos".into()
}
fn default_max_photo_size() -> u64 {
    20 * 1024 * 1024
}
fn default_public_base_url() -> String {
    "http://127.0.0.1:3000".into()
}

impl StorageConfig {
    /// URL prefix under which stored photos are served.
    pub fn photo_url_prefix(&self) -> String {
        format!(
            "{}/api/photos/",
            self.public_base_url.trim_end_matches('/')
        )
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_storage_root(),
            max_photo_size: default_max_photo_size(),
            public_base_url: default_public_base_url(),
            remote_patterns: Vec::new(),
        }
    }
}
