use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::StorageError;

const MAX_KEY_LEN: usize = 200;
const MAX_STEM_LEN: usize = 80;
const FALLBACK_STEM: &str = "photo";

/// A validated photo object key: `<unix millis>_<sanitized filename>`.
///
/// Keys are flat (no directories) and only contain `[A-Za-z0-9._-]`, so they
/// can be used verbatim as a file name and as a URL path segment.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PhotoKey(String);

impl PhotoKey {
    /// Build a key for an upload from its original filename.
    ///
    /// `disambiguator` is appended when the caller needs a second attempt
    /// after a collision.
    pub fn generate(filename: &str, unix_millis: i64, disambiguator: Option<&str>) -> Self {
        let (stem, ext) = split_extension(filename);
        let mut stem = sanitize(stem);
        if stem.is_empty() {
            stem = FALLBACK_STEM.to_string();
        }
        stem.truncate(MAX_STEM_LEN);

        let mut key = format!("{unix_millis}_{stem}");
        if let Some(extra) = disambiguator {
            let extra = sanitize(extra);
            if !extra.is_empty() {
                key.push('-');
                key.push_str(&extra);
            }
        }
        if let Some(ext) = ext {
            let ext = sanitize(ext).to_ascii_lowercase();
            if !ext.is_empty() {
                key.push('.');
                key.push_str(&ext);
            }
        }
        Self(key)
    }

    /// Validate a key received from a client.
    pub fn parse(s: &str) -> Result<Self, StorageError> {
        if s.is_empty() || s.len() > MAX_KEY_LEN {
            return Err(StorageError::InvalidKey(format!(
                "expected 1-{MAX_KEY_LEN} characters, got {}",
                s.len()
            )));
        }
        if s.starts_with('.') {
            return Err(StorageError::InvalidKey("must not start with '.'".into()));
        }
        if let Some(bad) = s.chars().find(|c| !is_key_char(*c)) {
            return Err(StorageError::InvalidKey(format!(
                "unexpected character {bad:?}"
            )));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase extension, if the key has one.
    pub fn extension(&self) -> Option<&str> {
        split_extension(&self.0).1
    }
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')
}

fn split_extension(name: &str) -> (&str, Option<&str>) {
    // Only the final path component of a browser-supplied name matters.
    let name = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => (&name[..idx], Some(&name[idx + 1..])),
        _ => (name, None),
    }
}

/// Replace anything outside the key alphabet with '-', collapsing runs.
fn sanitize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        let c = if is_key_char(c) && c != '.' { c } else { '-' };
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }
    out.trim_matches('-').to_string()
}

impl fmt::Debug for PhotoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhotoKey({})", self.0)
    }
}

impl fmt::Display for PhotoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for PhotoKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PhotoKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
