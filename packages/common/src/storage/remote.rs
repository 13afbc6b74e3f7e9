use http::Uri;
use serde::Deserialize;

/// One entry of the image-host allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemotePattern {
    /// `http` or `https`. Any of the two when omitted.
    #[serde(default)]
    pub protocol: Option<String>,
    /// Exact host, `*.example.com` (one label) or `**.example.com` (any depth).
    pub hostname: String,
}

impl RemotePattern {
    pub fn matches(&self, scheme: &str, host: &str) -> bool {
        if self
            .protocol
            .as_deref()
            .is_some_and(|p| !p.eq_ignore_ascii_case(scheme))
        {
            return false;
        }
        let host = host.to_ascii_lowercase();
        let pattern = self.hostname.to_ascii_lowercase();

        if let Some(suffix) = pattern.strip_prefix("**.") {
            host.strip_suffix(suffix)
                .and_then(|head| head.strip_suffix('.'))
                .is_some_and(|head| !head.is_empty())
        } else if let Some(suffix) = pattern.strip_prefix("*.") {
            host.strip_suffix(suffix)
                .and_then(|head| head.strip_suffix('.'))
                .is_some_and(|head| !head.is_empty() && !head.contains('.'))
        } else {
            host == pattern
        }
    }
}

/// Decides which photo URLs an item may reference.
#[derive(Debug, Clone)]
pub struct PhotoUrlPolicy {
    local_prefix: String,
    remote: Vec<RemotePattern>,
}

impl PhotoUrlPolicy {
    /// `local_prefix` is the URL prefix under which this service serves photos,
    /// e.g. `http://127.0.0.1:3000/api/photos/`.
    pub fn new(local_prefix: impl Into<String>, remote: Vec<RemotePattern>) -> Self {
        let mut local_prefix = local_prefix.into();
        if !local_prefix.ends_with('/') {
            local_prefix.push('/');
        }
        Self {
            local_prefix,
            remote,
        }
    }

    pub fn local_prefix(&self) -> &str {
        &self.local_prefix
    }

    /// Public URL of a stored photo.
    pub fn local_url(&self, key: &super::PhotoKey) -> String {
        format!("{}{}", self.local_prefix, key)
    }

    /// `Ok` when `url` is served here or by an allowed remote host.
    pub fn check(&self, url: &str) -> Result<(), String> {
        if let Some(key) = url.strip_prefix(&self.local_prefix) {
            return super::PhotoKey::parse(key)
                .map(|_| ())
                .map_err(|e| format!("'{url}' is not a valid photo URL: {e}"));
        }

        let uri: Uri = url
            .parse()
            .map_err(|_| format!("'{url}' is not a valid URL"))?;
        let scheme = uri
            .scheme_str()
            .filter(|s| matches!(*s, "http" | "https"))
            .ok_or_else(|| format!("'{url}' must be an http(s) URL"))?;
        let host = uri
            .host()
            .ok_or_else(|| format!("'{url}' has no host"))?;

        if self.remote.iter().any(|p| p.matches(scheme, host)) {
            Ok(())
        } else {
            Err(format!("Image host '{host}' is not allowed"))
        }
    }
}
