//! Durable cache for resolved endpoint paths.
//!
//! The resolver memoizes the first working candidate per operation; this
//! cache makes the memo survive across process runs. It is a single JSON
//! object `{"operation.key": "/api/path"}` in the configured state directory.
//! A missing or corrupt file degrades to an empty map - a broken cache must
//! never break the client.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{debug, warn};

/// Durable map from operation key to last-successful endpoint path.
#[derive(Debug, Clone)]
pub struct EndpointCache {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl EndpointCache {
    /// Load the cache from `path`.
    ///
    /// A file that is absent or unreadable as a string map yields an empty
    /// cache; the corrupt case is logged.
    #[must_use]
    pub fn load(path: PathBuf) -> Self {
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<HashMap<String, String>>(&text) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "corrupt endpoint cache, starting empty");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Self { path, entries }
    }

    /// An empty cache that persists to `path` on the first insert.
    #[must_use]
    pub fn empty(path: PathBuf) -> Self {
        Self {
            path,
            entries: HashMap::new(),
        }
    }

    /// The memoized path for an operation, if any.
    #[must_use]
    pub fn get(&self, operation: &str) -> Option<&str> {
        self.entries.get(operation).map(String::as_str)
    }

    /// Memoize `endpoint_path` for `operation` and write the cache through.
    ///
    /// Persistence failures are logged, not raised: losing the hint only
    /// costs a re-resolution on the next run.
    pub fn set(&mut self, operation: &str, endpoint_path: &str) {
        self.entries
            .insert(operation.to_string(), endpoint_path.to_string());

        if let Err(e) = self.persist() {
            warn!(path = %self.path.display(), error = %e, "failed to persist endpoint cache");
        } else {
            debug!(operation, endpoint_path, "endpoint cache updated");
        }
    }

    fn persist(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_cache_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("bizniz-endpoints-{}-{tag}.json", std::process::id()))
    }

    #[test]
    fn test_set_then_reload_round_trips() {
        let path = temp_cache_path("roundtrip");
        let _ = std::fs::remove_file(&path);

        let mut cache = EndpointCache::load(path.clone());
        assert_eq!(cache.get("create.employee"), None);

        cache.set("create.employee", "/api/staff");
        assert_eq!(cache.get("create.employee"), Some("/api/staff"));

        let reloaded = EndpointCache::load(path.clone());
        assert_eq!(reloaded.get("create.employee"), Some("/api/staff"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let path = temp_cache_path("corrupt");
        std::fs::write(&path, "{not json").expect("write corrupt cache");

        let cache = EndpointCache::load(path.clone());
        assert_eq!(cache.get("create.employee"), None);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_silent() {
        let path = temp_cache_path("missing");
        let _ = std::fs::remove_file(&path);

        let cache = EndpointCache::load(path);
        assert_eq!(cache.get("anything"), None);
    }
}
