//! Caching front of the fetch/clean pipeline.

use std::collections::HashMap;
use std::sync::Mutex;

use aozora_core::TextSource;

use crate::clean::clean;

/// Cleaned texts at or below this many characters look like failed
/// extractions (empty archive, wrong markers) and are never cached, so the
/// next request for the same URL retries the fetch.
const MIN_CACHE_CHARS: usize = 100;

/// Per-URL cache of cleaned full texts on top of a [`TextSource`].
///
/// Entries live for the process lifetime; there is no eviction and failures
/// are never stored. The map is guarded by a plain mutex that is only held
/// for lookups and inserts, never across an await: two concurrent first
/// loads of one URL may both fetch and both insert, which is tolerated
/// because both writes carry the same cleaned text.
pub struct TextLoader<S> {
    source: S,
    cache: Mutex<HashMap<String, String>>,
}

impl<S: TextSource> TextLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Cleaned full text for `url`, from cache when possible.
    ///
    /// Fetch and archive errors are logged and surface as `None`; the caller
    /// decides what to substitute.
    pub async fn load(&self, url: &str) -> Option<String> {
        if let Some(hit) = self
            .cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(url)
        {
            return Some(hit.clone());
        }

        let raw = match self.source.fetch_text(url).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(url, error = %e, "fetch failed; treating text as absent");
                return None;
            }
        };

        let cleaned = clean(&raw);
        if cleaned.chars().count() > MIN_CACHE_CHARS {
            self.cache
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .insert(url.to_string(), cleaned.clone());
        }
        Some(cleaned)
    }
}
