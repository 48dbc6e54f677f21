//! Lazy per-icon payload resolution.
//!
//! A payload (the SVG markup for one icon) is resolved through three
//! sources, short-circuiting on the first hit:
//!
//! 1. already attached to the record in memory, with no I/O
//! 2. the record's on-disk locator: one file read, memoized back onto
//!    the record
//! 3. a network request to the deterministic per-icon URL: on success the
//!    payload is written to the cache so future sessions hit step 2
//!
//! Failure at every source is soft: the resolver returns `None` and the
//! caller degrades to the remote URL reference instead of embedded markup.
//! Side effects are confined to the single record passed in and at most
//! one new file on disk.

use crate::cache::CatalogCache;
use crate::record::{CachedIconRecord, DEFAULT_VARIANT};

/// Resolves individual icon payloads, write-through caching what it fetches.
#[derive(Debug, Clone)]
pub struct PayloadResolver {
    client: reqwest::Client,
    cache: CatalogCache,
    payload_base_url: String,
}

impl PayloadResolver {
    /// Create a resolver over the given cache and remote payload host.
    pub fn new(
        client: reqwest::Client,
        cache: CatalogCache,
        payload_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            cache,
            payload_base_url: payload_base_url.into(),
        }
    }

    /// Deterministic remote URL for one icon's graphic.
    ///
    /// Callers use this as the display fallback when [`resolve`] yields
    /// nothing.
    ///
    /// [`resolve`]: PayloadResolver::resolve
    pub fn remote_url(&self, name: &str, variant: Option<&str>) -> String {
        let variant = variant.unwrap_or(DEFAULT_VARIANT);
        format!(
            "{}/materialsymbols{}/{}/default/24px.svg",
            self.payload_base_url.trim_end_matches('/'),
            variant,
            name
        )
    }

    /// Resolve the payload for one record.
    ///
    /// On success the payload is attached to `cached` so the next call
    /// returns without I/O; a successful network fetch additionally writes
    /// the payload file and records its locator. Returns `None` on any
    /// failure, never an error.
    pub async fn resolve(&self, cached: &mut CachedIconRecord) -> Option<String> {
        if let Some(payload) = &cached.record.payload {
            return Some(payload.clone());
        }

        if let Some(locator) = cached.payload_locator.clone() {
            if locator.is_file() {
                match self.cache.read_payload(&locator) {
                    Ok(content) => {
                        cached.record.payload = Some(content.clone());
                        return Some(content);
                    }
                    Err(err) => {
                        tracing::warn!(
                            "Failed to read cached payload for '{}': {}",
                            cached.record.name,
                            err
                        );
                    }
                }
            }
        }

        let name = cached.record.name.clone();
        let variant = cached.record.variant.clone();
        let url = self.remote_url(&name, variant.as_deref());
        match self.fetch_remote(&url).await {
            Ok(content) => {
                match self.cache.write_payload(&name, variant.as_deref(), &content) {
                    Ok(path) => cached.payload_locator = Some(path),
                    // Non-fatal: next session falls back to the network.
                    Err(err) => {
                        tracing::warn!("Failed to persist payload for '{}': {}", name, err);
                    }
                }
                cached.record.payload = Some(content.clone());
                Some(content)
            }
            Err(err) => {
                tracing::debug!("Payload fetch failed for '{}': {}", name, err);
                None
            }
        }
    }

    async fn fetch_remote(&self, url: &str) -> crate::Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(crate::Error::HttpStatus(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}
