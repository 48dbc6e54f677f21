//! Catalog resolution and session caching.
//!
//! [`CatalogResolver`] is the one entry point the suggestion surfaces
//! consume. It applies the source-precedence algorithm (custom-path
//! override → workspace override → local cache → remote fetch-and-cache),
//! memoizes the resolved collection for its own lifetime, and mediates
//! payload resolution and custom-icon registration against the shared
//! in-memory collection.
//!
//! The resolver is an explicit object holding its own cached state; there
//! is no process-global. Construct it once per session, share it by
//! reference, and call [`invalidate`] on teardown.
//!
//! [`invalidate`]: CatalogResolver::invalidate

use std::path::Path;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::cache::CatalogCache;
use crate::config::CatalogConfig;
use crate::error::{Error, Result};
use crate::fetch::RemoteCatalogFetcher;
use crate::payload::PayloadResolver;
use crate::record::{CachedIconRecord, IconRecord, RegisterStatus};
use crate::registrar;

/// The shared in-memory collection for one session.
type Catalog = Arc<RwLock<Vec<CachedIconRecord>>>;

/// Session-scoped catalog orchestrator.
pub struct CatalogResolver {
    config: CatalogConfig,
    cache: CatalogCache,
    fetcher: RemoteCatalogFetcher,
    payloads: PayloadResolver,
    /// Memoized collection. The mutex is held across the whole first
    /// resolution, so racing `load()` callers await that one resolution
    /// instead of triggering duplicate fetches.
    state: Mutex<Option<Catalog>>,
}

impl CatalogResolver {
    /// Create a resolver for one editor session.
    pub fn new(config: CatalogConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("GlyphdexCatalog/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client with default configuration");

        let cache = CatalogCache::new(&config.storage_root);
        let fetcher = RemoteCatalogFetcher::new(client.clone(), config.index_url.clone());
        let payloads =
            PayloadResolver::new(client, cache.clone(), config.payload_base_url.clone());

        Self {
            config,
            cache,
            fetcher,
            payloads,
            state: Mutex::new(None),
        }
    }

    /// The resolver's configuration.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Load the catalog, resolving it on first call and returning the
    /// memoized collection thereafter.
    ///
    /// Never fails: every source error degrades to the next source, and a
    /// total miss degrades to the synthetic fallback set. An empty result
    /// is surfaced as a warning, not an error.
    pub async fn load(&self) -> Vec<IconRecord> {
        let catalog = self.catalog().await;
        let records = catalog.read().await;
        records.iter().map(CachedIconRecord::portable).collect()
    }

    /// Resolve one icon's payload against the shared collection.
    ///
    /// Memoizes the payload onto the shared record, so at most one disk
    /// read or network request ever happens per record. Returns `None`
    /// when the record is unknown or the payload cannot be obtained;
    /// callers degrade to [`payload_url`] for display.
    ///
    /// [`payload_url`]: CatalogResolver::payload_url
    pub async fn resolve_payload(&self, name: &str, variant: Option<&str>) -> Option<String> {
        let catalog = self.catalog().await;

        // Snapshot under the read lock; the I/O below runs without it.
        let mut working = {
            let records = catalog.read().await;
            let cached = records.iter().find(|c| c.record.key_matches(name, variant))?;
            if let Some(payload) = &cached.record.payload {
                return Some(payload.clone());
            }
            cached.clone()
        };

        let payload = self.payloads.resolve(&mut working).await?;

        // Attach to the shared record unless another caller beat us to it.
        let mut records = catalog.write().await;
        if let Some(cached) = records
            .iter_mut()
            .find(|c| c.record.key_matches(name, variant))
        {
            if cached.record.payload.is_none() {
                cached.record.payload = Some(payload.clone());
                cached.payload_locator = working.payload_locator.take();
            }
        }
        Some(payload)
    }

    /// Deterministic remote URL for one icon's graphic, for callers that
    /// display a reference instead of embedded markup.
    pub fn payload_url(&self, name: &str, variant: Option<&str>) -> String {
        self.payloads.remote_url(name, variant)
    }

    /// Register a user-defined icon: upsert by (name, variant) into the
    /// in-memory collection, then persist the whole portable collection to
    /// the workspace override file.
    ///
    /// Fails with [`Error::NoWorkspace`] when no workspace is open, and
    /// with [`Error::WriteFailure`] when persistence fails; in the latter
    /// case the in-memory mutation is kept and the call may be retried.
    pub async fn register(&self, candidate: IconRecord) -> Result<RegisterStatus> {
        let target = self
            .config
            .workspace_collection_path()
            .ok_or(Error::NoWorkspace)?;

        let catalog = self.catalog().await;
        let (status, portable) = {
            let mut records = catalog.write().await;
            let status = registrar::upsert(&mut records, candidate);
            let portable: Vec<IconRecord> =
                records.iter().map(CachedIconRecord::portable).collect();
            (status, portable)
        };

        registrar::persist(&target, &portable)?;
        tracing::debug!(
            "Registered custom icon ({:?}), persisted {} records to '{}'",
            status,
            portable.len(),
            target.display()
        );
        Ok(status)
    }

    /// Drop the memoized collection. The next `load()` resolves afresh.
    pub async fn invalidate(&self) {
        *self.state.lock().await = None;
    }

    /// Get the memoized collection, resolving it if necessary.
    async fn catalog(&self) -> Catalog {
        let mut state = self.state.lock().await;
        if let Some(catalog) = state.as_ref() {
            return Arc::clone(catalog);
        }

        let records = self.resolve_catalog().await;
        if records.is_empty() {
            tracing::warn!("Icon catalog resolved to zero records; suggestions will be empty");
        }
        let catalog: Catalog = Arc::new(RwLock::new(records));
        *state = Some(Arc::clone(&catalog));
        catalog
    }

    /// Apply the source-precedence algorithm. First satisfied source wins;
    /// sources never merge.
    async fn resolve_catalog(&self) -> Vec<CachedIconRecord> {
        // 1. Custom-path override.
        if let Some(path) = &self.config.custom_collection_path {
            match load_collection_file(path) {
                Ok(records) => {
                    tracing::debug!(
                        "Loaded {} records from custom collection '{}'",
                        records.len(),
                        path.display()
                    );
                    return records.into_iter().map(CachedIconRecord::from).collect();
                }
                Err(err) => {
                    tracing::debug!(
                        "Custom collection '{}' unavailable ({}), falling through",
                        path.display(),
                        err
                    );
                }
            }
        }

        // 2. Workspace override.
        if let Some(path) = self.config.workspace_collection_path() {
            match load_collection_file(&path) {
                Ok(records) => {
                    tracing::debug!(
                        "Loaded {} records from workspace collection '{}'",
                        records.len(),
                        path.display()
                    );
                    return records.into_iter().map(CachedIconRecord::from).collect();
                }
                Err(err) => {
                    tracing::debug!(
                        "Workspace collection '{}' unavailable ({}), falling through",
                        path.display(),
                        err
                    );
                }
            }
        }

        // 3. Local metadata cache. Records get a deterministic payload
        //    locator; graphics load lazily, never here.
        match self.cache.load_metadata() {
            Ok(records) => {
                tracing::debug!("Loaded {} records from local cache", records.len());
                return records
                    .into_iter()
                    .map(|record| {
                        let locator = self
                            .cache
                            .payload_path(&record.name, record.variant.as_deref());
                        CachedIconRecord::with_locator(record, locator)
                    })
                    .collect();
            }
            Err(err) => {
                tracing::debug!("Local cache unavailable ({}), fetching remote index", err);
            }
        }

        // 4. Remote fetch, persisted as the new local cache. A failed cache
        //    write only means a slower path next session.
        let records = self.fetcher.fetch_all().await;
        if let Err(err) = self.cache.save_metadata(&records) {
            tracing::warn!("Failed to persist catalog cache: {}", err);
        }
        records.into_iter().map(CachedIconRecord::from).collect()
    }
}

impl std::fmt::Debug for CatalogResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogResolver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Read a collection file as a JSON array of portable records.
fn load_collection_file(path: &Path) -> Result<Vec<IconRecord>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| Error::json(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_collection(path: &Path, names: &[&str]) {
        let records: Vec<IconRecord> = names.iter().copied().map(IconRecord::new).collect();
        std::fs::write(path, serde_json::to_string(&records).unwrap()).unwrap();
    }

    #[test]
    fn test_load_collection_file_rejects_non_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("icons.json");
        std::fs::write(&path, r#"{"name": "home"}"#).unwrap();
        assert!(matches!(
            load_collection_file(&path),
            Err(Error::Json { .. })
        ));
    }

    #[tokio::test]
    async fn test_cache_source_annotates_locators() {
        let dir = TempDir::new().unwrap();
        let storage = dir.path().join("storage");
        let cache = CatalogCache::new(&storage);
        cache
            .save_metadata(&[IconRecord::new("home"), IconRecord::new("star")])
            .unwrap();

        let resolver = CatalogResolver::new(
            CatalogConfig::new()
                .with_storage_root(&storage)
                .with_index_url("http://127.0.0.1:9/index"),
        );

        let catalog = resolver.catalog().await;
        let records = catalog.read().await;
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].payload_locator.as_deref(),
            Some(cache.payload_path("home", None).as_path())
        );
    }

    #[tokio::test]
    async fn test_invalidate_forces_fresh_resolution() {
        let dir = TempDir::new().unwrap();
        let custom = dir.path().join("custom.json");
        write_collection(&custom, &["home"]);

        let resolver = CatalogResolver::new(
            CatalogConfig::new()
                .with_custom_collection(&custom)
                .with_storage_root(dir.path().join("storage"))
                .with_index_url("http://127.0.0.1:9/index"),
        );

        assert_eq!(resolver.load().await.len(), 1);

        // Memoized: editing the file changes nothing until invalidation.
        write_collection(&custom, &["home", "star"]);
        assert_eq!(resolver.load().await.len(), 1);

        resolver.invalidate().await;
        assert_eq!(resolver.load().await.len(), 2);
    }
}
