//! Icon catalog acquisition and caching for editor suggestion surfaces.
//!
//! This crate resolves a large named icon catalog from multiple possible
//! sources and serves it to editor-integrated surfaces (inline completion,
//! a visual picker, a custom-icon registration command):
//!
//! - **Source precedence**: custom override file → workspace override
//!   file → local on-disk cache → remote fetch (persisted for next time)
//! - **Lazy payloads**: thousands of records load instantly as metadata;
//!   each icon's multi-kilobyte SVG materializes only when a surface
//!   actually renders it, and is cached to disk once fetched
//! - **Failure tolerance**: unavailable or malformed sources fall through,
//!   a dead network degrades to a synthetic placeholder set, and payload
//!   misses degrade to a remote-URL reference; surfaces never crash
//!
//! # Example
//!
//! ```ignore
//! use glyphdex_catalog::{CatalogConfig, CatalogResolver, IconRecord};
//!
//! let resolver = CatalogResolver::new(
//!     CatalogConfig::new().with_workspace_root("/path/to/project"),
//! );
//!
//! // All surfaces share one memoized load per session.
//! let catalog = resolver.load().await;
//! let suggestions: Vec<_> = catalog.iter().filter(|r| r.matches("home")).collect();
//!
//! // The picker materializes graphics lazily, one icon at a time.
//! let svg = resolver.resolve_payload("home", None).await;
//!
//! // Users can register their own icons into the workspace collection.
//! resolver.register(IconRecord::new("corp_logo")).await?;
//! ```

pub mod cache;
pub mod config;
pub mod fetch;
pub mod payload;
pub mod record;
pub mod registrar;
pub mod resolver;

mod error;

pub use cache::CatalogCache;
pub use config::{CatalogConfig, DEFAULT_INDEX_URL, DEFAULT_PAYLOAD_BASE_URL, WORKSPACE_COLLECTION_FILE};
pub use error::{Error, Result};
pub use fetch::RemoteCatalogFetcher;
pub use payload::PayloadResolver;
pub use record::{CachedIconRecord, IconCategory, IconRecord, RegisterStatus, DEFAULT_VARIANT};
pub use resolver::CatalogResolver;
