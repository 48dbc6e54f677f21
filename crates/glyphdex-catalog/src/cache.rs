//! On-disk persistence for catalog metadata and icon payloads.
//!
//! Two artifact kinds live under the storage root:
//! - `catalog.json`: the metadata collection, a JSON array of portable
//!   records, always rewritten whole
//! - `payloads/<name>.svg` (or `payloads/<name>--<variant>.svg`): one raw
//!   payload file per (name, variant) pair
//!
//! The path scheme is deterministic so a record can be tied back to its
//! payload artifact without any index file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::record::{IconRecord, DEFAULT_VARIANT};

/// File name of the metadata collection under the storage root.
pub const METADATA_FILE: &str = "catalog.json";

/// Subdirectory holding per-icon payload files.
pub const PAYLOAD_DIR: &str = "payloads";

/// The on-disk cache layer.
#[derive(Debug, Clone)]
pub struct CatalogCache {
    storage_root: PathBuf,
}

impl CatalogCache {
    /// Create a cache rooted at the given storage directory.
    pub fn new(storage_root: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: storage_root.into(),
        }
    }

    /// The storage root this cache writes under.
    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    /// Path of the metadata collection file.
    pub fn metadata_path(&self) -> PathBuf {
        self.storage_root.join(METADATA_FILE)
    }

    /// Path of the payload directory.
    pub fn payload_dir(&self) -> PathBuf {
        self.storage_root.join(PAYLOAD_DIR)
    }

    /// Deterministic payload file path for a (name, variant) pair.
    ///
    /// The default variant (explicit or absent) maps to `<name>.svg`;
    /// any other variant maps to `<name>--<variant>.svg`.
    pub fn payload_path(&self, name: &str, variant: Option<&str>) -> PathBuf {
        let name = sanitize_component(name);
        let file = match variant {
            Some(v) if v != DEFAULT_VARIANT => {
                format!("{}--{}.svg", name, sanitize_component(v))
            }
            _ => format!("{name}.svg"),
        };
        self.payload_dir().join(file)
    }

    /// Check whether a metadata collection exists on disk.
    pub fn has_metadata(&self) -> bool {
        self.metadata_path().is_file()
    }

    /// Load the metadata collection.
    pub fn load_metadata(&self) -> Result<Vec<IconRecord>> {
        let path = self.metadata_path();
        let content = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        serde_json::from_str(&content).map_err(|e| Error::json(&path, e))
    }

    /// Durably snapshot the metadata collection, rewriting the file whole.
    ///
    /// A failed write leaves the caller responsible for treating the cache
    /// as stale; the next load simply takes a slower source.
    pub fn save_metadata(&self, records: &[IconRecord]) -> Result<()> {
        fs::create_dir_all(&self.storage_root)
            .map_err(|e| Error::write_failure(&self.storage_root, e))?;
        let path = self.metadata_path();
        let body = serde_json::to_string_pretty(records).map_err(|e| Error::json(&path, e))?;
        fs::write(&path, body).map_err(|e| Error::write_failure(&path, e))
    }

    /// Read one payload file.
    pub fn read_payload(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| Error::io(path, e))
    }

    /// Write one payload file at its deterministic path, returning the path.
    pub fn write_payload(&self, name: &str, variant: Option<&str>, content: &str) -> Result<PathBuf> {
        let dir = self.payload_dir();
        fs::create_dir_all(&dir).map_err(|e| Error::write_failure(&dir, e))?;
        let path = self.payload_path(name, variant);
        fs::write(&path, content).map_err(|e| Error::write_failure(&path, e))?;
        Ok(path)
    }
}

/// Map a name or variant into a safe file-name component.
///
/// Keeps ASCII alphanumerics plus `.`, `_`, and `-`; everything else
/// (separators, traversal attempts, unicode) becomes `_`.
fn sanitize_component(component: &str) -> String {
    component
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
