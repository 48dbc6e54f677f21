//! Custom icon registration.
//!
//! Merges a user-submitted record into the in-memory collection
//! (update-if-duplicate-key else append) and persists the full portable
//! collection to the workspace override file.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::record::{CachedIconRecord, IconRecord, RegisterStatus};

/// Upsert a candidate into the collection by its (name, variant) key.
///
/// A matching record has its mutable fields (category, tags, description,
/// payload) replaced in place, preserving its position in iteration order;
/// a novel key appends. Identity fields are never touched.
pub fn upsert(records: &mut Vec<CachedIconRecord>, candidate: IconRecord) -> RegisterStatus {
    let key_variant = candidate.variant.clone();
    if let Some(existing) = records
        .iter_mut()
        .find(|c| c.record.key_matches(&candidate.name, key_variant.as_deref()))
    {
        existing.record.category = candidate.category;
        existing.record.tags = candidate.tags;
        existing.record.description = candidate.description;
        existing.record.payload = candidate.payload;
        RegisterStatus::Updated
    } else {
        records.push(CachedIconRecord::from(candidate));
        RegisterStatus::Created
    }
}

/// Persist the portable collection to the workspace override file,
/// rewriting it whole.
pub fn persist(path: &Path, records: &[IconRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::write_failure(parent, e))?;
    }
    let body = serde_json::to_string_pretty(records).map_err(|e| Error::json(path, e))?;
    fs::write(path, body).map_err(|e| Error::write_failure(path, e))
}
