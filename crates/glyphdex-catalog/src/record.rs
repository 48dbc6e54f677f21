//! The icon record data model.
//!
//! This module defines the data contract the rest of the pipeline relies on:
//! - [`IconRecord`]: the portable shape of one catalog entry, serialized
//!   as-is into collection files
//! - [`CachedIconRecord`]: the internal shape that additionally carries the
//!   on-disk payload locator, never persisted into the portable format
//! - [`IconCategory`]: the fixed grouping taxonomy with keyword inference

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The baseline rendering style assumed when a record carries no variant.
pub const DEFAULT_VARIANT: &str = "outlined";

/// Fixed grouping taxonomy for catalog entries.
///
/// Categories exist for grouping and filtering only; they never participate
/// in record identity. Enumeration order is significant: it is the order in
/// which category keywords are checked during inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconCategory {
    /// Home and navigation-root icons.
    Home,
    /// Search and lookup icons.
    Search,
    /// Settings and configuration icons.
    Settings,
    /// Directional arrows.
    Arrow,
    /// Chat and messaging icons.
    Chat,
    /// Checkmarks and confirmation icons.
    Check,
    /// Single-file icons.
    File,
    /// Folder and directory icons.
    Folder,
    /// People and account icons.
    Person,
    /// Playback and media-control icons.
    Play,
    /// Ratings and favorites.
    Star,
    /// Everything that matches no known keyword.
    Other,
}

impl IconCategory {
    /// All categories, in inference order.
    pub const ALL: [IconCategory; 12] = [
        IconCategory::Home,
        IconCategory::Search,
        IconCategory::Settings,
        IconCategory::Arrow,
        IconCategory::Chat,
        IconCategory::Check,
        IconCategory::File,
        IconCategory::Folder,
        IconCategory::Person,
        IconCategory::Play,
        IconCategory::Star,
        IconCategory::Other,
    ];

    /// Get the category keyword (also the serialized form).
    pub fn as_str(&self) -> &'static str {
        match self {
            IconCategory::Home => "home",
            IconCategory::Search => "search",
            IconCategory::Settings => "settings",
            IconCategory::Arrow => "arrow",
            IconCategory::Chat => "chat",
            IconCategory::Check => "check",
            IconCategory::File => "file",
            IconCategory::Folder => "folder",
            IconCategory::Person => "person",
            IconCategory::Play => "play",
            IconCategory::Star => "star",
            IconCategory::Other => "other",
        }
    }

    /// Infer a category from an icon name.
    ///
    /// Checks whether the name contains each category keyword as a
    /// substring, in enumeration order, first match wins. Names matching
    /// no keyword fall back to [`IconCategory::Other`].
    pub fn infer(name: &str) -> Self {
        for category in Self::ALL {
            if category != IconCategory::Other && name.contains(category.as_str()) {
                return category;
            }
        }
        IconCategory::Other
    }
}

impl Default for IconCategory {
    fn default() -> Self {
        IconCategory::Other
    }
}

impl fmt::Display for IconCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One named catalog entry.
///
/// The pair (`name`, `variant`) is the uniqueness key within a loaded
/// collection; both are immutable after creation. All other fields may be
/// amended in place, either by the registrar replacing a custom entry or by
/// lazy payload materialization.
///
/// `payload` being `None` means "not yet materialized", not "this icon has
/// no graphic".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconRecord {
    /// Unique-within-collection identifier; the value inserted into
    /// user source text.
    pub name: String,
    /// Grouping category, never identity.
    #[serde(default)]
    pub category: IconCategory,
    /// Ordered free-text tags for substring search. May be empty.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Optional human-readable text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Rendering style; `None` is equivalent to [`DEFAULT_VARIANT`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// Vector-graphics markup, materialized lazily.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl IconRecord {
    /// Create a record with defaults derived from the name: category by
    /// keyword inference, tags `[name, category]`, baseline variant.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let category = IconCategory::infer(&name);
        Self {
            tags: vec![name.clone(), category.to_string()],
            name,
            category,
            description: None,
            variant: None,
            payload: None,
        }
    }

    /// The effective variant, substituting the default for absence.
    pub fn variant_or_default(&self) -> &str {
        self.variant.as_deref().unwrap_or(DEFAULT_VARIANT)
    }

    /// Check whether this record's identity key matches the given pair.
    ///
    /// An absent variant and an explicit default variant compare equal.
    pub fn key_matches(&self, name: &str, variant: Option<&str>) -> bool {
        self.name == name && self.variant_or_default() == variant.unwrap_or(DEFAULT_VARIANT)
    }

    /// Case-insensitive substring match over name, tags, and description,
    /// for search surfaces. An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&query))
            || self
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&query))
    }
}

/// Internal record shape carrying the payload locator.
///
/// The locator records where on disk the payload can be lazily loaded from
/// when it is absent in memory. It is never written into the portable
/// collection format and never exposed to consuming surfaces; conversion
/// happens at the serialization boundary.
#[derive(Debug, Clone)]
pub struct CachedIconRecord {
    /// The portable record.
    pub record: IconRecord,
    /// On-disk location of the payload file, if one is known.
    pub payload_locator: Option<PathBuf>,
}

impl CachedIconRecord {
    /// Wrap a portable record with a known payload locator.
    pub fn with_locator(record: IconRecord, locator: PathBuf) -> Self {
        Self {
            record,
            payload_locator: Some(locator),
        }
    }

    /// Clone out the portable shape, dropping the locator.
    pub fn portable(&self) -> IconRecord {
        self.record.clone()
    }
}

impl From<IconRecord> for CachedIconRecord {
    fn from(record: IconRecord) -> Self {
        Self {
            record,
            payload_locator: None,
        }
    }
}

/// Outcome of a registrar upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterStatus {
    /// The candidate's key was novel; the record was appended.
    Created,
    /// An existing record with the same key had its fields replaced.
    Updated,
}
