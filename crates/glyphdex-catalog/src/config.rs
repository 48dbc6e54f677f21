//! Resolver configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Default remote index of icon names (newline-delimited `<name> <aux>`).
pub const DEFAULT_INDEX_URL: &str = "https://raw.githubusercontent.com/google/material-design-icons/master/variablefont/MaterialSymbolsOutlined%5BFILL%2CGRAD%2Copsz%2Cwght%5D.codepoints";

/// Default remote host serving per-icon SVG content.
pub const DEFAULT_PAYLOAD_BASE_URL: &str = "https://fonts.gstatic.com/s/i/short-term/release";

/// Fixed file name of the workspace override collection.
pub const WORKSPACE_COLLECTION_FILE: &str = "icons.json";

/// Configuration for a [`CatalogResolver`].
///
/// [`CatalogResolver`]: crate::resolver::CatalogResolver
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Absolute path of a user-supplied collection file. When set and
    /// valid, it overrides every other source.
    pub custom_collection_path: Option<PathBuf>,
    /// Root of the active workspace, if one is open. Locates the override
    /// collection file and is where the registrar persists.
    pub workspace_root: Option<PathBuf>,
    /// Private storage root for the local metadata cache and payload files.
    pub storage_root: PathBuf,
    /// URL of the remote name index.
    pub index_url: String,
    /// Base URL for per-icon payload requests.
    pub payload_base_url: String,
    /// Bound on the remote index fetch, so a catalog load can never hang
    /// the editor session. Expiry counts as fetch failure.
    pub fetch_timeout: Duration,
    /// Connect timeout for all remote requests.
    pub connect_timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            custom_collection_path: None,
            workspace_root: None,
            storage_root: default_storage_root(),
            index_url: DEFAULT_INDEX_URL.to_string(),
            payload_base_url: DEFAULT_PAYLOAD_BASE_URL.to_string(),
            fetch_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl CatalogConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the custom collection override path.
    pub fn with_custom_collection(mut self, path: impl Into<PathBuf>) -> Self {
        self.custom_collection_path = Some(path.into());
        self
    }

    /// Set the workspace root.
    pub fn with_workspace_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(path.into());
        self
    }

    /// Set the private storage root.
    pub fn with_storage_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_root = path.into();
        self
    }

    /// Set the remote index URL.
    pub fn with_index_url(mut self, url: impl Into<String>) -> Self {
        self.index_url = url.into();
        self
    }

    /// Set the remote payload base URL.
    pub fn with_payload_base_url(mut self, url: impl Into<String>) -> Self {
        self.payload_base_url = url.into();
        self
    }

    /// Set the remote fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Path of the workspace override collection file, if a workspace
    /// is open.
    pub fn workspace_collection_path(&self) -> Option<PathBuf> {
        self.workspace_root
            .as_ref()
            .map(|root| root.join(WORKSPACE_COLLECTION_FILE))
    }
}

/// Default storage root under the platform data directory.
fn default_storage_root() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("glyphdex"))
        .unwrap_or_else(|| PathBuf::from(".glyphdex"))
}
