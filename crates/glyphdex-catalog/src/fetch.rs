//! Remote catalog acquisition.
//!
//! Fetches the canonical icon name index from the remote host and turns it
//! into an initial deduplicated record collection. The index is a
//! newline-delimited text format where the first whitespace-delimited token
//! of each line is the icon name (the remainder is an auxiliary value the
//! catalog does not use).
//!
//! One attempt, no retries; the fetch timeout comes from the shared HTTP
//! client. On any failure the fetcher degrades to a small synthetic set so
//! consuming surfaces never see a hard error.

use std::collections::HashSet;

use crate::record::{IconCategory, IconRecord};

/// Fetches and parses the remote icon name index.
#[derive(Debug, Clone)]
pub struct RemoteCatalogFetcher {
    client: reqwest::Client,
    index_url: String,
}

impl RemoteCatalogFetcher {
    /// Create a fetcher targeting the given index URL.
    pub fn new(client: reqwest::Client, index_url: impl Into<String>) -> Self {
        Self {
            client,
            index_url: index_url.into(),
        }
    }

    /// The index URL this fetcher targets.
    pub fn index_url(&self) -> &str {
        &self.index_url
    }

    /// Fetch the full catalog.
    ///
    /// Network or HTTP failure yields the synthetic fallback set rather
    /// than an error; the caller never has to handle a fetch failure.
    pub async fn fetch_all(&self) -> Vec<IconRecord> {
        match self.fetch_index().await {
            Ok(body) => {
                let records = parse_index(&body);
                tracing::debug!("Fetched remote icon index: {} records", records.len());
                records
            }
            Err(err) => {
                tracing::warn!("Remote icon index fetch failed, using fallback set: {}", err);
                fallback_set()
            }
        }
    }

    async fn fetch_index(&self) -> crate::Result<String> {
        let response = self.client.get(&self.index_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(crate::Error::HttpStatus(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

/// Parse the newline-delimited name index into records.
///
/// Deduplicates by name as it parses: the first occurrence wins and later
/// duplicate lines are dropped silently, keeping the parse idempotent
/// against malformed upstream data.
pub fn parse_index(body: &str) -> Vec<IconRecord> {
    let mut seen = HashSet::new();
    let mut records = Vec::new();
    for line in body.lines() {
        let Some(name) = line.split_whitespace().next() else {
            continue;
        };
        if !seen.insert(name.to_string()) {
            continue;
        }
        records.push(IconRecord::new(name));
    }
    records
}

/// Synthetic minimal catalog: one placeholder record per category.
///
/// Used when the remote index cannot be fetched at all, so surfaces still
/// have something to suggest.
pub fn fallback_set() -> Vec<IconRecord> {
    IconCategory::ALL
        .iter()
        .map(|category| IconRecord::new(format!("{category}_icon")))
        .collect()
}
