//! Integration tests for catalog source precedence and caching.

use std::path::Path;

use glyphdex_catalog::{
    CatalogCache, CatalogConfig, CatalogResolver, IconCategory, IconRecord,
    WORKSPACE_COLLECTION_FILE,
};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A remote index URL that fails fast (connection refused, port 9).
const DEAD_INDEX_URL: &str = "http://127.0.0.1:9/index";

fn write_collection(target: &Path, names: &[&str]) {
    let records: Vec<IconRecord> = names.iter().copied().map(IconRecord::new).collect();
    std::fs::write(target, serde_json::to_string(&records).unwrap()).unwrap();
}

fn names(records: &[IconRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

#[tokio::test]
async fn test_custom_path_wins_over_all_sources() {
    let dir = TempDir::new().unwrap();
    let custom = dir.path().join("custom.json");
    let workspace = dir.path().join("ws");
    let storage = dir.path().join("storage");
    std::fs::create_dir_all(&workspace).unwrap();

    write_collection(&custom, &["custom_icon_a", "custom_icon_b"]);
    write_collection(&workspace.join(WORKSPACE_COLLECTION_FILE), &["ws_icon"]);
    CatalogCache::new(&storage)
        .save_metadata(&[IconRecord::new("cached_icon")])
        .unwrap();

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/index"))
        .respond_with(ResponseTemplate::new(200).set_body_string("remote_icon e88a\n"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let resolver = CatalogResolver::new(
        CatalogConfig::new()
            .with_custom_collection(&custom)
            .with_workspace_root(&workspace)
            .with_storage_root(&storage)
            .with_index_url(format!("{}/index", mock_server.uri())),
    );

    let catalog = resolver.load().await;
    assert_eq!(names(&catalog), vec!["custom_icon_a", "custom_icon_b"]);
}

#[tokio::test]
async fn test_missing_custom_path_falls_through_to_workspace() {
    let dir = TempDir::new().unwrap();
    let workspace = dir.path().join("ws");
    std::fs::create_dir_all(&workspace).unwrap();
    write_collection(&workspace.join(WORKSPACE_COLLECTION_FILE), &["ws_icon"]);

    let resolver = CatalogResolver::new(
        CatalogConfig::new()
            .with_custom_collection(dir.path().join("does_not_exist.json"))
            .with_workspace_root(&workspace)
            .with_storage_root(dir.path().join("storage"))
            .with_index_url(DEAD_INDEX_URL),
    );

    let catalog = resolver.load().await;
    assert_eq!(names(&catalog), vec!["ws_icon"]);
}

#[tokio::test]
async fn test_malformed_workspace_file_falls_through_to_cache() {
    let dir = TempDir::new().unwrap();
    let workspace = dir.path().join("ws");
    let storage = dir.path().join("storage");
    std::fs::create_dir_all(&workspace).unwrap();
    std::fs::write(workspace.join(WORKSPACE_COLLECTION_FILE), "{ truncated").unwrap();
    CatalogCache::new(&storage)
        .save_metadata(&[IconRecord::new("cached_icon")])
        .unwrap();

    let resolver = CatalogResolver::new(
        CatalogConfig::new()
            .with_workspace_root(&workspace)
            .with_storage_root(&storage)
            .with_index_url(DEAD_INDEX_URL),
    );

    let catalog = resolver.load().await;
    assert_eq!(names(&catalog), vec!["cached_icon"]);
}

#[tokio::test]
async fn test_cache_hit_never_touches_network() {
    let dir = TempDir::new().unwrap();
    let storage = dir.path().join("storage");
    CatalogCache::new(&storage)
        .save_metadata(&[IconRecord::new("cached_icon")])
        .unwrap();

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("remote_icon e88a\n"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let resolver = CatalogResolver::new(
        CatalogConfig::new()
            .with_storage_root(&storage)
            .with_index_url(format!("{}/index", mock_server.uri())),
    );

    let catalog = resolver.load().await;
    assert_eq!(names(&catalog), vec!["cached_icon"]);
}

#[tokio::test]
async fn test_remote_fetch_dedups_and_persists_cache() {
    let dir = TempDir::new().unwrap();
    let storage = dir.path().join("storage");

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/index"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("home 1\nhome 1\nhome_outline 2\n"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let resolver = CatalogResolver::new(
        CatalogConfig::new()
            .with_storage_root(&storage)
            .with_index_url(format!("{}/index", mock_server.uri())),
    );

    let catalog = resolver.load().await;
    assert_eq!(names(&catalog), vec!["home", "home_outline"]);
    assert_eq!(catalog[0].category, IconCategory::Home);

    // The fetched collection became the local metadata cache.
    let cached = CatalogCache::new(&storage).load_metadata().unwrap();
    assert_eq!(names(&cached), vec!["home", "home_outline"]);
}

#[tokio::test]
async fn test_failed_cache_write_still_returns_fetched_records() {
    let dir = TempDir::new().unwrap();
    // A plain file where the storage directory should be makes every
    // cache write fail; the fetched catalog must come back regardless.
    let storage = dir.path().join("storage");
    std::fs::write(&storage, "blocker").unwrap();

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/index"))
        .respond_with(ResponseTemplate::new(200).set_body_string("home 1\nstar 2\n"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resolver = CatalogResolver::new(
        CatalogConfig::new()
            .with_storage_root(&storage)
            .with_index_url(format!("{}/index", mock_server.uri())),
    );

    let catalog = resolver.load().await;
    assert_eq!(names(&catalog), vec!["home", "star"]);

    // Nothing was cached; the blocker file is untouched.
    assert_eq!(std::fs::read_to_string(&storage).unwrap(), "blocker");
}

#[tokio::test]
async fn test_concurrent_loads_share_one_fetch() {
    let dir = TempDir::new().unwrap();

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/index"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("home e88a\n")
                .set_delay(std::time::Duration::from_millis(50)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let resolver = CatalogResolver::new(
        CatalogConfig::new()
            .with_storage_root(dir.path().join("storage"))
            .with_index_url(format!("{}/index", mock_server.uri())),
    );

    let (first, second) = tokio::join!(resolver.load(), resolver.load());
    assert_eq!(first, second);
    assert_eq!(names(&first), vec!["home"]);
    // MockServer verifies the expect(1) bound on drop.
}

#[tokio::test]
async fn test_total_network_failure_yields_synthetic_fallback() {
    let dir = TempDir::new().unwrap();

    let resolver = CatalogResolver::new(
        CatalogConfig::new()
            .with_storage_root(dir.path().join("storage"))
            .with_index_url(DEAD_INDEX_URL),
    );

    let catalog = resolver.load().await;
    assert_eq!(catalog.len(), IconCategory::ALL.len());
    assert!(catalog.iter().any(|r| r.name == "home_icon"));
    assert!(catalog.iter().any(|r| r.name == "other_icon"));
}

#[tokio::test]
async fn test_http_error_status_yields_synthetic_fallback() {
    let dir = TempDir::new().unwrap();

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let resolver = CatalogResolver::new(
        CatalogConfig::new()
            .with_storage_root(dir.path().join("storage"))
            .with_index_url(format!("{}/index", mock_server.uri())),
    );

    let catalog = resolver.load().await;
    assert_eq!(catalog.len(), IconCategory::ALL.len());
}

#[tokio::test]
async fn test_empty_collection_is_returned_not_an_error() {
    let dir = TempDir::new().unwrap();
    let custom = dir.path().join("empty.json");
    std::fs::write(&custom, "[]").unwrap();

    let resolver = CatalogResolver::new(
        CatalogConfig::new()
            .with_custom_collection(&custom)
            .with_storage_root(dir.path().join("storage"))
            .with_index_url(DEAD_INDEX_URL),
    );

    assert!(resolver.load().await.is_empty());
}
