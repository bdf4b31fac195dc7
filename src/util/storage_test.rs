use super::*;

#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
struct Draft {
    title: String,
}

#[test]
fn memory_storage_set_get_remove() {
    let store = MemoryStorage::new();
    assert!(store.is_available());
    store.set("k", "v");
    assert_eq!(store.get("k").as_deref(), Some("v"));
    store.remove("k");
    assert_eq!(store.get("k"), None);
    assert!(store.is_empty());
}

#[test]
fn memory_storage_clones_share_entries() {
    let store = MemoryStorage::new();
    let other = store.clone();
    other.set("access_token", "T");
    assert!(store.contains("access_token"));
    assert_eq!(store.len(), 1);
}

#[test]
fn memory_storage_remove_missing_key_is_noop() {
    let store = MemoryStorage::new().with_entry("a", "1");
    store.remove("b");
    assert_eq!(store.len(), 1);
}

#[test]
fn unavailable_memory_storage_reports_unavailable() {
    assert!(!MemoryStorage::unavailable().is_available());
}

#[test]
fn json_helpers_round_trip_value() {
    let store = MemoryStorage::new();
    save_json(&store, "draft", &Draft { title: "hello".into() });
    let loaded: Option<Draft> = load_json(&store, "draft");
    assert_eq!(loaded, Some(Draft { title: "hello".into() }));
}

#[test]
fn load_json_ignores_garbage() {
    let store = MemoryStorage::new().with_entry("draft", "{not json");
    let loaded: Option<Draft> = load_json(&store, "draft");
    assert_eq!(loaded, None);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_storage_is_inert_outside_browser() {
    let store = BrowserStorage;
    assert!(!store.is_available());
    store.set("k", "v");
    assert_eq!(store.get("k"), None);
    store.remove("k");
}
