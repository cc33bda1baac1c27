use tower_lsp::lsp_types::{Position, Range};

use super::*;

fn uri() -> Url {
    Url::parse("file:///proj/main.cnd").unwrap()
}

#[test]
fn open_get_close() {
    let store = DocumentStore::new();
    store.open(uri(), "struct A {}".to_string(), 1);

    assert_eq!(store.get_content(&uri()), Some("struct A {}".to_string()));
    assert_eq!(store.version(&uri()), Some(1));

    let closed = store.close(&uri()).unwrap();
    assert_eq!(closed.text, "struct A {}");
    assert!(store.get(&uri()).is_none());
}

#[test]
fn apply_changes_updates_tracked_document() {
    let store = DocumentStore::new();
    store.open(uri(), "struct A {}".to_string(), 1);
    store.apply_changes(
        &uri(),
        vec![TextDocumentContentChangeEvent {
            range: Some(Range::new(Position::new(0, 7), Position::new(0, 8))),
            range_length: None,
            text: "B".to_string(),
        }],
        2,
    );
    let doc = store.get(&uri()).unwrap();
    assert_eq!(doc.text, "struct B {}");
    assert_eq!(doc.version, 2);
}

#[test]
fn full_change_for_unknown_uri_opens_it() {
    let store = DocumentStore::new();
    store.apply_changes(
        &uri(),
        vec![TextDocumentContentChangeEvent {
            range: None,
            range_length: None,
            text: "enum E {\n}".to_string(),
        }],
        4,
    );
    assert_eq!(store.version(&uri()), Some(4));
}

#[test]
fn update_replaces_or_creates() {
    let store = DocumentStore::new();
    store.update(uri(), "v1".to_string(), 1);
    store.update(uri(), "v2".to_string(), 2);
    assert_eq!(store.get_content(&uri()), Some("v2".to_string()));
}
