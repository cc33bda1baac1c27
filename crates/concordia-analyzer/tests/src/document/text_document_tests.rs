use super::*;

fn test_doc(text: &str) -> Document {
    Document::new(Url::parse("file:///proj/main.cnd").unwrap(), text.to_string(), 1)
}

#[test]
fn line_text_strips_terminators() {
    let doc = test_doc("struct A {\r\n}\n");
    assert_eq!(doc.line_count(), 3);
    assert_eq!(doc.line_text(0), Some("struct A {"));
    assert_eq!(doc.line_text(1), Some("}"));
    assert_eq!(doc.line_text(2), Some(""));
    assert_eq!(doc.line_text(3), None);
}

#[test]
fn offset_and_position_agree() {
    let doc = test_doc("enum Mode {\n  Idle\n}");
    let pos = Position::new(1, 2);
    let offset = doc.offset_of(pos).unwrap();
    assert_eq!(offset, 14);
    assert_eq!(doc.position_of(offset), pos);
}

#[test]
fn offset_clamps_to_line_end() {
    let doc = test_doc("ab\ncd");
    assert_eq!(doc.offset_of(Position::new(0, 99)), Some(2));
    assert_eq!(doc.offset_of(Position::new(5, 0)), None);
}

#[test]
fn utf16_columns_are_respected() {
    let doc = test_doc("/// é😀 Name");
    let (word, range) = doc.word_at(Position::new(0, 9)).unwrap();
    assert_eq!(word, "Name");
    assert_eq!(range.start, Position::new(0, 8));
    assert_eq!(range.end, Position::new(0, 12));
}

#[test]
fn word_at_inside_and_after_word() {
    let doc = test_doc("  Header h @count(4);");
    assert_eq!(doc.word_at(Position::new(0, 4)).map(|(w, _)| w), Some("Header".to_string()));
    assert_eq!(doc.word_at(Position::new(0, 8)).map(|(w, _)| w), Some("Header".to_string()));
    assert_eq!(doc.word_at(Position::new(0, 13)).map(|(w, _)| w), Some("count".to_string()));
    assert_eq!(doc.word_at(Position::new(0, 0)), None);
}

#[test]
fn line_prefix_stops_at_cursor() {
    let doc = test_doc("  mode: Mode.Idle;");
    assert_eq!(doc.line_prefix(Position::new(0, 13)), Some("  mode: Mode."));
}

#[test]
fn incremental_change_is_applied() {
    let mut doc = test_doc("struct A {}\n");
    doc.apply_changes(
        vec![TextDocumentContentChangeEvent {
            range: Some(Range::new(Position::new(0, 7), Position::new(0, 8))),
            range_length: None,
            text: "Header".to_string(),
        }],
        2,
    );
    assert_eq!(doc.text, "struct Header {}\n");
    assert_eq!(doc.version, 2);
}

#[test]
fn full_change_replaces_text_and_lines() {
    let mut doc = test_doc("one");
    doc.apply_changes(
        vec![TextDocumentContentChangeEvent {
            range: None,
            range_length: None,
            text: "a\nb\nc".to_string(),
        }],
        3,
    );
    assert_eq!(doc.line_count(), 3);
    assert_eq!(doc.end_position(), Position::new(2, 1));
}

#[test]
fn path_comes_from_file_uri() {
    let doc = test_doc("");
    assert_eq!(doc.path(), Some(PathBuf::from("/proj/main.cnd")));
}
