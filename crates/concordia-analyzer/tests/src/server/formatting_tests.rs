use tower_lsp::lsp_types::Url;

use super::*;

fn document(text: &str) -> Document {
    let uri = Url::parse("file:///proj/main.cnd").expect("valid uri");
    Document::new(uri, text.to_string(), 1)
}

#[test]
fn full_document_range_handles_multiline_text() {
    let range = full_document_range(&document("line1\nline2\n"));
    assert_eq!(range.start, Position::new(0, 0));
    assert_eq!(range.end, Position::new(2, 0));
}

#[test]
fn full_document_range_ends_mid_line_without_trailing_newline() {
    let range = full_document_range(&document("struct A {}"));
    assert_eq!(range.end, Position::new(0, 11));
}

#[test]
fn unchanged_output_produces_no_edit() {
    let text = "struct A {\n  uint8 a;\n}\n";
    assert!(replacement_edit(&document(text), text.to_string()).is_none());
}

#[test]
fn changed_output_replaces_whole_buffer() {
    let edit = replacement_edit(&document("struct A{uint8 a;}"), "struct A {\n  uint8 a;\n}\n".to_string()).unwrap();
    assert_eq!(edit.range, Range::new(Position::new(0, 0), Position::new(0, 18)));
    assert_eq!(edit.new_text, "struct A {\n  uint8 a;\n}\n");
}

#[tokio::test]
async fn missing_formatter_is_reported() {
    let compiler = CndCompiler::new("concordia-analyzer-no-such-cnd");
    let result = format_document(&compiler, &document("struct A {}")).await;
    assert!(matches!(result, Err(CompilerError::CommandNotFound(_))));
}
