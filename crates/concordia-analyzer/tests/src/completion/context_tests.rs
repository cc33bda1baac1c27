use super::*;

#[test]
fn enum_underlying_type_after_colon() {
    assert_eq!(detect_context_from_prefix("enum Mode : "), CursorContext::EnumUnderlyingType);
    assert_eq!(detect_context_from_prefix("enum Mode:"), CursorContext::EnumUnderlyingType);
    assert_eq!(detect_context_from_prefix("enum Mode : ui"), CursorContext::EnumUnderlyingType);
}

#[test]
fn enum_member_after_capitalized_dot() {
    assert_eq!(
        detect_context_from_prefix("  @const(Mode."),
        CursorContext::EnumMember {
            enum_name: "Mode".to_string(),
        }
    );
    assert_eq!(detect_context_from_prefix("  header."), CursorContext::General);
}

#[test]
fn decorator_after_at() {
    assert_eq!(detect_context_from_prefix("@"), CursorContext::Decorator);
    assert_eq!(detect_context_from_prefix("  uint16 crc @cr"), CursorContext::Decorator);
}

#[test]
fn expression_inside_open_expr() {
    assert_eq!(detect_context_from_prefix("  float t @expr("), CursorContext::Expression);
    assert_eq!(detect_context_from_prefix("  float t @expr(raw * (2 + "), CursorContext::Expression);
    assert_eq!(detect_context_from_prefix("  float t @expr(raw) "), CursorContext::General);
}

#[test]
fn detect_context_uses_cursor_line_and_column() {
    let text = "struct A {\n  mode: Mode.Idle\n}";
    assert_eq!(
        detect_context(text, Position::new(1, 13)),
        CursorContext::EnumMember {
            enum_name: "Mode".to_string(),
        }
    );
    assert_eq!(detect_context(text, Position::new(1, 2)), CursorContext::General);
    assert_eq!(detect_context(text, Position::new(9, 0)), CursorContext::General);
}

#[test]
fn field_reference_inside_open_count_or_len() {
    assert_eq!(detect_context_from_prefix("  uint8 data[] @count("), CursorContext::FieldReference);
    assert_eq!(detect_context_from_prefix("  uint8 data[] @len(he"), CursorContext::FieldReference);
    assert_eq!(detect_context_from_prefix("  uint8 data[] @len(n) "), CursorContext::General);
    assert_eq!(detect_context_from_prefix("  float t @expr(abs("), CursorContext::Expression);
    assert_eq!(detect_context_from_prefix("  uint8 v @const("), CursorContext::General);
}
