use tower_lsp::lsp_types::Url;

use super::*;

fn doc(text: &str) -> Document {
    Document::new(Url::parse("file:///proj/main.cnd").unwrap(), text.to_string(), 1)
}

#[test]
fn decorator_target() {
    let (target, range) = target_at(&doc("  @crc(16)"), Position::new(0, 4)).unwrap();
    assert_eq!(target, SymbolTarget::Decorator("crc".to_string()));
    assert_eq!(range.start, Position::new(0, 3));
}

#[test]
fn enum_member_target() {
    let (target, _) = target_at(&doc("  uint8 m @const(Mode.Idle);"), Position::new(0, 23)).unwrap();
    assert_eq!(
        target,
        SymbolTarget::EnumMember {
            enum_name: "Mode".to_string(),
            member: "Idle".to_string(),
        }
    );
    assert_eq!(target.word(), "Idle");
}

#[test]
fn enum_name_before_dot_is_plain_name() {
    let (target, _) = target_at(&doc("  uint8 m @const(Mode.Idle);"), Position::new(0, 18)).unwrap();
    assert_eq!(target, SymbolTarget::Name("Mode".to_string()));
}

#[test]
fn whitespace_has_no_target() {
    assert!(target_at(&doc("   "), Position::new(0, 1)).is_none());
}
