use std::{
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use super::*;

const TYPES: &str = "enum Mode : uint8 {\n  Off = 0\n  /// Running.\n  On = 1\n}\n\nstruct Header {\n  uint8 version;\n}\n";
const MAIN: &str = "@import(\"types.cnd\")\n\nstruct Status {\n  Header header;\n  Mode mode @const(Mode.On);\n  uint8 level @range(0, 10);\n}\n";

struct Fixture {
    root: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos()).unwrap_or(0);
        let root = std::env::temp_dir().join(format!("concordia-definition-{}-{nanos}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("types.cnd"), TYPES).unwrap();
        Self {
            root,
        }
    }

    fn document(
        &self,
        text: &str,
    ) -> Document {
        let uri = Url::from_file_path(self.root.join("main.cnd")).unwrap();
        Document::new(uri, text.to_string(), 1)
    }

    fn uri(
        &self,
        name: &str,
    ) -> Url {
        Url::from_file_path(crate::resolve::normalize_path(&self.root.join(name))).unwrap()
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

#[test]
fn imported_type_jumps_to_its_line() {
    let fixture = Fixture::new();
    let location = DefinitionProvider::new().provide(&fixture.document(MAIN), Position::new(3, 4), 64).unwrap();

    assert_eq!(location.uri, fixture.uri("types.cnd"));
    assert_eq!(location.range, Range::new(Position::new(6, 0), Position::new(6, 0)));
}

#[test]
fn local_type_resolves_in_the_buffer() {
    let fixture = Fixture::new();
    let text = "struct Inner {}\nstruct Outer {\n  Inner inner;\n}\n";
    let location = DefinitionProvider::new().provide(&fixture.document(text), Position::new(2, 3), 64).unwrap();

    assert_eq!(location.uri, fixture.uri("main.cnd"));
    assert_eq!(location.range.start, Position::new(0, 0));
}

#[test]
fn enum_member_jumps_to_member_line() {
    let fixture = Fixture::new();
    // `On` inside `Mode.On`
    let location = DefinitionProvider::new().provide(&fixture.document(MAIN), Position::new(4, 25), 64).unwrap();

    assert_eq!(location.uri, fixture.uri("types.cnd"));
    assert_eq!(location.range.start, Position::new(3, 0));
}

#[test]
fn unknown_enum_member_falls_back_to_enum() {
    let fixture = Fixture::new();
    let text = "@import(\"types.cnd\")\nstruct S {\n  Mode m @const(Mode.Idle);\n}\n";
    let location = DefinitionProvider::new().provide(&fixture.document(text), Position::new(2, 22), 64).unwrap();

    assert_eq!(location.range.start, Position::new(0, 0));
}

#[test]
fn unknown_words_and_decorators_have_no_definition() {
    let fixture = Fixture::new();
    let provider = DefinitionProvider::new();
    let document = fixture.document(MAIN);

    // `uint8`
    assert!(provider.provide(&document, Position::new(5, 3), 64).is_none());
    // `range` after `@`
    assert!(provider.provide(&document, Position::new(5, 16), 64).is_none());
    // blank line
    assert!(provider.provide(&document, Position::new(1, 0), 64).is_none());
}

#[test]
fn depth_zero_ignores_imports() {
    let fixture = Fixture::new();
    assert!(DefinitionProvider::new().provide(&fixture.document(MAIN), Position::new(3, 4), 0).is_none());
}
