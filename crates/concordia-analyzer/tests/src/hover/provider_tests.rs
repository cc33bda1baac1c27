use std::{
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use expect_test::expect;
use tower_lsp::lsp_types::{HoverContents, Url};

use super::*;

const TYPES: &str = "/// Operating mode.\n/// Second line.\nenum Mode : uint8 {\n  /// Powered down.\n  Off = 0\n  On = 1\n}\n\n@big_endian\npacket Beacon {}\n";
const MAIN: &str = "@import(\"types.cnd\")\nstruct Status {\n  Mode mode @const(Mode.On);\n}\n";

struct Fixture {
    root: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos()).unwrap_or(0);
        let root = std::env::temp_dir().join(format!("concordia-hover-{}-{nanos}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("types.cnd"), TYPES).unwrap();
        Self {
            root,
        }
    }

    fn main_document(&self) -> Document {
        let uri = Url::from_file_path(self.root.join("main.cnd")).unwrap();
        Document::new(uri, MAIN.to_string(), 1)
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

fn markdown(hover: Hover) -> String {
    match hover.contents {
        HoverContents::Markup(content) => content.value,
        other => panic!("unexpected hover contents: {other:?}"),
    }
}

#[test]
fn enum_hover_shows_kind_file_doc_and_members() {
    let fixture = Fixture::new();
    let hover = HoverProvider::new().provide(&fixture.main_document(), Position::new(2, 3), 64).unwrap();
    assert_eq!(hover.range.map(|r| r.start), Some(Position::new(2, 2)));

    expect![[r#"
        ```concordia
        enum Mode
        ```
        Defined in **types.cnd**

        ___
        Operating mode.
        Second line.

        **Members**
        - `Off`: Powered down.
        - `On`
    "#]]
    .assert_eq(&markdown(hover));
}

#[test]
fn enum_member_hover() {
    let fixture = Fixture::new();
    let hover = HoverProvider::new().provide(&fixture.main_document(), Position::new(2, 24), 64).unwrap();
    assert_eq!(markdown(hover), "```concordia\nMode.On\n```\nMember of enum `Mode` in **types.cnd**\n");
}

#[test]
fn decorator_hover_needs_no_resolution() {
    let fixture = Fixture::new();
    let hover = HoverProvider::new().provide(&fixture.main_document(), Position::new(2, 14), 64).unwrap();
    assert_eq!(
        markdown(hover),
        "```concordia\n@const(VALUE)\n```\n\n---\n\nEnforces a constant value for a field.\n\n*(Decorator)*\n"
    );
}

#[test]
fn struct_hover_without_doc() {
    let fixture = Fixture::new();
    let hover = HoverProvider::new().provide(&fixture.main_document(), Position::new(1, 8), 64).unwrap();
    assert_eq!(markdown(hover), "```concordia\nstruct Status\n```\nDefined in **main.cnd**\n");
}

#[test]
fn unknown_word_and_blank_space_have_no_hover() {
    let fixture = Fixture::new();
    let provider = HoverProvider::new();
    assert!(provider.provide(&fixture.main_document(), Position::new(2, 8), 64).is_none());
    assert!(provider.provide(&fixture.main_document(), Position::new(3, 1), 64).is_none());
}
