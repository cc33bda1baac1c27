use std::{
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use tower_lsp::lsp_types::Url;

use super::*;

const TEXT: &str = "@import(\"other.cnd\")\n\n/// A header.\nstruct Header {\n  uint8 version;\n}\n\nenum Mode : uint8 {\n  Off = 0\n  On = 1\n}\npacket Ping {}\n";

struct Fixture {
    root: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos()).unwrap_or(0);
        let root = std::env::temp_dir().join(format!("concordia-symbols-{}-{nanos}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("other.cnd"), "struct Elsewhere {}\n").unwrap();
        Self {
            root,
        }
    }

    fn document(&self) -> Document {
        let uri = Url::from_file_path(self.root.join("main.cnd")).unwrap();
        Document::new(uri, TEXT.to_string(), 1)
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

#[test]
fn lists_only_local_definitions_in_order() {
    let fixture = Fixture::new();
    let symbols = document_symbols(&fixture.document());

    let names: Vec<_> = symbols.iter().map(|s| (s.name.as_str(), s.kind)).collect();
    assert_eq!(
        names,
        vec![("Header", SymbolKind::STRUCT), ("Mode", SymbolKind::ENUM), ("Ping", SymbolKind::CLASS)]
    );
    assert_eq!(symbols[1].detail.as_deref(), Some("enum"));
}

#[test]
fn ranges_cover_the_declaring_line() {
    let fixture = Fixture::new();
    let symbols = document_symbols(&fixture.document());

    assert_eq!(symbols[0].range, Range::new(Position::new(3, 0), Position::new(3, 15)));
    assert_eq!(symbols[0].selection_range, symbols[0].range);
    assert!(symbols[0].children.is_none());
}

#[test]
fn enum_members_become_children() {
    let fixture = Fixture::new();
    let symbols = document_symbols(&fixture.document());

    let children = symbols[1].children.as_ref().unwrap();
    let members: Vec<_> = children.iter().map(|c| (c.name.as_str(), c.range.start.line)).collect();
    assert_eq!(members, vec![("Off", 8), ("On", 9)]);
    assert!(children.iter().all(|c| c.kind == SymbolKind::ENUM_MEMBER));
}

#[test]
fn non_file_uri_has_no_symbols() {
    let uri = Url::parse("untitled:Untitled-1").unwrap();
    let document = Document::new(uri, TEXT.to_string(), 1);
    assert!(document_symbols(&document).is_empty());
}
