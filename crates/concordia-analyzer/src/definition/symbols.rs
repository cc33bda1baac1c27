use tower_lsp::lsp_types::{DocumentSymbol, Position, Range, SymbolKind};

use crate::{
    document::Document,
    resolve::{DefinitionKind, Resolver, normalize_path},
};

/// Outline of the definitions declared in `document` itself. Imports are not
/// followed.
pub fn document_symbols(document: &Document) -> Vec<DocumentSymbol> {
    let Some(path) = document.path() else {
        return Vec::new();
    };
    let own = normalize_path(&path);

    Resolver::default()
        .with_max_depth(0)
        .resolve(&path, Some(&document.text))
        .into_iter()
        .filter(|def| def.is_defined_in(&own))
        .map(|def| {
            let members = def
                .members
                .iter()
                .map(|m| symbol(document, m.name.clone(), None, SymbolKind::ENUM_MEMBER, m.line, None))
                .collect::<Vec<_>>();
            let kind = match def.kind {
                DefinitionKind::Struct => SymbolKind::STRUCT,
                DefinitionKind::Packet => SymbolKind::CLASS,
                DefinitionKind::Enum => SymbolKind::ENUM,
            };
            let detail = Some(def.kind.keyword().to_string());
            let children = (!members.is_empty()).then_some(members);
            symbol(document, def.name, detail, kind, def.line, children)
        })
        .collect()
}

fn symbol(
    document: &Document,
    name: String,
    detail: Option<String>,
    kind: SymbolKind,
    line: usize,
    children: Option<Vec<DocumentSymbol>>,
) -> DocumentSymbol {
    let width = document.line_text(line).map_or(0, |text| text.encode_utf16().count()) as u32;
    let range = Range::new(Position::new(line as u32, 0), Position::new(line as u32, width));
    DocumentSymbol {
        name,
        detail,
        kind,
        tags: None,
        #[allow(deprecated)]
        deprecated: None,
        range,
        selection_range: range,
        children,
    }
}

#[cfg(test)]
#[path = "../../tests/src/definition/symbols_tests.rs"]
mod tests;
