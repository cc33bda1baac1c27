use std::path::Path;

use tower_lsp::lsp_types::{Location, Position, Range, Url};
use tracing::debug;

use crate::{
    document::{Document, SymbolTarget, target_at},
    resolve::{Resolver, find_definition, find_enum},
};

/// Jumps from a type or enum member name to the line declaring it, following
/// imports from the current buffer.
#[derive(Debug, Default)]
pub struct DefinitionProvider;

impl DefinitionProvider {
    pub fn new() -> Self {
        Self
    }

    pub fn provide(
        &self,
        document: &Document,
        position: Position,
        max_depth: usize,
    ) -> Option<Location> {
        let (target, _) = target_at(document, position)?;
        if matches!(target, SymbolTarget::Decorator(_)) {
            return None;
        }

        let path = document.path()?;
        let definitions = Resolver::default().with_max_depth(max_depth).resolve(&path, Some(&document.text));

        if let SymbolTarget::EnumMember {
            enum_name,
            member,
        } = &target
            && let Some(def) = find_enum(&definitions, enum_name)
        {
            // An unknown member still lands on its enum.
            let line = def.member(member).map_or(def.line, |m| m.line);
            return line_location(&def.source_file, line);
        }

        let Some(def) = find_definition(&definitions, target.word()) else {
            debug!("No definition for '{}'", target.word());
            return None;
        };
        line_location(&def.source_file, def.line)
    }
}

fn line_location(
    path: &Path,
    line: usize,
) -> Option<Location> {
    let uri = Url::from_file_path(path).ok()?;
    let start = Position::new(line as u32, 0);
    Some(Location::new(uri, Range::new(start, start)))
}

#[cfg(test)]
#[path = "../../tests/src/definition/provider_tests.rs"]
mod tests;
