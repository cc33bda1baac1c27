use tower_lsp::lsp_types::{Hover, Position};
use tracing::debug;

use super::{
    decorator::decorator_hover,
    definition::{definition_hover, member_hover},
};
use crate::{
    document::{Document, SymbolTarget, target_at},
    language,
    resolve::{Resolver, find_definition, find_enum},
};

/// Hover for decorators, user types and enum members.
#[derive(Debug, Default)]
pub struct HoverProvider;

impl HoverProvider {
    pub fn new() -> Self {
        Self
    }

    pub fn provide(
        &self,
        document: &Document,
        position: Position,
        max_depth: usize,
    ) -> Option<Hover> {
        let (target, range) = target_at(document, position)?;
        debug!("Hover requested for {target:?}");

        if let SymbolTarget::Decorator(name) = &target
            && let Some(decorator) = language::decorator(name)
        {
            return Some(decorator_hover(decorator, range));
        }

        let path = document.path()?;
        let definitions = Resolver::default().with_max_depth(max_depth).resolve(&path, Some(&document.text));

        if let SymbolTarget::EnumMember {
            enum_name,
            member,
        } = &target
            && let Some(def) = find_enum(&definitions, enum_name)
            && let Some(member) = def.member(member)
        {
            return Some(member_hover(def, member, range));
        }

        find_definition(&definitions, target.word()).map(|def| definition_hover(def, range))
    }
}

#[cfg(test)]
#[path = "../../tests/src/hover/provider_tests.rs"]
mod tests;
