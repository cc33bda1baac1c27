use std::path::Path;

use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, Documentation, InsertTextFormat, MarkupContent, MarkupKind, Position,
};
use tracing::trace;

use crate::{
    completion::{
        context::{CursorContext, detect_context},
        fields::enclosing_fields,
    },
    language::{DECORATORS, ENUM_INT_TYPES, EXPR_FUNCTIONS, KEYWORDS, PRIMITIVE_TYPES},
    resolve::{Definition, DefinitionKind, Resolver, find_enum},
};

/// Snippets offered in the general context.
static SNIPPETS: &[(&str, &str, &str)] = &[
    ("struct", "struct ${1:Name} {\n\t$0\n}", "Define a new struct"),
    ("packet", "packet ${1:Name} {\n\t$0\n}", "Define a new packet"),
    ("enum", "enum ${1:Name} : ${2:uint32} {\n\t${3:Member} = ${4:0}\n}", "Define a new enum"),
];

/// Completion items for `.cnd` buffers.
///
/// User types come from resolving the buffer and its imports on every
/// request, so results always reflect unsaved edits.
#[derive(Debug, Default)]
pub struct CompletionProvider;

impl CompletionProvider {
    pub fn new() -> Self {
        Self
    }

    pub fn provide(
        &self,
        path: &Path,
        text: &str,
        position: Position,
        max_depth: usize,
    ) -> Vec<CompletionItem> {
        let ctx = detect_context(text, position);
        trace!("Completion context at {}:{}: {ctx:?}", position.line, position.character);

        match ctx {
            CursorContext::EnumUnderlyingType => self.enum_type_completions(),
            CursorContext::EnumMember {
                ref enum_name,
            } => {
                let definitions = resolve_buffer(path, text, max_depth);
                self.enum_member_completions(&definitions, enum_name)
            },
            CursorContext::Decorator => self.decorator_completions(),
            CursorContext::Expression => {
                let mut items = self.expression_completions();
                items.extend(self.field_completions(text, position));
                items
            },
            CursorContext::FieldReference => self.field_completions(text, position),
            CursorContext::General => {
                let definitions = resolve_buffer(path, text, max_depth);
                self.general_completions(&definitions)
            },
        }
    }

    fn enum_type_completions(&self) -> Vec<CompletionItem> {
        ENUM_INT_TYPES
            .iter()
            .enumerate()
            .map(|(i, ty)| CompletionItem {
                label: ty.to_string(),
                kind: Some(CompletionItemKind::CLASS),
                sort_text: Some(format!("{i:02}_{ty}")),
                ..Default::default()
            })
            .collect()
    }

    fn enum_member_completions(
        &self,
        definitions: &[Definition],
        enum_name: &str,
    ) -> Vec<CompletionItem> {
        let Some(def) = find_enum(definitions, enum_name) else {
            return Vec::new();
        };
        def.members
            .iter()
            .enumerate()
            .map(|(i, member)| CompletionItem {
                label: member.name.clone(),
                kind: Some(CompletionItemKind::ENUM_MEMBER),
                detail: Some(format!("{}.{}", def.name, member.name)),
                documentation: member.doc.as_deref().map(markdown),
                sort_text: Some(format!("{i:04}")),
                ..Default::default()
            })
            .collect()
    }

    fn decorator_completions(&self) -> Vec<CompletionItem> {
        DECORATORS
            .iter()
            .map(|decorator| CompletionItem {
                label: decorator.name.to_string(),
                kind: Some(CompletionItemKind::FUNCTION),
                detail: Some(decorator.usage.to_string()),
                documentation: Some(markdown(decorator.doc)),
                ..Default::default()
            })
            .collect()
    }

    fn expression_completions(&self) -> Vec<CompletionItem> {
        EXPR_FUNCTIONS
            .iter()
            .map(|(name, kind)| CompletionItem {
                label: name.to_string(),
                kind: Some(CompletionItemKind::FUNCTION),
                detail: Some(kind.detail().to_string()),
                ..Default::default()
            })
            .collect()
    }

    fn field_completions(
        &self,
        text: &str,
        position: Position,
    ) -> Vec<CompletionItem> {
        enclosing_fields(text, position)
            .into_iter()
            .map(|name| CompletionItem {
                label: name,
                kind: Some(CompletionItemKind::FIELD),
                detail: Some("Field".to_string()),
                ..Default::default()
            })
            .collect()
    }

    fn general_completions(
        &self,
        definitions: &[Definition],
    ) -> Vec<CompletionItem> {
        let mut items = Vec::new();

        for def in definitions.iter().filter(|d| d.kind.is_type_usable()) {
            items.push(CompletionItem {
                label: def.name.clone(),
                kind: Some(match def.kind {
                    DefinitionKind::Enum => CompletionItemKind::ENUM,
                    _ => CompletionItemKind::STRUCT,
                }),
                detail: Some(format!("Defined in {}", def.file_name())),
                documentation: def.doc.as_deref().map(markdown),
                sort_text: Some(format!("0_{}", def.name)),
                ..Default::default()
            });
        }

        for keyword in KEYWORDS {
            items.push(CompletionItem {
                label: keyword.to_string(),
                kind: Some(CompletionItemKind::KEYWORD),
                sort_text: Some(format!("1_{keyword}")),
                ..Default::default()
            });
        }

        for ty in PRIMITIVE_TYPES {
            items.push(CompletionItem {
                label: ty.to_string(),
                kind: Some(CompletionItemKind::CLASS),
                sort_text: Some(format!("2_{ty}")),
                ..Default::default()
            });
        }

        for (label, body, detail) in SNIPPETS {
            items.push(CompletionItem {
                label: label.to_string(),
                kind: Some(CompletionItemKind::SNIPPET),
                detail: Some(detail.to_string()),
                insert_text: Some(body.to_string()),
                insert_text_format: Some(InsertTextFormat::SNIPPET),
                sort_text: Some(format!("3_{label}")),
                ..Default::default()
            });
        }

        items
    }
}

fn resolve_buffer(
    path: &Path,
    text: &str,
    max_depth: usize,
) -> Vec<Definition> {
    Resolver::default().with_max_depth(max_depth).resolve(path, Some(text))
}

fn markdown(value: &str) -> Documentation {
    Documentation::MarkupContent(MarkupContent {
        kind: MarkupKind::Markdown,
        value: value.to_string(),
    })
}

#[cfg(test)]
#[path = "../../tests/src/completion/provider_tests.rs"]
mod tests;
