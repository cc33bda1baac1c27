use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind, Range};

use crate::language::Decorator;

/// Hover for a built-in decorator: usage block, then its description.
pub(crate) fn decorator_hover(
    decorator: &Decorator,
    range: Range,
) -> Hover {
    let mut md = String::new();
    md.push_str("```concordia\n@");
    md.push_str(decorator.usage);
    md.push_str("\n```\n");
    md.push_str("\n---\n\n");
    md.push_str(decorator.doc);
    md.push_str("\n\n*(Decorator)*\n");

    Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: md,
        }),
        range: Some(range),
    }
}
