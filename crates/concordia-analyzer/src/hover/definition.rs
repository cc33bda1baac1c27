use std::fmt::Write;

use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind, Range};

use crate::resolve::{Definition, DefinitionKind, Member};

pub(crate) fn definition_hover(
    def: &Definition,
    range: Range,
) -> Hover {
    let mut md = format!("```concordia\n{} {}\n```\n", def.kind, def.name);
    let _ = writeln!(md, "Defined in **{}**", def.file_name());

    if let Some(doc) = &def.doc {
        md.push_str("\n___\n");
        md.push_str(doc);
        md.push('\n');
    }

    if def.kind == DefinitionKind::Enum && !def.members.is_empty() {
        md.push_str("\n**Members**\n");
        for member in &def.members {
            match member.doc.as_deref().and_then(|d| d.lines().next()) {
                Some(summary) => {
                    let _ = writeln!(md, "- `{}`: {summary}", member.name);
                },
                None => {
                    let _ = writeln!(md, "- `{}`", member.name);
                },
            }
        }
    }

    markdown_hover(md, range)
}

pub(crate) fn member_hover(
    def: &Definition,
    member: &Member,
    range: Range,
) -> Hover {
    let mut md = format!("```concordia\n{}.{}\n```\n", def.name, member.name);
    let _ = writeln!(md, "Member of enum `{}` in **{}**", def.name, def.file_name());

    if let Some(doc) = &member.doc {
        md.push_str("\n___\n");
        md.push_str(doc);
        md.push('\n');
    }

    markdown_hover(md, range)
}

fn markdown_hover(
    value: String,
    range: Range,
) -> Hover {
    Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value,
        }),
        range: Some(range),
    }
}
