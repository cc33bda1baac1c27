use once_cell::sync::Lazy;
use regex::Regex;
use tower_lsp::lsp_types::Position;

use crate::resolve::{DefinitionKind, LineRules, RegexLineRules};

static FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s+([A-Za-z_][A-Za-z0-9_]*)").expect("field regex"));

/// Leading words that start a statement rather than a `Type name` field.
const NON_FIELD_WORDS: &[&str] =
    &["struct", "packet", "enum", "import", "switch", "case", "default", "if", "else", "const"];

/// Field names declared in the struct or packet body enclosing `position`.
///
/// Only lines above the cursor line are read. Braces are counted so fields
/// of nested blocks (`switch`, `if`) belong to the enclosing body, and a
/// closed body contributes nothing.
pub(crate) fn enclosing_fields(
    text: &str,
    position: Position,
) -> Vec<String> {
    let rules = RegexLineRules;
    let mut depth = 0usize;
    let mut body_depth: Option<usize> = None;
    let mut fields: Vec<String> = Vec::new();

    for line in text.split('\n').take(position.line as usize) {
        let code = line.split("//").next().unwrap_or_default().trim();

        if let Some(head) = rules.definition(code) {
            fields.clear();
            body_depth = (head.kind != DefinitionKind::Enum).then_some(depth + 1);
        } else if let Some(body) = body_depth
            && depth >= body
            && let Some(name) = field_name(code)
            && !fields.iter().any(|field| field == name)
        {
            fields.push(name.to_owned());
        }

        for ch in code.chars() {
            match ch {
                '{' => depth += 1,
                '}' => depth = depth.saturating_sub(1),
                _ => {},
            }
        }
        if body_depth.is_some_and(|body| depth < body) && code.contains('}') {
            body_depth = None;
            fields.clear();
        }
    }

    if body_depth.is_some() { fields } else { Vec::new() }
}

fn field_name(code: &str) -> Option<&str> {
    let caps = FIELD_RE.captures(code)?;
    let ty = caps.get(1)?.as_str();
    if NON_FIELD_WORDS.contains(&ty) {
        return None;
    }
    caps.get(2).map(|name| name.as_str())
}

#[cfg(test)]
#[path = "../../tests/src/completion/fields_tests.rs"]
mod tests;
