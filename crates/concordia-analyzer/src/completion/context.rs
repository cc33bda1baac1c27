use once_cell::sync::Lazy;
use regex::Regex;
use tower_lsp::lsp_types::Position;

static ENUM_BASE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"enum\s+\w+\s*:\s*\w*$").expect("enum base regex"));
static ENUM_ACCESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z][A-Za-z0-9_]*)\.$").expect("enum access regex"));
static DECORATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@[A-Za-z_]*$").expect("decorator regex"));
static DECORATOR_CALL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@([A-Za-z_][A-Za-z0-9_]*)\s*$").expect("decorator call regex"));

/// What the text before the cursor asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorContext {
    /// After `enum Name :`, possibly with part of the type typed.
    EnumUnderlyingType,
    /// After `Name.`; members are offered only if `Name` is an enum.
    EnumMember {
        enum_name: String,
    },
    /// After `@`, possibly with part of a decorator name typed.
    Decorator,
    /// Inside the parentheses of `@expr(`.
    Expression,
    /// Inside the parentheses of `@count(` or `@len(`.
    FieldReference,
    General,
}

pub(crate) fn detect_context(
    text: &str,
    position: Position,
) -> CursorContext {
    let Some(prefix) = line_prefix(text, position) else {
        return CursorContext::General;
    };
    detect_context_from_prefix(&prefix)
}

pub(crate) fn detect_context_from_prefix(prefix: &str) -> CursorContext {
    if ENUM_BASE_RE.is_match(prefix) {
        return CursorContext::EnumUnderlyingType;
    }
    if let Some(caps) = ENUM_ACCESS_RE.captures(prefix)
        && let Some(name) = caps.get(1)
    {
        return CursorContext::EnumMember {
            enum_name: name.as_str().to_string(),
        };
    }
    if DECORATOR_RE.is_match(prefix) {
        return CursorContext::Decorator;
    }
    match open_decorator(prefix) {
        Some("expr") => CursorContext::Expression,
        Some("count" | "len") => CursorContext::FieldReference,
        _ => CursorContext::General,
    }
}

/// Name of the innermost decorator whose argument list is still open at the
/// end of `prefix`. Plain parentheses inside the arguments are skipped.
fn open_decorator(prefix: &str) -> Option<&str> {
    let mut open = Vec::new();
    for (index, ch) in prefix.char_indices() {
        match ch {
            '(' => open.push(index),
            ')' => {
                open.pop();
            },
            _ => {},
        }
    }
    open.iter().rev().find_map(|&index| {
        DECORATOR_CALL_RE.captures(&prefix[..index]).and_then(|caps| caps.get(1)).map(|name| name.as_str())
    })
}

/// Text of the cursor line before the cursor; the column counts UTF-16 units.
fn line_prefix(
    text: &str,
    position: Position,
) -> Option<String> {
    let line = text.split('\n').nth(position.line as usize)?;
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut units = 0u32;
    let mut prefix = String::new();
    for ch in line.chars() {
        if units >= position.character {
            break;
        }
        units += ch.len_utf16() as u32;
        prefix.push(ch);
    }
    Some(prefix)
}

#[cfg(test)]
#[path = "../../tests/src/completion/context_tests.rs"]
mod tests;
