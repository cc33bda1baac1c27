use once_cell::sync::Lazy;
use regex::Regex;

use super::types::DefinitionKind;

static DEFINITION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(struct|packet|enum)\s+([A-Z][A-Za-z0-9_]*)").expect("definition regex"));
static IMPORT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"@import\s*\(\s*"([^"]+)"\s*\)"#).expect("import regex"));
static MEMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)").expect("member regex"));

const DOC_MARKER: &str = "///";

/// The head of a definition line: `struct Name`, `packet Name` or `enum Name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefinitionHead<'a> {
    pub kind: DefinitionKind,
    pub name: &'a str,
}

/// Line classification used by the resolver.
///
/// Methods taking `trimmed` receive the line with surrounding whitespace
/// removed; methods taking `line` receive it verbatim. Keeping the matching
/// behind this trait lets the traversal stay independent of how lines are
/// recognised.
pub trait LineRules {
    /// Text of a doc comment with the marker and surrounding whitespace stripped.
    fn doc_text<'a>(
        &self,
        trimmed: &'a str,
    ) -> Option<&'a str>;

    fn is_decorator(
        &self,
        trimmed: &str,
    ) -> bool;

    /// Relative path named by an `@import("...")` decorator.
    fn import_path<'a>(
        &self,
        line: &'a str,
    ) -> Option<&'a str>;

    fn definition<'a>(
        &self,
        line: &'a str,
    ) -> Option<DefinitionHead<'a>>;

    /// Enumerator name at the start of a line inside an enum body.
    fn member<'a>(
        &self,
        trimmed: &'a str,
    ) -> Option<&'a str>;

    fn closes_enum(
        &self,
        trimmed: &str,
    ) -> bool;
}

/// Regex-backed rules. Tolerant of partial or malformed text: anything that
/// does not match is simply not a doc line, import, definition or member.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexLineRules;

impl LineRules for RegexLineRules {
    fn doc_text<'a>(
        &self,
        trimmed: &'a str,
    ) -> Option<&'a str> {
        trimmed.strip_prefix(DOC_MARKER).map(str::trim)
    }

    fn is_decorator(
        &self,
        trimmed: &str,
    ) -> bool {
        trimmed.starts_with('@')
    }

    fn import_path<'a>(
        &self,
        line: &'a str,
    ) -> Option<&'a str> {
        IMPORT_RE.captures(line).and_then(|caps| caps.get(1)).map(|m| m.as_str())
    }

    fn definition<'a>(
        &self,
        line: &'a str,
    ) -> Option<DefinitionHead<'a>> {
        let caps = DEFINITION_RE.captures(line)?;
        let kind = DefinitionKind::from_keyword(caps.get(1)?.as_str())?;
        let name = caps.get(2)?.as_str();
        Some(DefinitionHead {
            kind,
            name,
        })
    }

    fn member<'a>(
        &self,
        trimmed: &'a str,
    ) -> Option<&'a str> {
        let name = MEMBER_RE.captures(trimmed)?.get(1)?.as_str();
        (name != "enum").then_some(name)
    }

    fn closes_enum(
        &self,
        trimmed: &str,
    ) -> bool {
        trimmed.starts_with('}')
    }
}

#[cfg(test)]
#[path = "../../tests/src/resolve/rules_tests.rs"]
mod tests;
