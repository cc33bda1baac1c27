use once_cell::sync::Lazy;
use regex::Regex;
use tower_lsp::lsp_types::{Position, Range};

use super::Document;

static ENUM_QUALIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z][A-Za-z0-9_]*)\.$").expect("enum qualifier regex"));

/// What the identifier under the cursor refers to, judged from the text just
/// before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolTarget {
    /// `@name`
    Decorator(String),
    /// `Enum.Member`
    EnumMember {
        enum_name: String,
        member: String,
    },
    /// A bare identifier.
    Name(String),
}

impl SymbolTarget {
    /// Identifier under the cursor.
    pub fn word(&self) -> &str {
        match self {
            Self::Decorator(name) | Self::Name(name) => name,
            Self::EnumMember {
                member,
                ..
            } => member,
        }
    }
}

/// Classify the word at `position`, returning it with its range.
pub fn target_at(
    document: &Document,
    position: Position,
) -> Option<(SymbolTarget, Range)> {
    let (word, range) = document.word_at(position)?;
    let before = document.line_prefix(range.start).unwrap_or("");

    let target = if before.ends_with('@') {
        SymbolTarget::Decorator(word)
    } else if let Some(caps) = ENUM_QUALIFIER_RE.captures(before)
        && let Some(enum_name) = caps.get(1)
    {
        SymbolTarget::EnumMember {
            enum_name: enum_name.as_str().to_string(),
            member: word,
        }
    } else {
        SymbolTarget::Name(word)
    };
    Some((target, range))
}

#[cfg(test)]
#[path = "../../tests/src/document/target_tests.rs"]
mod tests;
