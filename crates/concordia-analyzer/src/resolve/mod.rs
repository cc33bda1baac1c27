//! Import-following definition resolver.
//!
//! Given an entry file, scans it and everything it transitively imports
//! for `struct`, `packet` and `enum` declarations, attaching `///` doc
//! comments and enum members. This is the shared index behind completion,
//! hover, go-to-definition and document symbols.

mod engine;
mod loader;
mod rules;
mod types;

use std::path::Path;

pub use engine::{DEFAULT_MAX_IMPORT_DEPTH, Resolver};
pub use loader::{FsLoader, SourceLoader, normalize_path};
pub use rules::{DefinitionHead, LineRules, RegexLineRules};
pub use types::{Definition, DefinitionKind, Member};

/// Resolve definitions from disk with the default rules and depth limit.
pub fn resolve(
    entry_path: &Path,
    entry_text: Option<&str>,
) -> Vec<Definition> {
    Resolver::default().resolve(entry_path, entry_text)
}

/// First definition named `name`. Earlier entries win when a name repeats.
pub fn find_definition<'a>(
    definitions: &'a [Definition],
    name: &str,
) -> Option<&'a Definition> {
    definitions.iter().find(|d| d.name == name)
}

pub fn find_enum<'a>(
    definitions: &'a [Definition],
    name: &str,
) -> Option<&'a Definition> {
    definitions.iter().find(|d| d.kind == DefinitionKind::Enum && d.name == name)
}
