//! Go-to-definition and document outline.

mod provider;
mod symbols;

pub use provider::DefinitionProvider;
pub use symbols::document_symbols;
