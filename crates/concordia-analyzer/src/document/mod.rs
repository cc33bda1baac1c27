mod document_store;
mod target;
mod text_document;

pub use document_store::DocumentStore;
pub use target::{SymbolTarget, target_at};
pub use text_document::Document;
