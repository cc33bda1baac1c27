mod context;
mod fields;
mod provider;

pub use context::CursorContext;
pub use provider::CompletionProvider;
