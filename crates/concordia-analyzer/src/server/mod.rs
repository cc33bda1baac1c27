pub(crate) mod diagnostics;
pub(crate) mod formatting;
pub(crate) mod handler;
pub(crate) mod state;

pub use state::ConcordiaLanguageServer;
