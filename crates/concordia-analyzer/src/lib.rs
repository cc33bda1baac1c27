pub mod compiler;
pub mod completion;
pub mod config;
pub mod definition;
pub mod document;
pub mod hover;
pub mod language;
pub mod resolve;
pub mod server;

pub use completion::CompletionProvider;
pub use config::ServerSettings;
pub use definition::{DefinitionProvider, document_symbols};
pub use hover::HoverProvider;
pub use resolve::{Definition, DefinitionKind, Member, Resolver, resolve};
pub use server::ConcordiaLanguageServer;
