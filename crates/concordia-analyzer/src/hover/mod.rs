mod decorator;
mod definition;
mod provider;

pub use provider::HoverProvider;
