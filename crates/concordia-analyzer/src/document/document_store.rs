use dashmap::DashMap;
use tower_lsp::lsp_types::{TextDocumentContentChangeEvent, Url};

use super::Document;

/// Open `.cnd` buffers keyed by URI.
///
/// The text held here is what the resolver scans for the entry file in place
/// of the on-disk content.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Url, Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(
        &self,
        uri: Url,
        text: String,
        version: i32,
    ) {
        self.documents.insert(uri.clone(), Document::new(uri, text, version));
    }

    /// Apply `didChange` events. Unknown URIs are opened from a full-content
    /// event, since some clients send changes before `didOpen` is processed.
    pub fn apply_changes(
        &self,
        uri: &Url,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) {
        if let Some(mut doc) = self.documents.get_mut(uri) {
            doc.apply_changes(changes, version);
            return;
        }
        if let Some(full) = changes.into_iter().rev().find(|c| c.range.is_none()) {
            self.open(uri.clone(), full.text, version);
        }
    }

    /// Replace the whole text, e.g. from `didSave` with included text.
    pub fn update(
        &self,
        uri: Url,
        text: String,
        version: i32,
    ) {
        match self.documents.get_mut(&uri) {
            Some(mut doc) => doc.set_content(text, version),
            None => self.open(uri, text, version),
        }
    }

    pub fn close(
        &self,
        uri: &Url,
    ) -> Option<Document> {
        self.documents.remove(uri).map(|(_, doc)| doc)
    }

    pub fn get(
        &self,
        uri: &Url,
    ) -> Option<Document> {
        self.documents.get(uri).map(|r| r.value().clone())
    }

    pub fn get_content(
        &self,
        uri: &Url,
    ) -> Option<String> {
        self.documents.get(uri).map(|r| r.value().text.clone())
    }

    pub fn version(
        &self,
        uri: &Url,
    ) -> Option<i32> {
        self.documents.get(uri).map(|r| r.value().version)
    }
}

#[cfg(test)]
#[path = "../../tests/src/document/document_store_tests.rs"]
mod tests;
