use std::{panic::AssertUnwindSafe, path::Path};

use dashmap::DashMap;
use futures::FutureExt;
use tower_lsp::{
    Client,
    lsp_types::{Diagnostic, Url},
};
use tracing::{debug, warn};

use crate::{
    compiler::{CndDiagnostic, CompilerError},
    document::Document,
    server::state::ConcordiaLanguageServer,
};

impl ConcordiaLanguageServer {
    /// Compile the saved file behind `uri` in the background and publish the
    /// diagnostics reported against it.
    pub(crate) async fn run_diagnostics(
        &self,
        uri: &Url,
    ) {
        if !self.settings.read().await.diagnostics.enable {
            return;
        }
        let Ok(path) = uri.to_file_path() else {
            debug!("Skipping diagnostics for non-file URI {uri}");
            return;
        };

        let generation = next_diagnostic_generation(&self.diagnostics_generation, uri);
        let compiler = self.compiler().await;
        let client = self.client.clone();
        let document_store = self.document_store.clone();
        let generations = self.diagnostics_generation.clone();
        let uri = uri.clone();

        tokio::spawn(async move {
            let reported = match compiler.compile(&path).await {
                Ok(reported) => reported,
                Err(CompilerError::CommandNotFound(command)) => {
                    warn!("Diagnostics unavailable: '{command}' not found");
                    return;
                },
                Err(error) => {
                    warn!("Diagnostics failed for {uri}: {error}");
                    return;
                },
            };

            if !is_latest_diagnostic_generation(&generations, &uri, generation) {
                debug!("Skipping stale diagnostics for {uri} (generation={generation})");
                return;
            }
            let Some(document) = document_store.get(&uri) else {
                return;
            };

            let diagnostics = diagnostics_for_document(&document, &path, reported);
            debug!("Publishing {} diagnostic(s) for {uri} (v{})", diagnostics.len(), document.version);
            publish(&client, uri, diagnostics, Some(document.version)).await;
        });
    }

    pub(crate) async fn clear_diagnostics(
        &self,
        uri: &Url,
    ) {
        self.diagnostics_generation.remove(uri);
        publish(&self.client, uri.clone(), Vec::new(), None).await;
    }
}

/// Keep the diagnostics reported against `path`, each spanning to the end of
/// its line in the open buffer.
pub(crate) fn diagnostics_for_document(
    document: &Document,
    path: &Path,
    reported: Vec<CndDiagnostic>,
) -> Vec<Diagnostic> {
    reported
        .into_iter()
        .filter(|diagnostic| diagnostic.is_for(path))
        .map(|diagnostic| {
            let line_end =
                document.line_text(diagnostic.line as usize).map(|text| text.encode_utf16().count() as u32);
            diagnostic.into_lsp_diagnostic(line_end)
        })
        .collect()
}

async fn publish(
    client: &Client,
    uri: Url,
    diagnostics: Vec<Diagnostic>,
    version: Option<i32>,
) {
    let result = AssertUnwindSafe(client.publish_diagnostics(uri, diagnostics, version)).catch_unwind().await;
    if result.is_err() {
        warn!("publish_diagnostics panicked (client may have disconnected)");
    }
}

fn next_diagnostic_generation(
    generations: &DashMap<Url, u64>,
    uri: &Url,
) -> u64 {
    let mut generation = generations.entry(uri.clone()).or_insert(0);
    *generation += 1;
    *generation
}

fn is_latest_diagnostic_generation(
    generations: &DashMap<Url, u64>,
    uri: &Url,
    value: u64,
) -> bool {
    generations.get(uri).is_some_and(|current| *current == value)
}

#[cfg(test)]
#[path = "../../tests/src/server/diagnostics_tests.rs"]
mod tests;
