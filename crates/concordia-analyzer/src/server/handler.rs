use std::path::PathBuf;

use tower_lsp::{LanguageServer, jsonrpc::Result, lsp_types::*};
use tracing::{debug, info, warn};

use crate::{
    compiler::CompilerError,
    config::ServerSettings,
    definition::document_symbols,
    server::{
        formatting::format_document,
        state::{ConcordiaLanguageServer, short_name},
    },
};

#[tower_lsp::async_trait]
impl LanguageServer for ConcordiaLanguageServer {
    async fn initialize(
        &self,
        params: InitializeParams,
    ) -> Result<InitializeResult> {
        info!("Initializing concordia-analyzer...");

        let initial_settings = ServerSettings::from_lsp_payload(params.initialization_options.as_ref());
        self.apply_settings(initial_settings).await;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(TextDocumentSyncOptions {
                    open_close: Some(true),
                    change: Some(TextDocumentSyncKind::FULL),
                    save: Some(TextDocumentSyncSaveOptions::Supported(true)),
                    ..Default::default()
                })),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec![".".to_string(), ":".to_string(), "@".to_string()]),
                    ..Default::default()
                }),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                definition_provider: Some(OneOf::Left(true)),
                document_symbol_provider: Some(OneOf::Left(true)),
                document_formatting_provider: Some(OneOf::Left(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "concordia-analyzer".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(
        &self,
        _: InitializedParams,
    ) {
        info!("concordia-analyzer initialized");
        self.log_to_client(MessageType::INFO, format!("Server v{} ready", env!("CARGO_PKG_VERSION"))).await;
    }

    async fn did_change_configuration(
        &self,
        params: DidChangeConfigurationParams,
    ) {
        let current = self.settings_snapshot().await;
        let merged = current.merged_with_payload(&params.settings);
        if merged == current {
            return;
        }
        self.apply_settings(merged).await;
        info!("Applied updated concordia-analyzer settings");
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down concordia-analyzer");
        Ok(())
    }

    async fn did_open(
        &self,
        params: DidOpenTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        let text = params.text_document.text;
        let version = params.text_document.version;
        let filename = short_name(&uri);

        info!("Opened {filename} (v{version}, {} bytes)", text.len());
        self.log_to_client(MessageType::INFO, format!("Opened {filename}")).await;

        self.document_store.open(uri.clone(), text, version);
        self.run_diagnostics(&uri).await;
    }

    async fn did_change(
        &self,
        params: DidChangeTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        self.document_store.apply_changes(&uri, params.content_changes, params.text_document.version);
    }

    async fn did_save(
        &self,
        params: DidSaveTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        debug!("Saved {}", short_name(&uri));

        if let Some(text) = params.text {
            let version = self.document_store.version(&uri).unwrap_or(0);
            self.document_store.update(uri.clone(), text, version);
        }
        if self.settings.read().await.diagnostics.on_save {
            self.run_diagnostics(&uri).await;
        }
    }

    async fn did_close(
        &self,
        params: DidCloseTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        debug!("Closed {}", short_name(&uri));
        self.document_store.close(&uri);
        self.clear_diagnostics(&uri).await;
    }

    async fn completion(
        &self,
        params: CompletionParams,
    ) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;
        let Some(document) = self.document_store.get(&uri) else {
            return Ok(None);
        };
        // Untitled buffers still get built-in completions.
        let path = document.path().unwrap_or_else(|| PathBuf::from(uri.path()));
        let max_depth = self.max_import_depth().await;

        let items = self.completion_provider.provide(&path, &document.text, position, max_depth);
        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn hover(
        &self,
        params: HoverParams,
    ) -> Result<Option<Hover>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;
        let Some(document) = self.document_store.get(&uri) else {
            return Ok(None);
        };
        let max_depth = self.max_import_depth().await;

        Ok(self.hover_provider.provide(&document, position, max_depth))
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;
        let Some(document) = self.document_store.get(&uri) else {
            return Ok(None);
        };
        let max_depth = self.max_import_depth().await;

        let location = self.definition_provider.provide(&document, position, max_depth);
        let filename = short_name(&uri);
        match &location {
            Some(loc) => debug!(
                "goto-def {filename}:{}:{} → {}:{}",
                position.line + 1,
                position.character + 1,
                short_name(&loc.uri),
                loc.range.start.line + 1
            ),
            None => debug!("goto-def {filename}:{}:{} → none", position.line + 1, position.character + 1),
        }
        Ok(location.map(GotoDefinitionResponse::Scalar))
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        let Some(document) = self.document_store.get(&params.text_document.uri) else {
            return Ok(None);
        };
        Ok(Some(DocumentSymbolResponse::Nested(document_symbols(&document))))
    }

    async fn formatting(
        &self,
        params: DocumentFormattingParams,
    ) -> Result<Option<Vec<TextEdit>>> {
        let uri = params.text_document.uri;
        let Some(document) = self.document_store.get(&uri) else {
            return Ok(None);
        };
        if !self.settings.read().await.formatting.enable {
            return Ok(Some(Vec::new()));
        }

        let compiler = self.compiler().await;
        match format_document(&compiler, &document).await {
            Ok(Some(edit)) => Ok(Some(vec![edit])),
            Ok(None) => Ok(Some(Vec::new())),
            Err(error) => {
                warn!("Formatting failed for {uri}: {error}");
                match error {
                    CompilerError::CommandNotFound(command) => {
                        self.show_warning(format!(
                            "Formatter '{command}' is not available. Install it or update concordia.compiler.path."
                        ))
                        .await;
                    },
                    _ => self.show_warning(format!("Formatting failed: {error}")).await,
                }
                Ok(None)
            },
        }
    }
}
