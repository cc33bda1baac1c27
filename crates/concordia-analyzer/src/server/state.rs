use std::{panic::AssertUnwindSafe, sync::Arc};

use dashmap::DashMap;
use futures::FutureExt;
use tokio::sync::RwLock;
use tower_lsp::{
    Client,
    lsp_types::{MessageType, Url},
};
use tracing::info;

use crate::{
    compiler::CndCompiler, completion::CompletionProvider, config::ServerSettings, definition::DefinitionProvider,
    document::DocumentStore, hover::HoverProvider,
};

const CLIENT_NOTIFICATION_PREFIX: &str = "concordia-analyzer:";

/// The concordia-analyzer backend that implements the Language Server Protocol.
pub struct ConcordiaLanguageServer {
    /// The LSP client handle, used to send notifications (e.g. diagnostics) back.
    pub(crate) client: Client,

    /// Thread-safe store of all open documents.
    pub(crate) document_store: Arc<DocumentStore>,

    /// Runs `cnd`; replaced when the configured path changes.
    pub(crate) compiler: RwLock<Arc<CndCompiler>>,

    pub(crate) completion_provider: Arc<CompletionProvider>,
    pub(crate) hover_provider: Arc<HoverProvider>,
    pub(crate) definition_provider: Arc<DefinitionProvider>,

    /// Monotonic per-document generation for diagnostics runs.
    ///
    /// Incremented on every diagnostics request so stale async compiler results
    /// can be dropped instead of overwriting newer editor state.
    pub(crate) diagnostics_generation: Arc<DashMap<Url, u64>>,

    /// Runtime server settings updated from LSP configuration.
    pub(crate) settings: Arc<RwLock<ServerSettings>>,

    /// Mirror lifecycle events to the client's log (`--log-messages`).
    pub(crate) log_messages: bool,
}

impl ConcordiaLanguageServer {
    pub fn new(
        client: Client,
        log_messages: bool,
    ) -> Self {
        let settings = ServerSettings::default();
        let compiler = Arc::new(CndCompiler::new(settings.compiler.path.clone()));

        Self {
            client,
            document_store: Arc::new(DocumentStore::new()),
            compiler: RwLock::new(compiler),
            completion_provider: Arc::new(CompletionProvider::new()),
            hover_provider: Arc::new(HoverProvider::new()),
            definition_provider: Arc::new(DefinitionProvider::new()),
            diagnostics_generation: Arc::new(DashMap::new()),
            settings: Arc::new(RwLock::new(settings)),
            log_messages,
        }
    }

    pub(crate) async fn settings_snapshot(&self) -> ServerSettings {
        self.settings.read().await.clone()
    }

    pub(crate) async fn compiler(&self) -> Arc<CndCompiler> {
        self.compiler.read().await.clone()
    }

    pub(crate) async fn max_import_depth(&self) -> usize {
        self.settings.read().await.resolver.max_import_depth
    }

    pub(crate) async fn apply_settings(
        &self,
        settings: ServerSettings,
    ) {
        let mut compiler = self.compiler.write().await;
        if compiler.executable() != settings.compiler.path {
            info!("Using compiler '{}'", settings.compiler.path);
            *compiler = Arc::new(CndCompiler::new(settings.compiler.path.clone()));
        }
        drop(compiler);

        *self.settings.write().await = settings;
    }

    /// Send a `window/logMessage` when enabled and allowed by `logging.level`.
    pub(crate) async fn log_to_client(
        &self,
        message_type: MessageType,
        message: impl AsRef<str>,
    ) {
        if !self.log_messages || !self.settings.read().await.logging.level.allows(message_type) {
            return;
        }
        let _ = AssertUnwindSafe(self.client.log_message(message_type, prefixed_client_message(message)))
            .catch_unwind()
            .await;
    }

    pub(crate) async fn show_warning(
        &self,
        message: impl AsRef<str>,
    ) {
        let _ = AssertUnwindSafe(self.client.show_message(MessageType::WARNING, prefixed_client_message(message)))
            .catch_unwind()
            .await;
    }
}

pub(crate) fn prefixed_client_message(message: impl AsRef<str>) -> String {
    format!("{CLIENT_NOTIFICATION_PREFIX} {}", message.as_ref())
}

pub(crate) fn short_name(uri: &Url) -> String {
    uri.path().rsplit('/').next().unwrap_or(uri.path()).to_owned()
}
