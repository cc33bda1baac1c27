use std::path::{Path, PathBuf};

use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing::info;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use concordia_analyzer::ConcordiaLanguageServer;

/// Overrides both log filters when set, using `EnvFilter` directive syntax.
const LOG_ENV: &str = "CONCORDIA_ANALYZER_LOG";
const LOG_FILE_NAME: &str = "concordia-analyzer.log";

/// Language server for Concordia `.cnd` files, speaking LSP over stdio.
#[derive(Parser, Debug)]
#[command(name = "concordia-analyzer", version, about)]
struct Args {
    /// Log resolver and protocol traffic at debug level.
    #[arg(long, short)]
    verbose: bool,

    /// Mirror server events to the client's log window.
    #[arg(long)]
    log_messages: bool,

    /// Log file path. Defaults to `~/.concordia-analyzer/concordia-analyzer.log`.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| log_dir().join(LOG_FILE_NAME))
    }

    /// Filter for one sink. The file sink keeps `tower_lsp` one notch quieter.
    fn filter(
        &self,
        verbose_protocol: &str,
    ) -> EnvFilter {
        if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
            return filter;
        }
        let directives = if self.verbose {
            format!("concordia_analyzer=debug,tower_lsp={verbose_protocol}")
        } else {
            "concordia_analyzer=info,tower_lsp=warn".to_owned()
        };
        EnvFilter::new(directives)
    }
}

/// `~/.concordia-analyzer`, or the system temp dir if it cannot be created.
fn log_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".concordia-analyzer"))
        .filter(|dir| std::fs::create_dir_all(dir).is_ok())
        .unwrap_or_else(std::env::temp_dir)
}

fn init_logging(args: &Args) -> PathBuf {
    let log_path = args.log_path();
    let file_appender = tracing_appender::rolling::never(
        log_path.parent().unwrap_or(Path::new(".")),
        log_path.file_name().unwrap_or(LOG_FILE_NAME.as_ref()),
    );

    let file_layer =
        fmt::layer().with_writer(file_appender).with_ansi(false).with_target(false).with_filter(args.filter("info"));
    // stdout carries the protocol
    let stderr_layer =
        fmt::layer().with_writer(std::io::stderr).with_ansi(false).with_target(false).with_filter(args.filter("debug"));

    tracing_subscriber::registry().with(file_layer).with(stderr_layer).init();
    log_path
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let log_path = init_logging(&args);

    info!("concordia-analyzer {} starting", env!("CARGO_PKG_VERSION"));
    info!("Logging to {}", log_path.display());

    let (service, socket) = LspService::new(|client| ConcordiaLanguageServer::new(client, args.log_messages));
    Server::new(tokio::io::stdin(), tokio::io::stdout(), socket).serve(service).await;

    info!("concordia-analyzer stopped");
}
