//! Wrapper around the external `cnd` toolchain.
//!
//! Diagnostics come from `cnd compile <file> <out.il>` and formatting from
//! `cnd fmt <file>`. Intermediate files live in a per-process directory under
//! the system temp dir, one per compiler instance, removed on drop.

use std::{
    fmt::{Display, Formatter},
    path::{Path, PathBuf},
    process::Stdio,
    sync::atomic::{AtomicU64, Ordering},
};

use once_cell::sync::Lazy;
use regex::Regex;
use tokio::process::Command;
use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, Position, Range};
use tracing::{debug, warn};

use crate::resolve::normalize_path;

static NEXT_RUN_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

static ANSI_ESCAPE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\x1B\[[0-9;]*[A-Za-z]").expect("ansi regex"));
static DIAGNOSTIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?):(\d+):(\d+):\s+(error|warning):\s+(.+)$").expect("diagnostic regex"));

/// One `file:line:col: severity: message` line from `cnd compile`, with
/// 0-based line and column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CndDiagnostic {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub severity: DiagnosticSeverity,
    pub message: String,
}

impl CndDiagnostic {
    /// Whether the diagnostic was reported against `path`.
    pub fn is_for(
        &self,
        path: &Path,
    ) -> bool {
        normalize_path(Path::new(&self.file)) == normalize_path(path)
    }

    /// Convert into an LSP diagnostic spanning from the column to `line_end`.
    pub fn into_lsp_diagnostic(
        self,
        line_end: Option<u32>,
    ) -> Diagnostic {
        let start = Position::new(self.line, self.column);
        let end = Position::new(self.line, line_end.unwrap_or(self.column).max(self.column));
        Diagnostic {
            range: Range::new(start, end),
            severity: Some(self.severity),
            source: Some("cnd".to_string()),
            message: self.message,
            ..Default::default()
        }
    }
}

/// Runs the `cnd` executable.
#[derive(Debug)]
pub struct CndCompiler {
    executable: String,
    temp_dir: PathBuf,
}

impl CndCompiler {
    pub fn new(executable: impl Into<String>) -> Self {
        let instance = NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed);
        let temp_dir = std::env::temp_dir().join(format!("concordia-analyzer-{}-{instance}", std::process::id()));
        if let Err(error) = std::fs::create_dir_all(&temp_dir) {
            warn!("Failed to create temp directory {}: {error}", temp_dir.display());
        }
        Self {
            executable: executable.into(),
            temp_dir,
        }
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Compile `path` on disk and collect the reported diagnostics.
    ///
    /// A non-zero exit status is expected when the source has errors and is
    /// not itself a failure.
    pub async fn compile(
        &self,
        path: &Path,
    ) -> Result<Vec<CndDiagnostic>, CompilerError> {
        self.ensure_temp_dir().await?;
        let run_id = NEXT_RUN_ID.fetch_add(1, Ordering::Relaxed);
        let output_file = self.temp_dir.join(format!("compile-{run_id}.il"));

        let args = compile_args(path, &output_file);
        debug!("Running: {} {}", self.executable, args.join(" "));
        let result = self.command().args(&args).output().await;
        let _ = tokio::fs::remove_file(&output_file).await;
        let output = result.map_err(|error| launch_error(&self.executable, error))?;

        if !output.status.success() {
            debug!("{} compile exited with {}", self.executable, output.status);
        }
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push('\n');
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(parse_diagnostics(&combined))
    }

    /// Format `text` with `cnd fmt` and return the formatted source.
    pub async fn format(
        &self,
        text: &str,
    ) -> Result<String, CompilerError> {
        self.ensure_temp_dir().await?;
        let run_id = NEXT_RUN_ID.fetch_add(1, Ordering::Relaxed);
        let input_file = self.temp_dir.join(format!("format-{run_id}.cnd"));
        tokio::fs::write(&input_file, text).await.map_err(|error| CompilerError::Failed {
            command: self.executable.clone(),
            reason: format!("cannot write {}: {error}", input_file.display()),
        })?;

        let args = fmt_args(&input_file);
        debug!("Running: {} {}", self.executable, args.join(" "));
        let result = self.command().args(&args).output().await;
        let _ = tokio::fs::remove_file(&input_file).await;
        let output = result.map_err(|error| launch_error(&self.executable, error))?;

        if !output.status.success() {
            let stderr = strip_ansi(&String::from_utf8_lossy(&output.stderr)).trim().to_string();
            return Err(CompilerError::Failed {
                command: self.executable.clone(),
                reason: if stderr.is_empty() {
                    format!("process exited with status {}", output.status)
                } else {
                    stderr
                },
            });
        }

        String::from_utf8(output.stdout).map_err(|error| CompilerError::Failed {
            command: self.executable.clone(),
            reason: format!("formatter produced invalid UTF-8 output: {error}"),
        })
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.executable);
        command.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped()).kill_on_drop(true);
        command
    }

    async fn ensure_temp_dir(&self) -> Result<(), CompilerError> {
        tokio::fs::create_dir_all(&self.temp_dir).await.map_err(|error| CompilerError::Failed {
            command: self.executable.clone(),
            reason: format!("cannot create {}: {error}", self.temp_dir.display()),
        })
    }
}

impl Drop for CndCompiler {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.temp_dir);
    }
}

fn compile_args(
    source: &Path,
    output: &Path,
) -> Vec<String> {
    vec!["compile".to_string(), source.display().to_string(), output.display().to_string()]
}

fn fmt_args(source: &Path) -> Vec<String> {
    vec!["fmt".to_string(), source.display().to_string()]
}

fn launch_error(
    executable: &str,
    error: std::io::Error,
) -> CompilerError {
    match error.kind() {
        std::io::ErrorKind::NotFound => CompilerError::CommandNotFound(executable.to_string()),
        _ => CompilerError::LaunchFailed {
            command: executable.to_string(),
            reason: error.to_string(),
        },
    }
}

pub(crate) fn strip_ansi(text: &str) -> std::borrow::Cow<'_, str> {
    ANSI_ESCAPE_RE.replace_all(text, "")
}

pub(crate) fn parse_diagnostics(output: &str) -> Vec<CndDiagnostic> {
    strip_ansi(output).lines().filter_map(|line| parse_diagnostic_line(line.trim())).collect()
}

fn parse_diagnostic_line(line: &str) -> Option<CndDiagnostic> {
    let caps = DIAGNOSTIC_RE.captures(line)?;
    let line_num: u32 = caps.get(2)?.as_str().parse().ok()?;
    let column: u32 = caps.get(3)?.as_str().parse().ok()?;
    let severity = match caps.get(4)?.as_str() {
        "warning" => DiagnosticSeverity::WARNING,
        _ => DiagnosticSeverity::ERROR,
    };

    Some(CndDiagnostic {
        file: caps.get(1)?.as_str().to_string(),
        line: line_num.saturating_sub(1),
        column: column.saturating_sub(1),
        severity,
        message: caps.get(5)?.as_str().to_string(),
    })
}

#[derive(Debug)]
pub enum CompilerError {
    CommandNotFound(String),
    LaunchFailed {
        command: String,
        reason: String,
    },
    Failed {
        command: String,
        reason: String,
    },
}

impl Display for CompilerError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::CommandNotFound(command) => write!(f, "{command} is not available"),
            Self::LaunchFailed {
                command,
                reason,
            } => {
                write!(f, "failed to launch {command}: {reason}")
            },
            Self::Failed {
                command,
                reason,
            } => {
                write!(f, "{command} failed: {reason}")
            },
        }
    }
}

impl std::error::Error for CompilerError {}

#[cfg(test)]
#[path = "../../tests/src/compiler/compiler_tests.rs"]
mod tests;
