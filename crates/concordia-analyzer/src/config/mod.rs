//! Server configuration.
//!
//! Settings are split into one file per category. [`ServerSettings`]
//! aggregates them and merges JSON payloads from LSP initialization options
//! and `didChangeConfiguration`, accepted either top-level or nested under
//! [`SETTINGS_SECTION_KEY`].

pub(crate) mod compiler;
pub(crate) mod diagnostics;
pub(crate) mod formatting;
pub(crate) mod logging;
pub(crate) mod resolver;

use std::collections::HashMap;

pub use compiler::{CompilerSettings, DEFAULT_COMPILER_PATH};
use compiler::CompilerSettingsPatch;
pub use diagnostics::DiagnosticsSettings;
use diagnostics::DiagnosticsSettingsPatch;
pub use formatting::FormattingSettings;
use formatting::FormattingSettingsPatch;
pub use logging::{LogLevel, LoggingSettings};
use logging::LoggingSettingsPatch;
pub use resolver::{MAX_IMPORT_DEPTH, MIN_IMPORT_DEPTH, ResolverSettings};
use resolver::ResolverSettingsPatch;
use serde::Deserialize;
use serde_json::Value;

pub const SETTINGS_SECTION_KEY: &str = "concordia";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServerSettings {
    pub compiler: CompilerSettings,
    pub diagnostics: DiagnosticsSettings,
    pub formatting: FormattingSettings,
    pub resolver: ResolverSettings,
    pub logging: LoggingSettings,
}

impl ServerSettings {
    pub fn from_lsp_payload(payload: Option<&Value>) -> Self {
        match payload {
            Some(payload) => Self::default().merged_with_payload(payload),
            None => Self::default(),
        }
    }

    /// Overlay the keys present in `payload`; absent keys keep their current
    /// value and malformed categories are ignored.
    pub fn merged_with_payload(
        &self,
        payload: &Value,
    ) -> Self {
        let mut merged = self.clone();

        for candidate in payload_candidates(payload) {
            if let Ok(patch) = serde_json::from_value::<ServerSettingsPatch>(candidate.clone()) {
                merged.apply_patch(patch);
            }
        }

        merged.normalize();
        merged
    }

    fn apply_patch(
        &mut self,
        patch: ServerSettingsPatch,
    ) {
        // Flat `compilerPath`, as older editor extensions send it.
        if let Some(path) = patch.compiler_path {
            self.compiler.path = path;
        }
        if let Some(p) = patch.compiler {
            self.compiler.apply_patch(p);
        }
        if let Some(p) = patch.diagnostics {
            self.diagnostics.apply_patch(p);
        }
        if let Some(p) = patch.formatting {
            self.formatting.apply_patch(p);
        }
        if let Some(p) = patch.resolver {
            self.resolver.apply_patch(p);
        }
        if let Some(p) = patch.logging {
            self.logging.apply_patch(p);
        }
    }

    fn normalize(&mut self) {
        self.compiler.normalize();
        self.resolver.normalize();
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ServerSettingsPatch {
    compiler_path: Option<String>,
    compiler: Option<CompilerSettingsPatch>,
    diagnostics: Option<DiagnosticsSettingsPatch>,
    formatting: Option<FormattingSettingsPatch>,
    resolver: Option<ResolverSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

fn payload_candidates(payload: &Value) -> Vec<&Value> {
    let mut candidates = vec![payload];
    if let Some(scoped) = payload.get(SETTINGS_SECTION_KEY) {
        candidates.push(scoped);
    }
    candidates
}

#[cfg(test)]
#[path = "../../tests/src/config/settings_tests.rs"]
mod tests;
