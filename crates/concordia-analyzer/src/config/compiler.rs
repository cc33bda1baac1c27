use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_COMPILER_PATH: &str = "cnd";

#[derive(Debug, Clone, PartialEq)]
pub struct CompilerSettings {
    /// Executable name or path of the `cnd` toolchain.
    pub path: String,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            path: DEFAULT_COMPILER_PATH.to_string(),
        }
    }
}

impl CompilerSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: CompilerSettingsPatch,
    ) {
        if let Some(v) = patch.path {
            self.path = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        let trimmed = self.path.trim();
        self.path = if trimmed.is_empty() {
            DEFAULT_COMPILER_PATH.to_string()
        } else {
            trimmed.to_string()
        };
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct CompilerSettingsPatch {
    pub(crate) path: Option<String>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
