use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticsSettings {
    pub enable: bool,
    /// Re-run `cnd compile` when a document is saved.
    pub on_save: bool,
}

impl Default for DiagnosticsSettings {
    fn default() -> Self {
        Self {
            enable: true,
            on_save: true,
        }
    }
}

impl DiagnosticsSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: DiagnosticsSettingsPatch,
    ) {
        if let Some(v) = patch.enable {
            self.enable = v;
        }
        if let Some(v) = patch.on_save {
            self.on_save = v;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct DiagnosticsSettingsPatch {
    pub(crate) enable: Option<bool>,
    pub(crate) on_save: Option<bool>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
