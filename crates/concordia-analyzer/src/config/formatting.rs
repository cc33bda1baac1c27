use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// Formatting runs `<compiler.path> fmt`, so only the switch lives here.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattingSettings {
    pub enable: bool,
}

impl Default for FormattingSettings {
    fn default() -> Self {
        Self {
            enable: true,
        }
    }
}

impl FormattingSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: FormattingSettingsPatch,
    ) {
        if let Some(v) = patch.enable {
            self.enable = v;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct FormattingSettingsPatch {
    pub(crate) enable: Option<bool>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
