use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::resolve::DEFAULT_MAX_IMPORT_DEPTH;

pub const MIN_IMPORT_DEPTH: usize = 1;
pub const MAX_IMPORT_DEPTH: usize = 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct ResolverSettings {
    /// Deepest `@import` chain followed when collecting definitions.
    pub max_import_depth: usize,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            max_import_depth: DEFAULT_MAX_IMPORT_DEPTH,
        }
    }
}

impl ResolverSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: ResolverSettingsPatch,
    ) {
        if let Some(v) = patch.max_import_depth {
            self.max_import_depth = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.max_import_depth = self.max_import_depth.clamp(MIN_IMPORT_DEPTH, MAX_IMPORT_DEPTH);
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ResolverSettingsPatch {
    pub(crate) max_import_depth: Option<usize>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
