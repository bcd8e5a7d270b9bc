use std::path::Path;

use crate::foundation::error::{ProtoError, ProtoResult};

/// How the accepted node types of a slot bound to several nodes are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotFilterPolicy {
    /// Accept the types of every bound node.
    #[default]
    Union,
    /// Accept only the type of the first bound node.
    FirstWins,
}

/// Options controlling [`crate::ProtoManager`] behavior.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineOpts {
    /// Slot filter combination for node parameters bound to several nodes.
    pub slot_policy: SlotFilterPolicy,
    /// Request a render after a failed regeneration (the teardown already changed the scene).
    pub render_after_failed_regeneration: bool,
    /// Maximum depth of the nested instance tree; top-level instances have depth 0.
    pub max_nesting_depth: usize,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            slot_policy: SlotFilterPolicy::Union,
            render_after_failed_regeneration: true,
            max_nesting_depth: 16,
        }
    }
}

impl EngineOpts {
    /// Load options from a JSON file. Missing keys keep their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> ProtoResult<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path)
            .map_err(|e| ProtoError::load(format!("open '{}': {e}", path.display())))?;
        serde_json::from_reader(std::io::BufReader::new(f))
            .map_err(|e| ProtoError::serde(format!("parse engine options: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/proto/opts.rs"]
mod tests;
