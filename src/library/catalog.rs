use std::path::Path;

use indexmap::IndexMap;

use crate::foundation::error::{ProtoError, ProtoResult};

/// Library key that clears a slot instead of filling it.
pub const REMOVE_KEY: &str = "remove";

/// An insertable template.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AssetEntry {
    /// Template url, resolved by the engine's [`crate::TemplateFetch`].
    pub url: String,
    /// Slot type this asset fits. Untyped assets fit every slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_type: Option<String>,
}

impl AssetEntry {
    /// `true` if the asset may go into a slot accepting `filter` (empty = anything).
    pub fn fits(&self, filter: &[String]) -> bool {
        filter.is_empty() || self.slot_type.as_ref().is_none_or(|ty| filter.contains(ty))
    }
}

/// Keyed asset catalog in display order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AssetLibrary {
    /// Entries by key.
    pub assets: IndexMap<String, AssetEntry>,
}

impl AssetLibrary {
    /// Parse a JSON catalog.
    pub fn from_reader(r: impl std::io::Read) -> ProtoResult<Self> {
        let lib: Self = serde_json::from_reader(r)
            .map_err(|e| ProtoError::serde(format!("parse asset library JSON: {e}")))?;
        if lib.assets.contains_key(REMOVE_KEY) {
            return Err(ProtoError::validation(format!(
                "asset key '{REMOVE_KEY}' is reserved"
            )));
        }
        Ok(lib)
    }

    /// Parse a JSON catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> ProtoResult<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path)
            .map_err(|e| ProtoError::load(format!("open '{}': {e}", path.display())))?;
        Self::from_reader(std::io::BufReader::new(f))
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, key: impl Into<String>, entry: AssetEntry) -> &mut Self {
        self.assets.insert(key.into(), entry);
        self
    }

    /// Entry for `key`.
    pub fn get(&self, key: &str) -> Option<&AssetEntry> {
        self.assets.get(key)
    }

    /// Keys of the assets fitting `filter`, in catalog order.
    pub fn matching<'a>(&'a self, filter: &'a [String]) -> impl Iterator<Item = &'a str> + 'a {
        self.assets
            .iter()
            .filter(move |(_, e)| e.fits(filter))
            .map(|(k, _)| k.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/library/catalog.rs"]
mod tests;
