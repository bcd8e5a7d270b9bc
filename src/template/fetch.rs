use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use crate::foundation::error::{ProtoError, ProtoResult};
use crate::template::definition::TemplateDef;

/// Resolves a template url to its definition.
pub trait TemplateFetch {
    /// Fetch and parse the definition at `url`. Failures are [`ProtoError::Load`].
    fn fetch(&mut self, url: &str) -> ProtoResult<TemplateDef>;
}

/// Template store backed by a map, keyed by url.
#[derive(Clone, Debug, Default)]
pub struct MemoryTemplateStore {
    defs: HashMap<String, TemplateDef>,
    fetches: usize,
}

impl MemoryTemplateStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `def` under `url`, replacing any previous entry.
    pub fn insert(&mut self, url: impl Into<String>, def: TemplateDef) -> &mut Self {
        self.defs.insert(url.into(), def);
        self
    }

    /// Number of successful fetches served.
    pub fn fetches(&self) -> usize {
        self.fetches
    }
}

impl TemplateFetch for MemoryTemplateStore {
    fn fetch(&mut self, url: &str) -> ProtoResult<TemplateDef> {
        let def = self
            .defs
            .get(url)
            .cloned()
            .ok_or_else(|| ProtoError::load(format!("no template registered at '{url}'")))?;
        self.fetches += 1;
        Ok(def)
    }
}

/// Template store reading JSON definitions relative to a root directory.
#[derive(Clone, Debug)]
pub struct FsTemplateStore {
    root: PathBuf,
}

impl FsTemplateStore {
    /// Store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, url: &str) -> ProtoResult<PathBuf> {
        let rel = Path::new(url);
        let escapes = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if url.is_empty() || escapes {
            return Err(ProtoError::load(format!(
                "template url '{url}' must be a relative path inside the template root"
            )));
        }
        Ok(self.root.join(rel))
    }
}

impl TemplateFetch for FsTemplateStore {
    fn fetch(&mut self, url: &str) -> ProtoResult<TemplateDef> {
        let path = self.resolve(url)?;
        tracing::debug!(url, path = %path.display(), "fetching template");
        TemplateDef::from_path(&path).map_err(|e| match e {
            ProtoError::Load(_) => e,
            other => ProtoError::load(format!("{url}: {other}")),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/fetch.rs"]
mod tests;
