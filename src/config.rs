//! Project configuration
//!
//! Loaded from `.refscope.toml` under the working directory when present.
//! Declares the workspace roots used for short-path derivation (several
//! roots make labels carry the root name) and a default symbol index path.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::providers::RootInfo;

pub const CONFIG_FILE: &str = ".refscope.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefscopeConfig {
    /// Default symbol index, overridable with --index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<PathBuf>,

    /// Workspace roots; empty means a single root at the working directory
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roots: Vec<RootConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootConfig {
    pub name: String,
    pub path: PathBuf,
}

impl RefscopeConfig {
    /// Load from `dir/.refscope.toml`, falling back to defaults when the
    /// file does not exist.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)?;
        toml::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Configured roots resolved against `dir`, or `dir` itself as the
    /// single fallback root named after its final component.
    pub fn workspace_roots(&self, dir: &Path) -> Vec<RootInfo> {
        if self.roots.is_empty() {
            let name = dir
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "workspace".to_string());
            return vec![RootInfo::new(name, dir)];
        }
        self.roots
            .iter()
            .map(|root| {
                let path = if root.path.is_absolute() {
                    root.path.clone()
                } else {
                    dir.join(&root.path)
                };
                RootInfo::new(root.name.clone(), path)
            })
            .collect()
    }

    /// Index path resolved against `dir`, preferring the CLI override.
    pub fn index_path(&self, dir: &Path, cli_override: Option<&Path>) -> Option<PathBuf> {
        let index = cli_override.or(self.index.as_deref())?;
        Some(if index.is_absolute() {
            index.to_path_buf()
        } else {
            dir.join(index)
        })
    }
}
