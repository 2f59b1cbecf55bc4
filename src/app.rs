//! Application container for refscope

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::OutputContext;
use crate::config::RefscopeConfig;
use crate::providers::{FsDocumentAccess, FsWorkspace, JsonIndexProvider};
use crate::services::ReferenceEngine;

pub struct App {
    root: PathBuf,
    pub(crate) output: OutputContext,
    pub(crate) engine: ReferenceEngine,
    config: RefscopeConfig,
}

impl App {
    /// Wire the engine with filesystem collaborators and the JSON index
    /// provider resolved from config or the CLI override.
    pub fn new(index_override: Option<&Path>) -> anyhow::Result<Self> {
        let root = std::env::current_dir()?;
        tracing::debug!("Initializing refscope at {:?}", root);

        let config = RefscopeConfig::load(&root)?;
        let index_path = config
            .index_path(&root, index_override)
            .ok_or_else(|| anyhow::anyhow!("No symbol index configured; pass --index or set 'index' in .refscope.toml"))?;

        let provider = JsonIndexProvider::load(&index_path)?;
        tracing::info!(
            "Loaded symbol index {} ({} symbols)",
            index_path.display(),
            provider.symbol_count()
        );

        let workspace = FsWorkspace::new(config.workspace_roots(&root));
        let engine = ReferenceEngine::new(
            Arc::new(provider),
            Arc::new(FsDocumentAccess::new()),
            Arc::new(workspace),
        );

        Ok(Self {
            output: OutputContext::new(root.clone()),
            root,
            engine,
            config,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &RefscopeConfig {
        &self.config
    }

    /// Resolve a CLI path argument against the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
