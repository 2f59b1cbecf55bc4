//! Reference aggregation engine
//!
//! Orchestrates resolver, caches, and providers: per-file fan-out over
//! important symbols, per-folder fan-out over files, self/folder reference
//! exclusion, and publication of the presentation tree through a single
//! current-tree slot with change notification.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::watch;

use crate::error::{FetchError, RefscopeError, RefscopeResult};
use crate::models::symbol::{Location, SymbolReferences};
use crate::models::tree::Node;
use crate::providers::{DocumentAccess, EntryKind, SymbolProvider, Workspace};
use crate::services::cache::{ReferenceCache, ReferenceKey, SymbolCache};
use crate::services::{filter, present, resolver};

pub struct ReferenceEngine {
    provider: Arc<dyn SymbolProvider>,
    documents: Arc<dyn DocumentAccess>,
    workspace: Arc<dyn Workspace>,
    symbols: SymbolCache,
    references: ReferenceCache,
    tree_tx: watch::Sender<Option<Arc<Node>>>,
}

impl ReferenceEngine {
    pub fn new(
        provider: Arc<dyn SymbolProvider>,
        documents: Arc<dyn DocumentAccess>,
        workspace: Arc<dyn Workspace>,
    ) -> Self {
        let (tree_tx, _) = watch::channel(None);
        Self {
            provider,
            documents,
            workspace,
            symbols: SymbolCache::new(),
            references: ReferenceCache::new(),
            tree_tx,
        }
    }

    /// Fetch external references for one file, group, publish, and notify.
    pub async fn request_for_file(&self, file: &Path) -> RefscopeResult<Arc<Node>> {
        let sets = self.file_references(file).await?;
        self.publish(file, &sets)
    }

    /// Fetch external references for a folder subtree, group, publish, and
    /// notify.
    pub async fn request_for_folder(&self, folder: &Path) -> RefscopeResult<Arc<Node>> {
        let sets = self.folder_references(folder).await?;
        self.publish(folder, &sets)
    }

    /// Observe current-tree updates. The channel fires exactly once per
    /// successful presentation update; a superseded in-flight request is
    /// simply overwritten (last-write-wins, no cancellation).
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Node>>> {
        self.tree_tx.subscribe()
    }

    pub fn current_tree(&self) -> Option<Arc<Node>> {
        self.tree_tx.borrow().clone()
    }

    fn publish(&self, scope: &Path, sets: &[SymbolReferences]) -> RefscopeResult<Arc<Node>> {
        let tree = Arc::new(present::present(scope, sets, self.workspace.as_ref())?);
        self.tree_tx.send_replace(Some(Arc::clone(&tree)));
        Ok(tree)
    }

    /// External references for every important symbol defined in `file`.
    ///
    /// Each symbol's pipeline runs in isolation: a resolver mismatch or
    /// provider failure drops that symbol, never its siblings. References
    /// located in `file` itself are excluded; empty sets are dropped.
    pub async fn file_references(&self, file: &Path) -> RefscopeResult<Vec<SymbolReferences>> {
        let all = self
            .symbols
            .get_or_fetch(file, || async { self.provider.list_symbols(file).await })
            .await?;
        let important = filter::important_symbols(&all);
        tracing::debug!(
            "{} (after filter: {}) symbols retrieved for {}",
            all.len(),
            important.len(),
            file.display()
        );
        if important.is_empty() {
            tracing::debug!(
                "Unfiltered symbols: {}",
                all.iter()
                    .map(|s| format!("{} [{}]", s.name, s.kind))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        let lookups = important
            .iter()
            .map(|symbol| self.symbol_references(symbol));
        let outcomes = join_all(lookups).await;

        let mut sets = Vec::new();
        for (symbol, outcome) in important.iter().zip(outcomes) {
            match outcome {
                Ok(references) => {
                    let external = SymbolReferences::new(symbol.clone(), references.to_vec())
                        .retain_files(|reference| reference != file);
                    if !external.is_empty() {
                        sets.push(external);
                    }
                }
                Err(failure) => tracing::warn!("{}", failure),
            }
        }
        Ok(sets)
    }

    /// References for one symbol, memoized by its definition location.
    ///
    /// Anchor resolution runs inside the cached fetch so a name mismatch is
    /// recorded alongside provider failures and never retried.
    async fn symbol_references(
        &self,
        symbol: &crate::models::symbol::Symbol,
    ) -> Result<Arc<Vec<Location>>, FetchError> {
        let key = ReferenceKey::for_symbol(symbol);
        self.references
            .get_or_fetch(key, &symbol.name, || async {
                let file = &symbol.location.file;
                let document = self.documents.load(file).await?;
                let anchor = resolver::resolve_anchor(&document, symbol)?;
                tracing::debug!(
                    "Fetching references for \"{}\" (original: \"{}\") at {} in {}",
                    resolver::simple_symbol_name(&symbol.name),
                    symbol.name,
                    anchor,
                    file.display()
                );
                self.provider.find_references(file, anchor).await
            })
            .await
    }

    /// External references for every file under `folder`, excluding
    /// reference sites anywhere inside the folder's subtree (the defining
    /// file's siblings included).
    pub async fn folder_references(&self, folder: &Path) -> RefscopeResult<Vec<SymbolReferences>> {
        let files = self.collect_files(folder).await?;
        let outcomes = join_all(files.iter().map(|file| self.file_references(file))).await;

        let mut merged = Vec::new();
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(sets) => {
                    for set in sets {
                        let external =
                            set.retain_files(|reference| !reference.starts_with(folder));
                        if !external.is_empty() {
                            merged.push(external);
                        }
                    }
                }
                Err(failure) => {
                    tracing::warn!("{}", failure);
                    failures.push(failure);
                }
            }
        }

        if !files.is_empty() && failures.len() == files.len() {
            return Err(RefscopeError::NoReferencesRetrievable {
                folder: folder.to_path_buf(),
                source: Box::new(failures.remove(0)),
            });
        }
        Ok(merged)
    }

    /// Recursive file enumeration composed from the workspace collaborator.
    /// Symlinks and unknown entry kinds are skipped with a diagnostic note.
    async fn collect_files(&self, folder: &Path) -> RefscopeResult<Vec<PathBuf>> {
        let mut pending = vec![folder.to_path_buf()];
        let mut files = Vec::new();
        while let Some(dir) = pending.pop() {
            for (name, kind) in self.workspace.read_directory(&dir).await? {
                let child = dir.join(&name);
                match kind {
                    EntryKind::File => files.push(child),
                    EntryKind::Directory => pending.push(child),
                    EntryKind::Symlink | EntryKind::Unknown => {
                        tracing::debug!("Ignoring {}, unsupported file type", child.display());
                    }
                }
            }
        }
        files.sort();
        Ok(files)
    }

    /// (hits, misses) for the symbol and reference caches, in that order.
    pub fn cache_stats(&self) -> ((u64, u64), (u64, u64)) {
        (self.symbols.stats(), self.references.stats())
    }
}
