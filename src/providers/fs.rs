//! Filesystem-backed collaborators
//!
//! Thin wrappers over the local filesystem: document loading with a
//! session-lifetime cache, and directory/root access for folder queries.
//! Symbol sets are assumed content-stable for the session, so loaded
//! documents are never invalidated (same policy as the symbol cache).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::FetchError;
use crate::models::document::Document;
use crate::providers::{DocumentAccess, EntryKind, RootInfo, Workspace};

/// Loads documents from disk, caching per path for the session.
#[derive(Default)]
pub struct FsDocumentAccess {
    documents: RwLock<HashMap<PathBuf, Arc<Document>>>,
}

impl FsDocumentAccess {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentAccess for FsDocumentAccess {
    async fn load(&self, file: &Path) -> Result<Arc<Document>, FetchError> {
        {
            let documents = self.documents.read().await;
            if let Some(document) = documents.get(file) {
                return Ok(Arc::clone(document));
            }
        }

        let text = tokio::fs::read_to_string(file)
            .await
            .map_err(|e| FetchError::document_read(file, &e))?;
        let document = Arc::new(Document::new(text));

        let mut documents = self.documents.write().await;
        Ok(Arc::clone(
            documents
                .entry(file.to_path_buf())
                .or_insert_with(|| Arc::clone(&document)),
        ))
    }
}

/// Workspace over a fixed set of roots, listing directories via std::fs
/// metadata (lstat, so symlinks are reported as symlinks, not followed).
pub struct FsWorkspace {
    roots: Vec<RootInfo>,
}

impl FsWorkspace {
    pub fn new(roots: Vec<RootInfo>) -> Self {
        Self { roots }
    }

    pub fn single_root(root: RootInfo) -> Self {
        Self { roots: vec![root] }
    }
}

#[async_trait]
impl Workspace for FsWorkspace {
    async fn read_directory(&self, folder: &Path) -> std::io::Result<Vec<(String, EntryKind)>> {
        let folder = folder.to_path_buf();
        tokio::task::spawn_blocking(move || {
            let mut entries = Vec::new();
            for entry in std::fs::read_dir(&folder)? {
                let entry = entry?;
                let name = entry.file_name().to_string_lossy().into_owned();
                let file_type = entry.file_type()?;
                let kind = if file_type.is_symlink() {
                    EntryKind::Symlink
                } else if file_type.is_dir() {
                    EntryKind::Directory
                } else if file_type.is_file() {
                    EntryKind::File
                } else {
                    EntryKind::Unknown
                };
                entries.push((name, kind));
            }
            // Stable listing order keeps folder traversal deterministic
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Ok(entries)
        })
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?
    }

    fn owning_root(&self, path: &Path) -> Option<RootInfo> {
        self.roots
            .iter()
            .filter(|root| path.starts_with(&root.path))
            .max_by_key(|root| root.path.components().count())
            .cloned()
    }

    fn multi_root(&self) -> bool {
        self.roots.len() > 1
    }
}
