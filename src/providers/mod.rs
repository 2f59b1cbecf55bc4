//! Collaborator interfaces consumed by the reference engine
//!
//! The engine never computes symbols or references itself; it talks to a
//! [`SymbolProvider`] for that, a [`DocumentAccess`] for source text, and a
//! [`Workspace`] for directory listing and root resolution. All three are
//! object-safe async traits so hosts can plug in their own implementations.

pub mod fs;
pub mod index;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::models::document::Document;
use crate::models::symbol::{Location, Position, Symbol};

pub use fs::{FsDocumentAccess, FsWorkspace};
pub use index::JsonIndexProvider;

/// Symbol and reference lookup, delegated to the host.
#[async_trait]
pub trait SymbolProvider: Send + Sync {
    /// All symbols defined in a file.
    async fn list_symbols(&self, file: &Path) -> Result<Vec<Symbol>, FetchError>;

    /// All reference sites for the symbol at a position.
    async fn find_references(
        &self,
        file: &Path,
        position: Position,
    ) -> Result<Vec<Location>, FetchError>;
}

/// Source text access for the resolver.
#[async_trait]
pub trait DocumentAccess: Send + Sync {
    async fn load(&self, file: &Path) -> Result<Arc<Document>, FetchError>;
}

/// Kind of a directory entry as reported by the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
    Unknown,
}

/// A workspace root owning some subtree of files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootInfo {
    pub name: String,
    pub path: PathBuf,
}

impl RootInfo {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Directory enumeration and workspace-root resolution.
#[async_trait]
pub trait Workspace: Send + Sync {
    /// Immediate entries of a folder; recursion is composed by the caller.
    async fn read_directory(&self, folder: &Path) -> std::io::Result<Vec<(String, EntryKind)>>;

    /// The workspace root owning a path, if any.
    fn owning_root(&self, path: &Path) -> Option<RootInfo>;

    /// Whether more than one root is open (short paths then carry the root
    /// name as a disambiguating prefix).
    fn multi_root(&self) -> bool;
}
