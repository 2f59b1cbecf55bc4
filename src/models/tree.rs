//! Display tree model
//!
//! Three-level presentation structure: scope root, one node per external
//! file containing references, one leaf per (symbol, range) pair. A tagged
//! union so the presentation boundary can match exhaustively on the node
//! variant. Built fresh on every query; the previous tree is discarded.

use serde::Serialize;
use std::path::PathBuf;

use crate::models::symbol::{Range, SymbolKind};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// The queried scope (file or folder)
    Root {
        label: String,
        path: PathBuf,
        children: Vec<Node>,
    },

    /// Intermediate folder grouping (reserved; current queries group by file)
    Folder {
        label: String,
        path: PathBuf,
        children: Vec<Node>,
    },

    /// An external file containing references into the scope
    File {
        label: String,
        path: PathBuf,
        children: Vec<Node>,
    },

    /// One reference site: `Line N: <symbol name>`
    Reference {
        label: String,
        path: PathBuf,
        range: Range,
        kind: SymbolKind,
    },
}

impl Node {
    pub fn label(&self) -> &str {
        match self {
            Node::Root { label, .. }
            | Node::Folder { label, .. }
            | Node::File { label, .. }
            | Node::Reference { label, .. } => label,
        }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            Node::Root { path, .. }
            | Node::Folder { path, .. }
            | Node::File { path, .. }
            | Node::Reference { path, .. } => path,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Root { children, .. }
            | Node::Folder { children, .. }
            | Node::File { children, .. } => children,
            Node::Reference { .. } => &[],
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Reference { .. })
    }

    /// Total number of reference leaves under this node.
    pub fn reference_count(&self) -> usize {
        match self {
            Node::Reference { .. } => 1,
            _ => self.children().iter().map(Node::reference_count).sum(),
        }
    }
}
