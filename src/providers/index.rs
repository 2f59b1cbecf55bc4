//! JSON symbol index provider
//!
//! A [`SymbolProvider`] backed by a pre-computed symbol/reference index on
//! disk. This keeps reference computation out of process: an editor, LSP
//! exporter, or indexer produces the JSON, refscope only aggregates it.
//!
//! Index format:
//!
//! ```json
//! {
//!   "symbols": [
//!     {
//!       "name": "Widget",
//!       "kind": "class",
//!       "file": "src/widget.rs",
//!       "range": { "start": { "line": 2, "column": 7 },
//!                  "end":   { "line": 2, "column": 13 } },
//!       "references": [
//!         { "file": "src/app.rs",
//!           "range": { "start": { "line": 9, "column": 4 },
//!                      "end":   { "line": 9, "column": 10 } } }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Relative paths are resolved against the index file's directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::FetchError;
use crate::models::symbol::{Location, Position, Range, Symbol, SymbolKind};
use crate::providers::SymbolProvider;

#[derive(Debug, Deserialize)]
struct IndexFile {
    symbols: Vec<IndexSymbol>,
}

#[derive(Debug, Deserialize)]
struct IndexSymbol {
    name: String,
    kind: SymbolKind,
    file: PathBuf,
    range: Range,
    #[serde(default)]
    references: Vec<IndexLocation>,
}

#[derive(Debug, Deserialize)]
struct IndexLocation {
    file: PathBuf,
    range: Range,
}

struct IndexEntry {
    symbol: Symbol,
    references: Vec<Location>,
}

pub struct JsonIndexProvider {
    entries: Vec<IndexEntry>,
}

impl JsonIndexProvider {
    /// Load an index from disk, resolving relative paths against the index
    /// file's directory.
    pub fn load(index_path: &Path) -> std::io::Result<Self> {
        let raw = std::fs::read_to_string(index_path)?;
        let base = index_path.parent().unwrap_or(Path::new("."));
        Self::from_json(&raw, base).map_err(std::io::Error::other)
    }

    pub fn from_json(raw: &str, base: &Path) -> Result<Self, serde_json::Error> {
        let index: IndexFile = serde_json::from_str(raw)?;
        let resolve = |path: PathBuf| {
            if path.is_absolute() {
                path
            } else {
                base.join(path)
            }
        };

        let entries = index
            .symbols
            .into_iter()
            .map(|entry| IndexEntry {
                symbol: Symbol::new(
                    entry.name,
                    entry.kind,
                    Location::new(resolve(entry.file), entry.range),
                ),
                references: entry
                    .references
                    .into_iter()
                    .map(|reference| Location::new(resolve(reference.file), reference.range))
                    .collect(),
            })
            .collect();

        Ok(Self { entries })
    }

    pub fn symbol_count(&self) -> usize {
        self.entries.len()
    }
}

fn range_contains(range: Range, position: Position) -> bool {
    let after_start = position.line > range.start.line
        || (position.line == range.start.line && position.column >= range.start.column);
    let before_end = position.line < range.end.line
        || (position.line == range.end.line && position.column <= range.end.column);
    after_start && before_end
}

#[async_trait]
impl SymbolProvider for JsonIndexProvider {
    async fn list_symbols(&self, file: &Path) -> Result<Vec<Symbol>, FetchError> {
        let symbols: Vec<Symbol> = self
            .entries
            .iter()
            .filter(|entry| entry.symbol.location.file == file)
            .map(|entry| entry.symbol.clone())
            .collect();
        Ok(symbols)
    }

    async fn find_references(
        &self,
        file: &Path,
        position: Position,
    ) -> Result<Vec<Location>, FetchError> {
        self.entries
            .iter()
            .find(|entry| {
                entry.symbol.location.file == file
                    && range_contains(entry.symbol.location.range, position)
            })
            .map(|entry| entry.references.clone())
            .ok_or_else(|| FetchError::provider_unavailable("symbol references", file))
    }
}
