//! Per-file symbol and per-symbol reference memoization
//!
//! Both caches live for the whole session: no eviction, no TTL, no
//! invalidation on file edits (symbol sets are assumed content-stable for
//! the session's duration; a stated limitation, not a bug).
//!
//! The reference cache also records failures. A symbol whose resolution or
//! lookup failed once re-raises the same failure on every later query
//! instead of re-invoking the provider, bounding the retry cost of
//! known-broken symbols.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use crate::error::FetchError;
use crate::models::symbol::{Location, Position, Symbol};

/// Cache key for a symbol's references: its definition file plus the
/// declaration range start. Stable across queries regardless of order, so
/// overlapping scopes observe the same cached value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceKey {
    pub file: PathBuf,
    pub start: Position,
}

impl ReferenceKey {
    pub fn for_symbol(symbol: &Symbol) -> Self {
        Self {
            file: symbol.location.file.clone(),
            start: symbol.location.range.start,
        }
    }
}

/// File -> symbol list. Only successful fetches are stored; an empty list
/// is a valid "no symbols" answer and is cached like any other.
#[derive(Default)]
pub struct SymbolCache {
    entries: RwLock<HashMap<PathBuf, Arc<Vec<Symbol>>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SymbolCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_fetch<F, Fut>(
        &self,
        file: &Path,
        fetch: F,
    ) -> Result<Arc<Vec<Symbol>>, FetchError>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<Vec<Symbol>, FetchError>>,
    {
        {
            let entries = self.entries.read().await;
            if let Some(symbols) = entries.get(file) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Using cached symbols for {}", file.display());
                return Ok(Arc::clone(symbols));
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("Fetching symbols for {}", file.display());
        let symbols = Arc::new(fetch().await?);

        let mut entries = self.entries.write().await;
        // Two overlapping queries may race to fetch the same file; the
        // provider call is idempotent, first write wins.
        Ok(Arc::clone(
            entries
                .entry(file.to_path_buf())
                .or_insert_with(|| Arc::clone(&symbols)),
        ))
    }

    pub fn stats(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }
}

/// (definition file, range start) -> reference list or recorded failure.
#[derive(Default)]
pub struct ReferenceCache {
    entries: RwLock<HashMap<ReferenceKey, Result<Arc<Vec<Location>>, FetchError>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ReferenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached references, re-raise the cached failure, or run
    /// `fetch` and record its outcome either way.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: ReferenceKey,
        symbol_name: &str,
        fetch: F,
    ) -> Result<Arc<Vec<Location>>, FetchError>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<Vec<Location>, FetchError>>,
    {
        {
            let entries = self.entries.read().await;
            match entries.get(&key) {
                Some(Ok(references)) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(
                        "Using cached references for \"{}\" in {}",
                        symbol_name,
                        key.file.display()
                    );
                    return Ok(Arc::clone(references));
                }
                Some(Err(failure)) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(
                        "Ignoring symbol \"{}\" in {} due to previous error",
                        symbol_name,
                        key.file.display()
                    );
                    return Err(failure.clone());
                }
                None => {}
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let outcome = fetch().await.map(Arc::new);

        let mut entries = self.entries.write().await;
        let stored = entries.entry(key).or_insert_with(|| outcome.clone());
        match stored {
            Ok(references) => Ok(Arc::clone(references)),
            Err(failure) => Err(failure.clone()),
        }
    }

    pub fn stats(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::symbol::{Range, SymbolKind};
    use std::sync::atomic::AtomicUsize;

    fn key(file: &str, line: u32) -> ReferenceKey {
        ReferenceKey {
            file: PathBuf::from(file),
            start: Position::new(line, 0),
        }
    }

    fn loc(file: &str, line: u32) -> Location {
        Location::new(PathBuf::from(file), Range::point(Position::new(line, 0)))
    }

    #[tokio::test]
    async fn test_symbol_cache_fetches_once() {
        let cache = SymbolCache::new();
        let calls = AtomicUsize::new(0);
        let file = Path::new("/w/src/a.rs");

        for _ in 0..3 {
            let symbols = cache
                .get_or_fetch(file, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![Symbol::new(
                        "alpha",
                        SymbolKind::Function,
                        loc("/w/src/a.rs", 0),
                    )])
                })
                .await
                .unwrap();
            assert_eq!(symbols.len(), 1);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.stats(), (2, 1));
    }

    #[tokio::test]
    async fn test_symbol_cache_caches_empty_list() {
        let cache = SymbolCache::new();
        let calls = AtomicUsize::new(0);
        let file = Path::new("/w/src/empty.rs");

        for _ in 0..2 {
            let symbols = cache
                .get_or_fetch(file, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![])
                })
                .await
                .unwrap();
            assert!(symbols.is_empty());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_symbol_cache_does_not_cache_failures() {
        let cache = SymbolCache::new();
        let calls = AtomicUsize::new(0);
        let file = Path::new("/w/src/broken.rs");

        for _ in 0..2 {
            let result = cache
                .get_or_fetch(file, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(FetchError::provider_unavailable("symbols", file))
                })
                .await;
            assert!(result.is_err());
        }

        // List failures retry; only reference failures are poisoned
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_reference_cache_hit() {
        let cache = ReferenceCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let references = cache
                .get_or_fetch(key("/w/src/a.rs", 3), "alpha", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![loc("/w/src/b.rs", 7)])
                })
                .await
                .unwrap();
            assert_eq!(references.len(), 1);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reference_cache_poisons_failures() {
        let cache = ReferenceCache::new();
        let calls = AtomicUsize::new(0);
        let failure = FetchError::provider_unavailable("symbol references", "/w/src/a.rs");

        for _ in 0..3 {
            let result = cache
                .get_or_fetch(key("/w/src/a.rs", 3), "alpha", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(failure.clone())
                })
                .await;
            assert_eq!(result.unwrap_err(), failure);
        }

        // The fetch ran exactly once; later queries re-raised the cached failure
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reference_cache_keys_are_independent() {
        let cache = ReferenceCache::new();

        cache
            .get_or_fetch(key("/w/src/a.rs", 3), "alpha", || async {
                Err(FetchError::provider_unavailable("symbol references", "/w/src/a.rs"))
            })
            .await
            .unwrap_err();

        // A different start position is a different symbol
        let references = cache
            .get_or_fetch(key("/w/src/a.rs", 9), "beta", || async {
                Ok(vec![loc("/w/src/c.rs", 1)])
            })
            .await
            .unwrap();
        assert_eq!(references.len(), 1);
    }
}
