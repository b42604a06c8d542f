//! Parsed-tree cache keyed by file identifier.
//!
//! The cache is an injectable component: callers construct one, wrap it in
//! an `Arc` and hand it to whatever needs it. A hit requires the cached
//! source text to equal the requested text exactly; any difference re-parses
//! and replaces the entry.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::parser::Parser;
use crate::tree::SourceTree;

const CACHE_TARGET: &str = "stitch_syntax::cache";

#[derive(Debug)]
struct CacheEntry {
    source: String,
    tree: Arc<SourceTree>,
}

/// Counters describing cache usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cached files.
    pub entries: usize,
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to parse.
    pub misses: u64,
}

/// Cache of parsed trees, one entry per file identifier.
///
/// The map lock is held only while reading or writing entries, never while
/// parsing, so concurrent calls for different files do not serialise on the
/// parser.
#[derive(Debug, Default)]
pub struct ParseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ParseCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        // Entries are replaced wholesale, so a poisoned map is still
        // consistent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a private copy of the tree for `source`, parsing on a miss.
    ///
    /// The language is detected from `file_id`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::ParseError`] when the source is malformed. A
    /// failed parse leaves any existing entry for the file untouched.
    pub fn parse(&self, source: &str, file_id: &str) -> Result<SourceTree, SyntaxError> {
        let cached = self.lock().get(file_id).and_then(|entry| {
            (entry.source == source).then(|| Arc::clone(&entry.tree))
        });
        if let Some(tree) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(target: CACHE_TARGET, file = file_id, "parse cache hit");
            return Ok(SourceTree::clone(&tree));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(
            target: CACHE_TARGET,
            file = file_id,
            bytes = source.len(),
            "parse cache miss"
        );
        let language = SupportedLanguage::for_file_id(file_id);
        let tree = Parser::new(language)?.parse_tree(source)?;
        self.store(file_id, source, tree.clone());
        Ok(tree)
    }

    /// Records `tree` as the parse of `source` for `file_id`.
    pub fn store(&self, file_id: &str, source: &str, tree: SourceTree) {
        self.lock().insert(
            file_id.to_owned(),
            CacheEntry {
                source: source.to_owned(),
                tree: Arc::new(tree),
            },
        );
    }

    /// Drops the entry for `file_id`. Returns whether one existed.
    #[must_use = "a false return means nothing was cached for the file"]
    pub fn invalidate(&self, file_id: &str) -> bool {
        let removed = self.lock().remove(file_id).is_some();
        debug!(target: CACHE_TARGET, file = file_id, removed, "parse cache invalidate");
        removed
    }

    /// Drops every entry.
    pub fn clear(&self) {
        let mut entries = self.lock();
        let dropped = entries.len();
        entries.clear();
        debug!(target: CACHE_TARGET, dropped, "parse cache cleared");
    }

    /// Returns the number of cached files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns a snapshot of the cache counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
