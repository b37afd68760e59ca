//! Process-lifetime dataset cache.
//!
//! The cache is an explicit object injected into the pipeline, keyed by the
//! canonical source path. Each entry is written at most once and read-only
//! thereafter; there is no eviction.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use log::debug;

use super::parser::Parser;
use super::source::{DataTable, SourceMetadata};
use crate::error::{Result, SynopsisError};

/// A parsed table together with its source metadata.
///
/// The table is behind its own `Arc` so filtered views can share it
/// without copying rows.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub table: Arc<DataTable>,
    pub source: SourceMetadata,
}

/// Memoizing dataset loader.
///
/// Repeated loads of the same path return the cached [`Dataset`] without
/// touching the filesystem again.
pub struct DatasetCache {
    parser: Parser,
    entries: Mutex<HashMap<PathBuf, Arc<Dataset>>>,
}

impl DatasetCache {
    pub fn new(parser: Parser) -> Self {
        Self {
            parser,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Load a dataset, reading and parsing the source at most once.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Arc<Dataset>> {
        let path = path.as_ref();
        let key = path.canonicalize().map_err(|e| SynopsisError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        if let Some(hit) = self.lock().get(&key) {
            debug!("cache hit for {}", key.display());
            return Ok(Arc::clone(hit));
        }

        debug!("cache miss for {}, parsing", key.display());
        let (table, source) = self.parser.parse_file(path)?;
        let dataset = Arc::new(Dataset {
            table: Arc::new(table),
            source,
        });

        // entry() keeps the first writer's value if another load raced us in.
        let mut entries = self.lock();
        let entry = entries.entry(key).or_insert(dataset);
        Ok(Arc::clone(entry))
    }

    /// Number of cached datasets.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, Arc<Dataset>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new(Parser::new())
    }
}
