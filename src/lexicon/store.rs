//! Write-once holder for the process-wide lexicon index.
//!
//! The index is built lazily on first use. Concurrent first callers block
//! until a single build finishes; afterwards every read is lock-free. A failed
//! build leaves the store empty so the next caller retries.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::LexiconError;
use crate::lexicon::index::{LexiconIndex, RawRecord};
use crate::lexicon::loader::load_index;

type Loader = dyn Fn() -> Result<LexiconIndex, LexiconError> + Send + Sync;

/// Lazily initialized, shared, immutable [`LexiconIndex`].
#[derive(Clone)]
pub struct LexiconStore {
    cell: Arc<OnceCell<Arc<LexiconIndex>>>,
    loader: Arc<Loader>,
    origin: String,
}

impl LexiconStore {
    /// Store that loads the CSV at `path` on first use.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let origin = path.display().to_string();
        Self::with_loader(origin, move || load_index(&path))
    }

    /// Store backed by in-memory rows.
    pub fn from_records(records: Vec<RawRecord>) -> Self {
        Self::with_loader("<memory>", move || Ok(LexiconIndex::build(records.clone())))
    }

    /// Store around an index that is already built.
    pub fn preloaded(index: LexiconIndex) -> Self {
        Self {
            cell: Arc::new(OnceCell::with_value(Arc::new(index))),
            loader: Arc::new(|| Ok(LexiconIndex::default())),
            origin: "<preloaded>".to_string(),
        }
    }

    /// Store with a custom build function, run at most once successfully.
    pub fn with_loader<F>(origin: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Result<LexiconIndex, LexiconError> + Send + Sync + 'static,
    {
        Self {
            cell: Arc::new(OnceCell::new()),
            loader: Arc::new(loader),
            origin: origin.into(),
        }
    }

    /// Return the index, building it if this is the first successful call.
    pub fn get(&self) -> Result<Arc<LexiconIndex>, LexiconError> {
        self.cell
            .get_or_try_init(|| {
                tracing::debug!(origin = %self.origin, "Building lexicon index");
                (self.loader)().map(Arc::new)
            })
            .cloned()
    }

    /// The index if it has already been built.
    pub fn loaded(&self) -> Option<Arc<LexiconIndex>> {
        self.cell.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Where the lexicon comes from, for diagnostics.
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

impl fmt::Debug for LexiconStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexiconStore")
            .field("origin", &self.origin)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
