//! In-memory corpus store
//!
//! Backing store for tests and ephemeral sessions. Interior mutability via a
//! single RwLock; reads clone, so a loaded corpus is never aliased with the
//! store's internal state.

use parking_lot::RwLock;
use quarry_core::error::Result;
use quarry_core::traits::CorpusStore;
use quarry_core::types::{Chunk, CorpusMeta};

#[derive(Debug, Default)]
struct Inner {
    meta: Option<CorpusMeta>,
    chunks: Vec<Chunk>,
}

/// In-memory implementation of the `CorpusStore` port
///
/// # Example
///
/// ```
/// use quarry_core::traits::CorpusStore;
/// use quarry_core::types::{Chunk, CorpusMeta};
/// use quarry_storage::MemoryCorpusStore;
///
/// let store = MemoryCorpusStore::new();
/// store.put_meta(&CorpusMeta::new("model", 2)).unwrap();
/// store.put_chunks(&[Chunk::new("a", "alpha", vec![1.0, 0.0])]).unwrap();
///
/// let corpus = store.load_corpus().unwrap().unwrap();
/// assert_eq!(corpus.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryCorpusStore {
    inner: RwLock<Inner>,
}

impl MemoryCorpusStore {
    /// Create an empty store
    pub fn new() -> Self {
        MemoryCorpusStore::default()
    }

    /// Number of stored chunks
    pub fn len(&self) -> usize {
        self.inner.read().chunks.len()
    }

    /// True if no chunks are stored
    pub fn is_empty(&self) -> bool {
        self.inner.read().chunks.is_empty()
    }

    /// Drop all stored state
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.meta = None;
        inner.chunks.clear();
    }
}

impl CorpusStore for MemoryCorpusStore {
    fn get_meta(&self) -> Result<Option<CorpusMeta>> {
        Ok(self.inner.read().meta.clone())
    }

    fn get_all_chunks(&self) -> Result<Vec<Chunk>> {
        Ok(self.inner.read().chunks.clone())
    }

    fn put_meta(&self, meta: &CorpusMeta) -> Result<()> {
        self.inner.write().meta = Some(meta.clone());
        Ok(())
    }

    fn put_chunks(&self, chunks: &[Chunk]) -> Result<()> {
        self.inner.write().chunks.extend_from_slice(chunks);
        Ok(())
    }
}
