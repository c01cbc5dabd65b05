use std::fmt;
use std::sync::Arc;

use resumable_engine::{DEFAULT_CHUNK_SIZE, Engine};
use serde::{Deserialize, Serialize};

pub type ProgressFn = Arc<dyn Fn(Progress) + Send + Sync>;

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkOptions {
    pub chunk_size:  usize,
    #[serde(skip)]
    pub on_progress: Option<ProgressFn>,
}

/// Reported after every chunk handed to the digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub bytes_processed: u64,
    pub chunks:          u64,
}

impl Default for ChunkOptions {
    fn default() -> Self { Self::new() }
}

impl ChunkOptions {
    pub fn new() -> Self {
        Self {
            chunk_size:  DEFAULT_CHUNK_SIZE,
            on_progress: None,
        }
    }

    /// Options using the engine's own chunk size.
    pub fn for_engine<E: Engine>() -> Self { Self::new().chunk_size(E::CHUNK_SIZE) }

    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    pub fn on_progress(mut self, callback: ProgressFn) -> Self {
        self.on_progress = Some(callback);
        self
    }

    /// Chunk size actually used; zero is treated as one byte.
    pub fn effective_chunk_size(&self) -> usize { self.chunk_size.max(1) }

    pub(crate) fn report(&self, progress: Progress) {
        if let Some(callback) = &self.on_progress {
            callback(progress);
        }
    }
}

impl fmt::Debug for ChunkOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkOptions")
            .field("chunk_size", &self.chunk_size)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn options_default() {
        let options = ChunkOptions::default();
        assert_eq!(options.chunk_size, 5 * 1024 * 1024);
        assert!(options.on_progress.is_none());
    }

    #[test]
    fn options_builder_pattern() {
        let options = ChunkOptions::new().chunk_size(4096);
        assert_eq!(options.chunk_size, 4096);
        assert_eq!(options.effective_chunk_size(), 4096);
    }

    #[test]
    fn zero_chunk_size_is_clamped() {
        assert_eq!(ChunkOptions::new().chunk_size(0).effective_chunk_size(), 1);
    }

    #[test]
    fn options_on_progress_callback() {
        let counter = Arc::new(AtomicU64::new(0));
        let counter_clone = counter.clone();

        let options = ChunkOptions::new().on_progress(Arc::new(move |progress: Progress| {
            counter_clone.fetch_add(progress.bytes_processed, Ordering::SeqCst);
        }));

        options.report(Progress {
            bytes_processed: 10,
            chunks:          1,
        });
        assert_eq!(counter.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn options_from_config() {
        let options: ChunkOptions = serde_json::from_str(r#"{ "chunk_size": 1048576 }"#).unwrap();
        assert_eq!(options.chunk_size, 1024 * 1024);

        let options: ChunkOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.chunk_size, DEFAULT_CHUNK_SIZE);

        let rendered = serde_json::to_string(&ChunkOptions::new().chunk_size(64)).unwrap();
        assert_eq!(rendered, r#"{"chunk_size":64}"#);
    }
}
