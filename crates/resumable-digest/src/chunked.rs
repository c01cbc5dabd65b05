use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use resumable_engine::Engine;
use tracing::{debug, trace};

use crate::error::FINALIZED_UPDATE;
use crate::options::{ChunkOptions, Progress};
use crate::{Error, ResumableDigest, Result};

/// Feeds a digest from a byte source in fixed-size chunks.
///
/// Every chunk except the last is exactly `chunk_size` bytes, however the
/// source splits its reads. The chunking never changes the resulting digest.
#[derive(Clone, Debug, Default)]
pub struct ChunkedReader {
    options: ChunkOptions,
}

impl ChunkedReader {
    pub fn new(options: ChunkOptions) -> Self { Self { options } }

    pub fn for_engine<E: Engine>() -> Self { Self::new(ChunkOptions::for_engine::<E>()) }

    pub fn options(&self) -> &ChunkOptions { &self.options }

    /// Drain `reader` into `digest`, returning the number of bytes consumed.
    ///
    /// If the source fails partway, the chunks fed before the failure stay
    /// absorbed and the error is returned. `processed_len()` then tells where
    /// to pick up, for example with [`resume_file`](Self::resume_file).
    pub fn feed<R: Read, E: Engine>(
        &self,
        reader: R,
        digest: &mut ResumableDigest<E>,
    ) -> Result<u64> {
        if digest.is_finalized() {
            return Err(Error::InvalidState(FINALIZED_UPDATE));
        }

        let chunk_size = self.options.effective_chunk_size();
        let mut source = reader.take(0);
        let mut buffer = Vec::new();
        let mut progress = Progress {
            bytes_processed: 0,
            chunks:          0,
        };

        loop {
            buffer.clear();
            source.set_limit(chunk_size as u64);
            let n = source.read_to_end(&mut buffer)?;
            if n == 0 {
                break;
            }

            digest.update(&buffer)?;
            progress.bytes_processed += n as u64;
            progress.chunks += 1;
            trace!(chunk = progress.chunks, len = n, "fed chunk");
            self.options.report(progress);

            if n < chunk_size {
                break;
            }
        }

        debug!(
            algorithm = %digest.algorithm(),
            bytes = progress.bytes_processed,
            chunks = progress.chunks,
            "source exhausted"
        );
        Ok(progress.bytes_processed)
    }

    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn feed_file<E: Engine>(
        &self,
        path: impl AsRef<Path>,
        digest: &mut ResumableDigest<E>,
    ) -> Result<u64> {
        if digest.is_finalized() {
            return Err(Error::InvalidState(FINALIZED_UPDATE));
        }
        let file = File::open(path.as_ref())?;
        self.feed(file, digest)
    }

    /// Continue hashing a file from the offset the digest has already absorbed.
    ///
    /// Returns the number of bytes read past that offset.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn resume_file<E: Engine>(
        &self,
        path: impl AsRef<Path>,
        digest: &mut ResumableDigest<E>,
    ) -> Result<u64> {
        if digest.is_finalized() {
            return Err(Error::InvalidState(FINALIZED_UPDATE));
        }

        let processed = digest.processed_len()?;
        let mut file = File::open(path.as_ref())?;
        let len = file.metadata()?.len();
        if len < processed {
            return Err(Error::SourceTooShort { processed, len });
        }

        file.seek(SeekFrom::Start(processed))?;
        debug!(offset = processed, remaining = len - processed, "resuming file");
        self.feed(file, digest)
    }
}
