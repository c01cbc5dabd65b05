use std::io::{self, Read};

use resumable_engine::Engine;

use crate::error::FINALIZED_UPDATE;
use crate::{Error, ResumableDigest, Result};

/// Streaming reader that hashes data as it passes through.
/// Wraps any `Read` source, so bytes are hashed while being copied elsewhere.
pub struct DigestReader<R, E> {
    reader:     R,
    digest:     ResumableDigest<E>,
    bytes_read: u64,
}

impl<R, E: Engine> DigestReader<R, E> {
    /// Create a reader over a fresh digest.
    pub fn new(reader: R) -> Self { Self::with_digest(reader, ResumableDigest::new()) }

    /// Continue a digest restored from an earlier session.
    pub fn with_digest(reader: R, digest: ResumableDigest<E>) -> Self {
        Self {
            reader,
            digest,
            bytes_read: 0,
        }
    }

    pub fn digest(&self) -> &ResumableDigest<E> { &self.digest }

    /// Bytes read through this adaptor, not counting earlier sessions.
    pub fn bytes_read(&self) -> u64 { self.bytes_read }

    pub fn into_parts(self) -> (R, ResumableDigest<E>) { (self.reader, self.digest) }

    /// Finalize and return the hex digest.
    pub fn finish(mut self) -> Result<String> { self.digest.hexdigest() }

    /// Finalize and compare against an expected hex digest.
    /// Returns error on mismatch.
    pub fn verify(self, expected: &str) -> Result<()> {
        let actual = self.finish()?;
        if actual.eq_ignore_ascii_case(expected) {
            Ok(())
        } else {
            Err(Error::Mismatch {
                expected: expected.to_ascii_lowercase(),
                actual,
            })
        }
    }
}

impl<R: Read, E: Engine> Read for DigestReader<R, E> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.digest.is_finalized() {
            return Err(Error::InvalidState(FINALIZED_UPDATE).into());
        }
        let n = self.reader.read(buf)?;
        if n > 0 {
            self.digest.update(&buf[..n])?;
            self.bytes_read += n as u64;
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ResumableSha1, ResumableSha256};
    use std::io::Cursor;

    #[test]
    fn test_digest_reader_success() {
        let data = b"test data for verification";
        let expected = ResumableSha256::hexdigest_of(data).unwrap();

        let mut verified = DigestReader::<_, resumable_engine::Sha256Engine>::new(Cursor::new(data));
        let mut copied = Vec::new();
        io::copy(&mut verified, &mut copied).unwrap();

        assert_eq!(copied, data);
        assert_eq!(verified.bytes_read(), data.len() as u64);
        verified.verify(&expected.to_uppercase()).unwrap();
    }

    #[test]
    fn test_digest_reader_mismatch() {
        let mut verified = DigestReader::with_digest(Cursor::new(b"test data"), ResumableSha1::new());
        let mut buffer = [0; 32];
        verified.read(&mut buffer).unwrap();

        let wrong = "0".repeat(40);
        match verified.verify(&wrong) {
            Err(Error::Mismatch { expected, actual }) => {
                assert_eq!(expected, wrong);
                assert_ne!(actual, wrong);
            }
            other => panic!("expected Mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_digest_reader_continues_restored_digest() {
        let mut head = ResumableSha256::new();
        head.update(b"The quick brown fox ").unwrap();
        let restored = ResumableSha256::decode(&head.encode().unwrap()).unwrap();

        let mut reader = DigestReader::with_digest(&b"jumps over the lazy dog"[..], restored);
        io::copy(&mut reader, &mut io::sink()).unwrap();
        assert_eq!(
            reader.finish().unwrap(),
            "d7a8fbb307d7809469ca9abcb0082e4f8d5651e46d3cdb762d02d0bf37c9e592"
        );
    }

    #[test]
    fn test_digest_reader_refuses_finalized_digest() {
        let mut done = ResumableSha256::new();
        done.hexdigest().unwrap();

        let mut reader = DigestReader::with_digest(Cursor::new(b"data"), done);
        let err = reader.read(&mut [0u8; 4]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert_eq!(reader.into_parts().0.position(), 0);
    }
}
