//! Hash digests that can be paused, serialized and resumed.
//!
//! A [`ResumableDigest`] keeps its whole progress in an engine [`State`]. At any
//! point the digest can be encoded to a small MessagePack payload, stored or sent
//! away, and decoded later to continue hashing. The final digest is identical to
//! the one an uninterrupted single pass would produce.
//!
//! # Key Features
//!
//! - **Resumable**: encode mid-stream, decode in another process, keep going
//! - **Chunk-independent**: any split of the input yields the same digest
//! - **Strict phases**: a finalized digest refuses data until it is reset
//!
//! # Example
//!
//! ```
//! use resumable_digest::ResumableSha256;
//!
//! let mut digest = ResumableSha256::new();
//! digest.update(b"The quick brown fox ").unwrap();
//! let saved = digest.encode().unwrap();
//!
//! let mut resumed = ResumableSha256::decode(&saved).unwrap();
//! resumed.update(b"jumps over the lazy dog").unwrap();
//! assert_eq!(
//!     resumed.hexdigest().unwrap(),
//!     "d7a8fbb307d7809469ca9abcb0082e4f8d5651e46d3cdb762d02d0bf37c9e592"
//! );
//! ```

pub use resumable_engine::{Algorithm, Engine, Sha1Engine, Sha256Engine, State};

pub use self::chunked::ChunkedReader;
pub use self::digest::{ResumableDigest, ResumableSha1, ResumableSha256};
pub use self::error::{DecodeError, Error, Result};
pub use self::options::{ChunkOptions, Progress, ProgressFn};
pub use self::reader::DigestReader;

pub mod codec;
mod chunked;
mod digest;
mod error;
mod options;
mod reader;
