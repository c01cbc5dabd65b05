use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    #[error("failed to decode digest state: {0}")]
    Decode(#[from] DecodeError),

    #[error("failed to encode digest state: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error(transparent)]
    Engine(#[from] resumable_engine::Error),

    #[error("source holds {len} bytes but the digest already absorbed {processed}")]
    SourceTooShort { processed: u64, len: u64 },

    #[error("digest mismatch: expected {expected}, got {actual}")]
    Mismatch { expected: String, actual: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed payload: {0}")]
    Malformed(#[from] rmp_serde::decode::Error),

    #[error("state element must be bin, found {0:?}")]
    StateType(rmp::Marker),

    #[error("{0} trailing bytes after the state pair")]
    TrailingBytes(usize),

    #[error("state rejected: {0}")]
    State(#[source] resumable_engine::Error),
}

impl Error {
    /// Whether the digest can be used again after a `reset`.
    pub fn is_recoverable(&self) -> bool { matches!(self, Error::InvalidState(_)) }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(err) => err,
            other => io::Error::other(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) const FINALIZED_UPDATE: &str = "finalized digest cannot accept more data";
pub(crate) const ALREADY_FINALIZED: &str = "already finalized";
