use crate::Algorithm;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{algorithm} state has wrong length: expected {expected} bytes, got {actual}")]
    StateLength {
        algorithm: Algorithm,
        expected:  usize,
        actual:    usize,
    },

    #[error("{algorithm} state has an unrecognized header")]
    StateHeader { algorithm: Algorithm },
}

pub type Result<T> = std::result::Result<T, Error>;
