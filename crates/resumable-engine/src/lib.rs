//! Primitive hash engines over serializable state.
//!
//! An [`Engine`] is three pure functions: [`Engine::init`] produces a fresh
//! [`State`], [`Engine::update`] maps a state and some input to the next state,
//! and [`Engine::finalize`] turns a state into a hex digest. Because the state is
//! an owned byte blob, a computation can stop at any point, be written to disk or
//! sent elsewhere, and pick up again later.
//!
//! The SHA-1 and SHA-256 states use the same layout as Go's `crypto/sha1` and
//! `crypto/sha256` binary marshalers.
//!
//! # Example
//!
//! ```
//! use resumable_engine::{Engine, Sha256Engine};
//!
//! let state = Sha256Engine::init();
//! let state = Sha256Engine::update(&state, b"hello ").unwrap();
//! let saved = state.as_bytes().to_vec();
//!
//! let restored = saved.into();
//! let state = Sha256Engine::update(&restored, b"world").unwrap();
//! assert_eq!(
//!     Sha256Engine::finalize(&state).unwrap(),
//!     "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
//! );
//! ```

use std::fmt;

pub use self::error::{Error, Result};
pub use self::sha1::Sha1Engine;
pub use self::sha256::Sha256Engine;
pub use self::state::State;

mod error;
mod md;
mod sha1;
mod sha256;
mod state;

/// Default size of the pieces a source is cut into before hashing.
pub const DEFAULT_CHUNK_SIZE: usize = 5 * 1024 * 1024;

/// Supported hash algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Sha1,
    Sha256,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha256 => "sha256",
        }
    }

    /// Digest length in bytes.
    pub fn digest_length(&self) -> usize {
        match self {
            Algorithm::Sha1 => 20,
            Algorithm::Sha256 => 32,
        }
    }

    /// Length in bytes of a serialized [`State`].
    pub fn state_length(&self) -> usize {
        match self {
            Algorithm::Sha1 => crate::sha1::PARAMS.state_len(),
            Algorithm::Sha256 => crate::sha256::PARAMS.state_len(),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// A hash algorithm driven through explicit state values.
///
/// Implementations are stateless: the same state and input always give the
/// same output state, and no call mutates its arguments.
pub trait Engine: Send + Sync + 'static {
    const ALGORITHM: Algorithm;

    /// Chunk size used when hashing a source with this engine.
    const CHUNK_SIZE: usize = DEFAULT_CHUNK_SIZE;

    /// State of a computation that has seen no input.
    fn init() -> State;

    /// Absorb `data` into `state`. Empty input returns an equal state.
    fn update(state: &State, data: &[u8]) -> Result<State>;

    /// Lowercase hex digest of everything absorbed into `state`.
    fn finalize(state: &State) -> Result<String>;

    /// Check that `state` could have been produced by this engine.
    fn validate(state: &[u8]) -> Result<()>;

    /// Number of input bytes absorbed into `state`.
    fn processed_len(state: &State) -> Result<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_lengths() {
        assert_eq!(Algorithm::Sha1.digest_length(), 20);
        assert_eq!(Algorithm::Sha256.digest_length(), 32);
        assert_eq!(Algorithm::Sha1.state_length(), 96);
        assert_eq!(Algorithm::Sha256.state_length(), 108);
    }

    #[test]
    fn algorithm_display() {
        assert_eq!(Algorithm::Sha1.to_string(), "sha1");
        assert_eq!(Algorithm::Sha256.to_string(), "sha256");
    }

    #[test]
    fn engines_report_their_algorithm() {
        assert_eq!(Sha1Engine::ALGORITHM, Algorithm::Sha1);
        assert_eq!(Sha256Engine::ALGORITHM, Algorithm::Sha256);
        assert_eq!(Sha256Engine::CHUNK_SIZE, 5 * 1024 * 1024);
    }
}
