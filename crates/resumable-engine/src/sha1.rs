use crate::md::{self, Params};
use crate::{Algorithm, Engine, Result, State};

pub(crate) const PARAMS: Params<5> = Params {
    algorithm: Algorithm::Sha1,
    magic:     *b"sha\x01",
    iv:        [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0],
    compress:  ::sha1::compress,
};

/// SHA-1 over a 96-byte state.
///
/// Kept for content addressed by legacy SHA-1 names; not for new integrity checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha1Engine;

impl Engine for Sha1Engine {
    const ALGORITHM: Algorithm = Algorithm::Sha1;

    fn init() -> State { md::init(&PARAMS) }

    fn update(state: &State, data: &[u8]) -> Result<State> { md::update(&PARAMS, state, data) }

    fn finalize(state: &State) -> Result<String> { md::finalize(&PARAMS, state) }

    fn validate(state: &[u8]) -> Result<()> { md::validate(&PARAMS, state) }

    fn processed_len(state: &State) -> Result<u64> { md::processed_len(&PARAMS, state) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Sha256Engine};
    use ::sha1::Digest;

    fn hash(data: &[u8]) -> String {
        let state = Sha1Engine::update(&Sha1Engine::init(), data).unwrap();
        Sha1Engine::finalize(&state).unwrap()
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(hash(b""), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
        assert_eq!(hash(b"abc"), "a9993e364706816aba3e25717850c26c9cd0d89d");
        assert_eq!(
            hash(b"The quick brown fox jumps over the lazy dog"),
            "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12"
        );
    }

    #[test]
    fn test_matches_reference_across_block_boundaries() {
        let data: Vec<u8> = (0..300).map(|i| (i * 7 % 256) as u8).collect();
        for len in 0..data.len() {
            let expected = hex::encode(::sha1::Sha1::digest(&data[..len]));
            assert_eq!(hash(&data[..len]), expected, "length {len}");
        }
    }

    #[test]
    fn test_fresh_state_layout() {
        let state = Sha1Engine::init();
        let bytes = state.as_bytes();

        assert_eq!(bytes.len(), 96);
        assert_eq!(&bytes[..4], b"sha\x01");
        assert_eq!(&bytes[4..8], &0x67452301u32.to_be_bytes());
        assert!(bytes[24..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_processed_len_counts_every_update() {
        let mut state = Sha1Engine::init();
        for chunk in [&b"first "[..], &[0u8; 100][..], b"last"] {
            state = Sha1Engine::update(&state, chunk).unwrap();
        }
        assert_eq!(Sha1Engine::processed_len(&state).unwrap(), 110);
        assert_eq!(&state.as_bytes()[88..], &110u64.to_be_bytes());
    }

    #[test]
    fn test_rejects_sha256_state() {
        let foreign = Sha256Engine::init();
        let err = Sha1Engine::finalize(&foreign).unwrap_err();
        assert_eq!(
            err,
            Error::StateLength {
                algorithm: Algorithm::Sha1,
                expected:  96,
                actual:    108,
            }
        );
    }
}
