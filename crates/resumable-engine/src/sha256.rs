use crate::md::{self, Params};
use crate::{Algorithm, Engine, Result, State};

pub(crate) const PARAMS: Params<8> = Params {
    algorithm: Algorithm::Sha256,
    magic:     *b"sha\x03",
    iv:        [
        0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab,
        0x5be0cd19,
    ],
    compress:  ::sha2::compress256,
};

/// SHA-256 over a 108-byte state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Engine;

impl Engine for Sha256Engine {
    const ALGORITHM: Algorithm = Algorithm::Sha256;

    fn init() -> State { md::init(&PARAMS) }

    fn update(state: &State, data: &[u8]) -> Result<State> { md::update(&PARAMS, state, data) }

    fn finalize(state: &State) -> Result<String> { md::finalize(&PARAMS, state) }

    fn validate(state: &[u8]) -> Result<()> { md::validate(&PARAMS, state) }

    fn processed_len(state: &State) -> Result<u64> { md::processed_len(&PARAMS, state) }
}
