//! Merkle-Damgård bookkeeping shared by the SHA-1 and SHA-256 engines.
//!
//! The compression functions come from the RustCrypto crates. This module only
//! keeps the 64-byte block buffer, the byte counter and the padding, and moves
//! them in and out of the serialized state:
//!
//! ```text
//! magic[4] | h[N] as u32 BE | block[64] | len as u64 BE
//! ```

use std::slice;

use digest::consts::U64;
use digest::generic_array::GenericArray;

use crate::{Algorithm, Error, Result, State};

pub(crate) const BLOCK_LEN: usize = 64;

const MAGIC_LEN: usize = 4;
const LENGTH_LEN: usize = 8;
// Offset of the bit-length trailer in the final block.
const PAD_LIMIT: usize = BLOCK_LEN - LENGTH_LEN;

pub(crate) type Block = GenericArray<u8, U64>;

/// Constants describing one algorithm of the family.
pub(crate) struct Params<const N: usize> {
    pub algorithm: Algorithm,
    pub magic:     [u8; MAGIC_LEN],
    pub iv:        [u32; N],
    pub compress:  fn(&mut [u32; N], &[Block]),
}

impl<const N: usize> Params<N> {
    pub(crate) const fn state_len(&self) -> usize {
        MAGIC_LEN + 4 * N + BLOCK_LEN + LENGTH_LEN
    }

    fn compress_block(&self, h: &mut [u32; N], block: &[u8]) {
        (self.compress)(h, slice::from_ref(Block::from_slice(block)));
    }
}

/// Decoded running state.
pub(crate) struct Chain<const N: usize> {
    h:     [u32; N],
    block: [u8; BLOCK_LEN],
    len:   u64,
}

impl<const N: usize> Chain<N> {
    pub(crate) fn fresh(params: &Params<N>) -> Self {
        Self {
            h:     params.iv,
            block: [0; BLOCK_LEN],
            len:   0,
        }
    }

    pub(crate) fn decode(params: &Params<N>, bytes: &[u8]) -> Result<Self> {
        let expected = params.state_len();
        if bytes.len() != expected {
            return Err(Error::StateLength {
                algorithm: params.algorithm,
                expected,
                actual: bytes.len(),
            });
        }

        let (magic, rest) = bytes.split_at(MAGIC_LEN);
        if magic != params.magic {
            return Err(Error::StateHeader {
                algorithm: params.algorithm,
            });
        }

        let (words, rest) = rest.split_at(4 * N);
        let mut h = [0u32; N];
        for (slot, word) in h.iter_mut().zip(words.chunks_exact(4)) {
            let mut be = [0u8; 4];
            be.copy_from_slice(word);
            *slot = u32::from_be_bytes(be);
        }

        let (buffered, length) = rest.split_at(BLOCK_LEN);
        let mut block = [0u8; BLOCK_LEN];
        block.copy_from_slice(buffered);

        let mut be = [0u8; LENGTH_LEN];
        be.copy_from_slice(length);

        Ok(Self {
            h,
            block,
            len: u64::from_be_bytes(be),
        })
    }

    pub(crate) fn encode(&self, params: &Params<N>) -> State {
        let mut out = Vec::with_capacity(params.state_len());
        out.extend_from_slice(&params.magic);
        for word in &self.h {
            out.extend_from_slice(&word.to_be_bytes());
        }
        out.extend_from_slice(&self.block);
        out.extend_from_slice(&self.len.to_be_bytes());
        State::new(out)
    }

    pub(crate) fn len(&self) -> u64 { self.len }

    fn buffered(&self) -> usize { (self.len % BLOCK_LEN as u64) as usize }

    pub(crate) fn absorb(&mut self, params: &Params<N>, mut data: &[u8]) {
        let filled = self.buffered();
        self.len = self.len.wrapping_add(data.len() as u64);

        if filled > 0 {
            let take = (BLOCK_LEN - filled).min(data.len());
            self.block[filled..filled + take].copy_from_slice(&data[..take]);
            data = &data[take..];
            if filled + take < BLOCK_LEN {
                return;
            }
            params.compress_block(&mut self.h, &self.block);
        }

        let mut blocks = data.chunks_exact(BLOCK_LEN);
        for block in &mut blocks {
            params.compress_block(&mut self.h, block);
        }

        let tail = blocks.remainder();
        self.block[..tail.len()].copy_from_slice(tail);
        self.block[tail.len()..].fill(0);
    }

    /// Pads the message and returns the big-endian chaining words.
    pub(crate) fn finish(mut self, params: &Params<N>) -> Vec<u8> {
        let filled = self.buffered();
        let bit_len = self.len << 3;

        self.block[filled] = 0x80;
        self.block[filled + 1..].fill(0);
        if filled >= PAD_LIMIT {
            params.compress_block(&mut self.h, &self.block);
            self.block.fill(0);
        }
        self.block[PAD_LIMIT..].copy_from_slice(&bit_len.to_be_bytes());
        params.compress_block(&mut self.h, &self.block);

        self.h.iter().flat_map(|word| word.to_be_bytes()).collect()
    }
}

pub(crate) fn init<const N: usize>(params: &Params<N>) -> State {
    Chain::fresh(params).encode(params)
}

pub(crate) fn update<const N: usize>(
    params: &Params<N>,
    state: &State,
    data: &[u8],
) -> Result<State> {
    let mut chain = Chain::decode(params, state.as_bytes())?;
    if data.is_empty() {
        return Ok(state.clone());
    }
    chain.absorb(params, data);
    Ok(chain.encode(params))
}

pub(crate) fn finalize<const N: usize>(params: &Params<N>, state: &State) -> Result<String> {
    let chain = Chain::decode(params, state.as_bytes())?;
    Ok(hex::encode(chain.finish(params)))
}

pub(crate) fn validate<const N: usize>(params: &Params<N>, state: &[u8]) -> Result<()> {
    Chain::decode(params, state).map(|_| ())
}

pub(crate) fn processed_len<const N: usize>(params: &Params<N>, state: &State) -> Result<u64> {
    Chain::decode(params, state.as_bytes()).map(|chain| chain.len())
}
