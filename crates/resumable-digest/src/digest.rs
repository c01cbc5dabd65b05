use std::fmt;
use std::io::{self, Read};
use std::marker::PhantomData;
use std::path::Path;

use resumable_engine::{Algorithm, Engine, Sha1Engine, Sha256Engine, State};

use crate::error::{ALREADY_FINALIZED, FINALIZED_UPDATE};
use crate::{ChunkedReader, Error, Result, codec};

/// A digest whose progress lives in a serializable [`State`].
///
/// The digest moves through fresh, updating and finalized phases. Once
/// [`hexdigest`](Self::hexdigest) has succeeded, no further data is accepted and
/// the digest cannot be produced a second time until [`reset`](Self::reset).
/// A failed call never changes the state or the phase.
pub struct ResumableDigest<E> {
    state:     State,
    finalized: bool,
    engine:    PhantomData<fn() -> E>,
}

pub type ResumableSha1 = ResumableDigest<Sha1Engine>;
pub type ResumableSha256 = ResumableDigest<Sha256Engine>;

impl<E: Engine> ResumableDigest<E> {
    pub fn new() -> Self {
        Self {
            state:     E::init(),
            finalized: false,
            engine:    PhantomData,
        }
    }

    /// Rebuild a digest from a state produced by the same engine.
    pub fn from_parts(state: State, finalized: bool) -> Result<Self> {
        E::validate(state.as_bytes())?;
        Ok(Self::restore(state, finalized))
    }

    pub(crate) fn restore(state: State, finalized: bool) -> Self {
        Self {
            state,
            finalized,
            engine: PhantomData,
        }
    }

    pub fn into_parts(self) -> (State, bool) { (self.state, self.finalized) }

    pub fn algorithm(&self) -> Algorithm { E::ALGORITHM }

    pub fn state(&self) -> &State { &self.state }

    pub fn is_finalized(&self) -> bool { self.finalized }

    /// Bytes absorbed since the last reset.
    pub fn processed_len(&self) -> Result<u64> { Ok(E::processed_len(&self.state)?) }

    pub fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
        if self.finalized {
            return Err(Error::InvalidState(FINALIZED_UPDATE));
        }
        self.state = E::update(&self.state, data)?;
        Ok(self)
    }

    /// Same as [`update`](Self::update), reporting the bytes consumed.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.update(data)?;
        Ok(data.len())
    }

    pub fn hexdigest(&mut self) -> Result<String> {
        if self.finalized {
            return Err(Error::InvalidState(ALREADY_FINALIZED));
        }
        let digest = E::finalize(&self.state)?;
        self.finalized = true;
        Ok(digest)
    }

    pub fn reset(&mut self) -> &mut Self {
        self.state = E::init();
        self.finalized = false;
        self
    }

    /// Hex digest of `data` in one call.
    pub fn hexdigest_of(data: &[u8]) -> Result<String> { Self::new().update(data)?.hexdigest() }

    /// Hash a whole file. The returned digest is not finalized yet.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut digest = Self::new();
        ChunkedReader::for_engine::<E>().feed_file(path, &mut digest)?;
        Ok(digest)
    }

    /// Hash everything `reader` yields. The returned digest is not finalized yet.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut digest = Self::new();
        ChunkedReader::for_engine::<E>().feed(reader, &mut digest)?;
        Ok(digest)
    }

    pub fn encode(&self) -> Result<Vec<u8>> { codec::encode(self) }

    pub fn decode(bytes: &[u8]) -> Result<Self> { codec::decode(bytes) }
}

impl<E: Engine> Default for ResumableDigest<E> {
    fn default() -> Self { Self::new() }
}

impl<E> Clone for ResumableDigest<E> {
    fn clone(&self) -> Self {
        Self {
            state:     self.state.clone(),
            finalized: self.finalized,
            engine:    PhantomData,
        }
    }
}

impl<E> PartialEq for ResumableDigest<E> {
    fn eq(&self, other: &Self) -> bool {
        self.finalized == other.finalized && self.state == other.state
    }
}

impl<E> Eq for ResumableDigest<E> {}

impl<E: Engine> fmt::Debug for ResumableDigest<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResumableDigest")
            .field("algorithm", &E::ALGORITHM)
            .field("state", &self.state)
            .field("finalized", &self.finalized)
            .finish()
    }
}

impl<E: Engine> io::Write for ResumableDigest<E> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        ResumableDigest::write(self, buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> { Ok(()) }
}
