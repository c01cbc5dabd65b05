//! MessagePack encoding of a digest's `(state, finalized)` pair.
//!
//! The payload is a two-element array: a `bin` holding the engine state exactly
//! as the engine produced it, then a `bool` for the finalized flag. The same
//! pair shape is used by the serde impls, so a digest can also be embedded in
//! other serde formats.

use std::fmt;

use resumable_engine::{Engine, State};
use rmp::Marker;
use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_bytes::{ByteBuf, Bytes};
use tracing::{debug, trace};

use crate::{DecodeError, ResumableDigest, Result};

pub fn encode<E: Engine>(digest: &ResumableDigest<E>) -> Result<Vec<u8>> {
    let bytes = rmp_serde::to_vec(digest)?;
    trace!(algorithm = %digest.algorithm(), len = bytes.len(), "encoded digest state");
    Ok(bytes)
}

pub fn decode<E: Engine>(bytes: &[u8]) -> Result<ResumableDigest<E>> {
    let not_bin = |m: &Marker| !matches!(m, Marker::Bin8 | Marker::Bin16 | Marker::Bin32);
    if let Some(marker) = state_marker(bytes).filter(not_bin) {
        return Err(DecodeError::StateType(marker).into());
    }

    let mut rest = bytes;
    let pair = {
        let mut de = rmp_serde::Deserializer::new(&mut rest);
        StatePair::deserialize(&mut de).map_err(DecodeError::Malformed)?
    };
    if !rest.is_empty() {
        return Err(DecodeError::TrailingBytes(rest.len()).into());
    }

    E::validate(&pair.state).map_err(DecodeError::State)?;
    let digest = ResumableDigest::restore(State::new(pair.state), pair.finalized);
    debug!(
        algorithm = %digest.algorithm(),
        finalized = digest.is_finalized(),
        processed = ?digest.processed_len().ok(),
        "restored digest state"
    );
    Ok(digest)
}

/// Marker of the first element when `bytes` opens a non-empty array.
///
/// `rmp_serde` hands a `str` that is not valid UTF-8 to byte visitors, so the
/// element type is checked on the raw marker.
fn state_marker(bytes: &[u8]) -> Option<Marker> {
    let mut rest = bytes;
    let len = rmp::decode::read_array_len(&mut rest).ok()?;
    if len == 0 {
        return None;
    }
    rest.first().map(|&b| Marker::from_u8(b))
}

struct StatePair {
    state:     Vec<u8>,
    finalized: bool,
}

impl<'de> Deserialize<'de> for StatePair {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_seq(StatePairVisitor)
    }
}

struct StatePairVisitor;

impl<'de> Visitor<'de> for StatePairVisitor {
    type Value = StatePair;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a [state, finalized] pair")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<StatePair, A::Error> {
        let state: ByteBuf = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let finalized: bool = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;

        let mut extra = 0;
        while seq.next_element::<IgnoredAny>()?.is_some() {
            extra += 1;
        }
        if extra > 0 {
            return Err(de::Error::invalid_length(2 + extra, &self));
        }

        Ok(StatePair {
            state: state.into_vec(),
            finalized,
        })
    }
}

impl<E: Engine> Serialize for ResumableDigest<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut pair = serializer.serialize_tuple(2)?;
        pair.serialize_element(Bytes::new(self.state().as_bytes()))?;
        pair.serialize_element(&self.is_finalized())?;
        pair.end()
    }
}

impl<'de, E: Engine> Deserialize<'de> for ResumableDigest<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let pair = StatePair::deserialize(deserializer)?;
        E::validate(&pair.state).map_err(de::Error::custom)?;
        Ok(ResumableDigest::restore(State::new(pair.state), pair.finalized))
    }
}
