use std::fmt;

/// Serialized progress of a hash computation.
///
/// The bytes are owned by the engine that produced them. Nothing outside the
/// engine looks inside; callers store, compare and ship them verbatim.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct State(Vec<u8>);

impl State {
    pub fn new(bytes: Vec<u8>) -> Self { Self(bytes) }

    pub fn as_bytes(&self) -> &[u8] { &self.0 }

    pub fn into_bytes(self) -> Vec<u8> { self.0 }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl From<Vec<u8>> for State {
    fn from(bytes: Vec<u8>) -> Self { Self(bytes) }
}

impl From<&[u8]> for State {
    fn from(bytes: &[u8]) -> Self { Self(bytes.to_vec()) }
}

impl AsRef<[u8]> for State {
    fn as_ref(&self) -> &[u8] { &self.0 }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State({})", hex::encode(&self.0))
    }
}
