use std::fmt::Display;

use rand::Rng;
use serde::{
    Deserialize,
    Serialize,
    de::{
        Unexpected,
        Visitor,
    },
};
use thiserror::Error;
use wamp_proto_values::Value;

/// An integer ID, used for identification of sessions, resources, and requests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Id(u64);

impl Id {
    /// The minimum allowable value of an ID.
    pub const MIN: Id = Id(0);

    /// The maximum allowable value of an ID.
    pub const MAX: Id = Id((1 << 53) - 1);
}

impl Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Error for an ID being out of range.
#[derive(Debug, Error)]
#[error("{value} is out of range for IDs")]
pub struct IdOutOfRange {
    value: u64,
}

impl IdOutOfRange {
    fn new(value: u64) -> Self {
        Self { value }
    }
}

impl TryFrom<u64> for Id {
    type Error = IdOutOfRange;
    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > Self::MAX.0 {
            Err(IdOutOfRange::new(value))
        } else {
            Ok(Id(value))
        }
    }
}

impl From<Id> for u64 {
    fn from(value: Id) -> Self {
        value.0
    }
}

impl From<Id> for Value {
    fn from(value: Id) -> Self {
        Value::UInt(value.0)
    }
}

struct IdVisitor;

impl<'de> Visitor<'de> for IdVisitor {
    type Value = Id;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            formatter,
            "an unsigned integer in the range [{}, {}]",
            Id::MIN,
            Id::MAX
        )
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Id::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_u64(IdVisitor)
    }
}

/// Generates a global-scoped ID from a random sequence.
///
/// Used for session IDs.
pub fn generate_session_id<R>(rng: &mut R) -> Id
where
    R: Rng,
{
    Id(rng.random_range(0..1 << 53))
}

/// A generator for session-scoped IDs, which increase sequentially.
///
/// The core is single-threaded, so the generator mutates in place.
#[derive(Debug, Default)]
pub struct SessionScopeIdGenerator {
    id: u64,
}

impl SessionScopeIdGenerator {
    /// Generates the next ID in the sequence.
    pub fn next_id(&mut self) -> Id {
        if self.id == Id::MAX.0 {
            self.id = 0;
        }
        self.id += 1;
        Id(self.id)
    }
}
