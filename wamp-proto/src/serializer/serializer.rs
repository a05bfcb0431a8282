use std::fmt::Debug;

use anyhow::Result;
use thiserror::Error;

use crate::{
    message::message::Message,
    serializer::{
        cbor::CborSerializer,
        json::JsonSerializer,
        message_pack::MessagePackSerializer,
    },
};

/// The type of serializer to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SerializerType {
    /// Serializes messages to and from JavaScript Object Notation.
    Json,
    /// Serializes messages to and from the MessagePack format.
    MessagePack,
    /// Serializes messages to and from the Concise Binary Object
    /// Representation.
    Cbor,
}

impl SerializerType {
    /// The protocol URI used during protocol negotiation.
    pub fn uri(&self) -> &'static str {
        match self {
            Self::Json => "wamp.2.json",
            Self::MessagePack => "wamp.2.msgpack",
            Self::Cbor => "wamp.2.cbor",
        }
    }
}

impl TryFrom<&str> for SerializerType {
    type Error = &'static str;
    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        match value {
            "wamp.2.json" => Ok(Self::Json),
            "wamp.2.msgpack" => Ok(Self::MessagePack),
            "wamp.2.cbor" => Ok(Self::Cbor),
            _ => Err("unsupported serializer"),
        }
    }
}

/// An error in the encoding layer of a serializer.
///
/// Failures in the WAMP layer itself (validation, unknown message types)
/// surface as their own error types.
#[derive(Debug, Error)]
pub enum SerializerError {
    #[error("serialization failed: {0}")]
    Serialization(String),
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

/// A message serialized for the wire.
///
/// Text-based formats produce [`Text`][`Self::Text`], binary formats produce
/// [`Bytes`][`Self::Bytes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerializedMessage {
    Text(String),
    Bytes(Vec<u8>),
}

impl SerializedMessage {
    /// The serialized payload, regardless of format.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Bytes(bytes) => bytes.as_slice(),
        }
    }

    /// The serialized payload as text, if the format is text-based.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Bytes(_) => None,
        }
    }
}

/// A serializer, which serializes and deserializes WAMP messages to a well-known format that can be
/// passed over wire.
///
/// Does not implement message batching.
pub trait Serializer: Send + Debug {
    /// Serializes the given message for the wire.
    fn serialize(&self, message: &Message) -> Result<SerializedMessage>;

    /// Deserializes wire data to a message.
    fn deserialize(&self, bytes: &[u8]) -> Result<Message>;
}

/// Creates a new [`Serializer`] for the given type.
pub fn new_serializer(serializer_type: SerializerType) -> Box<dyn Serializer> {
    match serializer_type {
        SerializerType::Json => Box::new(JsonSerializer::default()),
        SerializerType::MessagePack => Box::new(MessagePackSerializer::default()),
        SerializerType::Cbor => Box::new(CborSerializer::default()),
    }
}
