use anyhow::Result;

use crate::{
    core::types::List,
    message::message::Message,
    serializer::serializer::{
        SerializedMessage,
        Serializer,
        SerializerError,
    },
};

/// A serializer implemented for the Concise Binary Object Representation.
#[derive(Debug, Default)]
pub struct CborSerializer {}

impl Serializer for CborSerializer {
    fn serialize(&self, message: &Message) -> Result<SerializedMessage> {
        let mut bytes = Vec::new();
        ciborium::ser::into_writer(&message.marshal(), &mut bytes)
            .map_err(|err| SerializerError::Serialization(err.to_string()))?;
        Ok(SerializedMessage::Bytes(bytes))
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Message> {
        let raw = ciborium::de::from_reader::<List, _>(bytes)
            .map_err(|err| SerializerError::Deserialization(err.to_string()))?;
        Message::parse(&raw)
    }
}
