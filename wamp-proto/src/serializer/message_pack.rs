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

/// A serializer implemented for MessagePack.
#[derive(Debug, Default)]
pub struct MessagePackSerializer {}

impl Serializer for MessagePackSerializer {
    fn serialize(&self, message: &Message) -> Result<SerializedMessage> {
        let bytes = rmp_serde::to_vec(&message.marshal())
            .map_err(|err| SerializerError::Serialization(err.to_string()))?;
        Ok(SerializedMessage::Bytes(bytes))
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Message> {
        let raw = rmp_serde::from_slice::<List>(bytes)
            .map_err(|err| SerializerError::Deserialization(err.to_string()))?;
        Message::parse(&raw)
    }
}
