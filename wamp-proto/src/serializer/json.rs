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

/// A serializer implemented for JavaScript Object Notation.
#[derive(Debug, Default)]
pub struct JsonSerializer {}

impl Serializer for JsonSerializer {
    fn serialize(&self, message: &Message) -> Result<SerializedMessage> {
        let text = serde_json::to_string(&message.marshal())
            .map_err(|err| SerializerError::Serialization(err.to_string()))?;
        Ok(SerializedMessage::Text(text))
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Message> {
        let raw = serde_json::from_slice::<List>(bytes)
            .map_err(|err| SerializerError::Deserialization(err.to_string()))?;
        Message::parse(&raw)
    }
}
