use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use wamp_proto::{
    core::{
        id::Id,
        types::{
            Dictionary,
            List,
            Value,
        },
    },
    message::{
        message::{
            CallMessage,
            Message,
            MessageError,
            PublishMessage,
            PublishedMessage,
        },
        validate::ValidationError,
    },
    serializer::serializer::{
        SerializedMessage,
        SerializerType,
        new_serializer,
    },
};

fn id(value: u64) -> Id {
    Id::try_from(value).unwrap()
}

fn published() -> Message {
    Message::Published(PublishedMessage {
        publish_request: id(6),
        publication: id(99),
    })
}

#[test]
fn json_produces_exact_wire_text() {
    let serializer = new_serializer(SerializerType::Json);
    assert_matches!(serializer.serialize(&published()), Ok(SerializedMessage::Text(text)) => {
        assert_eq!(text, "[17,6,99]");
    });

    let call = Message::Call(CallMessage {
        request: id(10),
        options: Dictionary::default(),
        procedure: "io.xconn.test".to_owned(),
        arguments: List::default(),
        arguments_keyword: Dictionary::default(),
    });
    assert_matches!(serializer.serialize(&call), Ok(SerializedMessage::Text(text)) => {
        assert_eq!(text, r#"[48,10,{},"io.xconn.test"]"#);
    });

    let publish = Message::Publish(PublishMessage {
        request: id(6),
        options: Dictionary::from_iter([("acknowledge".to_owned(), Value::Bool(true))]),
        topic: "topic".to_owned(),
        arguments: List::default(),
        arguments_keyword: Dictionary::default(),
    });
    assert_matches!(serializer.serialize(&publish), Ok(SerializedMessage::Text(text)) => {
        assert_eq!(text, r#"[16,6,{"acknowledge":true},"topic"]"#);
    });
}

#[test]
fn message_pack_produces_exact_wire_bytes() {
    let serializer = new_serializer(SerializerType::MessagePack);
    assert_matches!(serializer.serialize(&published()), Ok(SerializedMessage::Bytes(bytes)) => {
        assert_eq!(bytes, Vec::from_iter([0x93, 0x11, 0x06, 0x63]));
        assert_matches!(serializer.deserialize(&bytes), Ok(message) => {
            assert_eq!(message, published());
        });
    });
}

#[test]
fn cbor_produces_exact_wire_bytes() {
    let serializer = new_serializer(SerializerType::Cbor);
    assert_matches!(serializer.serialize(&published()), Ok(SerializedMessage::Bytes(bytes)) => {
        assert_eq!(bytes, Vec::from_iter([0x83, 0x11, 0x06, 0x18, 0x63]));
        assert_matches!(serializer.deserialize(&bytes), Ok(message) => {
            assert_eq!(message, published());
        });
    });
}

#[test]
fn round_trips_payload_through_every_format() {
    let message = Message::Call(CallMessage {
        request: id(7),
        options: Dictionary::from_iter([("timeout".to_owned(), Value::UInt(5000))]),
        procedure: "io.xconn.echo".to_owned(),
        arguments: List::from_iter([
            Value::UInt(1),
            Value::Integer(-2),
            Value::Float(1.5),
            Value::String("three".to_owned()),
            Value::Bool(false),
            Value::Null,
            Value::List(List::from_iter([Value::UInt(4)])),
        ]),
        arguments_keyword: Dictionary::from_iter([(
            "nested".to_owned(),
            Value::Dictionary(Dictionary::from_iter([(
                "key".to_owned(),
                Value::String("value".to_owned()),
            )])),
        )]),
    });
    for serializer_type in [
        SerializerType::Json,
        SerializerType::MessagePack,
        SerializerType::Cbor,
    ] {
        let serializer = new_serializer(serializer_type);
        let serialized = serializer.serialize(&message).unwrap();
        assert_matches!(serializer.deserialize(serialized.as_bytes()), Ok(parsed) => {
            assert_eq!(parsed, message, "round trip failed for {}", serializer_type.uri());
        });
    }
}

#[test]
fn binary_formats_round_trip_byte_payloads() {
    let message = Message::Call(CallMessage {
        request: id(8),
        options: Dictionary::default(),
        procedure: "io.xconn.blob".to_owned(),
        arguments: List::from_iter([Value::Bytes(Vec::from_iter([0x00, 0x01, 0xff]))]),
        arguments_keyword: Dictionary::default(),
    });
    for serializer_type in [SerializerType::MessagePack, SerializerType::Cbor] {
        let serializer = new_serializer(serializer_type);
        let serialized = serializer.serialize(&message).unwrap();
        assert_matches!(serializer.deserialize(serialized.as_bytes()), Ok(parsed) => {
            assert_eq!(parsed, message, "round trip failed for {}", serializer_type.uri());
        });
    }
}

#[test]
fn serialized_message_exposes_payload() {
    let json = new_serializer(SerializerType::Json)
        .serialize(&published())
        .unwrap();
    assert_eq!(json.text(), Some("[17,6,99]"));
    assert_eq!(json.as_bytes(), b"[17,6,99]");

    let message_pack = new_serializer(SerializerType::MessagePack)
        .serialize(&published())
        .unwrap();
    assert_eq!(message_pack.text(), None);
}

#[test]
fn fails_deserializing_data_that_is_not_a_message_list() {
    let serializer = new_serializer(SerializerType::Json);
    assert_matches!(serializer.deserialize(b"{}"), Err(err) => {
        assert!(err.to_string().starts_with("deserialization failed"), "{err}");
    });
    assert_matches!(serializer.deserialize(b"not json"), Err(err) => {
        assert!(err.to_string().starts_with("deserialization failed"), "{err}");
    });

    let serializer = new_serializer(SerializerType::MessagePack);
    assert_matches!(serializer.deserialize(&[0xc1]), Err(err) => {
        assert!(err.to_string().starts_with("deserialization failed"), "{err}");
    });

    let serializer = new_serializer(SerializerType::Cbor);
    assert_matches!(serializer.deserialize(&[0xff]), Err(err) => {
        assert!(err.to_string().starts_with("deserialization failed"), "{err}");
    });
}

#[test]
fn surfaces_message_layer_failures() {
    let serializer = new_serializer(SerializerType::Json);
    assert_matches!(serializer.deserialize(br#"["HELLO"]"#), Err(err) => {
        assert_matches!(
            err.downcast_ref::<MessageError>(),
            Some(MessageError::ParseFailure(_))
        );
    });
    assert_matches!(serializer.deserialize(br#"[999,1,{}]"#), Err(err) => {
        assert_matches!(
            err.downcast_ref::<MessageError>(),
            Some(MessageError::UnsupportedType(999))
        );
    });
    assert_matches!(serializer.deserialize(br#"[48,10,{}]"#), Err(err) => {
        assert_matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::UnexpectedLength { .. })
        );
        assert_eq!(
            err.to_string(),
            "Unexpected message length, must be at least 4 and at most 6, but was 3"
        );
    });
}
