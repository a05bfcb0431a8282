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
            CancelMessage,
            ErrorMessage,
            InterruptMessage,
            Message,
            ResultMessage,
        },
        validate::ValidationError,
    },
};

fn id(value: u64) -> Id {
    Id::try_from(value).unwrap()
}

fn frame(json: &str) -> List {
    serde_json::from_str(json).unwrap()
}

#[test]
fn parses_rpc_frames() {
    assert_matches!(
        Message::parse(&frame(r#"[48, 10, {}, "io.xconn.test", ["abc"], {"k": 1}]"#)),
        Ok(Message::Call(message)) => {
            assert_eq!(message.request, id(10));
            assert_eq!(message.procedure, "io.xconn.test");
            assert_eq!(message.arguments, List::from_iter([Value::String("abc".to_owned())]));
            assert_eq!(
                message.arguments_keyword,
                Dictionary::from_iter([("k".to_owned(), Value::UInt(1))])
            );
        }
    );
    assert_matches!(
        Message::parse(&frame(r#"[68, 4, 3, {}, ["abc"]]"#)),
        Ok(Message::Invocation(message)) => {
            assert_eq!(message.request, id(4));
            assert_eq!(message.registered_registration, id(3));
            assert_eq!(message.call_arguments, List::from_iter([Value::String("abc".to_owned())]));
            assert!(message.call_arguments_keyword.is_empty());
        }
    );
    assert_matches!(
        Message::parse(&frame(r#"[70, 4, {}, [], {"ok": true}]"#)),
        Ok(Message::Yield(message)) => {
            assert_eq!(message.invocation_request, id(4));
            assert!(message.arguments.is_empty());
            assert_eq!(
                message.arguments_keyword,
                Dictionary::from_iter([("ok".to_owned(), Value::Bool(true))])
            );
        }
    );
    assert_matches!(
        Message::parse(&frame(r#"[50, 10, {}, [42]]"#)),
        Ok(Message::Result(message)) => {
            assert_eq!(message.call_request, id(10));
            assert_eq!(message.yield_arguments, List::from_iter([Value::UInt(42)]));
        }
    );
}

#[test]
fn parses_pubsub_frames() {
    assert_matches!(
        Message::parse(&frame(r#"[16, 6, {"acknowledge": true}, "topic", ["event"]]"#)),
        Ok(Message::Publish(message)) => {
            assert_eq!(message.request, id(6));
            assert_eq!(message.topic, "topic");
            assert_eq!(message.options.get("acknowledge"), Some(&Value::Bool(true)));
        }
    );
    assert_matches!(
        Message::parse(&frame(r#"[36, 8, 99, {}, [], {"payload": "x"}]"#)),
        Ok(Message::Event(message)) => {
            assert_eq!(message.subscribed_subscription, id(8));
            assert_eq!(message.published_publication, id(99));
            assert!(message.publish_arguments.is_empty());
            assert_eq!(
                message.publish_arguments_keyword,
                Dictionary::from_iter([("payload".to_owned(), Value::String("x".to_owned()))])
            );
        }
    );
    assert_matches!(
        Message::parse(&frame(r#"[33, 7, 8]"#)),
        Ok(Message::Subscribed(message)) => {
            assert_eq!(message.subscribe_request, id(7));
            assert_eq!(message.subscription, id(8));
        }
    );
    assert_matches!(
        Message::parse(&frame(r#"[35, 8]"#)),
        Ok(Message::Unsubscribed(message)) => {
            assert_eq!(message.unsubscribe_request, id(8));
        }
    );
}

#[test]
fn parses_lifecycle_frames() {
    assert_matches!(
        Message::parse(&frame(
            r#"[3, {"message": "The realm does not exist."}, "wamp.error.no_such_realm", ["detail"], {"code": 404}]"#
        )),
        Ok(Message::Abort(message)) => {
            assert_eq!(message.reason, "wamp.error.no_such_realm");
            assert_eq!(
                message.details.get("message"),
                Some(&Value::String("The realm does not exist.".to_owned()))
            );
            assert_eq!(message.arguments, List::from_iter([Value::String("detail".to_owned())]));
            assert_eq!(
                message.arguments_keyword,
                Dictionary::from_iter([("code".to_owned(), Value::UInt(404))])
            );
        }
    );
    assert_matches!(
        Message::parse(&frame(r#"[6, {}, "wamp.close.goodbye_and_out"]"#)),
        Ok(Message::Goodbye(message)) => {
            assert_eq!(message.reason, "wamp.close.goodbye_and_out");
        }
    );
    assert_matches!(
        Message::parse(&frame(r#"[4, "wampcra", {"challenge": "data"}]"#)),
        Ok(Message::Challenge(message)) => {
            assert_eq!(message.auth_method, "wampcra");
            assert_eq!(message.extra.get("challenge"), Some(&Value::String("data".to_owned())));
        }
    );
    assert_matches!(
        Message::parse(&frame(r#"[5, "signature", {}]"#)),
        Ok(Message::Authenticate(message)) => {
            assert_eq!(message.signature, "signature");
        }
    );
    assert_matches!(
        Message::parse(&frame(r#"[49, 10, {"mode": "kill"}]"#)),
        Ok(Message::Cancel(message)) => {
            assert_eq!(message.request, id(10));
            assert_eq!(message.options.get("mode"), Some(&Value::String("kill".to_owned())));
        }
    );
    assert_matches!(
        Message::parse(&frame(r#"[69, 4, {"mode": "killnowait"}]"#)),
        Ok(Message::Interrupt(message)) => {
            assert_eq!(message.request, id(4));
        }
    );
}

#[test]
fn enforces_arity_bounds() {
    assert_matches!(Message::parse(&frame(r#"[8, 48, 10, {}]"#)), Err(err) => {
        assert_eq!(
            err.to_string(),
            "Unexpected message length, must be at least 5 and at most 7, but was 4"
        );
    });
    assert_matches!(Message::parse(&frame(r#"[36, 8, 99]"#)), Err(err) => {
        assert_eq!(
            err.to_string(),
            "Unexpected message length, must be at least 4 and at most 6, but was 3"
        );
    });
    assert_matches!(Message::parse(&frame(r#"[32, 7, {}, "topic", []]"#)), Err(err) => {
        assert_eq!(
            err.to_string(),
            "Unexpected message length, must be at least 4 and at most 4, but was 5"
        );
    });
}

#[test]
fn rejects_wrong_slot_kinds() {
    assert_matches!(Message::parse(&frame(r#"[8, "48", 10, {}, "io.xconn.failed"]"#)), Err(err) => {
        assert_matches!(err.downcast_ref::<ValidationError>(), Some(ValidationError::MultipleErrors(errors)) => {
            assert_eq!(errors.len(), 1);
        });
        assert_eq!(
            err.to_string(),
            "Validation failed: \nItem at index 1 must be of type uint but was string"
        );
    });
    assert_matches!(Message::parse(&frame(r#"[36, null, "sub", 1]"#)), Err(err) => {
        assert_eq!(
            err.to_string(),
            "Validation failed: \n\
            Item at index 1 must be of type uint but was null\n\
            Item at index 2 must be of type uint but was string\n\
            Item at index 3 must be of type dictionary but was uint"
        );
    });
    // IDs ride in uint slots but carry an extra range restriction.
    assert_matches!(Message::parse(&frame(r#"[50, 9007199254740992, {}]"#)), Err(err) => {
        assert_eq!(
            err.to_string(),
            "Validation failed: \nItem at index 1 must be of type uint but was out-of-range uint"
        );
    });
}

#[test]
fn marshals_minimal_frames() {
    let cancel = CancelMessage {
        request: id(10),
        options: Dictionary::default(),
    };
    assert_eq!(
        serde_json::to_string(&cancel.marshal()).unwrap(),
        r#"[49,10,{}]"#
    );

    let interrupt = InterruptMessage {
        request: id(4),
        options: Dictionary::default(),
    };
    assert_eq!(
        serde_json::to_string(&interrupt.marshal()).unwrap(),
        r#"[69,4,{}]"#
    );

    let result = ResultMessage {
        call_request: id(10),
        details: Dictionary::default(),
        yield_arguments: List::default(),
        yield_arguments_keyword: Dictionary::default(),
    };
    assert_eq!(
        serde_json::to_string(&result.marshal()).unwrap(),
        r#"[50,10,{}]"#
    );
}

#[test]
fn marshals_placeholder_for_keyword_only_payload() {
    let error = ErrorMessage {
        request_type: 68,
        request: id(10),
        details: Dictionary::default(),
        error: "io.xconn.failed".to_owned(),
        arguments: List::default(),
        arguments_keyword: Dictionary::from_iter([("k".to_owned(), Value::UInt(1))]),
    };
    assert_eq!(
        serde_json::to_string(&error.marshal()).unwrap(),
        r#"[8,68,10,{},"io.xconn.failed",[],{"k":1}]"#
    );
}
