use std::{
    collections::BTreeMap,
    sync::LazyLock,
};

use anyhow::Result;
use thiserror::Error;

use crate::{
    core::{
        id::Id,
        types::{
            Dictionary,
            List,
            Value,
        },
    },
    message::validate::{
        ValidationError,
        ValidationSpec,
        Validator,
        validate_arguments,
        validate_arguments_keyword,
        validate_auth_method,
        validate_details,
        validate_extra,
        validate_message,
        validate_options,
        validate_publication,
        validate_realm,
        validate_reason,
        validate_registration,
        validate_request,
        validate_request_type,
        validate_session,
        validate_signature,
        validate_subscription,
        validate_topic,
        validate_uri,
    },
};

/// An error producing a [`Message`] from a raw message array.
#[derive(Debug, Error)]
pub enum MessageError {
    /// The type tag does not belong to any known message.
    #[error("unsupported message type {0}")]
    UnsupportedType(u64),
    #[error("{0}")]
    ParseFailure(String),
}

fn push_payload(message: &mut List, arguments: &List, arguments_keyword: &Dictionary) {
    if !arguments.is_empty() {
        message.push(Value::List(arguments.clone()));
    }
    if !arguments_keyword.is_empty() {
        // An empty positional payload must still occupy its slot when a
        // keyword payload follows it.
        if arguments.is_empty() {
            message.push(Value::List(List::default()));
        }
        message.push(Value::Dictionary(arguments_keyword.clone()));
    }
}

/// A HELLO message for a peer to initiate a WAMP session in a realm.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct HelloMessage {
    pub realm: String,
    pub roles: Dictionary,
    pub auth_id: String,
    pub auth_methods: Vec<String>,
    pub auth_extra: Dictionary,
}

impl HelloMessage {
    pub const TAG: u64 = 1;

    pub fn parse(message: &List) -> Result<Self, ValidationError> {
        static VALIDATION_SPEC: LazyLock<ValidationSpec> = LazyLock::new(|| ValidationSpec {
            min_length: 3,
            max_length: 3,
            validators: BTreeMap::from_iter([
                (1, validate_realm as Validator),
                (2, validate_details as Validator),
            ]),
        });
        let fields = validate_message(message, &VALIDATION_SPEC)?;
        let details = fields.details.unwrap_or_default();
        Ok(Self {
            realm: fields.realm.unwrap_or_default(),
            roles: details
                .get("roles")
                .and_then(Value::dictionary)
                .cloned()
                .unwrap_or_default(),
            auth_id: details
                .get("authid")
                .and_then(Value::string)
                .unwrap_or_default()
                .to_owned(),
            auth_methods: details
                .get("authmethods")
                .and_then(Value::list)
                .and_then(|methods| {
                    methods
                        .iter()
                        .map(|method| method.string().map(str::to_owned))
                        .collect::<Option<Vec<_>>>()
                })
                .unwrap_or_default(),
            auth_extra: details
                .get("authextra")
                .and_then(Value::dictionary)
                .cloned()
                .unwrap_or_default(),
        })
    }

    pub fn marshal(&self) -> List {
        let mut details = Dictionary::default();
        details.insert("roles".to_owned(), Value::Dictionary(self.roles.clone()));
        details.insert("authid".to_owned(), Value::String(self.auth_id.clone()));
        details.insert(
            "authmethods".to_owned(),
            Value::List(
                self.auth_methods
                    .iter()
                    .map(|method| Value::from(method.as_str()))
                    .collect(),
            ),
        );
        details.insert(
            "authextra".to_owned(),
            Value::Dictionary(self.auth_extra.clone()),
        );
        List::from_iter([
            Value::UInt(Self::TAG),
            Value::String(self.realm.clone()),
            Value::Dictionary(details),
        ])
    }
}

/// A WELCOME message for a router to confirm a peer's WAMP session in a realm.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WelcomeMessage {
    pub session: Id,
    pub roles: Dictionary,
    pub auth_id: String,
    pub auth_role: String,
    pub auth_method: String,
    pub auth_extra: Dictionary,
}

impl WelcomeMessage {
    pub const TAG: u64 = 2;

    pub fn parse(message: &List) -> Result<Self, ValidationError> {
        static VALIDATION_SPEC: LazyLock<ValidationSpec> = LazyLock::new(|| ValidationSpec {
            min_length: 3,
            max_length: 3,
            validators: BTreeMap::from_iter([
                (1, validate_session as Validator),
                (2, validate_details as Validator),
            ]),
        });
        let fields = validate_message(message, &VALIDATION_SPEC)?;
        let details = fields.details.unwrap_or_default();
        let roles = details
            .get("roles")
            .and_then(Value::dictionary)
            .cloned()
            .ok_or_else(|| ValidationError::MissingField("roles".to_owned()))?;
        let auth_id = details
            .get("authid")
            .and_then(Value::string)
            .ok_or_else(|| ValidationError::MissingField("authid".to_owned()))?
            .to_owned();
        let auth_role = details
            .get("authrole")
            .and_then(Value::string)
            .ok_or_else(|| ValidationError::MissingField("authrole".to_owned()))?
            .to_owned();
        let auth_method = details
            .get("authmethod")
            .and_then(Value::string)
            .ok_or_else(|| ValidationError::MissingField("authmethod".to_owned()))?
            .to_owned();
        Ok(Self {
            session: fields.session.unwrap_or_default(),
            roles,
            auth_id,
            auth_role,
            auth_method,
            auth_extra: details
                .get("authextra")
                .and_then(Value::dictionary)
                .cloned()
                .unwrap_or_default(),
        })
    }

    pub fn marshal(&self) -> List {
        let mut details = Dictionary::default();
        details.insert("roles".to_owned(), Value::Dictionary(self.roles.clone()));
        details.insert("authid".to_owned(), Value::String(self.auth_id.clone()));
        details.insert("authrole".to_owned(), Value::String(self.auth_role.clone()));
        details.insert(
            "authmethod".to_owned(),
            Value::String(self.auth_method.clone()),
        );
        details.insert(
            "authextra".to_owned(),
            Value::Dictionary(self.auth_extra.clone()),
        );
        List::from_iter([
            Value::UInt(Self::TAG),
            self.session.into(),
            Value::Dictionary(details),
        ])
    }
}

/// An ABORT message for quickly terminating a WAMP session.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AbortMessage {
    pub details: Dictionary,
    pub reason: String,
    pub arguments: List,
    pub arguments_keyword: Dictionary,
}

impl AbortMessage {
    pub const TAG: u64 = 3;

    pub fn parse(message: &List) -> Result<Self, ValidationError> {
        static VALIDATION_SPEC: LazyLock<ValidationSpec> = LazyLock::new(|| ValidationSpec {
            min_length: 3,
            max_length: 5,
            validators: BTreeMap::from_iter([
                (1, validate_details as Validator),
                (2, validate_reason as Validator),
                (3, validate_arguments as Validator),
                (4, validate_arguments_keyword as Validator),
            ]),
        });
        let fields = validate_message(message, &VALIDATION_SPEC)?;
        Ok(Self {
            details: fields.details.unwrap_or_default(),
            reason: fields.reason.unwrap_or_default(),
            arguments: fields.arguments.unwrap_or_default(),
            arguments_keyword: fields.arguments_keyword.unwrap_or_default(),
        })
    }

    pub fn marshal(&self) -> List {
        let mut message = List::from_iter([
            Value::UInt(Self::TAG),
            Value::Dictionary(self.details.clone()),
            Value::String(self.reason.clone()),
        ]);
        push_payload(&mut message, &self.arguments, &self.arguments_keyword);
        message
    }
}

/// A CHALLENGE message for a router to request proof of identity from a peer.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChallengeMessage {
    pub auth_method: String,
    pub extra: Dictionary,
}

impl ChallengeMessage {
    pub const TAG: u64 = 4;

    pub fn parse(message: &List) -> Result<Self, ValidationError> {
        static VALIDATION_SPEC: LazyLock<ValidationSpec> = LazyLock::new(|| ValidationSpec {
            min_length: 3,
            max_length: 3,
            validators: BTreeMap::from_iter([
                (1, validate_auth_method as Validator),
                (2, validate_extra as Validator),
            ]),
        });
        let fields = validate_message(message, &VALIDATION_SPEC)?;
        Ok(Self {
            auth_method: fields.auth_method.unwrap_or_default(),
            extra: fields.extra.unwrap_or_default(),
        })
    }

    pub fn marshal(&self) -> List {
        List::from_iter([
            Value::UInt(Self::TAG),
            Value::String(self.auth_method.clone()),
            Value::Dictionary(self.extra.clone()),
        ])
    }
}

/// An AUTHENTICATE message for a peer to prove its identity in response to a
/// CHALLENGE.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AuthenticateMessage {
    pub signature: String,
    pub extra: Dictionary,
}

impl AuthenticateMessage {
    pub const TAG: u64 = 5;

    pub fn parse(message: &List) -> Result<Self, ValidationError> {
        static VALIDATION_SPEC: LazyLock<ValidationSpec> = LazyLock::new(|| ValidationSpec {
            min_length: 3,
            max_length: 3,
            validators: BTreeMap::from_iter([
                (1, validate_signature as Validator),
                (2, validate_extra as Validator),
            ]),
        });
        let fields = validate_message(message, &VALIDATION_SPEC)?;
        Ok(Self {
            signature: fields.signature.unwrap_or_default(),
            extra: fields.extra.unwrap_or_default(),
        })
    }

    pub fn marshal(&self) -> List {
        List::from_iter([
            Value::UInt(Self::TAG),
            Value::String(self.signature.clone()),
            Value::Dictionary(self.extra.clone()),
        ])
    }
}

/// A GOODBYE message for ending a WAMP session with a two-way handshake.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GoodbyeMessage {
    pub details: Dictionary,
    pub reason: String,
}

impl GoodbyeMessage {
    pub const TAG: u64 = 6;

    pub fn parse(message: &List) -> Result<Self, ValidationError> {
        static VALIDATION_SPEC: LazyLock<ValidationSpec> = LazyLock::new(|| ValidationSpec {
            min_length: 3,
            max_length: 3,
            validators: BTreeMap::from_iter([
                (1, validate_details as Validator),
                (2, validate_reason as Validator),
            ]),
        });
        let fields = validate_message(message, &VALIDATION_SPEC)?;
        Ok(Self {
            details: fields.details.unwrap_or_default(),
            reason: fields.reason.unwrap_or_default(),
        })
    }

    pub fn marshal(&self) -> List {
        List::from_iter([
            Value::UInt(Self::TAG),
            Value::Dictionary(self.details.clone()),
            Value::String(self.reason.clone()),
        ])
    }
}

/// An ERROR message for communicating an error in response to a single request.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ErrorMessage {
    pub request_type: u64,
    pub request: Id,
    pub details: Dictionary,
    pub error: String,
    pub arguments: List,
    pub arguments_keyword: Dictionary,
}

impl ErrorMessage {
    pub const TAG: u64 = 8;

    pub fn parse(message: &List) -> Result<Self, ValidationError> {
        static VALIDATION_SPEC: LazyLock<ValidationSpec> = LazyLock::new(|| ValidationSpec {
            min_length: 5,
            max_length: 7,
            validators: BTreeMap::from_iter([
                (1, validate_request_type as Validator),
                (2, validate_request as Validator),
                (3, validate_details as Validator),
                (4, validate_uri as Validator),
                (5, validate_arguments as Validator),
                (6, validate_arguments_keyword as Validator),
            ]),
        });
        let fields = validate_message(message, &VALIDATION_SPEC)?;
        Ok(Self {
            request_type: fields.request_type.unwrap_or_default(),
            request: fields.request.unwrap_or_default(),
            details: fields.details.unwrap_or_default(),
            error: fields.uri.unwrap_or_default(),
            arguments: fields.arguments.unwrap_or_default(),
            arguments_keyword: fields.arguments_keyword.unwrap_or_default(),
        })
    }

    pub fn marshal(&self) -> List {
        let mut message = List::from_iter([
            Value::UInt(Self::TAG),
            Value::UInt(self.request_type),
            self.request.into(),
            Value::Dictionary(self.details.clone()),
            Value::String(self.error.clone()),
        ]);
        push_payload(&mut message, &self.arguments, &self.arguments_keyword);
        message
    }
}

/// A PUBLISH message for publishing an event to a topic.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PublishMessage {
    pub request: Id,
    pub options: Dictionary,
    pub topic: String,
    pub arguments: List,
    pub arguments_keyword: Dictionary,
}

impl PublishMessage {
    pub const TAG: u64 = 16;

    pub fn parse(message: &List) -> Result<Self, ValidationError> {
        static VALIDATION_SPEC: LazyLock<ValidationSpec> = LazyLock::new(|| ValidationSpec {
            min_length: 4,
            max_length: 6,
            validators: BTreeMap::from_iter([
                (1, validate_request as Validator),
                (2, validate_options as Validator),
                (3, validate_topic as Validator),
                (4, validate_arguments as Validator),
                (5, validate_arguments_keyword as Validator),
            ]),
        });
        let fields = validate_message(message, &VALIDATION_SPEC)?;
        Ok(Self {
            request: fields.request.unwrap_or_default(),
            options: fields.options.unwrap_or_default(),
            topic: fields.topic.unwrap_or_default(),
            arguments: fields.arguments.unwrap_or_default(),
            arguments_keyword: fields.arguments_keyword.unwrap_or_default(),
        })
    }

    pub fn marshal(&self) -> List {
        let mut message = List::from_iter([
            Value::UInt(Self::TAG),
            self.request.into(),
            Value::Dictionary(self.options.clone()),
            Value::String(self.topic.clone()),
        ]);
        push_payload(&mut message, &self.arguments, &self.arguments_keyword);
        message
    }
}

/// A PUBLISHED message for confirming an event was published.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PublishedMessage {
    pub publish_request: Id,
    pub publication: Id,
}

impl PublishedMessage {
    pub const TAG: u64 = 17;

    pub fn parse(message: &List) -> Result<Self, ValidationError> {
        static VALIDATION_SPEC: LazyLock<ValidationSpec> = LazyLock::new(|| ValidationSpec {
            min_length: 3,
            max_length: 3,
            validators: BTreeMap::from_iter([
                (1, validate_request as Validator),
                (2, validate_publication as Validator),
            ]),
        });
        let fields = validate_message(message, &VALIDATION_SPEC)?;
        Ok(Self {
            publish_request: fields.request.unwrap_or_default(),
            publication: fields.publication.unwrap_or_default(),
        })
    }

    pub fn marshal(&self) -> List {
        List::from_iter([
            Value::UInt(Self::TAG),
            self.publish_request.into(),
            self.publication.into(),
        ])
    }
}

/// A SUBSCRIBE message for subscribing to a topic.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SubscribeMessage {
    pub request: Id,
    pub options: Dictionary,
    pub topic: String,
}

impl SubscribeMessage {
    pub const TAG: u64 = 32;

    pub fn parse(message: &List) -> Result<Self, ValidationError> {
        static VALIDATION_SPEC: LazyLock<ValidationSpec> = LazyLock::new(|| ValidationSpec {
            min_length: 4,
            max_length: 4,
            validators: BTreeMap::from_iter([
                (1, validate_request as Validator),
                (2, validate_options as Validator),
                (3, validate_topic as Validator),
            ]),
        });
        let fields = validate_message(message, &VALIDATION_SPEC)?;
        Ok(Self {
            request: fields.request.unwrap_or_default(),
            options: fields.options.unwrap_or_default(),
            topic: fields.topic.unwrap_or_default(),
        })
    }

    pub fn marshal(&self) -> List {
        List::from_iter([
            Value::UInt(Self::TAG),
            self.request.into(),
            Value::Dictionary(self.options.clone()),
            Value::String(self.topic.clone()),
        ])
    }
}

/// A SUBSCRIBED message for confirming a peer has subscribed to a topic.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SubscribedMessage {
    pub subscribe_request: Id,
    pub subscription: Id,
}

impl SubscribedMessage {
    pub const TAG: u64 = 33;

    pub fn parse(message: &List) -> Result<Self, ValidationError> {
        static VALIDATION_SPEC: LazyLock<ValidationSpec> = LazyLock::new(|| ValidationSpec {
            min_length: 3,
            max_length: 3,
            validators: BTreeMap::from_iter([
                (1, validate_request as Validator),
                (2, validate_subscription as Validator),
            ]),
        });
        let fields = validate_message(message, &VALIDATION_SPEC)?;
        Ok(Self {
            subscribe_request: fields.request.unwrap_or_default(),
            subscription: fields.subscription.unwrap_or_default(),
        })
    }

    pub fn marshal(&self) -> List {
        List::from_iter([
            Value::UInt(Self::TAG),
            self.subscribe_request.into(),
            self.subscription.into(),
        ])
    }
}

/// An UNSUBSCRIBE message for unsubscribing from a topic.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UnsubscribeMessage {
    pub request: Id,
    pub subscribed_subscription: Id,
}

impl UnsubscribeMessage {
    pub const TAG: u64 = 34;

    pub fn parse(message: &List) -> Result<Self, ValidationError> {
        static VALIDATION_SPEC: LazyLock<ValidationSpec> = LazyLock::new(|| ValidationSpec {
            min_length: 3,
            max_length: 3,
            validators: BTreeMap::from_iter([
                (1, validate_request as Validator),
                (2, validate_subscription as Validator),
            ]),
        });
        let fields = validate_message(message, &VALIDATION_SPEC)?;
        Ok(Self {
            request: fields.request.unwrap_or_default(),
            subscribed_subscription: fields.subscription.unwrap_or_default(),
        })
    }

    pub fn marshal(&self) -> List {
        List::from_iter([
            Value::UInt(Self::TAG),
            self.request.into(),
            self.subscribed_subscription.into(),
        ])
    }
}

/// An UNSUBSCRIBED message for confirming a peer has unsubscribed from a topic.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UnsubscribedMessage {
    pub unsubscribe_request: Id,
}

impl UnsubscribedMessage {
    pub const TAG: u64 = 35;

    pub fn parse(message: &List) -> Result<Self, ValidationError> {
        static VALIDATION_SPEC: LazyLock<ValidationSpec> = LazyLock::new(|| ValidationSpec {
            min_length: 2,
            max_length: 2,
            validators: BTreeMap::from_iter([(1, validate_request as Validator)]),
        });
        let fields = validate_message(message, &VALIDATION_SPEC)?;
        Ok(Self {
            unsubscribe_request: fields.request.unwrap_or_default(),
        })
    }

    pub fn marshal(&self) -> List {
        List::from_iter([Value::UInt(Self::TAG), self.unsubscribe_request.into()])
    }
}

/// An EVENT message for relaying a published event to subscribers.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EventMessage {
    pub subscribed_subscription: Id,
    pub published_publication: Id,
    pub details: Dictionary,
    pub publish_arguments: List,
    pub publish_arguments_keyword: Dictionary,
}

impl EventMessage {
    pub const TAG: u64 = 36;

    pub fn parse(message: &List) -> Result<Self, ValidationError> {
        static VALIDATION_SPEC: LazyLock<ValidationSpec> = LazyLock::new(|| ValidationSpec {
            min_length: 4,
            max_length: 6,
            validators: BTreeMap::from_iter([
                (1, validate_subscription as Validator),
                (2, validate_publication as Validator),
                (3, validate_details as Validator),
                (4, validate_arguments as Validator),
                (5, validate_arguments_keyword as Validator),
            ]),
        });
        let fields = validate_message(message, &VALIDATION_SPEC)?;
        Ok(Self {
            subscribed_subscription: fields.subscription.unwrap_or_default(),
            published_publication: fields.publication.unwrap_or_default(),
            details: fields.details.unwrap_or_default(),
            publish_arguments: fields.arguments.unwrap_or_default(),
            publish_arguments_keyword: fields.arguments_keyword.unwrap_or_default(),
        })
    }

    pub fn marshal(&self) -> List {
        let mut message = List::from_iter([
            Value::UInt(Self::TAG),
            self.subscribed_subscription.into(),
            self.published_publication.into(),
            Value::Dictionary(self.details.clone()),
        ]);
        push_payload(
            &mut message,
            &self.publish_arguments,
            &self.publish_arguments_keyword,
        );
        message
    }
}

/// A CALL message for invoking a procedure.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CallMessage {
    pub request: Id,
    pub options: Dictionary,
    pub procedure: String,
    pub arguments: List,
    pub arguments_keyword: Dictionary,
}

impl CallMessage {
    pub const TAG: u64 = 48;

    pub fn parse(message: &List) -> Result<Self, ValidationError> {
        static VALIDATION_SPEC: LazyLock<ValidationSpec> = LazyLock::new(|| ValidationSpec {
            min_length: 4,
            max_length: 6,
            validators: BTreeMap::from_iter([
                (1, validate_request as Validator),
                (2, validate_options as Validator),
                (3, validate_uri as Validator),
                (4, validate_arguments as Validator),
                (5, validate_arguments_keyword as Validator),
            ]),
        });
        let fields = validate_message(message, &VALIDATION_SPEC)?;
        Ok(Self {
            request: fields.request.unwrap_or_default(),
            options: fields.options.unwrap_or_default(),
            procedure: fields.uri.unwrap_or_default(),
            arguments: fields.arguments.unwrap_or_default(),
            arguments_keyword: fields.arguments_keyword.unwrap_or_default(),
        })
    }

    pub fn marshal(&self) -> List {
        let mut message = List::from_iter([
            Value::UInt(Self::TAG),
            self.request.into(),
            Value::Dictionary(self.options.clone()),
            Value::String(self.procedure.clone()),
        ]);
        push_payload(&mut message, &self.arguments, &self.arguments_keyword);
        message
    }
}

/// A CANCEL message for canceling an in-flight call.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CancelMessage {
    pub request: Id,
    pub options: Dictionary,
}

impl CancelMessage {
    pub const TAG: u64 = 49;

    pub fn parse(message: &List) -> Result<Self, ValidationError> {
        static VALIDATION_SPEC: LazyLock<ValidationSpec> = LazyLock::new(|| ValidationSpec {
            min_length: 3,
            max_length: 3,
            validators: BTreeMap::from_iter([
                (1, validate_request as Validator),
                (2, validate_options as Validator),
            ]),
        });
        let fields = validate_message(message, &VALIDATION_SPEC)?;
        Ok(Self {
            request: fields.request.unwrap_or_default(),
            options: fields.options.unwrap_or_default(),
        })
    }

    pub fn marshal(&self) -> List {
        List::from_iter([
            Value::UInt(Self::TAG),
            self.request.into(),
            Value::Dictionary(self.options.clone()),
        ])
    }
}

/// A RESULT message for sending the result of a procedure invocation.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ResultMessage {
    pub call_request: Id,
    pub details: Dictionary,
    pub yield_arguments: List,
    pub yield_arguments_keyword: Dictionary,
}

impl ResultMessage {
    pub const TAG: u64 = 50;

    pub fn parse(message: &List) -> Result<Self, ValidationError> {
        static VALIDATION_SPEC: LazyLock<ValidationSpec> = LazyLock::new(|| ValidationSpec {
            min_length: 3,
            max_length: 5,
            validators: BTreeMap::from_iter([
                (1, validate_request as Validator),
                (2, validate_details as Validator),
                (3, validate_arguments as Validator),
                (4, validate_arguments_keyword as Validator),
            ]),
        });
        let fields = validate_message(message, &VALIDATION_SPEC)?;
        Ok(Self {
            call_request: fields.request.unwrap_or_default(),
            details: fields.details.unwrap_or_default(),
            yield_arguments: fields.arguments.unwrap_or_default(),
            yield_arguments_keyword: fields.arguments_keyword.unwrap_or_default(),
        })
    }

    pub fn marshal(&self) -> List {
        let mut message = List::from_iter([
            Value::UInt(Self::TAG),
            self.call_request.into(),
            Value::Dictionary(self.details.clone()),
        ]);
        push_payload(
            &mut message,
            &self.yield_arguments,
            &self.yield_arguments_keyword,
        );
        message
    }
}

/// A REGISTER message for registering a procedure in the realm.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RegisterMessage {
    pub request: Id,
    pub options: Dictionary,
    pub procedure: String,
}

impl RegisterMessage {
    pub const TAG: u64 = 64;

    pub fn parse(message: &List) -> Result<Self, ValidationError> {
        static VALIDATION_SPEC: LazyLock<ValidationSpec> = LazyLock::new(|| ValidationSpec {
            min_length: 4,
            max_length: 4,
            validators: BTreeMap::from_iter([
                (1, validate_request as Validator),
                (2, validate_options as Validator),
                (3, validate_uri as Validator),
            ]),
        });
        let fields = validate_message(message, &VALIDATION_SPEC)?;
        Ok(Self {
            request: fields.request.unwrap_or_default(),
            options: fields.options.unwrap_or_default(),
            procedure: fields.uri.unwrap_or_default(),
        })
    }

    pub fn marshal(&self) -> List {
        List::from_iter([
            Value::UInt(Self::TAG),
            self.request.into(),
            Value::Dictionary(self.options.clone()),
            Value::String(self.procedure.clone()),
        ])
    }
}

/// A REGISTERED message for confirming a procedure has been registered.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RegisteredMessage {
    pub register_request: Id,
    pub registration: Id,
}

impl RegisteredMessage {
    pub const TAG: u64 = 65;

    pub fn parse(message: &List) -> Result<Self, ValidationError> {
        static VALIDATION_SPEC: LazyLock<ValidationSpec> = LazyLock::new(|| ValidationSpec {
            min_length: 3,
            max_length: 3,
            validators: BTreeMap::from_iter([
                (1, validate_request as Validator),
                (2, validate_registration as Validator),
            ]),
        });
        let fields = validate_message(message, &VALIDATION_SPEC)?;
        Ok(Self {
            register_request: fields.request.unwrap_or_default(),
            registration: fields.registration.unwrap_or_default(),
        })
    }

    pub fn marshal(&self) -> List {
        List::from_iter([
            Value::UInt(Self::TAG),
            self.register_request.into(),
            self.registration.into(),
        ])
    }
}

/// An UNREGISTER message for unregistering a procedure in the realm.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UnregisterMessage {
    pub request: Id,
    pub registered_registration: Id,
}

impl UnregisterMessage {
    pub const TAG: u64 = 66;

    pub fn parse(message: &List) -> Result<Self, ValidationError> {
        static VALIDATION_SPEC: LazyLock<ValidationSpec> = LazyLock::new(|| ValidationSpec {
            min_length: 3,
            max_length: 3,
            validators: BTreeMap::from_iter([
                (1, validate_request as Validator),
                (2, validate_registration as Validator),
            ]),
        });
        let fields = validate_message(message, &VALIDATION_SPEC)?;
        Ok(Self {
            request: fields.request.unwrap_or_default(),
            registered_registration: fields.registration.unwrap_or_default(),
        })
    }

    pub fn marshal(&self) -> List {
        List::from_iter([
            Value::UInt(Self::TAG),
            self.request.into(),
            self.registered_registration.into(),
        ])
    }
}

/// An UNREGISTERED message for confirming a procedure has been unregistered.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UnregisteredMessage {
    pub unregister_request: Id,
}

impl UnregisteredMessage {
    pub const TAG: u64 = 67;

    pub fn parse(message: &List) -> Result<Self, ValidationError> {
        static VALIDATION_SPEC: LazyLock<ValidationSpec> = LazyLock::new(|| ValidationSpec {
            min_length: 2,
            max_length: 2,
            validators: BTreeMap::from_iter([(1, validate_request as Validator)]),
        });
        let fields = validate_message(message, &VALIDATION_SPEC)?;
        Ok(Self {
            unregister_request: fields.request.unwrap_or_default(),
        })
    }

    pub fn marshal(&self) -> List {
        List::from_iter([Value::UInt(Self::TAG), self.unregister_request.into()])
    }
}

/// An INVOCATION message for invoking a procedure on its callee.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct InvocationMessage {
    pub request: Id,
    pub registered_registration: Id,
    pub details: Dictionary,
    pub call_arguments: List,
    pub call_arguments_keyword: Dictionary,
}

impl InvocationMessage {
    pub const TAG: u64 = 68;

    pub fn parse(message: &List) -> Result<Self, ValidationError> {
        static VALIDATION_SPEC: LazyLock<ValidationSpec> = LazyLock::new(|| ValidationSpec {
            min_length: 4,
            max_length: 6,
            validators: BTreeMap::from_iter([
                (1, validate_request as Validator),
                (2, validate_registration as Validator),
                (3, validate_details as Validator),
                (4, validate_arguments as Validator),
                (5, validate_arguments_keyword as Validator),
            ]),
        });
        let fields = validate_message(message, &VALIDATION_SPEC)?;
        Ok(Self {
            request: fields.request.unwrap_or_default(),
            registered_registration: fields.registration.unwrap_or_default(),
            details: fields.details.unwrap_or_default(),
            call_arguments: fields.arguments.unwrap_or_default(),
            call_arguments_keyword: fields.arguments_keyword.unwrap_or_default(),
        })
    }

    pub fn marshal(&self) -> List {
        let mut message = List::from_iter([
            Value::UInt(Self::TAG),
            self.request.into(),
            self.registered_registration.into(),
            Value::Dictionary(self.details.clone()),
        ]);
        push_payload(
            &mut message,
            &self.call_arguments,
            &self.call_arguments_keyword,
        );
        message
    }
}

/// An INTERRUPT message for canceling an in-flight invocation on its callee.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct InterruptMessage {
    pub request: Id,
    pub options: Dictionary,
}

impl InterruptMessage {
    pub const TAG: u64 = 69;

    pub fn parse(message: &List) -> Result<Self, ValidationError> {
        static VALIDATION_SPEC: LazyLock<ValidationSpec> = LazyLock::new(|| ValidationSpec {
            min_length: 3,
            max_length: 3,
            validators: BTreeMap::from_iter([
                (1, validate_request as Validator),
                (2, validate_options as Validator),
            ]),
        });
        let fields = validate_message(message, &VALIDATION_SPEC)?;
        Ok(Self {
            request: fields.request.unwrap_or_default(),
            options: fields.options.unwrap_or_default(),
        })
    }

    pub fn marshal(&self) -> List {
        List::from_iter([
            Value::UInt(Self::TAG),
            self.request.into(),
            Value::Dictionary(self.options.clone()),
        ])
    }
}

/// A YIELD message for yielding the result of an invocation from the callee.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct YieldMessage {
    pub invocation_request: Id,
    pub options: Dictionary,
    pub arguments: List,
    pub arguments_keyword: Dictionary,
}

impl YieldMessage {
    pub const TAG: u64 = 70;

    pub fn parse(message: &List) -> Result<Self, ValidationError> {
        static VALIDATION_SPEC: LazyLock<ValidationSpec> = LazyLock::new(|| ValidationSpec {
            min_length: 3,
            max_length: 5,
            validators: BTreeMap::from_iter([
                (1, validate_request as Validator),
                (2, validate_options as Validator),
                (3, validate_arguments as Validator),
                (4, validate_arguments_keyword as Validator),
            ]),
        });
        let fields = validate_message(message, &VALIDATION_SPEC)?;
        Ok(Self {
            invocation_request: fields.request.unwrap_or_default(),
            options: fields.options.unwrap_or_default(),
            arguments: fields.arguments.unwrap_or_default(),
            arguments_keyword: fields.arguments_keyword.unwrap_or_default(),
        })
    }

    pub fn marshal(&self) -> List {
        let mut message = List::from_iter([
            Value::UInt(Self::TAG),
            self.invocation_request.into(),
            Value::Dictionary(self.options.clone()),
        ]);
        push_payload(&mut message, &self.arguments, &self.arguments_keyword);
        message
    }
}

/// A WAMP message.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Hello(HelloMessage),
    Welcome(WelcomeMessage),
    Abort(AbortMessage),
    Challenge(ChallengeMessage),
    Authenticate(AuthenticateMessage),
    Goodbye(GoodbyeMessage),
    Error(ErrorMessage),
    Publish(PublishMessage),
    Published(PublishedMessage),
    Subscribe(SubscribeMessage),
    Subscribed(SubscribedMessage),
    Unsubscribe(UnsubscribeMessage),
    Unsubscribed(UnsubscribedMessage),
    Event(EventMessage),
    Call(CallMessage),
    Cancel(CancelMessage),
    Result(ResultMessage),
    Register(RegisterMessage),
    Registered(RegisteredMessage),
    Unregister(UnregisterMessage),
    Unregistered(UnregisteredMessage),
    Invocation(InvocationMessage),
    Interrupt(InterruptMessage),
    Yield(YieldMessage),
}

impl Message {
    /// Parses a message from its raw array form, dispatching on the type tag
    /// at index 0.
    pub fn parse(message: &List) -> Result<Message> {
        let tag = message
            .first()
            .and_then(Value::uint)
            .ok_or_else(|| MessageError::ParseFailure("data is not in the expected format".to_owned()))?;
        match tag {
            HelloMessage::TAG => Ok(Self::Hello(HelloMessage::parse(message)?)),
            WelcomeMessage::TAG => Ok(Self::Welcome(WelcomeMessage::parse(message)?)),
            AbortMessage::TAG => Ok(Self::Abort(AbortMessage::parse(message)?)),
            ChallengeMessage::TAG => Ok(Self::Challenge(ChallengeMessage::parse(message)?)),
            AuthenticateMessage::TAG => Ok(Self::Authenticate(AuthenticateMessage::parse(message)?)),
            GoodbyeMessage::TAG => Ok(Self::Goodbye(GoodbyeMessage::parse(message)?)),
            ErrorMessage::TAG => Ok(Self::Error(ErrorMessage::parse(message)?)),
            PublishMessage::TAG => Ok(Self::Publish(PublishMessage::parse(message)?)),
            PublishedMessage::TAG => Ok(Self::Published(PublishedMessage::parse(message)?)),
            SubscribeMessage::TAG => Ok(Self::Subscribe(SubscribeMessage::parse(message)?)),
            SubscribedMessage::TAG => Ok(Self::Subscribed(SubscribedMessage::parse(message)?)),
            UnsubscribeMessage::TAG => Ok(Self::Unsubscribe(UnsubscribeMessage::parse(message)?)),
            UnsubscribedMessage::TAG => Ok(Self::Unsubscribed(UnsubscribedMessage::parse(message)?)),
            EventMessage::TAG => Ok(Self::Event(EventMessage::parse(message)?)),
            CallMessage::TAG => Ok(Self::Call(CallMessage::parse(message)?)),
            CancelMessage::TAG => Ok(Self::Cancel(CancelMessage::parse(message)?)),
            ResultMessage::TAG => Ok(Self::Result(ResultMessage::parse(message)?)),
            RegisterMessage::TAG => Ok(Self::Register(RegisterMessage::parse(message)?)),
            RegisteredMessage::TAG => Ok(Self::Registered(RegisteredMessage::parse(message)?)),
            UnregisterMessage::TAG => Ok(Self::Unregister(UnregisterMessage::parse(message)?)),
            UnregisteredMessage::TAG => Ok(Self::Unregistered(UnregisteredMessage::parse(message)?)),
            InvocationMessage::TAG => Ok(Self::Invocation(InvocationMessage::parse(message)?)),
            InterruptMessage::TAG => Ok(Self::Interrupt(InterruptMessage::parse(message)?)),
            YieldMessage::TAG => Ok(Self::Yield(YieldMessage::parse(message)?)),
            _ => Err(MessageError::UnsupportedType(tag).into()),
        }
    }

    /// Marshals the message into its raw array form.
    pub fn marshal(&self) -> List {
        match self {
            Self::Hello(message) => message.marshal(),
            Self::Welcome(message) => message.marshal(),
            Self::Abort(message) => message.marshal(),
            Self::Challenge(message) => message.marshal(),
            Self::Authenticate(message) => message.marshal(),
            Self::Goodbye(message) => message.marshal(),
            Self::Error(message) => message.marshal(),
            Self::Publish(message) => message.marshal(),
            Self::Published(message) => message.marshal(),
            Self::Subscribe(message) => message.marshal(),
            Self::Subscribed(message) => message.marshal(),
            Self::Unsubscribe(message) => message.marshal(),
            Self::Unsubscribed(message) => message.marshal(),
            Self::Event(message) => message.marshal(),
            Self::Call(message) => message.marshal(),
            Self::Cancel(message) => message.marshal(),
            Self::Result(message) => message.marshal(),
            Self::Register(message) => message.marshal(),
            Self::Registered(message) => message.marshal(),
            Self::Unregister(message) => message.marshal(),
            Self::Unregistered(message) => message.marshal(),
            Self::Invocation(message) => message.marshal(),
            Self::Interrupt(message) => message.marshal(),
            Self::Yield(message) => message.marshal(),
        }
    }

    /// The message name, mostly for logging.
    pub fn message_name(&self) -> &'static str {
        match self {
            Self::Hello(_) => "HELLO",
            Self::Welcome(_) => "WELCOME",
            Self::Abort(_) => "ABORT",
            Self::Challenge(_) => "CHALLENGE",
            Self::Authenticate(_) => "AUTHENTICATE",
            Self::Goodbye(_) => "GOODBYE",
            Self::Error(_) => "ERROR",
            Self::Publish(_) => "PUBLISH",
            Self::Published(_) => "PUBLISHED",
            Self::Subscribe(_) => "SUBSCRIBE",
            Self::Subscribed(_) => "SUBSCRIBED",
            Self::Unsubscribe(_) => "UNSUBSCRIBE",
            Self::Unsubscribed(_) => "UNSUBSCRIBED",
            Self::Event(_) => "EVENT",
            Self::Call(_) => "CALL",
            Self::Cancel(_) => "CANCEL",
            Self::Result(_) => "RESULT",
            Self::Register(_) => "REGISTER",
            Self::Registered(_) => "REGISTERED",
            Self::Unregister(_) => "UNREGISTER",
            Self::Unregistered(_) => "UNREGISTERED",
            Self::Invocation(_) => "INVOCATION",
            Self::Interrupt(_) => "INTERRUPT",
            Self::Yield(_) => "YIELD",
        }
    }

    /// The request ID on the message.
    pub fn request_id(&self) -> Option<Id> {
        match self {
            Self::Error(message) => Some(message.request),
            Self::Publish(message) => Some(message.request),
            Self::Published(message) => Some(message.publish_request),
            Self::Subscribe(message) => Some(message.request),
            Self::Subscribed(message) => Some(message.subscribe_request),
            Self::Unsubscribe(message) => Some(message.request),
            Self::Unsubscribed(message) => Some(message.unsubscribe_request),
            Self::Call(message) => Some(message.request),
            Self::Cancel(message) => Some(message.request),
            Self::Result(message) => Some(message.call_request),
            Self::Register(message) => Some(message.request),
            Self::Registered(message) => Some(message.register_request),
            Self::Unregister(message) => Some(message.request),
            Self::Unregistered(message) => Some(message.unregister_request),
            Self::Invocation(message) => Some(message.request),
            Self::Interrupt(message) => Some(message.request),
            Self::Yield(message) => Some(message.invocation_request),
            _ => None,
        }
    }
}
