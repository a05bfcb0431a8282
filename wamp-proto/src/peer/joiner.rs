use anyhow::Result;
use log::{
    info,
    trace,
};

use crate::{
    auth::authenticator::ClientAuthenticator,
    core::{
        error::{
            ApplicationError,
            ProtocolError,
            SessionNotReady,
        },
        id::Id,
        roles::client_roles,
    },
    message::message::{
        HelloMessage,
        Message,
    },
    serializer::serializer::{
        SerializedMessage,
        Serializer,
        SerializerType,
        new_serializer,
    },
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum JoinerState {
    #[default]
    Ready,
    HelloSent,
    AuthenticateSent,
    Joined,
}

/// Details of an established session, captured from the WELCOME message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDetails {
    pub session: Id,
    pub realm: String,
    pub auth_id: String,
    pub auth_role: String,
}

/// State machine for joining a realm.
///
/// The joiner drives the client half of session establishment: it produces the opening HELLO,
/// answers a CHALLENGE through its authenticator, and captures the session details delivered by
/// the WELCOME. It performs no I/O of its own; callers shuttle the serialized payloads over
/// whatever transport they own.
pub struct Joiner {
    realm: String,
    serializer: Box<dyn Serializer>,
    authenticator: ClientAuthenticator,
    state: JoinerState,
    session_details: Option<SessionDetails>,
}

impl Joiner {
    /// Creates a new joiner for the realm.
    pub fn new(
        realm: String,
        serializer_type: SerializerType,
        authenticator: ClientAuthenticator,
    ) -> Self {
        Self {
            realm,
            serializer: new_serializer(serializer_type),
            authenticator,
            state: JoinerState::default(),
            session_details: None,
        }
    }

    /// Produces the serialized HELLO message that initiates the handshake.
    ///
    /// Valid exactly once, before any message is received.
    pub fn send_hello(&mut self) -> Result<SerializedMessage> {
        if self.state != JoinerState::Ready {
            return Err(ProtocolError::new("hello already sent").into());
        }
        let hello = HelloMessage {
            realm: self.realm.clone(),
            roles: client_roles(),
            auth_id: self.authenticator.auth_id().to_owned(),
            auth_methods: Vec::from_iter([self.authenticator.auth_method().into()]),
            auth_extra: self.authenticator.auth_extra().clone(),
        };
        trace!("Sending HELLO to realm {}", self.realm);
        let serialized = self.serializer.serialize(&Message::Hello(hello))?;
        self.state = JoinerState::HelloSent;
        Ok(serialized)
    }

    /// Receives raw data from the router, producing the serialized answer to send back, if any.
    pub fn receive(&mut self, data: &[u8]) -> Result<Option<SerializedMessage>> {
        let message = self.serializer.deserialize(data)?;
        self.receive_message(message)
    }

    /// Receives a message from the router, producing the answer to send back, if any.
    pub fn receive_message(&mut self, message: Message) -> Result<Option<SerializedMessage>> {
        match message {
            Message::Welcome(message) => {
                if self.state != JoinerState::HelloSent
                    && self.state != JoinerState::AuthenticateSent
                {
                    return Err(
                        ProtocolError::new("received welcome when it was not expected").into(),
                    );
                }
                info!(
                    "Joined realm {} with session ID {}",
                    self.realm, message.session
                );
                self.session_details = Some(SessionDetails {
                    session: message.session,
                    realm: self.realm.clone(),
                    auth_id: message.auth_id,
                    auth_role: message.auth_role,
                });
                self.state = JoinerState::Joined;
                Ok(None)
            }
            Message::Challenge(message) => {
                if self.state != JoinerState::HelloSent {
                    return Err(
                        ProtocolError::new("received challenge when it was not expected").into(),
                    );
                }
                trace!("Answering {} challenge from router", message.auth_method);
                let authenticate = self.authenticator.authenticate(&message)?;
                let serialized = self
                    .serializer
                    .serialize(&Message::Authenticate(authenticate))?;
                self.state = JoinerState::AuthenticateSent;
                Ok(Some(serialized))
            }
            Message::Abort(message) => Err(ApplicationError {
                message: message.reason,
                args: (!message.arguments.is_empty()).then_some(message.arguments),
                kwargs: (!message.arguments_keyword.is_empty()).then_some(message.arguments_keyword),
            }
            .into()),
            _ => Err(ProtocolError::new(
                "received unknown message and session is not established yet",
            )
            .into()),
        }
    }

    /// Details of the established session.
    ///
    /// Fails until a WELCOME has been received.
    pub fn session_details(&self) -> Result<SessionDetails, SessionNotReady> {
        self.session_details.clone().ok_or(SessionNotReady)
    }
}
