use anyhow::Result;
use log::trace;

use crate::{
    core::{
        error::ProtocolError,
        hash::{
            HashMap,
            HashSet,
        },
        id::Id,
        types::Value,
    },
    message::message::{
        CallMessage,
        InvocationMessage,
        Message,
        PublishMessage,
        RegisterMessage,
        SubscribeMessage,
        UnregisterMessage,
        UnsubscribeMessage,
    },
    serializer::serializer::{
        SerializedMessage,
        Serializer,
        SerializerType,
        new_serializer,
    },
};

/// State machine for an established session.
///
/// The session records every request it sends so the matching response can be correlated when it
/// arrives. A response for a request that was never sent, or that was already answered, violates
/// the protocol. The session performs no I/O of its own.
pub struct Session {
    serializer: Box<dyn Serializer>,

    // RPC state.
    call_requests: HashSet<Id>,
    register_requests: HashSet<Id>,
    registrations: HashSet<Id>,
    invocation_requests: HashSet<Id>,
    unregister_requests: HashMap<Id, Id>,

    // PubSub state.
    publish_requests: HashSet<Id>,
    subscribe_requests: HashSet<Id>,
    subscriptions: HashSet<Id>,
    unsubscribe_requests: HashMap<Id, Id>,
}

impl Session {
    /// Creates a new session speaking the given serialization format.
    pub fn new(serializer_type: SerializerType) -> Self {
        Self {
            serializer: new_serializer(serializer_type),
            call_requests: HashSet::default(),
            register_requests: HashSet::default(),
            registrations: HashSet::default(),
            invocation_requests: HashSet::default(),
            unregister_requests: HashMap::default(),
            publish_requests: HashSet::default(),
            subscribe_requests: HashSet::default(),
            subscriptions: HashSet::default(),
            unsubscribe_requests: HashMap::default(),
        }
    }

    /// Serializes a message for sending, recording the request for later correlation.
    ///
    /// State changes land only after the message serializes, so a failure leaves the session
    /// untouched.
    pub fn send(&mut self, message: &Message) -> Result<SerializedMessage> {
        match message {
            Message::Yield(yield_message) => {
                if !self
                    .invocation_requests
                    .contains(&yield_message.invocation_request)
                {
                    return Err(
                        ProtocolError::new("cannot yield for unknown invocation request").into(),
                    );
                }
            }
            Message::Error(error) => {
                if error.request_type != InvocationMessage::TAG {
                    return Err(
                        ProtocolError::new("send only supported for invocation error").into()
                    );
                }
            }
            Message::Call(_)
            | Message::Register(_)
            | Message::Unregister(_)
            | Message::Publish(_)
            | Message::Subscribe(_)
            | Message::Unsubscribe(_)
            | Message::Goodbye(_) => (),
            _ => {
                return Err(ProtocolError::new(format!(
                    "unknown message {}",
                    message.message_name()
                ))
                .into());
            }
        }

        let serialized = self.serializer.serialize(message)?;
        trace!("Session sending {}", message.message_name());

        match message {
            Message::Call(call) => {
                self.call_requests.insert(call.request);
            }
            Message::Register(register) => {
                self.register_requests.insert(register.request);
            }
            Message::Unregister(unregister) => {
                self.unregister_requests
                    .insert(unregister.request, unregister.registered_registration);
            }
            Message::Publish(publish) => {
                if publish
                    .options
                    .get("acknowledge")
                    .and_then(Value::bool)
                    .unwrap_or_default()
                {
                    self.publish_requests.insert(publish.request);
                }
            }
            Message::Subscribe(subscribe) => {
                self.subscribe_requests.insert(subscribe.request);
            }
            Message::Unsubscribe(unsubscribe) => {
                self.unsubscribe_requests
                    .insert(unsubscribe.request, unsubscribe.subscribed_subscription);
            }
            Message::Yield(yield_message) => {
                self.invocation_requests
                    .remove(&yield_message.invocation_request);
            }
            Message::Error(error) => {
                self.invocation_requests.remove(&error.request);
            }
            _ => (),
        }

        Ok(serialized)
    }

    /// Receives raw data from the router, producing the parsed message once its correlation state
    /// checks out.
    pub fn receive(&mut self, data: &[u8]) -> Result<Message> {
        let message = self.serializer.deserialize(data)?;
        self.receive_message(message)
    }

    /// Receives a message from the router, producing it back once its correlation state checks
    /// out.
    pub fn receive_message(&mut self, message: Message) -> Result<Message> {
        trace!("Session received {}", message.message_name());
        match &message {
            Message::Result(result) => {
                if !self.call_requests.remove(&result.call_request) {
                    return Err(ProtocolError::new(format!(
                        "received RESULT for invalid request ID {}",
                        result.call_request
                    ))
                    .into());
                }
            }
            Message::Registered(registered) => {
                if !self.register_requests.remove(&registered.register_request) {
                    return Err(ProtocolError::new(format!(
                        "received REGISTERED for invalid request ID {}",
                        registered.register_request
                    ))
                    .into());
                }
                self.registrations.insert(registered.registration);
            }
            Message::Unregistered(unregistered) => {
                // Both lookups happen before either table changes.
                let registration = self
                    .unregister_requests
                    .get(&unregistered.unregister_request)
                    .copied()
                    .ok_or_else(|| {
                        ProtocolError::new(format!(
                            "received UNREGISTERED for invalid request ID {}",
                            unregistered.unregister_request
                        ))
                    })?;
                if !self.registrations.contains(&registration) {
                    return Err(ProtocolError::new(format!(
                        "received UNREGISTERED for invalid registration ID {registration}"
                    ))
                    .into());
                }
                self.unregister_requests
                    .remove(&unregistered.unregister_request);
                self.registrations.remove(&registration);
            }
            Message::Invocation(invocation) => {
                if !self
                    .registrations
                    .contains(&invocation.registered_registration)
                {
                    return Err(ProtocolError::new(format!(
                        "received INVOCATION for invalid registration ID {}",
                        invocation.registered_registration
                    ))
                    .into());
                }
                self.invocation_requests.insert(invocation.request);
            }
            Message::Published(published) => {
                if !self.publish_requests.remove(&published.publish_request) {
                    return Err(ProtocolError::new(format!(
                        "received PUBLISHED for invalid request ID {}",
                        published.publish_request
                    ))
                    .into());
                }
            }
            Message::Subscribed(subscribed) => {
                if !self
                    .subscribe_requests
                    .remove(&subscribed.subscribe_request)
                {
                    return Err(ProtocolError::new(format!(
                        "received SUBSCRIBED for invalid request ID {}",
                        subscribed.subscribe_request
                    ))
                    .into());
                }
                self.subscriptions.insert(subscribed.subscription);
            }
            Message::Unsubscribed(unsubscribed) => {
                let subscription = self
                    .unsubscribe_requests
                    .get(&unsubscribed.unsubscribe_request)
                    .copied()
                    .ok_or_else(|| {
                        ProtocolError::new(format!(
                            "received UNSUBSCRIBED for invalid request ID {}",
                            unsubscribed.unsubscribe_request
                        ))
                    })?;
                if !self.subscriptions.contains(&subscription) {
                    return Err(ProtocolError::new(format!(
                        "received UNSUBSCRIBED for invalid subscription ID {subscription}"
                    ))
                    .into());
                }
                self.unsubscribe_requests
                    .remove(&unsubscribed.unsubscribe_request);
                self.subscriptions.remove(&subscription);
            }
            Message::Event(event) => {
                if !self
                    .subscriptions
                    .contains(&event.subscribed_subscription)
                {
                    return Err(ProtocolError::new(format!(
                        "received EVENT for invalid subscription ID {}",
                        event.subscribed_subscription
                    ))
                    .into());
                }
            }
            Message::Error(error) => match error.request_type {
                CallMessage::TAG => {
                    if !self.call_requests.remove(&error.request) {
                        return Err(
                            ProtocolError::new("received ERROR for invalid call request").into()
                        );
                    }
                }
                RegisterMessage::TAG => {
                    if !self.register_requests.remove(&error.request) {
                        return Err(ProtocolError::new(
                            "received ERROR for invalid register request",
                        )
                        .into());
                    }
                }
                UnregisterMessage::TAG => {
                    if self.unregister_requests.remove(&error.request).is_none() {
                        return Err(ProtocolError::new(
                            "received ERROR for invalid unregister request",
                        )
                        .into());
                    }
                }
                SubscribeMessage::TAG => {
                    if !self.subscribe_requests.remove(&error.request) {
                        return Err(ProtocolError::new(
                            "received ERROR for invalid subscribe request",
                        )
                        .into());
                    }
                }
                UnsubscribeMessage::TAG => {
                    if self.unsubscribe_requests.remove(&error.request).is_none() {
                        return Err(ProtocolError::new(
                            "received ERROR for invalid unsubscribe request",
                        )
                        .into());
                    }
                }
                PublishMessage::TAG => {
                    if !self.publish_requests.remove(&error.request) {
                        return Err(ProtocolError::new(
                            "received ERROR for invalid publish request",
                        )
                        .into());
                    }
                }
                _ => {
                    return Err(ProtocolError::new(format!(
                        "unknown error message type {}",
                        error.request_type
                    ))
                    .into());
                }
            },
            Message::Goodbye(_) => (),
            _ => {
                return Err(ProtocolError::new(format!(
                    "unknown message in session {}",
                    message.message_name()
                ))
                .into());
            }
        }
        Ok(message)
    }
}
