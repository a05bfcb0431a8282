use anyhow::Result;
use thiserror::Error;

use crate::{
    auth::{
        anonymous::AnonymousAuthenticator,
        auth_method::AuthMethod,
        cryptosign::CryptosignAuthenticator,
        ticket::TicketAuthenticator,
        wamp_cra::WampCraAuthenticator,
    },
    core::types::Dictionary,
    message::message::{
        AuthenticateMessage,
        ChallengeMessage,
    },
};

/// An error during client authentication.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthenticationError {
    /// The authentication method never expects a challenge.
    #[error("authentication not supported")]
    NotSupported,
    /// The CHALLENGE extra lacks data the authenticator needs.
    #[error("missing {0} in CHALLENGE extra")]
    MissingChallengeData(&'static str),
}

/// A client-side authenticator, which proves the client's identity to the router during session
/// establishment.
///
/// The authenticator supplies the authentication details advertised in the HELLO message and
/// answers the router's CHALLENGE, if one arrives.
#[derive(Debug, Clone)]
pub enum ClientAuthenticator {
    Anonymous(AnonymousAuthenticator),
    Ticket(TicketAuthenticator),
    WampCra(WampCraAuthenticator),
    Cryptosign(CryptosignAuthenticator),
}

impl ClientAuthenticator {
    /// Authentication method.
    pub fn auth_method(&self) -> AuthMethod {
        match self {
            Self::Anonymous(_) => AuthMethod::Anonymous,
            Self::Ticket(_) => AuthMethod::Ticket,
            Self::WampCra(_) => AuthMethod::WampCra,
            Self::Cryptosign(_) => AuthMethod::Cryptosign,
        }
    }

    /// The authentication ID advertised in the HELLO message.
    pub fn auth_id(&self) -> &str {
        match self {
            Self::Anonymous(authenticator) => &authenticator.auth_id,
            Self::Ticket(authenticator) => &authenticator.auth_id,
            Self::WampCra(authenticator) => &authenticator.auth_id,
            Self::Cryptosign(authenticator) => &authenticator.auth_id,
        }
    }

    /// Additional authentication details advertised in the HELLO message.
    pub fn auth_extra(&self) -> &Dictionary {
        match self {
            Self::Anonymous(authenticator) => &authenticator.auth_extra,
            Self::Ticket(authenticator) => &authenticator.auth_extra,
            Self::WampCra(authenticator) => &authenticator.auth_extra,
            Self::Cryptosign(authenticator) => &authenticator.auth_extra,
        }
    }

    /// Answers the router's CHALLENGE with proof of identity.
    pub fn authenticate(&self, challenge: &ChallengeMessage) -> Result<AuthenticateMessage> {
        match self {
            Self::Anonymous(authenticator) => authenticator.authenticate(challenge),
            Self::Ticket(authenticator) => authenticator.authenticate(challenge),
            Self::WampCra(authenticator) => authenticator.authenticate(challenge),
            Self::Cryptosign(authenticator) => authenticator.authenticate(challenge),
        }
    }
}

impl Default for ClientAuthenticator {
    fn default() -> Self {
        Self::Anonymous(AnonymousAuthenticator::default())
    }
}
