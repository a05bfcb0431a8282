use anyhow::Result;

use crate::{
    core::types::Dictionary,
    message::message::{
        AuthenticateMessage,
        ChallengeMessage,
    },
};

/// An authenticator for ticket-based authentication.
///
/// The signature is the pre-shared ticket itself. Challenge content is ignored.
#[derive(Debug, Clone)]
pub struct TicketAuthenticator {
    pub auth_id: String,
    pub auth_extra: Dictionary,
    ticket: String,
}

impl TicketAuthenticator {
    /// Creates a new ticket authenticator.
    pub fn new(auth_id: String, auth_extra: Dictionary, ticket: String) -> Self {
        Self {
            auth_id,
            auth_extra,
            ticket,
        }
    }

    pub fn authenticate(&self, _: &ChallengeMessage) -> Result<AuthenticateMessage> {
        Ok(AuthenticateMessage {
            signature: self.ticket.clone(),
            extra: Dictionary::default(),
        })
    }
}
