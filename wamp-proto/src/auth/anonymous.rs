use anyhow::Result;

use crate::{
    auth::authenticator::AuthenticationError,
    core::types::Dictionary,
    message::message::{
        AuthenticateMessage,
        ChallengeMessage,
    },
};

/// An authenticator for anonymous sessions.
///
/// Anonymous clients are never challenged, so receiving a CHALLENGE at all is a protocol violation
/// by the router.
#[derive(Debug, Default, Clone)]
pub struct AnonymousAuthenticator {
    pub auth_id: String,
    pub auth_extra: Dictionary,
}

impl AnonymousAuthenticator {
    /// Creates a new anonymous authenticator.
    pub fn new(auth_id: String, auth_extra: Dictionary) -> Self {
        Self {
            auth_id,
            auth_extra,
        }
    }

    pub fn authenticate(&self, _: &ChallengeMessage) -> Result<AuthenticateMessage> {
        Err(AuthenticationError::NotSupported.into())
    }
}
