use std::fmt::Display;

use thiserror::Error;

use crate::core::types::{
    Dictionary,
    List,
};

/// An error for a message that violates the WAMP session protocol.
///
/// Protocol errors are unrecoverable for the session that produced them; the
/// peer is expected to abort the connection.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ProtocolError {
    message: String,
}

impl ProtocolError {
    pub fn new<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
        }
    }
}

/// An application-level error raised by a peer, carrying the reason URI and
/// any payload attached to it (e.g. the body of an ABORT message).
#[derive(Debug)]
pub struct ApplicationError {
    pub message: String,
    pub args: Option<List>,
    pub kwargs: Option<Dictionary>,
}

impl ApplicationError {
    pub fn new<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            args: None,
            kwargs: None,
        }
    }
}

impl Display for ApplicationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)?;
        if let Some(args) = &self.args
            && !args.is_empty()
        {
            write!(
                f,
                ": {}",
                args.iter()
                    .map(|arg| arg.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )?;
        }
        if let Some(kwargs) = &self.kwargs
            && !kwargs.is_empty()
        {
            write!(
                f,
                ": {}",
                kwargs
                    .iter()
                    .map(|(key, value)| format!("{key}={value}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for ApplicationError {}

/// An error for requesting session details before the session is established.
#[derive(Debug, Error)]
#[error("session is not set up yet")]
pub struct SessionNotReady;

#[cfg(test)]
mod error_test {
    use pretty_assertions::assert_eq;

    use crate::core::{
        error::ApplicationError,
        types::{
            Dictionary,
            Value,
        },
    };

    #[test]
    fn formats_application_error_with_payload() {
        let error = ApplicationError::new("wamp.error.authentication_failed");
        assert_eq!(error.to_string(), "wamp.error.authentication_failed");

        let error = ApplicationError {
            message: "wamp.error.invalid_argument".to_owned(),
            args: Some(Vec::from_iter([Value::UInt(1), Value::String("two".to_owned())])),
            kwargs: None,
        };
        assert_eq!(error.to_string(), "wamp.error.invalid_argument: 1, two");

        let error = ApplicationError {
            message: "wamp.error.invalid_argument".to_owned(),
            args: None,
            kwargs: Some(Dictionary::from_iter([(
                "code".to_owned(),
                Value::UInt(7),
            )])),
        };
        assert_eq!(error.to_string(), "wamp.error.invalid_argument: code=7");
    }

    #[test]
    fn skips_empty_payload() {
        let error = ApplicationError {
            message: "wamp.error.canceled".to_owned(),
            args: Some(Vec::new()),
            kwargs: Some(Dictionary::default()),
        };
        assert_eq!(error.to_string(), "wamp.error.canceled");
    }
}
