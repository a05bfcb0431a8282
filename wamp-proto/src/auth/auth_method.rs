use std::{
    fmt::Display,
    str::FromStr,
};

/// Authentication methods.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthMethod {
    /// No authentication at all.
    ///
    /// The router assigns an anonymous identity to the session.
    #[default]
    Anonymous,
    /// Ticket-based authentication.
    ///
    /// The client proves its identity with a pre-shared ticket string.
    Ticket,
    /// WAMP Challenge Response Authentication.
    ///
    /// Password-based authentication method, where the client signs a challenge issued by the
    /// router with a shared secret.
    WampCra,
    /// Cryptosign authentication.
    ///
    /// Public-key authentication method, where the client signs a challenge issued by the router
    /// with its Ed25519 private key.
    Cryptosign,
}

impl TryFrom<&str> for AuthMethod {
    type Error = anyhow::Error;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "anonymous" => Ok(Self::Anonymous),
            "ticket" => Ok(Self::Ticket),
            "wampcra" => Ok(Self::WampCra),
            "cryptosign" => Ok(Self::Cryptosign),
            _ => Err(Self::Error::msg(format!("invalid auth method: {value}"))),
        }
    }
}

impl FromStr for AuthMethod {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl Into<&'static str> for AuthMethod {
    fn into(self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Ticket => "ticket",
            Self::WampCra => "wampcra",
            Self::Cryptosign => "cryptosign",
        }
    }
}

impl Into<String> for AuthMethod {
    fn into(self) -> String {
        Into::<&'static str>::into(self).to_owned()
    }
}

impl Display for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Into::<&'static str>::into(*self))
    }
}
