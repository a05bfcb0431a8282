use crate::core::types::{
    Dictionary,
    Value,
};

/// A role a client peer can take on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PeerRole {
    // Calls RPC endpoints.
    Caller,
    // Registers RPC endpoints.
    Callee,
    // Publishes events to topics.
    Publisher,
    // Subscribes to events for topics.
    Subscriber,
}

impl PeerRole {
    const ALL: [PeerRole; 4] = [
        PeerRole::Caller,
        PeerRole::Callee,
        PeerRole::Publisher,
        PeerRole::Subscriber,
    ];
}

impl TryFrom<&str> for PeerRole {
    type Error = anyhow::Error;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "caller" => Ok(Self::Caller),
            "callee" => Ok(Self::Callee),
            "publisher" => Ok(Self::Publisher),
            "subscriber" => Ok(Self::Subscriber),
            _ => Err(Self::Error::msg(format!("invalid peer role: {value}"))),
        }
    }
}

impl Into<&'static str> for PeerRole {
    fn into(self) -> &'static str {
        match self {
            Self::Caller => "caller",
            Self::Callee => "callee",
            Self::Publisher => "publisher",
            Self::Subscriber => "subscriber",
        }
    }
}

impl Into<String> for PeerRole {
    fn into(self) -> String {
        Into::<&'static str>::into(self).to_owned()
    }
}

impl ToString for PeerRole {
    fn to_string(&self) -> String {
        (*self).into()
    }
}

/// The roles map a client announces in its HELLO details.
///
/// Every client advertises all four roles, each with an empty feature set.
pub fn client_roles() -> Dictionary {
    Dictionary::from_iter(PeerRole::ALL.map(|role| {
        (
            role.to_string(),
            Value::Dictionary(Dictionary::from_iter([(
                "features".to_owned(),
                Value::Dictionary(Dictionary::default()),
            )])),
        )
    }))
}

#[cfg(test)]
mod roles_test {
    use assert_matches::assert_matches;

    use crate::core::{
        roles::{
            PeerRole,
            client_roles,
        },
        types::Value,
    };

    #[test]
    fn converts_roles_to_and_from_strings() {
        assert_matches!(PeerRole::try_from("caller"), Ok(PeerRole::Caller));
        assert_matches!(PeerRole::try_from("callee"), Ok(PeerRole::Callee));
        assert_matches!(PeerRole::try_from("publisher"), Ok(PeerRole::Publisher));
        assert_matches!(PeerRole::try_from("subscriber"), Ok(PeerRole::Subscriber));
        assert_matches!(PeerRole::try_from("dealer"), Err(err) => {
            assert_eq!(err.to_string(), "invalid peer role: dealer");
        });
        assert_eq!(PeerRole::Callee.to_string(), "callee");
    }

    #[test]
    fn client_roles_advertises_all_roles() {
        let roles = client_roles();
        assert_eq!(roles.len(), 4);
        for role in ["caller", "callee", "publisher", "subscriber"] {
            assert_matches!(roles.get(role), Some(Value::Dictionary(role)) => {
                assert_matches!(role.get("features"), Some(Value::Dictionary(features)) => {
                    assert!(features.is_empty());
                });
            });
        }
    }
}
