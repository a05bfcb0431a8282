use anyhow::{
    Error,
    Result,
};
use base64::{
    Engine,
    prelude::BASE64_STANDARD,
};
use chrono::{
    SecondsFormat,
    Utc,
};
use hmac::Mac;
use rand::RngCore;

use crate::{
    auth::{
        auth_method::AuthMethod,
        authenticator::AuthenticationError,
    },
    core::{
        id::Id,
        types::{
            Dictionary,
            Value,
        },
    },
    message::message::{
        AuthenticateMessage,
        ChallengeMessage,
    },
};

const DEFAULT_ITERATIONS: u32 = 1000;
const DEFAULT_KEY_LENGTH: usize = 256;

/// An authenticator for WAMP Challenge Response Authentication.
///
/// The router issues a challenge string, which the client signs with a shared secret. When the
/// challenge extra carries a salt, the signing key is first derived with PBKDF2.
#[derive(Debug, Clone)]
pub struct WampCraAuthenticator {
    pub auth_id: String,
    pub auth_extra: Dictionary,
    secret: String,
}

impl WampCraAuthenticator {
    /// Creates a new WAMP-CRA authenticator.
    pub fn new(auth_id: String, auth_extra: Dictionary, secret: String) -> Self {
        Self {
            auth_id,
            auth_extra,
            secret,
        }
    }

    pub fn authenticate(&self, challenge: &ChallengeMessage) -> Result<AuthenticateMessage> {
        let challenge_data = challenge
            .extra
            .get("challenge")
            .and_then(Value::string)
            .ok_or(AuthenticationError::MissingChallengeData("challenge"))?;

        let salt = challenge
            .extra
            .get("salt")
            .and_then(Value::string)
            .unwrap_or_default();
        let key = if salt.is_empty() {
            self.secret.clone().into_bytes()
        } else {
            let iterations = challenge
                .extra
                .get("iterations")
                .and_then(Value::uint)
                .and_then(|iterations| u32::try_from(iterations).ok())
                .unwrap_or_default();
            let key_length = challenge
                .extra
                .get("keylen")
                .and_then(Value::uint)
                .and_then(|key_length| usize::try_from(key_length).ok())
                .unwrap_or_default();
            // The derived key stays base64-encoded. Deployed CRA peers sign
            // with the encoded text, not the decoded bytes.
            derive_cra_key(salt, &self.secret, iterations, key_length).into_bytes()
        };

        Ok(AuthenticateMessage {
            signature: sign_wamp_cra_challenge(challenge_data, &key)?,
            extra: Dictionary::default(),
        })
    }
}

/// Signs a CRA challenge with HMAC-SHA256, producing a base64-encoded signature.
pub fn sign_wamp_cra_challenge(challenge: &str, key: &[u8]) -> Result<String> {
    let mut mac = hmac::Hmac::<sha2::Sha256>::new_from_slice(key)?;
    mac.update(challenge.as_bytes());
    Ok(BASE64_STANDARD.encode(mac.finalize().into_bytes()))
}

/// Verifies a base64-encoded CRA signature against the challenge it covers.
///
/// The signature comparison runs in constant time.
pub fn verify_wamp_cra_signature(signature: &str, challenge: &str, key: &[u8]) -> bool {
    let Ok(signature) = BASE64_STANDARD.decode(signature) else {
        return false;
    };
    let Ok(mut mac) = hmac::Hmac::<sha2::Sha256>::new_from_slice(key) else {
        return false;
    };
    mac.update(challenge.as_bytes());
    mac.verify_slice(&signature).is_ok()
}

/// Derives a CRA signing key from a salted secret, producing the base64 encoding of the
/// PBKDF2-HMAC-SHA256 output.
///
/// `iterations` and `key_length` fall back to 1000 and 256 when zero.
pub fn derive_cra_key(salt: &str, secret: &str, iterations: u32, key_length: usize) -> String {
    let iterations = if iterations == 0 {
        DEFAULT_ITERATIONS
    } else {
        iterations
    };
    let key_length = if key_length == 0 {
        DEFAULT_KEY_LENGTH
    } else {
        key_length
    };
    let mut derived_key = vec![0; key_length];
    pbkdf2::pbkdf2_hmac::<sha2::Sha256>(
        secret.as_bytes(),
        salt.as_bytes(),
        iterations,
        &mut derived_key,
    );
    BASE64_STANDARD.encode(derived_key)
}

/// Generates a CRA challenge for a router to send to a client.
///
/// The challenge is a JSON object carrying a random nonce and the authentication details the
/// signature binds to.
pub fn generate_wamp_cra_challenge<R: RngCore>(
    session: Id,
    auth_id: &str,
    auth_role: &str,
    provider: &str,
    rng: &mut R,
) -> Result<String> {
    let mut nonce = [0; 16];
    rng.fill_bytes(&mut nonce);
    let mut data = Dictionary::default();
    data.insert("nonce".to_owned(), Value::String(hex::encode(nonce)));
    data.insert(
        "authprovider".to_owned(),
        Value::String(provider.to_owned()),
    );
    data.insert("authid".to_owned(), Value::String(auth_id.to_owned()));
    data.insert("authrole".to_owned(), Value::String(auth_role.to_owned()));
    data.insert("authmethod".to_owned(), Value::String(AuthMethod::WampCra.into()));
    data.insert("session".to_owned(), session.into());
    data.insert(
        "timestamp".to_owned(),
        Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    serde_json::to_string(&Value::Dictionary(data)).map_err(Error::new)
}

#[cfg(test)]
mod wamp_cra_test {
    use rand::{
        SeedableRng,
        rngs::StdRng,
    };

    use crate::{
        auth::wamp_cra::{
            derive_cra_key,
            generate_wamp_cra_challenge,
            sign_wamp_cra_challenge,
            verify_wamp_cra_signature,
        },
        core::{
            id::Id,
            types::{
                Dictionary,
                Value,
            },
        },
    };

    #[test]
    fn signs_and_verifies_challenge() {
        let key = b"secret";
        let signature = sign_wamp_cra_challenge("challenge-data", key).unwrap();
        assert!(verify_wamp_cra_signature(&signature, "challenge-data", key));
        assert!(!verify_wamp_cra_signature(&signature, "other-data", key));
        assert!(!verify_wamp_cra_signature(
            "not base64!!!",
            "challenge-data",
            key
        ));
    }

    #[test]
    fn derives_stable_key_with_defaults() {
        let derived = derive_cra_key("salt", "secret", 0, 0);
        assert_eq!(derived, derive_cra_key("salt", "secret", 1000, 256));
        assert_ne!(derived, derive_cra_key("salt", "secret", 1, 256));
        assert_ne!(derived, derive_cra_key("other", "secret", 1000, 256));
    }

    #[test]
    fn generates_challenge_with_auth_details() {
        let mut rng = StdRng::seed_from_u64(1);
        let challenge = generate_wamp_cra_challenge(
            Id::try_from(123).unwrap(),
            "foo",
            "admin",
            "provider",
            &mut rng,
        )
        .unwrap();
        let data = serde_json::from_str::<Dictionary>(&challenge).unwrap();
        assert_eq!(data.get("authid"), Some(&Value::String("foo".to_owned())));
        assert_eq!(
            data.get("authrole"),
            Some(&Value::String("admin".to_owned()))
        );
        assert_eq!(
            data.get("authmethod"),
            Some(&Value::String("wampcra".to_owned()))
        );
        assert_eq!(data.get("session"), Some(&Value::UInt(123)));
        assert_eq!(
            data.get("nonce").and_then(Value::string).map(str::len),
            Some(32)
        );
        assert!(data.contains_key("timestamp"));
    }
}
