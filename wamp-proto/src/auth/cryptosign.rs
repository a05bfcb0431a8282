use anyhow::{
    Error,
    Result,
};
use ed25519_dalek::{
    KEYPAIR_LENGTH,
    SECRET_KEY_LENGTH,
    Signature,
    Signer,
    SigningKey,
    Verifier,
    VerifyingKey,
};
use rand::RngCore;

use crate::{
    auth::authenticator::AuthenticationError,
    core::types::{
        Dictionary,
        Value,
    },
    message::message::{
        AuthenticateMessage,
        ChallengeMessage,
    },
};

/// An authenticator for cryptosign authentication.
///
/// The router issues a random challenge, which the client signs with its Ed25519 private key. The
/// public key travels in the HELLO authentication extra.
#[derive(Debug, Clone)]
pub struct CryptosignAuthenticator {
    pub auth_id: String,
    pub auth_extra: Dictionary,
    private_key: String,
}

impl CryptosignAuthenticator {
    /// Creates a new cryptosign authenticator.
    ///
    /// The private key is hex-encoded, either a 32-byte seed or a 64-byte seed followed by the
    /// public key. `pubkey` is filled into the authentication extra when the caller does not
    /// supply it.
    pub fn new(auth_id: String, auth_extra: Dictionary, private_key: String) -> Result<Self> {
        let mut auth_extra = auth_extra;
        if !auth_extra.contains_key("pubkey") {
            auth_extra.insert(
                "pubkey".to_owned(),
                Value::String(get_public_key(&private_key)?),
            );
        }
        Ok(Self {
            auth_id,
            auth_extra,
            private_key,
        })
    }

    pub fn authenticate(&self, challenge: &ChallengeMessage) -> Result<AuthenticateMessage> {
        let challenge_hex = challenge
            .extra
            .get("challenge")
            .and_then(Value::string)
            .ok_or(AuthenticationError::MissingChallengeData("challenge"))?;
        let signature = sign_cryptosign_challenge(challenge_hex, &self.private_key)?;
        Ok(AuthenticateMessage {
            // The challenge rides along behind the signature so the verifier
            // can recover both from one string.
            signature: signature + challenge_hex,
            extra: Dictionary::default(),
        })
    }
}

fn signing_key(private_key: &str) -> Result<SigningKey> {
    let bytes = hex::decode(private_key)?;
    if bytes.len() != SECRET_KEY_LENGTH && bytes.len() != KEYPAIR_LENGTH {
        return Err(Error::msg("cryptosign private key must be 32 or 64 bytes"));
    }
    let seed = <[u8; SECRET_KEY_LENGTH]>::try_from(&bytes[..SECRET_KEY_LENGTH])?;
    Ok(SigningKey::from_bytes(&seed))
}

/// The hex-encoded public key corresponding to a hex-encoded private key.
///
/// A 64-byte private key carries its public key in the back half. A 32-byte seed derives it.
pub fn get_public_key(private_key: &str) -> Result<String> {
    let bytes = hex::decode(private_key)?;
    match bytes.len() {
        SECRET_KEY_LENGTH => {
            let seed = <[u8; SECRET_KEY_LENGTH]>::try_from(&bytes[..])?;
            Ok(hex::encode(
                SigningKey::from_bytes(&seed).verifying_key().to_bytes(),
            ))
        }
        KEYPAIR_LENGTH => Ok(hex::encode(&bytes[SECRET_KEY_LENGTH..])),
        _ => Err(Error::msg("cryptosign private key must be 32 or 64 bytes")),
    }
}

/// Signs a hex-encoded cryptosign challenge, producing a hex-encoded Ed25519 signature.
pub fn sign_cryptosign_challenge(challenge: &str, private_key: &str) -> Result<String> {
    let challenge = hex::decode(challenge)?;
    Ok(hex::encode(
        signing_key(private_key)?.sign(&challenge).to_bytes(),
    ))
}

/// Verifies a cryptosign signature, which carries the hex-encoded Ed25519 signature followed by
/// the hex-encoded challenge it covers.
pub fn verify_cryptosign_signature(signature: &str, public_key: &[u8]) -> Result<bool> {
    if signature.len() < 2 * Signature::BYTE_SIZE {
        return Err(Error::msg(
            "cryptosign signature must carry at least 64 signature bytes",
        ));
    }
    // Split on raw bytes, since the boundary may fall inside a multibyte
    // character. Non-hex content fails the decode below.
    let (signature_hex, challenge_hex) = signature.as_bytes().split_at(2 * Signature::BYTE_SIZE);
    let signature = Signature::from_slice(&hex::decode(signature_hex)?)?;
    let challenge = hex::decode(challenge_hex)?;
    let verifying_key = VerifyingKey::try_from(public_key)?;
    Ok(verifying_key.verify(&challenge, &signature).is_ok())
}

/// Generates a 32-byte cryptosign challenge, hex-encoded.
pub fn generate_cryptosign_challenge<R: RngCore>(rng: &mut R) -> String {
    let mut challenge = [0; 32];
    rng.fill_bytes(&mut challenge);
    hex::encode(challenge)
}

/// Generates a new Ed25519 key pair, producing hex-encoded public and private keys.
pub fn generate_cryptosign_key_pair<R: RngCore>(rng: &mut R) -> (String, String) {
    let mut seed = [0; SECRET_KEY_LENGTH];
    rng.fill_bytes(&mut seed);
    let signing_key = SigningKey::from_bytes(&seed);
    (
        hex::encode(signing_key.verifying_key().to_bytes()),
        hex::encode(signing_key.to_keypair_bytes()),
    )
}
