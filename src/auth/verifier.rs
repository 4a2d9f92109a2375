use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use p256::ecdsa::Signature;
use p256::ecdsa::signature::Verifier as _;

use super::codec::fixed_to_der;
use super::key::PublicKey;
use super::{AuthError, build_message};

/// Verifies `r || s` signatures over canonical request messages.
#[derive(Debug, Clone)]
pub struct Verifier {
    key: PublicKey,
}

impl Verifier {
    pub fn new(key: PublicKey) -> Self {
        Self { key }
    }

    /// Load the public key from armored text and create a verifier.
    pub fn from_armored(public_key: &str) -> Result<Self, AuthError> {
        Ok(Self::new(PublicKey::from_armored(public_key)?))
    }

    /// Check `signature` (base64 of 64 bytes) over `message`.
    ///
    /// Returns `Ok(false)` for a well-formed signature that does not match, and
    /// [`AuthError::Verification`] when the blob is not base64 or not 64 bytes long.
    pub fn verify(&self, message: &str, signature: &str) -> Result<bool, AuthError> {
        let raw = STANDARD
            .decode(signature)
            .map_err(|err| AuthError::Verification(Box::new(err)))?;
        let der = fixed_to_der(&raw).map_err(|err| AuthError::Verification(Box::new(err)))?;

        // zero or out-of-range scalars cannot form a signature
        let Ok(signature) = Signature::from_der(&der) else {
            return Ok(false);
        };
        Ok(self
            .key
            .verifying_key()
            .verify(message.as_bytes(), &signature)
            .is_ok())
    }

    /// Rebuild the canonical message from request parts and verify `signature` over it.
    pub fn verify_header(
        &self,
        method: &str,
        uri: &str,
        timestamp: u64,
        nonce: &str,
        content: &str,
        signature: &str,
    ) -> Result<bool, AuthError> {
        let message = build_message(method, uri, timestamp, nonce, content);
        self.verify(&message, signature)
    }
}
