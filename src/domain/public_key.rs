use chrono::{DateTime, Utc};

use crate::auth::{AuthError, PublicKey, Verifier};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Public key registered with the API (client keys) or used by it (server keys).
pub struct PublicKeyInfo {
    pub name: String,
    pub expiry: Option<DateTime<Utc>>,
    /// `ECDsaP256SHA256`.
    pub sign_algo: String,
    /// `SHA256`.
    pub hash_algo: String,
    /// Base64 SubjectPublicKeyInfo, without banners.
    pub public_key_string: String,
    pub not_usable_before: Option<DateTime<Utc>>,
    pub account_id: Option<i64>,
}

impl PublicKeyInfo {
    /// Parse the embedded key.
    pub fn public_key(&self) -> Result<PublicKey, AuthError> {
        PublicKey::from_armored(&self.public_key_string)
    }

    /// A verifier for requests signed with the matching private key.
    pub fn verifier(&self) -> Result<Verifier, AuthError> {
        Ok(Verifier::new(self.public_key()?))
    }
}
