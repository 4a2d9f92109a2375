use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use p256::ecdsa::{SigningKey, VerifyingKey};
use p256::pkcs8::{DecodePrivateKey, DecodePublicKey};

use super::AuthError;

/// P-256 private key used to sign outbound requests.
///
/// Accepts PKCS#8 (`PRIVATE KEY`) and SEC1 (`EC PRIVATE KEY`) DER, armored or bare.
#[derive(Clone)]
pub struct PrivateKey(SigningKey);

impl PrivateKey {
    /// Parse a private key from armored text.
    ///
    /// Banner lines and all whitespace (including `\r\n`) are ignored, so the same key
    /// loads identically with or without `-----BEGIN ...-----` framing.
    pub fn from_armored(text: &str) -> Result<Self, AuthError> {
        let der = dearmor(text)?;
        Self::from_der(&der)
    }

    /// Parse a private key from DER bytes (PKCS#8 first, then SEC1).
    pub fn from_der(der: &[u8]) -> Result<Self, AuthError> {
        match SigningKey::from_pkcs8_der(der) {
            Ok(key) => Ok(Self(key)),
            Err(pkcs8_err) => p256::SecretKey::from_sec1_der(der)
                .map(|secret| Self(SigningKey::from(secret)))
                .map_err(|_| AuthError::KeyParse(Box::new(pkcs8_err))),
        }
    }

    /// The matching public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.verifying_key().clone())
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey").finish_non_exhaustive()
    }
}

/// P-256 public key used to verify inbound signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey(VerifyingKey);

impl PublicKey {
    /// Parse a SubjectPublicKeyInfo key from armored text (`PUBLIC KEY` / `EC PUBLIC KEY`).
    pub fn from_armored(text: &str) -> Result<Self, AuthError> {
        let der = dearmor(text)?;
        Self::from_der(&der)
    }

    /// Parse a SubjectPublicKeyInfo key from DER bytes.
    pub fn from_der(der: &[u8]) -> Result<Self, AuthError> {
        VerifyingKey::from_public_key_der(der)
            .map(Self)
            .map_err(|err| AuthError::KeyParse(Box::new(err)))
    }

    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.0
    }
}

fn dearmor(text: &str) -> Result<Vec<u8>, AuthError> {
    let body = strip_banners(text)
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect::<String>();

    STANDARD
        .decode(body)
        .map_err(|err| AuthError::KeyParse(Box::new(err)))
}

/// Remove `-----BEGIN ...-----` / `-----END ...-----` markers wherever they appear,
/// including keys flattened onto a single line.
fn strip_banners(text: &str) -> String {
    const MARKER: &str = "-----";

    let mut body = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(MARKER) {
        body.push_str(&rest[..start]);
        let label = &rest[start + MARKER.len()..];
        rest = match label.find(MARKER) {
            Some(end) => &label[end + MARKER.len()..],
            None => "",
        };
    }
    body.push_str(rest);
    body
}
