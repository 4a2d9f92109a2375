use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use p256::ecdsa::DerSignature;
use p256::ecdsa::signature::Signer as _;
use uuid::Uuid;

use super::codec::der_to_fixed;
use super::header::{AuthorizationHeader, unix_now};
use super::key::PrivateKey;
use super::verifier::Verifier;
use super::{AuthError, build_message};

/// Signs canonical request messages with a P-256 private key.
#[derive(Clone)]
pub struct Signer {
    key: PrivateKey,
}

impl Signer {
    /// Create a signer owning `key`.
    pub fn new(key: PrivateKey) -> Self {
        Self { key }
    }

    /// Load the private key from armored text and create a signer.
    pub fn from_armored(private_key: &str) -> Result<Self, AuthError> {
        Ok(Self::new(PrivateKey::from_armored(private_key)?))
    }

    /// A verifier for signatures produced by this signer.
    pub fn verifier(&self) -> Verifier {
        Verifier::new(self.key.public_key())
    }

    /// Sign `message` and return the base64 of the 64-byte `r || s` signature.
    ///
    /// ECDSA nonces are derived per RFC 6979, so equal keys and messages give equal output.
    pub fn sign(&self, message: &str) -> Result<String, AuthError> {
        let der: DerSignature = self
            .key
            .signing_key()
            .try_sign(message.as_bytes())
            .map_err(|err| AuthError::Signing(Box::new(err)))?;
        let fixed = der_to_fixed(der.as_bytes()).map_err(|err| AuthError::Signing(Box::new(err)))?;
        Ok(STANDARD.encode(fixed))
    }

    /// Produce an `Authorization` header value for a request, using the current time and a
    /// fresh UUID v4 nonce.
    pub fn sign_header(
        &self,
        key_name: &str,
        method: &str,
        uri: &str,
        content: &str,
    ) -> Result<String, AuthError> {
        let timestamp = unix_now().map_err(|err| AuthError::Signing(Box::new(err)))?;
        let nonce = Uuid::new_v4().to_string();
        self.sign_header_with(key_name, method, uri, content, timestamp, &nonce)
    }

    /// Same as [`Signer::sign_header`] with an explicit timestamp and nonce.
    pub fn sign_header_with(
        &self,
        key_name: &str,
        method: &str,
        uri: &str,
        content: &str,
        timestamp: u64,
        nonce: &str,
    ) -> Result<String, AuthError> {
        let message = build_message(method, uri, timestamp, nonce, content);
        let header = AuthorizationHeader {
            key_name: key_name.to_owned(),
            timestamp,
            nonce: nonce.to_owned(),
            signature: self.sign(&message)?,
        };
        Ok(header.to_string())
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::auth::key::tests::{PKCS8_PEM, SEC1_PEM};

    fn signer() -> Signer {
        Signer::from_armored(PKCS8_PEM).unwrap()
    }

    fn decoded_len(signature: &str) -> usize {
        STANDARD.decode(signature).unwrap().len()
    }

    #[test]
    fn signatures_are_always_64_bytes() {
        let signer = signer();
        for idx in 0..1200 {
            let message = format!("get https://test.example/api/{idx} {}", Uuid::new_v4());
            let signature = signer.sign(&message).unwrap();
            assert_eq!(decoded_len(&signature), 64, "message {idx}");
        }
    }

    #[test]
    fn signing_is_deterministic_across_key_armor() {
        let message = build_message(
            "get",
            "https://test.example/api/ping",
            1580000000,
            "abc-123",
            "",
        );
        let bare = PKCS8_PEM
            .lines()
            .filter(|line| !line.starts_with("-----"))
            .collect::<String>();

        let armored = signer().sign(&message).unwrap();
        let stripped = Signer::from_armored(&bare).unwrap().sign(&message).unwrap();
        let sec1 = Signer::from_armored(SEC1_PEM).unwrap().sign(&message).unwrap();
        assert_eq!(armored, stripped);
        assert_eq!(armored, sec1);
    }

    #[test]
    fn sign_header_with_renders_wire_format() {
        let header = signer()
            .sign_header_with(
                "JavaSdkTest",
                "GET",
                "https://test.example/api/ping",
                "",
                1580000000,
                "3f29c4d2-0000-4000-8000-000000000000",
            )
            .unwrap();

        let rest = header.strip_prefix("HMAC ").unwrap();
        let parts = rest.split(':').collect::<Vec<_>>();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "JavaSdkTest");
        assert_eq!(parts[1], "1580000000");
        assert_eq!(parts[2], "3f29c4d2-0000-4000-8000-000000000000");
        assert_eq!(decoded_len(parts[3]), 64);
    }

    #[test]
    fn sign_header_uses_fresh_nonce_and_current_time() {
        let signer = signer();
        let before = unix_now().unwrap();
        let first = AuthorizationHeader::parse(
            &signer.sign_header("key", "get", "https://x/api/ping", "").unwrap(),
        )
        .unwrap();
        let second = AuthorizationHeader::parse(
            &signer.sign_header("key", "get", "https://x/api/ping", "").unwrap(),
        )
        .unwrap();
        let after = unix_now().unwrap();

        assert_ne!(first.nonce, second.nonce);
        assert!(Uuid::parse_str(&first.nonce).is_ok());
        assert!((before..=after).contains(&first.timestamp));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn signed_messages_verify(
            method in "(GET|POST|PUT|DELETE)",
            path in "[a-zA-Z0-9/_-]{0,40}",
            timestamp in 0u64..4_000_000_000,
            nonce in "[a-f0-9-]{1,36}",
            body in ".{0,64}",
        ) {
            let signer = signer();
            let uri = format!("https://shared.target365.io/{path}");
            let message = build_message(&method, &uri, timestamp, &nonce, &body);
            let signature = signer.sign(&message).unwrap();

            prop_assert_eq!(decoded_len(&signature), 64);
            prop_assert!(signer.verifier().verify(&message, &signature).unwrap());
        }
    }
}
