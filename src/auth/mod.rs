//! Request authentication: key loading, canonical messages, ECDSA P-256 signing
//! and verification of `HMAC` authorization headers.
//!
//! Outbound requests are signed by a [`Signer`]; inbound callbacks are checked by a
//! [`Verifier`] (signature only) or a [`RequestVerifier`] (header parsing, timestamp
//! window and signature).

mod canonical;
mod codec;
mod header;
mod key;
mod signer;
mod verifier;

use std::error::Error as StdError;

pub use canonical::{build_message, content_hash};
pub use header::{
    AUTH_SCHEME, AuthorizationHeader, MAX_SIGNATURE_AGE, RequestRejection, RequestVerifier,
};
pub use key::{PrivateKey, PublicKey};
pub use signer::Signer;
pub use verifier::Verifier;

#[cfg(test)]
pub(crate) use key::tests as test_keys;

type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, thiserror::Error)]
/// Errors raised by the authentication subsystem.
///
/// A signature that simply does not match is not an error: [`Verifier::verify`]
/// reports it as `Ok(false)`.
pub enum AuthError {
    /// Key material is not valid base64/DER, or is not a P-256 key.
    #[error("key parse error: {0}")]
    KeyParse(#[source] BoxError),

    /// The signing operation or the fixed-width encoding of its output failed.
    #[error("signing error: {0}")]
    Signing(#[source] BoxError),

    /// The signature blob is structurally malformed (bad base64, wrong length).
    #[error("verification error: {0}")]
    Verification(#[source] BoxError),
}
