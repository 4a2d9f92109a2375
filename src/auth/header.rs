use std::fmt;
use std::time::{Duration, SystemTime, SystemTimeError};

use tracing::warn;

use super::{AuthError, Verifier};

/// Scheme prefix of the `Authorization` header value.
pub const AUTH_SCHEME: &str = "HMAC";

/// Signatures older (or further in the future) than this are rejected.
pub const MAX_SIGNATURE_AGE: Duration = Duration::from_secs(5 * 60);

/// Parsed `Authorization` header: `HMAC <keyName>:<timestamp>:<nonce>:<signature>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationHeader {
    pub key_name: String,
    pub timestamp: u64,
    pub nonce: String,
    pub signature: String,
}

impl AuthorizationHeader {
    /// Parse a header value. Key name and nonce must not contain `:`.
    pub fn parse(value: &str) -> Result<Self, RequestRejection> {
        let rest = value
            .trim()
            .strip_prefix(AUTH_SCHEME)
            .and_then(|rest| rest.strip_prefix(' '))
            .ok_or(RequestRejection::MalformedHeader {
                reason: "missing HMAC scheme",
            })?;

        let mut parts = rest.split(':');
        let (Some(key_name), Some(timestamp), Some(nonce), Some(signature), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return Err(RequestRejection::MalformedHeader {
                reason: "expected four colon-separated fields",
            });
        };

        if key_name.is_empty() || nonce.is_empty() || signature.is_empty() {
            return Err(RequestRejection::MalformedHeader {
                reason: "empty field",
            });
        }
        // the signed message carries the timestamp text, so only its canonical form is accepted
        let canonical = timestamp.bytes().all(|byte| byte.is_ascii_digit())
            && (timestamp == "0" || !timestamp.starts_with('0'));
        let timestamp = timestamp
            .parse::<u64>()
            .ok()
            .filter(|_| canonical)
            .ok_or(RequestRejection::MalformedHeader {
                reason: "timestamp is not a canonical decimal number",
            })?;

        Ok(Self {
            key_name: key_name.to_owned(),
            timestamp,
            nonce: nonce.to_owned(),
            signature: signature.to_owned(),
        })
    }
}

impl fmt::Display for AuthorizationHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{AUTH_SCHEME} {}:{}:{}:{}",
            self.key_name, self.timestamp, self.nonce, self.signature
        )
    }
}

#[derive(Debug, thiserror::Error)]
/// Reasons an inbound signed request is rejected by [`RequestVerifier`].
pub enum RequestRejection {
    #[error("malformed authorization header: {reason}")]
    MalformedHeader { reason: &'static str },

    #[error("unexpected key name: {key_name}")]
    UnexpectedKeyName { key_name: String },

    #[error("timestamp {timestamp} is older than cutoff {cutoff}")]
    TimestampTooOld { timestamp: u64, cutoff: u64 },

    #[error("timestamp {timestamp} is later than cutoff {cutoff}")]
    TimestampInFuture { timestamp: u64, cutoff: u64 },

    #[error("signature does not match request")]
    BadSignature,

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Verifies complete inbound requests: header syntax, timestamp window, then signature.
///
/// Nonces are not tracked; replay protection is limited to [`MAX_SIGNATURE_AGE`].
#[derive(Debug, Clone)]
pub struct RequestVerifier {
    verifier: Verifier,
    key_name: Option<String>,
    max_age: Duration,
}

impl RequestVerifier {
    pub fn new(verifier: Verifier) -> Self {
        Self {
            verifier,
            key_name: None,
            max_age: MAX_SIGNATURE_AGE,
        }
    }

    /// Only accept headers signed under `key_name`.
    pub fn expect_key_name(mut self, key_name: impl Into<String>) -> Self {
        self.key_name = Some(key_name.into());
        self
    }

    /// Verify a request against the current system time.
    pub fn verify_request(
        &self,
        authorization: &str,
        method: &str,
        uri: &str,
        content: &str,
    ) -> Result<AuthorizationHeader, RequestRejection> {
        let now = unix_now().map_err(|err| AuthError::Verification(Box::new(err)))?;
        self.verify_request_at(authorization, method, uri, content, now)
    }

    /// Verify a request as of `now` (Unix seconds).
    pub fn verify_request_at(
        &self,
        authorization: &str,
        method: &str,
        uri: &str,
        content: &str,
        now: u64,
    ) -> Result<AuthorizationHeader, RequestRejection> {
        let result = self.check(authorization, method, uri, content, now);
        if let Err(err) = &result {
            warn!(%method, %uri, error = %err, "rejected signed request");
        }
        result
    }

    fn check(
        &self,
        authorization: &str,
        method: &str,
        uri: &str,
        content: &str,
        now: u64,
    ) -> Result<AuthorizationHeader, RequestRejection> {
        let header = AuthorizationHeader::parse(authorization)?;

        if self
            .key_name
            .as_ref()
            .is_some_and(|expected| *expected != header.key_name)
        {
            return Err(RequestRejection::UnexpectedKeyName {
                key_name: header.key_name,
            });
        }

        let max_age = self.max_age.as_secs();
        let cutoff = now.saturating_sub(max_age);
        if header.timestamp < cutoff {
            return Err(RequestRejection::TimestampTooOld {
                timestamp: header.timestamp,
                cutoff,
            });
        }
        let cutoff = now.saturating_add(max_age);
        if header.timestamp > cutoff {
            return Err(RequestRejection::TimestampInFuture {
                timestamp: header.timestamp,
                cutoff,
            });
        }

        let valid = self.verifier.verify_header(
            method,
            uri,
            header.timestamp,
            &header.nonce,
            content,
            &header.signature,
        )?;
        if !valid {
            return Err(RequestRejection::BadSignature);
        }
        Ok(header)
    }
}

pub(crate) fn unix_now() -> Result<u64, SystemTimeError> {
    Ok(SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)?
        .as_secs())
}
