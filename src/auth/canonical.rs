use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};

/// Build the canonical message that is signed for a request.
///
/// The message is `lower(method) + lower(uri) + timestamp + nonce + content_hash(body)`
/// with no separators. The URI is lowercased as a whole, query values included.
pub fn build_message(method: &str, uri: &str, timestamp: u64, nonce: &str, body: &str) -> String {
    let hash = content_hash(body);

    let mut message =
        String::with_capacity(method.len() + uri.len() + 20 + nonce.len() + hash.len());
    message.push_str(&method.to_lowercase());
    message.push_str(&uri.to_lowercase());
    message.push_str(&timestamp.to_string());
    message.push_str(nonce);
    message.push_str(&hash);
    message
}

/// Base64 SHA-256 of the request body, or an empty string when the body is empty.
///
/// An empty body is not hashed at all.
pub fn content_hash(body: &str) -> String {
    if body.is_empty() {
        return String::new();
    }
    STANDARD.encode(Sha256::digest(body.as_bytes()))
}
