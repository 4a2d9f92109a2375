use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{TransportError, decode, decode_list};
use crate::domain::PublicKeyInfo;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublicKeyJson {
    name: String,
    #[serde(default)]
    expiry: Option<DateTime<Utc>>,
    #[serde(default)]
    sign_algo: String,
    #[serde(default)]
    hash_algo: String,
    public_key_string: String,
    #[serde(default)]
    not_usable_before: Option<DateTime<Utc>>,
    #[serde(default)]
    account_id: Option<i64>,
}

impl From<PublicKeyJson> for PublicKeyInfo {
    fn from(value: PublicKeyJson) -> Self {
        Self {
            name: value.name,
            expiry: value.expiry,
            sign_algo: value.sign_algo,
            hash_algo: value.hash_algo,
            public_key_string: value.public_key_string,
            not_usable_before: value.not_usable_before,
            account_id: value.account_id,
        }
    }
}

pub fn decode_public_key_json(json: &str) -> Result<PublicKeyInfo, TransportError> {
    decode::<PublicKeyJson, _>(json)
}

pub fn decode_public_keys_json(json: &str) -> Result<Vec<PublicKeyInfo>, TransportError> {
    decode_list::<PublicKeyJson, _>(json)
}
