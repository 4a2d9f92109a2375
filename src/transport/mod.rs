//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod keyword;
mod location;
mod lookup;
mod message;
mod public_key;
mod query;
mod strex;

use serde::de::DeserializeOwned;

pub use keyword::{decode_keyword_json, decode_keywords_json, encode_keyword_json};
pub use location::id_from_location;
pub use lookup::decode_lookup_json;
pub use message::{
    decode_delivery_report_json, decode_in_message_json, decode_out_message_json,
    encode_msisdns_json, encode_out_message_json, encode_out_messages_json,
};
pub use public_key::{decode_public_key_json, decode_public_keys_json};
pub use query::build_uri;
pub use strex::{
    decode_merchant_json, decode_merchants_json, decode_one_time_password_json,
    decode_strex_transaction_json, encode_merchant_json, encode_one_time_password_json,
    encode_strex_transaction_json,
};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid base url: {0}")]
    Url(#[from] url::ParseError),

    #[error("base url cannot carry a path: {url}")]
    CannotBeABase { url: String },
}

fn decode<W, D>(json: &str) -> Result<D, TransportError>
where
    W: DeserializeOwned,
    D: From<W>,
{
    Ok(serde_json::from_str::<W>(json)?.into())
}

fn decode_list<W, D>(json: &str) -> Result<Vec<D>, TransportError>
where
    W: DeserializeOwned,
    D: From<W>,
{
    let items: Vec<W> = serde_json::from_str(json)?;
    Ok(items.into_iter().map(D::from).collect())
}
