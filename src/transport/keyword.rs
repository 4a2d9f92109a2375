use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{TransportError, decode, decode_list};
use crate::domain::{Keyword, KeywordMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum TransportKeywordMode {
    Text,
    Wildcard,
    StartsWith,
}

impl From<TransportKeywordMode> for KeywordMode {
    fn from(value: TransportKeywordMode) -> Self {
        match value {
            TransportKeywordMode::Text => KeywordMode::Text,
            TransportKeywordMode::Wildcard => KeywordMode::Wildcard,
            TransportKeywordMode::StartsWith => KeywordMode::StartsWith,
        }
    }
}

impl From<KeywordMode> for TransportKeywordMode {
    fn from(value: KeywordMode) -> Self {
        match value {
            KeywordMode::Text => TransportKeywordMode::Text,
            KeywordMode::Wildcard => TransportKeywordMode::Wildcard,
            KeywordMode::StartsWith => TransportKeywordMode::StartsWith,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeywordJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    keyword_id: Option<String>,
    short_number_id: String,
    keyword_text: String,
    mode: TransportKeywordMode,
    forward_url: String,
    #[serde(default)]
    enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_modified: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    custom_properties: BTreeMap<String, serde_json::Value>,
}

impl From<KeywordJson> for Keyword {
    fn from(value: KeywordJson) -> Self {
        Self {
            keyword_id: value.keyword_id,
            short_number_id: value.short_number_id,
            keyword_text: value.keyword_text,
            mode: value.mode.into(),
            forward_url: value.forward_url,
            enabled: value.enabled,
            created: value.created,
            last_modified: value.last_modified,
            tags: value.tags,
            custom_properties: value.custom_properties,
        }
    }
}

impl From<&Keyword> for KeywordJson {
    fn from(value: &Keyword) -> Self {
        Self {
            keyword_id: value.keyword_id.clone(),
            short_number_id: value.short_number_id.clone(),
            keyword_text: value.keyword_text.clone(),
            mode: value.mode.into(),
            forward_url: value.forward_url.clone(),
            enabled: value.enabled,
            created: value.created,
            last_modified: value.last_modified,
            tags: value.tags.clone(),
            custom_properties: value.custom_properties.clone(),
        }
    }
}

pub fn encode_keyword_json(keyword: &Keyword) -> Result<String, TransportError> {
    Ok(serde_json::to_string(&KeywordJson::from(keyword))?)
}

pub fn decode_keyword_json(json: &str) -> Result<Keyword, TransportError> {
    decode::<KeywordJson, _>(json)
}

pub fn decode_keywords_json(json: &str) -> Result<Vec<Keyword>, TransportError> {
    decode_list::<KeywordJson, _>(json)
}
