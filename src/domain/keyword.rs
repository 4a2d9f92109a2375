use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::validation::{Rules, Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// How inbound message text is matched against a keyword.
pub enum KeywordMode {
    #[default]
    Text,
    Wildcard,
    StartsWith,
}

impl KeywordMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Wildcard => "Wildcard",
            Self::StartsWith => "StartsWith",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Keyword routing inbound messages on a short number to a forward URL.
pub struct Keyword {
    /// Assigned by the API on creation.
    pub keyword_id: Option<String>,
    pub short_number_id: String,
    pub keyword_text: String,
    pub mode: KeywordMode,
    pub forward_url: String,
    pub enabled: bool,
    pub created: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub custom_properties: BTreeMap<String, serde_json::Value>,
}

impl Keyword {
    /// Checks for updates, which additionally need the keyword id.
    pub fn validate_for_update(&self) -> Result<(), ValidationError> {
        self.rules()
            .not_blank("keywordId", self.keyword_id.as_deref())
            .finish()
    }

    fn rules(&self) -> Rules {
        Rules::new()
            .not_blank("shortNumberId", Some(self.short_number_id.as_str()))
            .not_blank("keywordText", Some(self.keyword_text.as_str()))
            .not_blank("forwardUrl", Some(self.forward_url.as_str()))
    }
}

impl Validate for Keyword {
    fn validate(&self) -> Result<(), ValidationError> {
        self.rules().finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Filter for listing keywords; unset fields are not sent.
pub struct KeywordFilter {
    pub short_number_id: Option<String>,
    pub keyword_text: Option<String>,
    pub mode: Option<KeywordMode>,
    pub tag: Option<String>,
}

impl KeywordFilter {
    /// Query parameters in API order. Absent values are empty strings.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("shortNumberId", self.short_number_id.clone().unwrap_or_default()),
            ("keywordText", self.keyword_text.clone().unwrap_or_default()),
            (
                "mode",
                self.mode.map(|mode| mode.as_str().to_owned()).unwrap_or_default(),
            ),
            ("tag", self.tag.clone().unwrap_or_default()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword() -> Keyword {
        Keyword {
            short_number_id: "NO-0000".to_owned(),
            keyword_text: "HELLO".to_owned(),
            forward_url: "https://example.com/in".to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn keyword_requires_routing_fields() {
        assert!(keyword().validate().is_ok());

        let err = Keyword::default().validate().unwrap_err();
        assert_eq!(
            err.constraints(),
            vec![
                "shortNumberId must not be blank",
                "keywordText must not be blank",
                "forwardUrl must not be blank",
            ]
        );
    }

    #[test]
    fn update_requires_keyword_id() {
        let err = keyword().validate_for_update().unwrap_err();
        assert_eq!(err.constraints(), vec!["keywordId is required"]);

        let keyword = Keyword {
            keyword_id: Some("123".to_owned()),
            ..keyword()
        };
        assert!(keyword.validate_for_update().is_ok());
    }

    #[test]
    fn filter_keeps_parameter_order() {
        let filter = KeywordFilter {
            short_number_id: Some("NO-0000".to_owned()),
            mode: Some(KeywordMode::StartsWith),
            ..Default::default()
        };
        assert_eq!(
            filter.query_params(),
            vec![
                ("shortNumberId", "NO-0000".to_owned()),
                ("keywordText", String::new()),
                ("mode", "StartsWith".to_owned()),
                ("tag", String::new()),
            ]
        );
    }
}
