use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::validation::{Rules, Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Low,
    Normal,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryMode {
    AtMostOnce,
    AtLeastOnce,
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Outbound SMS.
pub struct OutMessage {
    /// Client-chosen unique id; assigned by the API when omitted.
    pub transaction_id: Option<String>,
    pub correlation_id: Option<String>,
    pub keyword_id: Option<String>,
    pub sender: String,
    pub recipient: String,
    pub content: String,
    pub send_time: Option<DateTime<Utc>>,
    /// Minutes, `5..=10080`.
    pub time_to_live: Option<u32>,
    pub priority: Option<Priority>,
    pub delivery_mode: Option<DeliveryMode>,
    pub delivery_report_url: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub created: Option<DateTime<Utc>>,
    pub status_code: Option<String>,
    pub delivered: Option<bool>,
    pub billed: Option<bool>,
    pub tags: Vec<String>,
    pub custom_properties: BTreeMap<String, serde_json::Value>,
}

impl OutMessage {
    pub const MIN_TIME_TO_LIVE: u32 = 5;
    pub const MAX_TIME_TO_LIVE: u32 = 10080;

    /// Checks for updates, which need the transaction id.
    pub fn validate_for_update(&self) -> Result<(), ValidationError> {
        self.rules()
            .required("transactionId", self.transaction_id.as_ref())
            .finish()
    }

    fn rules(&self) -> Rules {
        Rules::new()
            .optional_not_blank("transactionId", self.transaction_id.as_deref())
            .not_blank("sender", Some(self.sender.as_str()))
            .not_blank("recipient", Some(self.recipient.as_str()))
            .not_blank("content", Some(self.content.as_str()))
            .in_range(
                "timeToLive",
                self.time_to_live,
                Self::MIN_TIME_TO_LIVE,
                Self::MAX_TIME_TO_LIVE,
            )
            .optional_not_blank("deliveryReportUrl", self.delivery_report_url.as_deref())
    }
}

impl Validate for OutMessage {
    fn validate(&self) -> Result<(), ValidationError> {
        self.rules().finish()
    }
}

impl Validate for [OutMessage] {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut rules = Rules::new();
        if self.is_empty() {
            rules = rules.required::<OutMessage>("messages", None);
        }
        self.iter()
            .fold(rules, |rules, message| rules.nested(message.validate()))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Inbound SMS forwarded to a keyword's URL.
pub struct InMessage {
    pub transaction_id: String,
    pub keyword_id: Option<String>,
    pub sender: String,
    pub recipient: String,
    pub content: String,
    pub is_stop_message: bool,
    pub created: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub custom_properties: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Delivery report posted to an out-message's `deliveryReportUrl`.
pub struct DeliveryReport {
    pub correlation_id: Option<String>,
    pub transaction_id: String,
    pub price: Option<f64>,
    pub sender: String,
    pub recipient: String,
    pub status_code: String,
    pub detailed_status_code: Option<String>,
    pub delivered: bool,
    pub billed: bool,
    pub smsc_transaction_id: Option<String>,
    pub smsc_message_parts: u32,
}
