use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{TransportError, decode};
use crate::domain::{DeliveryMode, DeliveryReport, InMessage, OutMessage, Priority};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum TransportPriority {
    Low,
    Normal,
    High,
}

impl From<TransportPriority> for Priority {
    fn from(value: TransportPriority) -> Self {
        match value {
            TransportPriority::Low => Priority::Low,
            TransportPriority::Normal => Priority::Normal,
            TransportPriority::High => Priority::High,
        }
    }
}

impl From<Priority> for TransportPriority {
    fn from(value: Priority) -> Self {
        match value {
            Priority::Low => TransportPriority::Low,
            Priority::Normal => TransportPriority::Normal,
            Priority::High => TransportPriority::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(super) enum TransportDeliveryMode {
    AtMostOnce,
    AtLeastOnce,
}

impl From<TransportDeliveryMode> for DeliveryMode {
    fn from(value: TransportDeliveryMode) -> Self {
        match value {
            TransportDeliveryMode::AtMostOnce => DeliveryMode::AtMostOnce,
            TransportDeliveryMode::AtLeastOnce => DeliveryMode::AtLeastOnce,
        }
    }
}

impl From<DeliveryMode> for TransportDeliveryMode {
    fn from(value: DeliveryMode) -> Self {
        match value {
            DeliveryMode::AtMostOnce => TransportDeliveryMode::AtMostOnce,
            DeliveryMode::AtLeastOnce => TransportDeliveryMode::AtLeastOnce,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OutMessageJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    keyword_id: Option<String>,
    sender: String,
    recipient: String,
    content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    send_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time_to_live: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    priority: Option<TransportPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delivery_mode: Option<TransportDeliveryMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delivery_report_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_modified: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delivered: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    billed: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    custom_properties: BTreeMap<String, serde_json::Value>,
}

impl From<OutMessageJson> for OutMessage {
    fn from(value: OutMessageJson) -> Self {
        Self {
            transaction_id: value.transaction_id,
            correlation_id: value.correlation_id,
            keyword_id: value.keyword_id,
            sender: value.sender,
            recipient: value.recipient,
            content: value.content,
            send_time: value.send_time,
            time_to_live: value.time_to_live,
            priority: value.priority.map(Into::into),
            delivery_mode: value.delivery_mode.map(Into::into),
            delivery_report_url: value.delivery_report_url,
            last_modified: value.last_modified,
            created: value.created,
            status_code: value.status_code,
            delivered: value.delivered,
            billed: value.billed,
            tags: value.tags,
            custom_properties: value.custom_properties,
        }
    }
}

impl From<&OutMessage> for OutMessageJson {
    fn from(value: &OutMessage) -> Self {
        Self {
            transaction_id: value.transaction_id.clone(),
            correlation_id: value.correlation_id.clone(),
            keyword_id: value.keyword_id.clone(),
            sender: value.sender.clone(),
            recipient: value.recipient.clone(),
            content: value.content.clone(),
            send_time: value.send_time,
            time_to_live: value.time_to_live,
            priority: value.priority.map(Into::into),
            delivery_mode: value.delivery_mode.map(Into::into),
            delivery_report_url: value.delivery_report_url.clone(),
            last_modified: value.last_modified,
            created: value.created,
            status_code: value.status_code.clone(),
            delivered: value.delivered,
            billed: value.billed,
            tags: value.tags.clone(),
            custom_properties: value.custom_properties.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InMessageJson {
    transaction_id: String,
    #[serde(default)]
    keyword_id: Option<String>,
    sender: String,
    recipient: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    is_stop_message: bool,
    #[serde(default)]
    created: Option<DateTime<Utc>>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    custom_properties: BTreeMap<String, serde_json::Value>,
}

impl From<InMessageJson> for InMessage {
    fn from(value: InMessageJson) -> Self {
        Self {
            transaction_id: value.transaction_id,
            keyword_id: value.keyword_id,
            sender: value.sender,
            recipient: value.recipient,
            content: value.content,
            is_stop_message: value.is_stop_message,
            created: value.created,
            tags: value.tags,
            custom_properties: value.custom_properties,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeliveryReportJson {
    #[serde(default)]
    correlation_id: Option<String>,
    transaction_id: String,
    #[serde(default)]
    price: Option<f64>,
    sender: String,
    recipient: String,
    status_code: String,
    #[serde(default)]
    detailed_status_code: Option<String>,
    #[serde(default)]
    delivered: bool,
    #[serde(default)]
    billed: bool,
    #[serde(default)]
    smsc_transaction_id: Option<String>,
    #[serde(default)]
    smsc_message_parts: u32,
}

impl From<DeliveryReportJson> for DeliveryReport {
    fn from(value: DeliveryReportJson) -> Self {
        Self {
            correlation_id: value.correlation_id,
            transaction_id: value.transaction_id,
            price: value.price,
            sender: value.sender,
            recipient: value.recipient,
            status_code: value.status_code,
            detailed_status_code: value.detailed_status_code,
            delivered: value.delivered,
            billed: value.billed,
            smsc_transaction_id: value.smsc_transaction_id,
            smsc_message_parts: value.smsc_message_parts,
        }
    }
}

pub fn encode_out_message_json(message: &OutMessage) -> Result<String, TransportError> {
    Ok(serde_json::to_string(&OutMessageJson::from(message))?)
}

pub fn encode_out_messages_json(messages: &[OutMessage]) -> Result<String, TransportError> {
    let batch = messages.iter().map(OutMessageJson::from).collect::<Vec<_>>();
    Ok(serde_json::to_string(&batch)?)
}

pub fn encode_msisdns_json(msisdns: &[String]) -> Result<String, TransportError> {
    Ok(serde_json::to_string(msisdns)?)
}

pub fn decode_out_message_json(json: &str) -> Result<OutMessage, TransportError> {
    decode::<OutMessageJson, _>(json)
}

pub fn decode_in_message_json(json: &str) -> Result<InMessage, TransportError> {
    decode::<InMessageJson, _>(json)
}

pub fn decode_delivery_report_json(json: &str) -> Result<DeliveryReport, TransportError> {
    decode::<DeliveryReportJson, _>(json)
}
