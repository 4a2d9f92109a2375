use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::TransportDeliveryMode;
use super::{TransportError, decode, decode_list};
use crate::domain::{OneTimePassword, StrexMerchant, StrexTransaction};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MerchantJson {
    merchant_id: String,
    short_number_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password: Option<String>,
}

impl From<MerchantJson> for StrexMerchant {
    fn from(value: MerchantJson) -> Self {
        Self {
            merchant_id: value.merchant_id,
            short_number_id: value.short_number_id,
            password: value.password,
        }
    }
}

impl From<&StrexMerchant> for MerchantJson {
    fn from(value: &StrexMerchant) -> Self {
        Self {
            merchant_id: value.merchant_id.clone(),
            short_number_id: value.short_number_id.clone(),
            password: value.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OneTimePasswordJson {
    transaction_id: String,
    merchant_id: String,
    recipient: String,
    sender: String,
    #[serde(default)]
    recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delivered: Option<bool>,
}

impl From<OneTimePasswordJson> for OneTimePassword {
    fn from(value: OneTimePasswordJson) -> Self {
        Self {
            transaction_id: value.transaction_id,
            merchant_id: value.merchant_id,
            recipient: value.recipient,
            sender: value.sender,
            recurring: value.recurring,
            created: value.created,
            delivered: value.delivered,
        }
    }
}

impl From<&OneTimePassword> for OneTimePasswordJson {
    fn from(value: &OneTimePassword) -> Self {
        Self {
            transaction_id: value.transaction_id.clone(),
            merchant_id: value.merchant_id.clone(),
            recipient: value.recipient.clone(),
            sender: value.sender.clone(),
            recurring: value.recurring,
            created: value.created,
            delivered: value.delivered,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StrexTransactionJson {
    transaction_id: String,
    merchant_id: String,
    short_number: String,
    recipient: String,
    price: f64,
    service_code: String,
    invoice_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    one_time_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delivery_mode: Option<TransportDeliveryMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    detailed_status_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    account_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_modified: Option<DateTime<Utc>>,
}

impl From<StrexTransactionJson> for StrexTransaction {
    fn from(value: StrexTransactionJson) -> Self {
        Self {
            transaction_id: value.transaction_id,
            merchant_id: value.merchant_id,
            short_number: value.short_number,
            recipient: value.recipient,
            price: value.price,
            service_code: value.service_code,
            invoice_text: value.invoice_text,
            one_time_password: value.one_time_password,
            delivery_mode: value.delivery_mode.map(Into::into),
            status_code: value.status_code,
            detailed_status_code: value.detailed_status_code,
            account_id: value.account_id,
            created: value.created,
            last_modified: value.last_modified,
        }
    }
}

impl From<&StrexTransaction> for StrexTransactionJson {
    fn from(value: &StrexTransaction) -> Self {
        Self {
            transaction_id: value.transaction_id.clone(),
            merchant_id: value.merchant_id.clone(),
            short_number: value.short_number.clone(),
            recipient: value.recipient.clone(),
            price: value.price,
            service_code: value.service_code.clone(),
            invoice_text: value.invoice_text.clone(),
            one_time_password: value.one_time_password.clone(),
            delivery_mode: value.delivery_mode.map(Into::into),
            status_code: value.status_code.clone(),
            detailed_status_code: value.detailed_status_code.clone(),
            account_id: value.account_id,
            created: value.created,
            last_modified: value.last_modified,
        }
    }
}

pub fn encode_merchant_json(merchant: &StrexMerchant) -> Result<String, TransportError> {
    Ok(serde_json::to_string(&MerchantJson::from(merchant))?)
}

pub fn decode_merchant_json(json: &str) -> Result<StrexMerchant, TransportError> {
    decode::<MerchantJson, _>(json)
}

pub fn decode_merchants_json(json: &str) -> Result<Vec<StrexMerchant>, TransportError> {
    decode_list::<MerchantJson, _>(json)
}

pub fn encode_one_time_password_json(otp: &OneTimePassword) -> Result<String, TransportError> {
    Ok(serde_json::to_string(&OneTimePasswordJson::from(otp))?)
}

pub fn decode_one_time_password_json(json: &str) -> Result<OneTimePassword, TransportError> {
    decode::<OneTimePasswordJson, _>(json)
}

pub fn encode_strex_transaction_json(
    transaction: &StrexTransaction,
) -> Result<String, TransportError> {
    Ok(serde_json::to_string(&StrexTransactionJson::from(transaction))?)
}

pub fn decode_strex_transaction_json(json: &str) -> Result<StrexTransaction, TransportError> {
    decode::<StrexTransactionJson, _>(json)
}
