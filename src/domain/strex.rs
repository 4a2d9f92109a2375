//! Strex mobile payments: merchants, one-time passwords and transactions.

use chrono::{DateTime, Utc};

use crate::domain::message::DeliveryMode;
use crate::domain::validation::{Rules, Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Strex merchant registration bound to a short number.
pub struct StrexMerchant {
    pub merchant_id: String,
    pub short_number_id: String,
    /// Write-only; never returned by the API.
    pub password: Option<String>,
}

impl Validate for StrexMerchant {
    fn validate(&self) -> Result<(), ValidationError> {
        Rules::new()
            .not_blank("merchantId", Some(self.merchant_id.as_str()))
            .not_blank("shortNumberId", Some(self.short_number_id.as_str()))
            .optional_not_blank("password", self.password.as_deref())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// One-time password sent to a payer before a Strex transaction.
pub struct OneTimePassword {
    pub transaction_id: String,
    pub merchant_id: String,
    pub recipient: String,
    pub sender: String,
    pub recurring: bool,
    pub created: Option<DateTime<Utc>>,
    pub delivered: Option<bool>,
}

impl Validate for OneTimePassword {
    fn validate(&self) -> Result<(), ValidationError> {
        Rules::new()
            .not_blank("transactionId", Some(self.transaction_id.as_str()))
            .not_blank("merchantId", Some(self.merchant_id.as_str()))
            .not_blank("recipient", Some(self.recipient.as_str()))
            .not_blank("sender", Some(self.sender.as_str()))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Strex payment charged to the recipient's phone bill.
pub struct StrexTransaction {
    pub transaction_id: String,
    pub merchant_id: String,
    pub short_number: String,
    pub recipient: String,
    /// Price in NOK.
    pub price: f64,
    pub service_code: String,
    pub invoice_text: String,
    pub one_time_password: Option<String>,
    pub delivery_mode: Option<DeliveryMode>,
    pub status_code: Option<String>,
    pub detailed_status_code: Option<String>,
    pub account_id: Option<i64>,
    pub created: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
}

impl Validate for StrexTransaction {
    fn validate(&self) -> Result<(), ValidationError> {
        Rules::new()
            .not_blank("transactionId", Some(self.transaction_id.as_str()))
            .not_blank("merchantId", Some(self.merchant_id.as_str()))
            .not_blank("shortNumber", Some(self.short_number.as_str()))
            .not_blank("recipient", Some(self.recipient.as_str()))
            .positive("price", self.price)
            .not_blank("serviceCode", Some(self.service_code.as_str()))
            .not_blank("invoiceText", Some(self.invoice_text.as_str()))
            .optional_not_blank("oneTimePassword", self.one_time_password.as_deref())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_validation_lists_every_violation() {
        let err = StrexTransaction {
            transaction_id: "t-1".to_owned(),
            merchant_id: "mer_test".to_owned(),
            price: -1.0,
            one_time_password: Some(String::new()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();

        assert_eq!(
            err.constraints(),
            vec![
                "shortNumber must not be blank",
                "recipient must not be blank",
                "price must be greater than zero",
                "serviceCode must not be blank",
                "invoiceText must not be blank",
                "oneTimePassword must not be blank",
            ]
        );
    }

    #[test]
    fn merchant_and_otp_validation() {
        let merchant = StrexMerchant {
            merchant_id: "mer_test".to_owned(),
            short_number_id: "NO-2001".to_owned(),
            password: None,
        };
        assert!(merchant.validate().is_ok());

        let err = OneTimePassword {
            transaction_id: "t-1".to_owned(),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.violations().len(), 3);
    }
}
