use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{TransportError, decode};
use crate::domain::LookupResult;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupJson {
    #[serde(default)]
    created: Option<DateTime<Utc>>,
    msisdn: String,
    #[serde(default)]
    landline: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    middle_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    company_name: Option<String>,
    #[serde(default)]
    company_org_no: Option<String>,
    #[serde(default)]
    street_name: Option<String>,
    #[serde(default)]
    street_number: Option<String>,
    #[serde(default)]
    street_letter: Option<String>,
    #[serde(default)]
    zip_code: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    date_of_birth: Option<String>,
    #[serde(default)]
    age: Option<u32>,
    #[serde(default)]
    deceased_date: Option<String>,
}

impl From<LookupJson> for LookupResult {
    fn from(value: LookupJson) -> Self {
        Self {
            created: value.created,
            msisdn: value.msisdn,
            landline: value.landline,
            first_name: value.first_name,
            middle_name: value.middle_name,
            last_name: value.last_name,
            company_name: value.company_name,
            company_org_no: value.company_org_no,
            street_name: value.street_name,
            street_number: value.street_number,
            street_letter: value.street_letter,
            zip_code: value.zip_code,
            city: value.city,
            gender: value.gender,
            date_of_birth: value.date_of_birth,
            age: value.age,
            deceased_date: value.deceased_date,
        }
    }
}

pub fn decode_lookup_json(json: &str) -> Result<LookupResult, TransportError> {
    decode::<LookupJson, _>(json)
}
