use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Address lookup result for a mobile number.
pub struct LookupResult {
    pub created: Option<DateTime<Utc>>,
    pub msisdn: String,
    pub landline: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub company_org_no: Option<String>,
    pub street_name: Option<String>,
    pub street_number: Option<String>,
    pub street_letter: Option<String>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
    pub gender: Option<String>,
    /// `YYYY-MM-DD` as returned by the API.
    pub date_of_birth: Option<String>,
    pub age: Option<u32>,
    pub deceased_date: Option<String>,
}
