use crate::domain::validation::{Rules, ValidationError, Violation};

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Name of the client key registered with Target365; first field of the `Authorization` header.
///
/// Invariant: non-empty after trimming, no `:`.
pub struct KeyName(String);

impl KeyName {
    pub const FIELD: &'static str = "keyName";

    /// Create a validated [`KeyName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        Rules::new()
            .not_blank(Self::FIELD, Some(trimmed))
            .without_char(Self::FIELD, trimmed, ':')
            .finish()?;
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Mobile number normalized to E.164 (`+4798079008`).
pub struct Msisdn(String);

impl Msisdn {
    /// Query/field name used by the API (`msisdn`).
    pub const FIELD: &'static str = "msisdn";

    /// Parse and normalize a phone number.
    ///
    /// `default_region` is used when the input has no explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim();
        if raw.is_empty() {
            return Err(ValidationError::single(Violation::Blank { field: Self::FIELD }));
        }

        let parsed = phonenumber::parse(default_region, raw).map_err(|_| {
            ValidationError::single(Violation::InvalidPhoneNumber {
                field: Self::FIELD,
                input: raw.to_owned(),
            })
        })?;

        Ok(Self(
            phonenumber::format(&parsed)
                .mode(phonenumber::Mode::E164)
                .to_string(),
        ))
    }

    /// The E.164 representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_name_trims_and_rejects_colons() {
        assert_eq!(KeyName::new(" JavaSdkTest ").unwrap().as_str(), "JavaSdkTest");
        assert!(KeyName::new("  ").is_err());

        let err = KeyName::new("a:b").unwrap_err();
        assert_eq!(
            err.violations(),
            &[Violation::ForbiddenCharacter {
                field: "keyName",
                character: ':'
            }]
        );
    }

    #[test]
    fn msisdn_is_normalized_to_e164() {
        let with_prefix = Msisdn::parse(None, "+47 980 79 008").unwrap();
        let with_region = Msisdn::parse(Some(country::Id::NO), "98079008").unwrap();
        assert_eq!(with_prefix.as_str(), "+4798079008");
        assert_eq!(with_prefix, with_region);

        assert!(Msisdn::parse(None, "not-a-number").is_err());
        assert!(Msisdn::parse(None, " ").is_err());
    }
}
