//! Domain layer: resource records, strong types and validation (no I/O).

mod keyword;
mod lookup;
mod message;
mod public_key;
mod strex;
mod validation;
mod value;

pub use keyword::{Keyword, KeywordFilter, KeywordMode};
pub use lookup::LookupResult;
pub use message::{DeliveryMode, DeliveryReport, InMessage, OutMessage, Priority};
pub use public_key::PublicKeyInfo;
pub use strex::{OneTimePassword, StrexMerchant, StrexTransaction};
pub use validation::{Rules, Validate, ValidationError, Violation};
pub use value::{KeyName, Msisdn};
