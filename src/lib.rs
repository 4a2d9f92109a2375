//! Typed Rust client for the Target365 messaging and Strex payment API.
//!
//! The crate is layered: a domain layer of records, strong types and validation, a
//! transport layer for wire-format details, an auth layer that signs and verifies
//! `HMAC` authorization headers with ECDSA P-256, and a small client layer
//! dispatching signed requests.
//!
//! ```rust,no_run
//! use target365::{OutMessage, Target365Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), target365::Target365Error> {
//!     let private_key = std::fs::read_to_string("private.pem").unwrap_or_default();
//!     let client = Target365Client::new("my-key", &private_key)?;
//!     let message = OutMessage {
//!         sender: "Target365".to_owned(),
//!         recipient: "+4798079008".to_owned(),
//!         content: "Hello World".to_owned(),
//!         ..Default::default()
//!     };
//!     let _transaction_id = client.create_out_message(&message).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod domain;
mod transport;

pub use auth::{AuthError, RequestRejection, RequestVerifier, Signer, Verifier};
pub use client::{
    ApiRequest, ResponseHandlers, Target365Client, Target365ClientBuilder, Target365Error,
};
pub use domain::{
    DeliveryMode, DeliveryReport, InMessage, KeyName, Keyword, KeywordFilter, KeywordMode,
    LookupResult, Msisdn, OneTimePassword, OutMessage, Priority, PublicKeyInfo, StrexMerchant,
    StrexTransaction, Validate, ValidationError,
};
