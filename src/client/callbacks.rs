use crate::domain::{DeliveryReport, InMessage};
use crate::transport;

use super::Target365Error;

impl DeliveryReport {
    /// Decode a delivery report callback body. Verify the request first.
    pub fn from_json(body: &str) -> Result<Self, Target365Error> {
        transport::decode_delivery_report_json(body).map_err(Target365Error::parse)
    }
}

impl InMessage {
    /// Decode an inbound message forwarded to a keyword's URL. Verify the request first.
    pub fn from_json(body: &str) -> Result<Self, Target365Error> {
        transport::decode_in_message_json(body).map_err(Target365Error::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::test_keys::PKCS8_PEM;
    use crate::auth::{RequestVerifier, Signer};

    #[test]
    fn verified_callback_decodes() {
        let body = r#"{"transactionId":"tx-1","sender":"Target365","recipient":"+4798079008","statusCode":"Ok","delivered":true,"billed":false,"smscMessageParts":1}"#;
        let uri = "https://client.example/callbacks/dlr";
        let signer = Signer::from_armored(PKCS8_PEM).unwrap();
        let authorization = signer
            .sign_header_with("target365-server", "POST", uri, body, 1_580_000_000, "n-1")
            .unwrap();

        RequestVerifier::new(signer.verifier())
            .verify_request_at(&authorization, "POST", uri, body, 1_580_000_030)
            .unwrap();
        let report = DeliveryReport::from_json(body).unwrap();
        assert_eq!(report.transaction_id, "tx-1");
        assert!(report.delivered);
    }

    #[test]
    fn malformed_callback_is_a_parse_error() {
        let err = InMessage::from_json("{").unwrap_err();
        assert_eq!(err.error_kind(), "Parse");

        let message = InMessage::from_json(
            r#"{"transactionId":"in-1","sender":"+4798079008","recipient":"2001","content":"STOP","isStopMessage":true}"#,
        )
        .unwrap();
        assert!(message.is_stop_message);
    }
}
