//! Typed endpoints of the Target365 API.
//!
//! Conventions: `201 Created` carries the new id in `Location`, single-item reads map
//! `404` to `None`, and updates/deletes answer `204 No Content`.

use crate::domain::{
    InMessage, Keyword, KeywordFilter, LookupResult, Msisdn, OneTimePassword, OutMessage,
    PublicKeyInfo, Rules, StrexMerchant, StrexTransaction, Validate,
};
use crate::transport::{self, TransportError};

use super::{ApiRequest, HttpResponse, ResponseHandlers, Target365Client, Target365Error};

const PING: &str = "api/ping";
const LOOKUP: &str = "api/lookup";
const KEYWORDS: &str = "api/keywords";
const PREPARE_MSISDNS: &str = "api/prepare-msisdns";
const OUT_MESSAGES: &str = "api/out-messages";
const OUT_MESSAGES_BATCH: &str = "api/out-messages/batch";
const IN_MESSAGES: &str = "api/in-messages";
const MERCHANTS: &str = "api/strex/merchants";
const ONE_TIME_PASSWORDS: &str = "api/strex/one-time-passwords";
const STREX_TRANSACTIONS: &str = "api/strex/transactions";
const SERVER_PUBLIC_KEYS: &str = "api/server/public-keys";
const CLIENT_PUBLIC_KEYS: &str = "api/client/public-keys";

fn decode_with<T>(
    response: &HttpResponse,
    decode: fn(&str) -> Result<T, TransportError>,
) -> Result<T, Target365Error> {
    decode(&response.body).map_err(Target365Error::parse)
}

fn created_id(response: &HttpResponse) -> Result<String, Target365Error> {
    response
        .header("Location")
        .and_then(transport::id_from_location)
        .ok_or(Target365Error::MissingLocation)
}

/// `200` decoded with `decode`, `404` as `None`.
fn optional<T: 'static>(
    decode: fn(&str) -> Result<T, TransportError>,
) -> ResponseHandlers<Option<T>> {
    ResponseHandlers::new()
        .on(200, move |response| decode_with(response, decode).map(Some))
        .on(404, |_| Ok(None))
}

fn list<T: 'static>(
    decode: fn(&str) -> Result<Vec<T>, TransportError>,
) -> ResponseHandlers<Vec<T>> {
    ResponseHandlers::new().on(200, move |response| decode_with(response, decode))
}

fn created() -> ResponseHandlers<String> {
    ResponseHandlers::new().on(201, created_id)
}

fn accepted(status: u16) -> ResponseHandlers<()> {
    ResponseHandlers::new().on(status, |_| Ok(()))
}

fn require_id(field: &'static str, value: &str) -> Result<(), Target365Error> {
    Ok(Rules::new().not_blank(field, Some(value)).finish()?)
}

impl Target365Client {
    /// Round trip to the API; returns the raw `200` body.
    pub async fn ping(&self) -> Result<String, Target365Error> {
        let handlers = ResponseHandlers::new().on(200, |response| Ok(response.body.clone()));
        self.send(ApiRequest::get(PING), &handlers).await
    }

    /// Address lookup for a mobile number. `None` when the number is unknown.
    pub async fn lookup(&self, msisdn: &Msisdn) -> Result<Option<LookupResult>, Target365Error> {
        let request = ApiRequest::get(LOOKUP).query(Msisdn::FIELD, msisdn.as_str());
        self.send(request, &optional(transport::decode_lookup_json))
            .await
    }

    /// Create a keyword and return its id.
    pub async fn create_keyword(&self, keyword: &Keyword) -> Result<String, Target365Error> {
        keyword.validate()?;
        let body = transport::encode_keyword_json(keyword).map_err(Target365Error::parse)?;
        self.send(ApiRequest::post(KEYWORDS).json_body(body), &created())
            .await
    }

    /// List keywords; unset filter fields are not sent.
    pub async fn get_keywords(
        &self,
        filter: &KeywordFilter,
    ) -> Result<Vec<Keyword>, Target365Error> {
        let request = filter
            .query_params()
            .into_iter()
            .fold(ApiRequest::get(KEYWORDS), |request, (key, value)| {
                request.query(key, value)
            });
        self.send(request, &list(transport::decode_keywords_json))
            .await
    }

    pub async fn get_keyword(&self, keyword_id: &str) -> Result<Option<Keyword>, Target365Error> {
        require_id("keywordId", keyword_id)?;
        let request = ApiRequest::get(KEYWORDS).segment(keyword_id);
        self.send(request, &optional(transport::decode_keyword_json))
            .await
    }

    /// Replace a keyword; `keyword_id` must be set.
    pub async fn update_keyword(&self, keyword: &Keyword) -> Result<(), Target365Error> {
        keyword.validate_for_update()?;
        let body = transport::encode_keyword_json(keyword).map_err(Target365Error::parse)?;
        let request = ApiRequest::put(KEYWORDS)
            .segment(keyword.keyword_id.as_deref().unwrap_or_default())
            .json_body(body);
        self.send(request, &accepted(204)).await
    }

    pub async fn delete_keyword(&self, keyword_id: &str) -> Result<(), Target365Error> {
        require_id("keywordId", keyword_id)?;
        let request = ApiRequest::delete(KEYWORDS).segment(keyword_id);
        self.send(request, &accepted(204)).await
    }

    /// Warm up the API's caches for numbers about to receive messages.
    pub async fn prepare_msisdns(&self, msisdns: &[Msisdn]) -> Result<(), Target365Error> {
        Rules::new().required("msisdns", msisdns.first()).finish()?;
        let msisdns = msisdns
            .iter()
            .map(|msisdn| msisdn.as_str().to_owned())
            .collect::<Vec<_>>();
        let body = transport::encode_msisdns_json(&msisdns).map_err(Target365Error::parse)?;
        self.send(ApiRequest::post(PREPARE_MSISDNS).json_body(body), &accepted(204))
            .await
    }

    /// Queue an SMS and return its transaction id.
    pub async fn create_out_message(&self, message: &OutMessage) -> Result<String, Target365Error> {
        message.validate()?;
        let body = transport::encode_out_message_json(message).map_err(Target365Error::parse)?;
        self.send(ApiRequest::post(OUT_MESSAGES).json_body(body), &created())
            .await
    }

    /// Queue several SMS in one request. Every message is validated before anything is sent.
    pub async fn create_out_message_batch(
        &self,
        messages: &[OutMessage],
    ) -> Result<(), Target365Error> {
        messages.validate()?;
        let body = transport::encode_out_messages_json(messages).map_err(Target365Error::parse)?;
        self.send(
            ApiRequest::post(OUT_MESSAGES_BATCH).json_body(body),
            &accepted(201),
        )
        .await
    }

    pub async fn get_out_message(
        &self,
        transaction_id: &str,
    ) -> Result<Option<OutMessage>, Target365Error> {
        require_id("transactionId", transaction_id)?;
        let request = ApiRequest::get(OUT_MESSAGES).segment(transaction_id);
        self.send(request, &optional(transport::decode_out_message_json))
            .await
    }

    /// Update a scheduled message; `transaction_id` must be set.
    pub async fn update_out_message(&self, message: &OutMessage) -> Result<(), Target365Error> {
        message.validate_for_update()?;
        let body = transport::encode_out_message_json(message).map_err(Target365Error::parse)?;
        let request = ApiRequest::put(OUT_MESSAGES)
            .segment(message.transaction_id.as_deref().unwrap_or_default())
            .json_body(body);
        self.send(request, &accepted(204)).await
    }

    /// Cancel a scheduled message.
    pub async fn delete_out_message(&self, transaction_id: &str) -> Result<(), Target365Error> {
        require_id("transactionId", transaction_id)?;
        let request = ApiRequest::delete(OUT_MESSAGES).segment(transaction_id);
        self.send(request, &accepted(204)).await
    }

    pub async fn get_in_message(
        &self,
        short_number_id: &str,
        transaction_id: &str,
    ) -> Result<Option<InMessage>, Target365Error> {
        Rules::new()
            .not_blank("shortNumberId", Some(short_number_id))
            .not_blank("transactionId", Some(transaction_id))
            .finish()?;
        let request = ApiRequest::get(IN_MESSAGES)
            .segment(short_number_id)
            .segment(transaction_id);
        self.send(request, &optional(transport::decode_in_message_json))
            .await
    }

    pub async fn get_merchant_ids(&self) -> Result<Vec<StrexMerchant>, Target365Error> {
        self.send(
            ApiRequest::get(MERCHANTS),
            &list(transport::decode_merchants_json),
        )
        .await
    }

    pub async fn get_merchant(
        &self,
        merchant_id: &str,
    ) -> Result<Option<StrexMerchant>, Target365Error> {
        require_id("merchantId", merchant_id)?;
        let request = ApiRequest::get(MERCHANTS).segment(merchant_id);
        self.send(request, &optional(transport::decode_merchant_json))
            .await
    }

    /// Create or replace a merchant.
    pub async fn save_merchant(&self, merchant: &StrexMerchant) -> Result<(), Target365Error> {
        merchant.validate()?;
        let body = transport::encode_merchant_json(merchant).map_err(Target365Error::parse)?;
        let request = ApiRequest::put(MERCHANTS)
            .segment(merchant.merchant_id.as_str())
            .json_body(body);
        self.send(request, &accepted(204)).await
    }

    pub async fn delete_merchant(&self, merchant_id: &str) -> Result<(), Target365Error> {
        require_id("merchantId", merchant_id)?;
        let request = ApiRequest::delete(MERCHANTS).segment(merchant_id);
        self.send(request, &accepted(204)).await
    }

    pub async fn create_one_time_password(
        &self,
        otp: &OneTimePassword,
    ) -> Result<(), Target365Error> {
        otp.validate()?;
        let body = transport::encode_one_time_password_json(otp).map_err(Target365Error::parse)?;
        self.send(
            ApiRequest::post(ONE_TIME_PASSWORDS).json_body(body),
            &accepted(201),
        )
        .await
    }

    pub async fn get_one_time_password(
        &self,
        transaction_id: &str,
    ) -> Result<Option<OneTimePassword>, Target365Error> {
        require_id("transactionId", transaction_id)?;
        let request = ApiRequest::get(ONE_TIME_PASSWORDS).segment(transaction_id);
        self.send(request, &optional(transport::decode_one_time_password_json))
            .await
    }

    /// Charge a Strex payment and return its transaction id.
    pub async fn create_strex_transaction(
        &self,
        transaction: &StrexTransaction,
    ) -> Result<String, Target365Error> {
        transaction.validate()?;
        let body =
            transport::encode_strex_transaction_json(transaction).map_err(Target365Error::parse)?;
        self.send(
            ApiRequest::post(STREX_TRANSACTIONS).json_body(body),
            &created(),
        )
        .await
    }

    pub async fn get_strex_transaction(
        &self,
        transaction_id: &str,
    ) -> Result<Option<StrexTransaction>, Target365Error> {
        require_id("transactionId", transaction_id)?;
        let request = ApiRequest::get(STREX_TRANSACTIONS).segment(transaction_id);
        self.send(request, &optional(transport::decode_strex_transaction_json))
            .await
    }

    /// Reverse a Strex payment and return the id of the reversal transaction.
    pub async fn reverse_strex_transaction(
        &self,
        transaction_id: &str,
    ) -> Result<String, Target365Error> {
        require_id("transactionId", transaction_id)?;
        let request = ApiRequest::delete(STREX_TRANSACTIONS).segment(transaction_id);
        self.send(request, &created()).await
    }

    /// Key the API signs callbacks with; verify inbound requests with its
    /// [`PublicKeyInfo::verifier`].
    pub async fn get_server_public_key(
        &self,
        key_name: &str,
    ) -> Result<Option<PublicKeyInfo>, Target365Error> {
        require_id("keyName", key_name)?;
        let request = ApiRequest::get(SERVER_PUBLIC_KEYS).segment(key_name);
        self.send(request, &optional(transport::decode_public_key_json))
            .await
    }

    pub async fn get_client_public_keys(&self) -> Result<Vec<PublicKeyInfo>, Target365Error> {
        self.send(
            ApiRequest::get(CLIENT_PUBLIC_KEYS),
            &list(transport::decode_public_keys_json),
        )
        .await
    }

    pub async fn get_client_public_key(
        &self,
        key_name: &str,
    ) -> Result<Option<PublicKeyInfo>, Target365Error> {
        require_id("keyName", key_name)?;
        let request = ApiRequest::get(CLIENT_PUBLIC_KEYS).segment(key_name);
        self.send(request, &optional(transport::decode_public_key_json))
            .await
    }

    pub async fn delete_client_public_key(&self, key_name: &str) -> Result<(), Target365Error> {
        require_id("keyName", key_name)?;
        let request = ApiRequest::delete(CLIENT_PUBLIC_KEYS).segment(key_name);
        self.send(request, &accepted(204)).await
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{KeywordMode, Priority};

    use super::super::Method;
    use super::super::tests::{FakeTransport, assert_signed, make_client};
    use super::*;

    fn keyword() -> Keyword {
        Keyword {
            short_number_id: "NO-0000".to_owned(),
            keyword_text: "HELLO".to_owned(),
            mode: KeywordMode::Text,
            forward_url: "https://example.com/in".to_owned(),
            enabled: true,
            ..Default::default()
        }
    }

    fn out_message() -> OutMessage {
        OutMessage {
            sender: "Target365".to_owned(),
            recipient: "+4798079008".to_owned(),
            content: "Hello World".to_owned(),
            priority: Some(Priority::Normal),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn ping_returns_body() {
        let transport = FakeTransport::new().respond(200, r#""pong""#);
        let client = make_client(transport.clone());

        assert_eq!(client.ping().await.unwrap(), r#""pong""#);

        let sent = transport.last_request();
        assert_eq!(sent.method, Method::Get);
        assert_eq!(sent.url, "https://test.example/api/ping");
        assert_signed(&sent);
    }

    #[tokio::test]
    async fn create_keyword_returns_id_from_location() {
        let transport =
            FakeTransport::new().respond_created("https://test.example/api/keywords/12345");
        let client = make_client(transport.clone());

        let id = client.create_keyword(&keyword()).await.unwrap();
        assert_eq!(id, "12345");

        let sent = transport.last_request();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.url, "https://test.example/api/keywords");
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["keywordText"], "HELLO");
        assert_signed(&sent);
    }

    #[tokio::test]
    async fn created_without_location_is_an_error() {
        let transport = FakeTransport::new().respond(201, "");
        let client = make_client(transport);

        let err = client.create_out_message(&out_message()).await.unwrap_err();
        assert!(matches!(err, Target365Error::MissingLocation));
    }

    #[tokio::test]
    async fn invalid_input_sends_nothing() {
        let transport = FakeTransport::new();
        let client = make_client(transport.clone());

        let err = client
            .create_out_message(&OutMessage {
                time_to_live: Some(1),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.error_kind(), "InvalidInput");
        assert_eq!(
            err.constraints(),
            vec![
                "sender must not be blank",
                "recipient must not be blank",
                "content must not be blank",
                "timeToLive out of range: 1 (expected 5..=10080)",
            ]
        );

        let err = client.update_keyword(&keyword()).await.unwrap_err();
        assert_eq!(err.constraints(), vec!["keywordId is required"]);

        let err = client.delete_keyword("  ").await.unwrap_err();
        assert_eq!(err.error_kind(), "InvalidInput");

        let err = client.create_out_message_batch(&[]).await.unwrap_err();
        assert_eq!(err.constraints(), vec!["messages is required"]);

        let err = client.prepare_msisdns(&[]).await.unwrap_err();
        assert_eq!(err.constraints(), vec!["msisdns is required"]);

        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn get_keywords_drops_unset_filters() {
        let transport = FakeTransport::new().respond(200, "[]");
        let client = make_client(transport.clone());

        let filter = KeywordFilter {
            short_number_id: Some("NO-0000".to_owned()),
            mode: Some(KeywordMode::StartsWith),
            ..Default::default()
        };
        assert!(client.get_keywords(&filter).await.unwrap().is_empty());

        let sent = transport.last_request();
        assert_eq!(
            sent.url,
            "https://test.example/api/keywords?shortNumberId=NO-0000&mode=StartsWith"
        );
        assert_signed(&sent);
    }

    #[tokio::test]
    async fn single_reads_map_not_found_to_none() {
        let transport = FakeTransport::new()
            .respond(404, "")
            .respond(404, "")
            .respond(404, "");
        let client = make_client(transport.clone());

        assert_eq!(client.get_keyword("1").await.unwrap(), None);
        assert_eq!(client.get_out_message("tx-1").await.unwrap(), None);
        assert_eq!(client.get_in_message("NO-2001", "in-1").await.unwrap(), None);

        let urls = transport
            .requests()
            .into_iter()
            .map(|request| request.url)
            .collect::<Vec<_>>();
        assert_eq!(
            urls,
            vec![
                "https://test.example/api/keywords/1",
                "https://test.example/api/out-messages/tx-1",
                "https://test.example/api/in-messages/NO-2001/in-1",
            ]
        );
    }

    #[tokio::test]
    async fn ids_are_percent_encoded_as_one_segment() {
        let transport = FakeTransport::new().respond(204, "");
        let client = make_client(transport.clone());

        client.delete_client_public_key("a/b c").await.unwrap();

        let sent = transport.last_request();
        assert_eq!(sent.method, Method::Delete);
        assert_eq!(
            sent.url,
            "https://test.example/api/client/public-keys/a%2Fb%20c"
        );
        assert_signed(&sent);
    }

    #[tokio::test]
    async fn lookup_queries_by_msisdn() {
        let transport = FakeTransport::new().respond(200, r#"{"msisdn":"+4798079008","age":45}"#);
        let client = make_client(transport.clone());

        let msisdn = Msisdn::parse(None, "+4798079008").unwrap();
        let result = client.lookup(&msisdn).await.unwrap().unwrap();
        assert_eq!(result.age, Some(45));
        assert_eq!(
            transport.last_request().url,
            "https://test.example/api/lookup?msisdn=%2B4798079008"
        );
    }

    #[tokio::test]
    async fn update_and_delete_expect_no_content() {
        let transport = FakeTransport::new().respond(204, "").respond(200, "");
        let client = make_client(transport.clone());

        let message = OutMessage {
            transaction_id: Some("tx-1".to_owned()),
            ..out_message()
        };
        client.update_out_message(&message).await.unwrap();
        let sent = transport.last_request();
        assert_eq!(sent.method, Method::Put);
        assert_eq!(sent.url, "https://test.example/api/out-messages/tx-1");

        let err = client.delete_out_message("tx-1").await.unwrap_err();
        assert!(matches!(
            err,
            Target365Error::InvalidResponse {
                status: 200,
                body: None
            }
        ));
    }

    #[tokio::test]
    async fn batch_posts_json_array() {
        let transport = FakeTransport::new().respond(201, "");
        let client = make_client(transport.clone());

        client
            .create_out_message_batch(&[out_message(), out_message()])
            .await
            .unwrap();

        let sent = transport.last_request();
        assert_eq!(sent.url, "https://test.example/api/out-messages/batch");
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body.as_array().map(Vec::len), Some(2));
        assert_signed(&sent);
    }

    #[tokio::test]
    async fn strex_flow() {
        let transport = FakeTransport::new()
            .respond(204, "")
            .respond(201, "")
            .respond_created("https://test.example/api/strex/transactions/t-1")
            .respond_created("https://test.example/api/strex/transactions/t-1-reversal");
        let client = make_client(transport.clone());

        client
            .save_merchant(&StrexMerchant {
                merchant_id: "mer_test".to_owned(),
                short_number_id: "NO-2001".to_owned(),
                password: Some("secret".to_owned()),
            })
            .await
            .unwrap();
        client
            .create_one_time_password(&OneTimePassword {
                transaction_id: "o-1".to_owned(),
                merchant_id: "mer_test".to_owned(),
                recipient: "+4798079008".to_owned(),
                sender: "Test".to_owned(),
                ..Default::default()
            })
            .await
            .unwrap();
        let id = client
            .create_strex_transaction(&StrexTransaction {
                transaction_id: "t-1".to_owned(),
                merchant_id: "mer_test".to_owned(),
                short_number: "2001".to_owned(),
                recipient: "+4798079008".to_owned(),
                price: 10.0,
                service_code: "10001".to_owned(),
                invoice_text: "Donation".to_owned(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(id, "t-1");
        let reversal = client.reverse_strex_transaction("t-1").await.unwrap();
        assert_eq!(reversal, "t-1-reversal");

        let requests = transport.requests();
        let calls = requests
            .iter()
            .map(|request| (request.method, request.url.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            calls,
            vec![
                (Method::Put, "https://test.example/api/strex/merchants/mer_test"),
                (
                    Method::Post,
                    "https://test.example/api/strex/one-time-passwords"
                ),
                (Method::Post, "https://test.example/api/strex/transactions"),
                (
                    Method::Delete,
                    "https://test.example/api/strex/transactions/t-1"
                ),
            ]
        );
        requests.iter().for_each(assert_signed);
    }

    #[tokio::test]
    async fn public_keys_decode() {
        let json = r#"{"name":"test-key","signAlgo":"ECDsaP256SHA256","hashAlgo":"SHA256","publicKeyString":"MFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAEdz7oOVeJHLTD8/qDVRsPwgMRiRpUu5RtXsYiM3tU4nlg91mZauKpqeRZJCwJuIdalMvOlUMlhfudhmr4NW7SaA=="}"#;
        let transport = FakeTransport::new()
            .respond(200, format!("[{json}]"))
            .respond(200, json)
            .respond(200, "not json");
        let client = make_client(transport.clone());

        let keys = client.get_client_public_keys().await.unwrap();
        assert_eq!(keys.len(), 1);

        let server = client.get_server_public_key("test-key").await.unwrap().unwrap();
        assert!(server.verifier().is_ok());
        assert_eq!(
            transport.last_request().url,
            "https://test.example/api/server/public-keys/test-key"
        );

        let err = client.get_client_public_key("test-key").await.unwrap_err();
        assert_eq!(err.error_kind(), "Parse");
    }
}
