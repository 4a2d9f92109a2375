//! Client layer: signs requests, dispatches them over HTTP and maps status codes to results.

mod callbacks;
mod handlers;
mod http;
mod request;
mod resources;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::auth::{AuthError, Signer};
use crate::domain::{KeyName, ValidationError};

use http::{BoxError, HttpRequest, HttpTransport, ReqwestTransport};

pub use handlers::ResponseHandlers;
pub use http::{HttpResponse, Method};
pub use request::ApiRequest;

/// Production endpoint.
pub const DEFAULT_BASE_URL: &str = "https://shared.target365.io/";

const AUTHORIZATION: &str = "Authorization";
const CONTENT_TYPE: &str = "Content-Type";
const APPLICATION_JSON: &str = "application/json";

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`Target365Client`].
pub enum Target365Error {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The server answered with a status the called operation does not expect.
    #[error("unexpected HTTP status: {status}")]
    InvalidResponse {
        status: u16,
        body: Option<serde_json::Value>,
    },

    /// A success response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[source] BoxError),

    /// The request failed validation; nothing was sent.
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("invalid base url {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: BoxError,
    },

    /// A `201 Created` response carried no usable `Location` header.
    #[error("created response has no Location header")]
    MissingLocation,
}

impl Target365Error {
    /// Stable name of the error category, e.g. `"InvalidInput"`.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "Transport",
            Self::InvalidResponse { .. } => "InvalidResponse",
            Self::Parse(_) => "Parse",
            Self::InvalidInput(_) => ValidationError::KIND,
            Self::Auth(_) => "Auth",
            Self::InvalidBaseUrl { .. } => "InvalidBaseUrl",
            Self::MissingLocation => "MissingLocation",
        }
    }

    /// Violated constraints for [`Target365Error::InvalidInput`]; empty otherwise.
    pub fn constraints(&self) -> Vec<String> {
        match self {
            Self::InvalidInput(err) => err.constraints(),
            _ => Vec::new(),
        }
    }

    fn parse(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Parse(Box::new(err))
    }
}

#[derive(Debug, Clone)]
/// Builder for [`Target365Client`].
///
/// Use this when you need to customize the base URL, timeout, or user-agent.
pub struct Target365ClientBuilder {
    key_name: String,
    private_key: String,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl Target365ClientBuilder {
    /// `private_key` is the armored (or bare base64) PKCS#8 or SEC1 P-256 key
    /// registered under `key_name`.
    pub fn new(key_name: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            key_name: key_name.into(),
            private_key: private_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Validate the settings and build a [`Target365Client`].
    pub fn build(self) -> Result<Target365Client, Target365Error> {
        let key_name = KeyName::new(self.key_name)?;
        let signer = Signer::from_armored(&self.private_key)?;
        let base_url = validate_base_url(&self.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder
            .build()
            .map_err(|err| Target365Error::Transport(Box::new(err)))?;

        Ok(Target365Client {
            key_name,
            signer: Arc::new(signer),
            base_url,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

fn validate_base_url(base_url: &str) -> Result<String, Target365Error> {
    let invalid = |source: BoxError| Target365Error::InvalidBaseUrl {
        url: base_url.to_owned(),
        source,
    };
    let url = Url::parse(base_url).map_err(|err| invalid(err.into()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("expected an absolute http(s) URL".into()));
    }
    Ok(url.into())
}

#[derive(Clone)]
/// Target365 API client.
///
/// Every request is signed with the client's private key. The key is shared
/// between clones; the client is `Send + Sync`.
pub struct Target365Client {
    key_name: KeyName,
    signer: Arc<Signer>,
    base_url: String,
    http: Arc<dyn HttpTransport>,
}

impl Target365Client {
    /// Create a client for the production endpoint.
    ///
    /// For more customization, use [`Target365Client::builder`].
    pub fn new(key_name: &str, private_key: &str) -> Result<Self, Target365Error> {
        Ok(Self {
            key_name: KeyName::new(key_name)?,
            signer: Arc::new(Signer::from_armored(private_key)?),
            base_url: DEFAULT_BASE_URL.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        })
    }

    pub fn builder(
        key_name: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Target365ClientBuilder {
        Target365ClientBuilder::new(key_name, private_key)
    }

    pub fn key_name(&self) -> &KeyName {
        &self.key_name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sign and send `request`, then dispatch the response through `handlers`.
    ///
    /// Errors:
    /// - [`Target365Error::Transport`] when no response was received,
    /// - [`Target365Error::InvalidResponse`] for statuses `handlers` does not cover,
    /// - whatever the matching handler returns otherwise.
    pub async fn send<T>(
        &self,
        request: ApiRequest,
        handlers: &ResponseHandlers<T>,
    ) -> Result<T, Target365Error> {
        let uri = crate::transport::build_uri(&self.base_url, &request.segments, &request.query)
            .map_err(|err| Target365Error::InvalidBaseUrl {
                url: self.base_url.clone(),
                source: Box::new(err),
            })?;
        let method = request.method;
        let authorization = self.signer.sign_header(
            self.key_name.as_str(),
            method.as_str(),
            &uri,
            request.body.as_deref().unwrap_or_default(),
        )?;

        let mut headers = vec![(AUTHORIZATION.to_owned(), authorization)];
        if request.body.is_some() {
            headers.push((CONTENT_TYPE.to_owned(), APPLICATION_JSON.to_owned()));
        }

        debug!(method = method.as_str(), %uri, "sending request");
        let response = self
            .http
            .send(HttpRequest {
                method,
                url: uri,
                headers,
                body: request.body,
            })
            .await
            .map_err(Target365Error::Transport)?;
        debug!(
            method = method.as_str(),
            status = response.status,
            "received response"
        );

        handlers.handle(&response)
    }
}

impl fmt::Debug for Target365Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target365Client")
            .field("key_name", &self.key_name)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
