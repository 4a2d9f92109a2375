use std::fmt;

use tracing::warn;

use super::Target365Error;
use super::http::HttpResponse;

type Handler<T> = Box<dyn Fn(&HttpResponse) -> Result<T, Target365Error> + Send + Sync>;

/// Status code dispatch table for a single API call.
///
/// Statuses without a registered handler always fail with
/// [`Target365Error::InvalidResponse`], carrying the response body.
pub struct ResponseHandlers<T> {
    handlers: Vec<(u16, Handler<T>)>,
}

impl<T> ResponseHandlers<T> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register `handler` for `status`. A later registration for the same status wins.
    pub fn on<F>(mut self, status: u16, handler: F) -> Self
    where
        F: Fn(&HttpResponse) -> Result<T, Target365Error> + Send + Sync + 'static,
    {
        self.handlers.retain(|(registered, _)| *registered != status);
        self.handlers.push((status, Box::new(handler)));
        self
    }

    pub fn handles(&self, status: u16) -> bool {
        self.handlers.iter().any(|(registered, _)| *registered == status)
    }

    pub fn handle(&self, response: &HttpResponse) -> Result<T, Target365Error> {
        match self
            .handlers
            .iter()
            .find(|(registered, _)| *registered == response.status)
        {
            Some((_, handler)) => handler(response),
            None => {
                warn!(status = response.status, "unexpected response status");
                Err(invalid_response(response))
            }
        }
    }
}

impl<T> Default for ResponseHandlers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ResponseHandlers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseHandlers")
            .field(
                "statuses",
                &self.handlers.iter().map(|(status, _)| *status).collect::<Vec<_>>(),
            )
            .finish()
    }
}

fn invalid_response(response: &HttpResponse) -> Target365Error {
    let body = response.body.trim();
    let body = if body.is_empty() {
        None
    } else {
        Some(
            serde_json::from_str(body)
                .unwrap_or_else(|_| serde_json::Value::String(body.to_owned())),
        )
    };
    Target365Error::InvalidResponse {
        status: response.status,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_owned(),
        }
    }

    #[test]
    fn dispatches_on_status() {
        let handlers = ResponseHandlers::new()
            .on(200, |response| Ok(response.body.clone()))
            .on(404, |_| Ok("missing".to_owned()));

        assert_eq!(handlers.handle(&response(200, "pong")).unwrap(), "pong");
        assert_eq!(handlers.handle(&response(404, "")).unwrap(), "missing");
        assert!(handlers.handles(404));
        assert!(!handlers.handles(500));
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let handlers = ResponseHandlers::new()
            .on(200, |_| Ok(1))
            .on(200, |_| Ok(2));
        assert_eq!(handlers.handle(&response(200, "")).unwrap(), 2);
    }

    #[test]
    fn default_arm_keeps_json_body() {
        let handlers = ResponseHandlers::<()>::new().on(204, |_| Ok(()));
        let err = handlers
            .handle(&response(400, r#"{"message":"bad request"}"#))
            .unwrap_err();
        match err {
            Target365Error::InvalidResponse { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, Some(serde_json::json!({"message": "bad request"})));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn default_arm_wraps_text_and_drops_blank_body() {
        let handlers = ResponseHandlers::<()>::new();

        let err = handlers.handle(&response(500, "oops")).unwrap_err();
        assert!(matches!(
            err,
            Target365Error::InvalidResponse {
                status: 500,
                body: Some(serde_json::Value::String(ref text)),
            } if text == "oops"
        ));

        let err = handlers.handle(&response(503, "  ")).unwrap_err();
        assert!(matches!(
            err,
            Target365Error::InvalidResponse {
                status: 503,
                body: None
            }
        ));
    }
}
