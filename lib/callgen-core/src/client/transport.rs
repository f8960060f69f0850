use std::borrow::Cow;

use bytes::Bytes;
use http::StatusCode;
use serde::de::DeserializeOwned;
use tracing::info;

use super::error::CallGenError;
use super::request::HttpRequest;

/// An injected capability that performs (or simulates) the network exchange
/// for an assembled request descriptor.
///
/// The core never does network I/O itself: every wrapped call hands its
/// [`HttpRequest`] to exactly one `send` invocation and propagates whatever
/// comes back, response or error, without interpretation. Retries, timeouts,
/// pooling, and status handling all belong to the transport.
///
/// Closures work directly:
///
/// ```rust
/// use callgen_core::{HttpRequest, Response, Transport, TransportError};
///
/// let transport = |request: &HttpRequest| -> Result<Response, TransportError> {
///     Ok(Response::ok())
/// };
/// # fn accepts(_transport: impl Transport) {}
/// # accepts(transport);
/// ```
pub trait Transport: Send + Sync {
    /// Performs the exchange for one assembled request.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] on connection failure, timeout, or an
    /// unacceptable status — whatever the implementation considers fatal.
    fn send(&self, request: &HttpRequest) -> Result<Response, TransportError>;
}

impl<F> Transport for F
where
    F: Fn(&HttpRequest) -> Result<Response, TransportError> + Send + Sync,
{
    fn send(&self, request: &HttpRequest) -> Result<Response, TransportError> {
        self(request)
    }
}

/// Error raised by a [`Transport`] implementation.
///
/// These are propagated unchanged through [`CompiledEndpoint::call`](super::CompiledEndpoint::call);
/// the core never swallows or retries them.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
pub enum TransportError {
    /// The remote endpoint could not be reached.
    #[display("connection failed: {message}")]
    Connection {
        /// Description of the connection failure.
        message: String,
    },

    /// The exchange did not complete in time.
    #[display("request timed out: {message}")]
    Timeout {
        /// Description of the timeout.
        message: String,
    },

    /// The server answered with a status the transport treats as an error.
    #[display("unexpected status code {status}: {body}")]
    Status {
        /// The HTTP status code received.
        status: u16,
        /// The response body, for debugging.
        body: String,
    },
}

/// A transport-agnostic HTTP response value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    body: Bytes,
}

impl Response {
    /// Creates a response with the given status and body.
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// An empty `200 OK` response.
    pub fn ok() -> Self {
        Self::new(StatusCode::OK, Bytes::new())
    }

    /// The HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The raw response body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// The response body as text, lossily decoded.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Deserializes the response body as JSON.
    ///
    /// # Errors
    ///
    /// Fails with [`CallGenError::JsonError`] when the body is not valid
    /// JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, CallGenError> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Transport that records the assembled descriptor through `tracing` and
/// answers with an empty `200 OK`, performing no I/O.
///
/// Useful for demos and for inspecting what a wrapped endpoint would send.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingTransport;

impl Transport for LoggingTransport {
    fn send(&self, request: &HttpRequest) -> Result<Response, TransportError> {
        info!(
            method = %request.method,
            path = %request.path,
            path_values = ?request.path_values,
            query_values = ?request.query_values,
            body = ?request.body,
            "simulated http request"
        );
        Ok(Response::ok())
    }
}

#[cfg(test)]
mod tests {
    use http::Method;
    use indexmap::IndexMap;

    use super::*;

    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Greeting {
        message: String,
    }

    fn request() -> HttpRequest {
        HttpRequest {
            base_url: "http://localhost:8080".to_string(),
            method: Method::GET,
            path: "/".to_string(),
            path_values: IndexMap::new(),
            query_values: IndexMap::new(),
            body: None,
        }
    }

    #[test]
    fn should_deserialize_json_body() {
        let response = Response::new(StatusCode::OK, r#"{"message": "hello"}"#);
        let greeting: Greeting = response.json().expect("valid json");
        assert_eq!(
            greeting,
            Greeting {
                message: "hello".to_string()
            }
        );
    }

    #[test]
    fn should_fail_on_invalid_json_body() {
        let response = Response::new(StatusCode::OK, "not json");
        let result = response.json::<Greeting>();
        assert!(matches!(result, Err(CallGenError::JsonError(_))));
    }

    #[test]
    fn should_expose_text_and_status() {
        let response = Response::new(StatusCode::NOT_FOUND, "missing");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(!response.is_success());
        assert_eq!(response.text(), "missing");
    }

    #[test]
    fn should_answer_ok_from_logging_transport() {
        let response = LoggingTransport.send(&request()).expect("a response");
        assert!(response.is_success());
        assert!(response.body().is_empty());
    }

    #[test]
    fn should_accept_closures_as_transports() {
        let transport = |_request: &HttpRequest| -> Result<Response, TransportError> {
            Err(TransportError::Timeout {
                message: "no answer after 30s".to_string(),
            })
        };
        let result = transport.send(&request());
        assert!(matches!(result, Err(TransportError::Timeout { .. })));
    }

    #[test]
    fn test_transport_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<TransportError>();
        assert_sync::<TransportError>();
    }
}
