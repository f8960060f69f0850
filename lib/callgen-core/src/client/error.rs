use serde_json::Value;

use super::transport::TransportError;

/// Errors raised while wrapping an endpoint or invoking a wrapped call.
///
/// Wrap-time failures ([`MissingRouteMetadata`](Self::MissingRouteMetadata),
/// [`NoConfiguration`](Self::NoConfiguration)) are fatal to wrapping that
/// endpoint; call-time failures surface synchronously from the wrapped call.
/// Nothing is logged-and-suppressed inside the core.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum CallGenError {
    /// The endpoint declaration carries no parsable `"METHOD /path"` route
    /// string. Fatal at wrap time.
    #[display("endpoint '{endpoint}' carries no parsable route metadata")]
    #[from(skip)]
    MissingRouteMetadata {
        /// Name of the endpoint that could not be wrapped.
        endpoint: String,
    },

    /// Neither an explicit configuration nor a process-wide default is
    /// available. Fatal at wrap time.
    #[display(
        "no configuration provided and no default configuration set; \
         call set_default_configuration() first or pass one to wrap_endpoint()"
    )]
    NoConfiguration,

    /// The configured base URL is not an absolute URL.
    #[display("invalid base URL '{base_url}': {error}")]
    #[from(skip)]
    InvalidBaseUrl {
        /// The rejected base URL.
        base_url: String,
        /// The underlying parse error.
        error: url::ParseError,
    },

    /// A path template placeholder has no matching call-time value.
    ///
    /// Failing fast here keeps a literal `{name}` from ever reaching a URL.
    #[display("path '{path}' is missing required arguments: {missing:?}")]
    #[from(skip)]
    UnresolvedPathPlaceholder {
        /// The path template that could not be resolved.
        path: String,
        /// The placeholder names without values.
        missing: Vec<String>,
    },

    /// A composite value was supplied where a path position needs a scalar.
    #[display("unsupported path parameter value for '{name}': {value}")]
    #[from(skip)]
    UnsupportedPathValue {
        /// The parameter name.
        name: String,
        /// The rejected value.
        value: Value,
    },

    /// An object value was supplied where a query position needs a scalar
    /// or an array of scalars.
    #[display("unsupported query parameter value for '{name}': {value}")]
    #[from(skip)]
    UnsupportedQueryValue {
        /// The parameter name.
        name: String,
        /// The rejected value.
        value: Value,
    },

    /// JSON serialization or deserialization failed.
    JsonError(serde_json::Error),

    /// Query string encoding failed.
    QueryError(serde_urlencoded::ser::Error),

    /// The injected transport failed; propagated unchanged.
    Transport(TransportError),
}
