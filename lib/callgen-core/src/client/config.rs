use std::sync::{Arc, PoisonError, RwLock};

use url::Url;

use super::error::CallGenError;
use super::request::HttpRequest;
use super::transport::{Response, Transport, TransportError};

/// The process-wide default configuration.
///
/// Unset at process start, set (and overwritten) through
/// [`set_default_configuration`], never cleared. Reads happen on every wrap
/// that carries no explicit configuration; writes are expected during setup
/// only — mutating the default while calls are in flight is not supported.
static DEFAULT_CONFIGURATION: RwLock<Option<Configuration>> = RwLock::new(None);

/// The pair of base URL and transport that a wrapped endpoint dispatches
/// through.
///
/// A configuration can be passed explicitly to
/// [`wrap_endpoint`](super::wrap_endpoint), or installed once as the
/// process-wide default with [`set_default_configuration`].
///
/// # Examples
///
/// ```rust
/// use callgen_core::{Configuration, LoggingTransport};
///
/// let configuration = Configuration::new("http://localhost:8080", LoggingTransport)?;
/// assert_eq!(configuration.base_url(), "http://localhost:8080");
/// # Ok::<(), callgen_core::CallGenError>(())
/// ```
#[derive(Clone, derive_more::Debug)]
pub struct Configuration {
    base_url: String,
    #[debug(ignore)]
    transport: Arc<dyn Transport>,
}

impl Configuration {
    /// Creates a configuration from a base URL and a transport.
    ///
    /// The base URL is validated up front and any trailing slash is dropped,
    /// so concatenation with a resolved path never produces `//`.
    ///
    /// # Errors
    ///
    /// Fails with [`CallGenError::InvalidBaseUrl`] when the base URL does
    /// not parse as an absolute URL.
    pub fn new(
        base_url: impl Into<String>,
        transport: impl Transport + 'static,
    ) -> Result<Self, CallGenError> {
        let base_url = base_url.into();
        if let Err(error) = Url::parse(&base_url) {
            return Err(CallGenError::InvalidBaseUrl { base_url, error });
        }
        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self {
            base_url,
            transport: Arc::new(transport),
        })
    }

    /// The configured base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Hands the descriptor to the configured transport. One invocation per
    /// call, no retries.
    pub(super) fn dispatch(&self, request: &HttpRequest) -> Result<Response, TransportError> {
        self.transport.send(request)
    }
}

/// Installs (or overwrites) the process-wide default configuration.
///
/// Endpoints wrapped afterwards without an explicit configuration use this
/// one. Call it during setup, before wrapping traffic starts.
pub fn set_default_configuration(configuration: Configuration) {
    let mut guard = DEFAULT_CONFIGURATION
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = Some(configuration);
}

pub(super) fn default_configuration() -> Option<Configuration> {
    DEFAULT_CONFIGURATION
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
