//! # Callgen Core
//!
//! Compile endpoint declarations into reusable HTTP-call generators.
//!
//! An [`Endpoint`] describes a remote operation the way a backend framework
//! would: a route string (`"METHOD /path/{param}"`) plus a typed parameter
//! list. [`wrap_endpoint`] compiles that declaration — once — into a
//! [`CompiledEndpoint`] that, invoked with named [`CallArgs`], classifies
//! the arguments into path, query, and body roles, serializes structured
//! payloads, assembles an [`HttpRequest`] descriptor, and dispatches it
//! through a pluggable [`Transport`].
//!
//! The core performs no network I/O: the transport is an injected capability
//! that receives the assembled descriptor and returns a [`Response`] or a
//! [`TransportError`].
//!
//! ## Quick Start
//!
//! ```rust
//! use callgen_core::{
//!     wrap_endpoint, CallArgs, Configuration, Endpoint, HttpRequest, Payload, Response,
//!     TransportError,
//! };
//! use serde::Serialize;
//!
//! #[derive(Debug, Serialize)]
//! struct ItemData {
//!     id: u32,
//!     name: String,
//! }
//!
//! impl Payload for ItemData {}
//!
//! # fn main() -> Result<(), callgen_core::CallGenError> {
//! // The transport is any function or type that accepts a descriptor.
//! let transport = |request: &HttpRequest| -> Result<Response, TransportError> {
//!     assert_eq!(request.url().expect("a url"), "http://localhost:8080/items");
//!     Ok(Response::ok())
//! };
//! let configuration = Configuration::new("http://localhost:8080", transport)?;
//!
//! // Declare the endpoint and compile it into a call generator.
//! let create_item = wrap_endpoint(
//!     &Endpoint::new("create_item")
//!         .route("POST /items")
//!         .model::<ItemData>("data"),
//!     Some(configuration),
//! )?;
//!
//! // A single body parameter is sent unwrapped, as the bare body.
//! let data = ItemData { id: 1, name: "A Box".to_string() };
//! let response = create_item.call(&CallArgs::new().model("data", &data))?;
//! assert!(response.is_success());
//! # Ok(())
//! # }
//! ```
//!
//! ## Default configuration
//!
//! A process-wide default can be installed once during setup with
//! [`set_default_configuration`]; endpoints wrapped without an explicit
//! configuration use it. Wrapping before any configuration exists fails
//! with [`CallGenError::NoConfiguration`].
//!
//! ```rust
//! use callgen_core::{
//!     set_default_configuration, wrap_endpoint, CallArgs, Configuration, Endpoint,
//!     LoggingTransport,
//! };
//!
//! # fn main() -> Result<(), callgen_core::CallGenError> {
//! set_default_configuration(Configuration::new("http://localhost:8080", LoggingTransport)?);
//!
//! let greeting = wrap_endpoint(&Endpoint::new("greeting_message").route("GET /"), None)?;
//! let response = greeting.call(&CallArgs::new())?;
//! assert!(response.is_success());
//! # Ok(())
//! # }
//! ```
//!
//! ## Classification rules
//!
//! - Placeholder names in the path template are path parameters.
//! - Remaining parameters declared with a [`Payload`] model type are body
//!   parameters.
//! - Everything else — scalars, and parameters whose type cannot be
//!   resolved — is a query parameter.
//! - Reserved parameters are excluded; their call-time values are dropped.
//!
//! Exactly one body parameter is serialized as the bare body; two or more
//! are nested under their parameter names. This matches the wire convention
//! of the consuming backend framework and is deliberately asymmetric.

mod client;

pub use self::client::{
    CallArgs, CallGenError, Classification, CompiledEndpoint, Configuration, Endpoint,
    HttpRequest, LoggingTransport, Payload, Response, Route, Transport, TransportError,
    set_default_configuration, wrap_endpoint,
};
