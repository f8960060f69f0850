use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

mod args;
pub use self::args::CallArgs;

mod body;

mod classify;
pub use self::classify::Classification;

mod config;
pub use self::config::{Configuration, set_default_configuration};

mod endpoint;
pub use self::endpoint::{Endpoint, Payload};

mod error;
pub use self::error::CallGenError;

mod request;
pub use self::request::HttpRequest;

mod route;
pub use self::route::Route;

mod transport;
pub use self::transport::{LoggingTransport, Response, Transport, TransportError};

/// A wrapped endpoint: the reusable HTTP-call generator produced by
/// [`wrap_endpoint`].
///
/// The route descriptor and parameter classification are computed once at
/// wrap time and cached here; every invocation only partitions the live
/// arguments, serializes the body, and dispatches through the configured
/// transport. The wrapped call returns the transport's response directly.
///
/// # Examples
///
/// ```rust
/// use callgen_core::{wrap_endpoint, CallArgs, Configuration, Endpoint, LoggingTransport};
///
/// let configuration = Configuration::new("http://localhost:8080", LoggingTransport)?;
/// let read_item = wrap_endpoint(
///     &Endpoint::new("read_item")
///         .route("GET /items/{item_id}")
///         .scalar("item_id")
///         .scalar("query"),
///     Some(configuration),
/// )?;
///
/// let response = read_item.call(&CallArgs::new().arg("item_id", 42).arg("query", "test"))?;
/// assert!(response.is_success());
/// # Ok::<(), callgen_core::CallGenError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CompiledEndpoint {
    configuration: Configuration,
    route: Route,
    classification: Classification,
}

/// Compiles an endpoint declaration into a reusable call generator.
///
/// Configuration resolution: the explicit argument takes precedence,
/// otherwise the process-wide default installed with
/// [`set_default_configuration`] is used. Route parsing and parameter
/// classification run here, once, and are cached in the returned
/// [`CompiledEndpoint`].
///
/// # Errors
///
/// - [`CallGenError::NoConfiguration`] when neither an explicit nor a
///   default configuration exists.
/// - [`CallGenError::MissingRouteMetadata`] when the endpoint carries no
///   parsable route string.
pub fn wrap_endpoint(
    endpoint: &Endpoint,
    configuration: Option<Configuration>,
) -> Result<CompiledEndpoint, CallGenError> {
    let configuration = configuration
        .or_else(config::default_configuration)
        .ok_or(CallGenError::NoConfiguration)?;

    let route = endpoint
        .route_metadata()
        .and_then(Route::parse)
        .ok_or_else(|| CallGenError::MissingRouteMetadata {
            endpoint: endpoint.name().to_string(),
        })?;
    let classification = Classification::of(&route, endpoint);

    Ok(CompiledEndpoint {
        configuration,
        route,
        classification,
    })
}

impl CompiledEndpoint {
    /// Assembles the request descriptor for one set of call arguments
    /// without dispatching it.
    ///
    /// Arguments are partitioned by the cached classification; names that
    /// match no declared role are dropped (they are assumed consumed
    /// elsewhere, e.g. an injected token). Pure given its inputs.
    ///
    /// # Errors
    ///
    /// Fails fast with [`CallGenError::UnresolvedPathPlaceholder`] when a
    /// placeholder has no matching argument, and with
    /// [`CallGenError::UnsupportedPathValue`] when a composite value lands
    /// in path position — a literal `{name}` must never reach a URL.
    pub fn request(&self, args: &CallArgs) -> Result<HttpRequest, CallGenError> {
        let mut path_values = IndexMap::new();
        let mut query_values = IndexMap::new();
        let mut body_values = IndexMap::new();

        for (name, value) in args.iter() {
            if self.classification.path_params().contains(name) {
                path_values.insert(name.clone(), value.clone().into_inner());
            } else if self.classification.query_params().contains(name) {
                query_values.insert(name.clone(), value.clone().into_inner());
            } else if self.classification.body_params().contains(name) {
                body_values.insert(name.clone(), value.clone());
            } else {
                debug!(%name, "argument matches no declared parameter; dropped");
            }
        }

        let body: Option<Value> = body::serialize_body(body_values);

        let request = HttpRequest {
            base_url: self.configuration.base_url().to_string(),
            method: self.route.method().clone(),
            path: self.route.template().to_string(),
            path_values,
            query_values,
            body,
        };
        // Assembled descriptors uphold the invariant that every placeholder
        // resolves; checking here keeps the failure at call time.
        request.full_path()?;
        Ok(request)
    }

    /// Assembles the descriptor and performs exactly one transport
    /// invocation, returning the transport's response directly.
    ///
    /// # Errors
    ///
    /// Propagates assembly errors and any [`TransportError`] unchanged.
    pub fn call(&self, args: &CallArgs) -> Result<Response, CallGenError> {
        let request = self.request(args)?;
        debug!(%request, "dispatching");
        let response = self.configuration.dispatch(&request)?;
        Ok(response)
    }

    /// The cached route descriptor.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// The cached parameter classification.
    pub fn classification(&self) -> &Classification {
        &self.classification
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use http::{Method, StatusCode};
    use serde_json::json;

    use super::*;

    #[derive(Debug, serde::Serialize)]
    struct ItemData {
        id: u32,
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    }

    impl Payload for ItemData {}

    #[derive(Debug, Clone, Default)]
    struct RecordingTransport {
        requests: Arc<Mutex<Vec<HttpRequest>>>,
    }

    impl Transport for RecordingTransport {
        fn send(&self, request: &HttpRequest) -> Result<Response, TransportError> {
            self.requests
                .lock()
                .expect("a healthy lock")
                .push(request.clone());
            Ok(Response::ok())
        }
    }

    impl RecordingTransport {
        fn last_request(&self) -> HttpRequest {
            self.requests
                .lock()
                .expect("a healthy lock")
                .last()
                .expect("a recorded request")
                .clone()
        }
    }

    fn configuration(transport: &RecordingTransport) -> Configuration {
        Configuration::new("http://localhost:8080", transport.clone()).expect("a valid base url")
    }

    #[test]
    fn should_assemble_get_descriptor_end_to_end() {
        let transport = RecordingTransport::default();
        let read_item = wrap_endpoint(
            &Endpoint::new("read_item")
                .route("GET /items/{item_id}")
                .scalar("item_id")
                .scalar("query"),
            Some(configuration(&transport)),
        )
        .expect("a wrapped endpoint");

        let request = read_item
            .request(&CallArgs::new().arg("item_id", 42).arg("query", "test"))
            .expect("a descriptor");

        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "/items/{item_id}");
        assert_eq!(
            request.path_values.get("item_id"),
            Some(&json!(42))
        );
        assert_eq!(request.query_values.get("query"), Some(&json!("test")));
        assert_eq!(request.body, None);
        assert_eq!(
            request.url().expect("a url"),
            "http://localhost:8080/items/42"
        );
    }

    #[test]
    fn should_dispatch_exactly_once_per_call() {
        let transport = RecordingTransport::default();
        let read_item = wrap_endpoint(
            &Endpoint::new("read_item")
                .route("GET /items/{item_id}")
                .scalar("item_id"),
            Some(configuration(&transport)),
        )
        .expect("a wrapped endpoint");

        let response = read_item
            .call(&CallArgs::new().arg("item_id", 42))
            .expect("a response");

        assert!(response.is_success());
        assert_eq!(transport.requests.lock().expect("a healthy lock").len(), 1);
        assert_eq!(transport.last_request().path, "/items/{item_id}");
    }

    #[test]
    fn should_unwrap_single_model_body() {
        let transport = RecordingTransport::default();
        let create_item = wrap_endpoint(
            &Endpoint::new("create_item")
                .route("POST /items")
                .model::<ItemData>("data"),
            Some(configuration(&transport)),
        )
        .expect("a wrapped endpoint");

        let data = ItemData {
            id: 1,
            name: "A Box".to_string(),
            description: None,
        };
        create_item
            .call(&CallArgs::new().model("data", &data))
            .expect("a response");

        let request = transport.last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.body, Some(json!({"id": 1, "name": "A Box"})));
    }

    #[test]
    fn should_nest_two_model_bodies() {
        let transport = RecordingTransport::default();
        let annotate = wrap_endpoint(
            &Endpoint::new("annotate")
                .route("POST /annotations")
                .model::<ItemData>("user")
                .model::<ItemData>("meta"),
            Some(configuration(&transport)),
        )
        .expect("a wrapped endpoint");

        let user = ItemData {
            id: 1,
            name: "u".to_string(),
            description: None,
        };
        let meta = ItemData {
            id: 2,
            name: "m".to_string(),
            description: None,
        };
        let request = annotate
            .request(&CallArgs::new().model("user", &user).model("meta", &meta))
            .expect("a descriptor");

        assert_eq!(
            request.body,
            Some(json!({
                "user": {"id": 1, "name": "u"},
                "meta": {"id": 2, "name": "m"},
            }))
        );
    }

    #[test]
    fn should_drop_unclassified_arguments_silently() {
        let transport = RecordingTransport::default();
        let whoami = wrap_endpoint(
            &Endpoint::new("whoami")
                .route("GET /whoami")
                .reserved("token")
                .scalar("verbose"),
            Some(configuration(&transport)),
        )
        .expect("a wrapped endpoint");

        let request = whoami
            .request(
                &CallArgs::new()
                    .arg("token", "secret")
                    .arg("verbose", true)
                    .arg("unknown", 1),
            )
            .expect("a descriptor");

        assert!(request.path_values.is_empty());
        assert_eq!(request.query_values.get("verbose"), Some(&json!(true)));
        assert!(!request.query_values.contains_key("token"));
        assert!(!request.query_values.contains_key("unknown"));
        assert_eq!(request.body, None);
    }

    #[test]
    fn should_fail_wrapping_without_route_metadata() {
        let transport = RecordingTransport::default();
        let result = wrap_endpoint(
            &Endpoint::new("unrouted").scalar("query"),
            Some(configuration(&transport)),
        );

        assert!(matches!(
            result,
            Err(CallGenError::MissingRouteMetadata { ref endpoint }) if endpoint == "unrouted"
        ));
    }

    #[test]
    fn should_propagate_transport_errors_unchanged() {
        let failing = |_request: &HttpRequest| -> Result<Response, TransportError> {
            Err(TransportError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        };
        let ping = wrap_endpoint(
            &Endpoint::new("ping").route("GET /ping"),
            Some(Configuration::new("http://localhost:8080", failing).expect("a valid base url")),
        )
        .expect("a wrapped endpoint");

        let result = ping.call(&CallArgs::new());
        assert!(matches!(
            result,
            Err(CallGenError::Transport(TransportError::Status { status: 503, .. }))
        ));
    }

    #[test]
    fn should_fail_call_on_missing_path_argument() {
        let transport = RecordingTransport::default();
        let read_item = wrap_endpoint(
            &Endpoint::new("read_item")
                .route("GET /items/{item_id}")
                .scalar("item_id"),
            Some(configuration(&transport)),
        )
        .expect("a wrapped endpoint");

        let error = read_item
            .call(&CallArgs::new())
            .expect_err("must not resolve");
        assert!(matches!(
            error,
            CallGenError::UnresolvedPathPlaceholder { ref missing, .. }
                if missing == &vec!["item_id".to_string()]
        ));
        // Fail-fast: nothing was dispatched.
        assert!(transport.requests.lock().expect("a healthy lock").is_empty());
    }

    #[test]
    fn should_answer_custom_response_from_transport() {
        let transport = |_request: &HttpRequest| -> Result<Response, TransportError> {
            Ok(Response::new(StatusCode::CREATED, r#"{"id": 7}"#))
        };
        let create = wrap_endpoint(
            &Endpoint::new("create").route("POST /items"),
            Some(Configuration::new("http://localhost:8080", transport).expect("a valid base url")),
        )
        .expect("a wrapped endpoint");

        let response = create.call(&CallArgs::new()).expect("a response");
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: serde_json::Value = response.json().expect("valid json");
        assert_eq!(created, json!({"id": 7}));
    }

    // The only test touching the process-wide default; keeping the whole
    // unset -> set -> overwrite lifecycle in one test avoids ordering races
    // with the parallel test harness.
    #[test]
    fn should_resolve_default_configuration_lifecycle() {
        let endpoint = Endpoint::new("greeting_message").route("GET /");

        let result = wrap_endpoint(&endpoint, None);
        assert!(matches!(result, Err(CallGenError::NoConfiguration)));

        let first = RecordingTransport::default();
        set_default_configuration(
            Configuration::new("http://localhost:8080", first.clone()).expect("a valid base url"),
        );
        let wrapped = wrap_endpoint(&endpoint, None).expect("a wrapped endpoint");
        wrapped.call(&CallArgs::new()).expect("a response");
        assert_eq!(first.last_request().base_url, "http://localhost:8080");

        // Re-setting overwrites the previous default.
        let second = RecordingTransport::default();
        set_default_configuration(
            Configuration::new("http://example.com:9090", second.clone())
                .expect("a valid base url"),
        );
        let rewrapped = wrap_endpoint(&endpoint, None).expect("a wrapped endpoint");
        rewrapped.call(&CallArgs::new()).expect("a response");
        assert_eq!(second.last_request().base_url, "http://example.com:9090");

        // Endpoints wrapped earlier keep the configuration they captured.
        wrapped.call(&CallArgs::new()).expect("a response");
        assert_eq!(first.requests.lock().expect("a healthy lock").len(), 2);
    }
}
