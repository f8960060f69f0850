use std::fmt::Debug;

use serde::Serialize;

/// Marker trait for structured payload types that travel as request bodies.
///
/// Implementing `Payload` is what makes a parameter declaration eligible for
/// the body role: [`Endpoint::model`] requires it, and the classifier assigns
/// every model-declared parameter that is not a path placeholder to the body
/// set. Scalar parameters never implement it.
///
/// Field-omission semantics ("send only what was explicitly provided") are
/// carried by the type's own serde attributes: mark optional fields with
/// `#[serde(skip_serializing_if = "Option::is_none")]` to leave unset fields
/// out of the wire shape entirely. Fields that still serialize to `null` are
/// treated as explicit absence and stripped by the body serializer.
///
/// # Examples
///
/// ```rust
/// use callgen_core::Payload;
/// use serde::Serialize;
///
/// #[derive(Debug, Serialize)]
/// struct ItemData {
///     id: u32,
///     name: String,
///     #[serde(skip_serializing_if = "Option::is_none")]
///     description: Option<String>,
/// }
///
/// impl Payload for ItemData {}
/// ```
pub trait Payload: Serialize + Debug {}

/// The declared role of an endpoint parameter, captured at declaration time.
///
/// This replaces runtime type introspection: the kind of every parameter is
/// known statically when the endpoint is declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ParamType {
    /// A primitive value (string, number, bool, ...).
    Scalar,
    /// A structured payload type implementing [`Payload`].
    Model,
    /// A parameter whose type could not be resolved at declaration time.
    /// Classified as a query parameter by conservative fallback.
    Opaque,
    /// A parameter consumed elsewhere (e.g. an injected auth token); excluded
    /// from classification entirely.
    Reserved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ParamDecl {
    pub(super) name: String,
    pub(super) ty: ParamType,
}

/// An endpoint declaration: operation name, route metadata, and typed
/// parameter list.
///
/// This is the explicit, out-of-band equivalent of an annotated endpoint
/// function signature. The route string uses the `"METHOD /path/{param}"`
/// form; parameters are declared with the role their type implies.
///
/// # Examples
///
/// ```rust
/// use callgen_core::{Endpoint, Payload};
/// use serde::Serialize;
///
/// #[derive(Debug, Serialize)]
/// struct ItemData { id: u32, name: String }
/// impl Payload for ItemData {}
///
/// let endpoint = Endpoint::new("update_item")
///     .route("PUT /items/{item_id}")
///     .scalar("item_id")
///     .scalar("notify")
///     .model::<ItemData>("data");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Endpoint {
    name: String,
    route: Option<String>,
    params: Vec<ParamDecl>,
}

impl Endpoint {
    /// Creates an endpoint declaration with the given operation name.
    ///
    /// The name only identifies the operation in diagnostics and errors; the
    /// route metadata must be attached with [`Endpoint::route`] before the
    /// endpoint can be wrapped.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            route: None,
            params: Vec::new(),
        }
    }

    /// Attaches the route metadata string, e.g. `"GET /items/{item_id}"`.
    pub fn route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    /// Declares a scalar (primitive-typed) parameter.
    pub fn scalar(mut self, name: impl Into<String>) -> Self {
        self.push_param(name.into(), ParamType::Scalar);
        self
    }

    /// Declares a structured payload parameter of type `T`.
    pub fn model<T: Payload>(mut self, name: impl Into<String>) -> Self {
        self.push_param(name.into(), ParamType::Model);
        self
    }

    /// Declares a parameter whose type cannot be resolved (e.g. a forward
    /// reference). Classified as a query parameter.
    pub fn opaque(mut self, name: impl Into<String>) -> Self {
        self.push_param(name.into(), ParamType::Opaque);
        self
    }

    /// Declares a reserved parameter that is consumed outside the request
    /// pipeline; it is excluded from classification and its call-time value
    /// is dropped.
    pub fn reserved(mut self, name: impl Into<String>) -> Self {
        self.push_param(name.into(), ParamType::Reserved);
        self
    }

    /// The operation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(super) fn route_metadata(&self) -> Option<&str> {
        self.route.as_deref()
    }

    pub(super) fn params(&self) -> &[ParamDecl] {
        &self.params
    }

    // Re-declaring a name overwrites the previous role.
    fn push_param(&mut self, name: String, ty: ParamType) {
        if let Some(existing) = self.params.iter_mut().find(|decl| decl.name == name) {
            existing.ty = ty;
        } else {
            self.params.push(ParamDecl { name, ty });
        }
    }
}
