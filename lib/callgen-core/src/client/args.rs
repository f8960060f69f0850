use std::fmt::Debug;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::endpoint::Payload;

/// A call-time argument value, tagged with how it was provided.
///
/// The tag matters to the body serializer only: model values get their
/// explicit-absence fields stripped, everything else passes through
/// unchanged.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum ArgValue {
    Scalar(Value),
    Model(Value),
}

impl ArgValue {
    pub(super) fn into_inner(self) -> Value {
        match self {
            Self::Scalar(value) | Self::Model(value) => value,
        }
    }
}

/// The named arguments of a single wrapped-endpoint invocation.
///
/// `CallArgs` is the Rust stand-in for keyword arguments: an ordered
/// name → value map built with method chaining. Values are serialized to
/// JSON-compatible form on insertion; how each one ends up in the request
/// (path, query, or body) is decided by the endpoint's cached
/// [`Classification`](super::Classification), not here.
///
/// # Examples
///
/// ```rust
/// use callgen_core::{CallArgs, Payload};
/// use serde::Serialize;
///
/// #[derive(Debug, Serialize)]
/// struct ItemData { id: u32, name: String }
/// impl Payload for ItemData {}
///
/// let args = CallArgs::new()
///     .arg("item_id", 42)
///     .arg("query", "test")
///     .model("data", &ItemData { id: 1, name: "A Box".to_string() });
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    values: IndexMap<String, ArgValue>,
}

impl CallArgs {
    /// Creates an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a plain argument value.
    ///
    /// Any serializable value is accepted; a map value passed here stays a
    /// map on the wire (the direct-dictionary body case). An argument that
    /// fails to serialize is skipped with a warning.
    pub fn arg<T: Serialize + Debug>(mut self, name: impl Into<String>, value: T) -> Self {
        let name = name.into();
        match serde_json::to_value(&value) {
            Ok(value) => {
                self.values.insert(name, ArgValue::Scalar(value));
            }
            Err(error) => warn!(%name, ?value, %error, "skipping unserializable argument"),
        }
        self
    }

    /// Adds a structured payload argument.
    pub fn model<T: Payload>(mut self, name: impl Into<String>, value: &T) -> Self {
        let name = name.into();
        match serde_json::to_value(value) {
            Ok(value) => {
                self.values.insert(name, ArgValue::Model(value));
            }
            Err(error) => warn!(%name, ?value, %error, "skipping unserializable model argument"),
        }
        self
    }

    /// Whether no arguments were provided.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(super) fn iter(&self) -> impl Iterator<Item = (&String, &ArgValue)> {
        self.values.iter()
    }
}
