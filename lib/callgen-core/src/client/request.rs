use http::Method;
use indexmap::IndexMap;
use serde_json::Value;

use super::error::CallGenError;
use super::route;

fn replace_path_param(path: &str, param_name: &str, value: &str) -> String {
    let pattern = ["{", param_name, "}"].concat();
    path.replace(&pattern, value)
}

// Path and query positions take scalar values only.
fn scalar_to_string(name: &str, value: &Value) -> Result<String, CallGenError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => {
            Err(CallGenError::UnsupportedPathValue {
                name: name.to_string(),
                value: value.clone(),
            })
        }
    }
}

/// A fully assembled request descriptor, ready to hand to a
/// [`Transport`](super::Transport).
///
/// The descriptor carries the unresolved path template together with the
/// classified call-time values; [`HttpRequest::full_path`] performs the
/// placeholder substitution and [`HttpRequest::url`] prefixes the configured
/// base URL. No network activity happens here.
///
/// # Examples
///
/// ```rust
/// use callgen_core::HttpRequest;
/// use http::Method;
/// use serde_json::json;
///
/// let request = HttpRequest {
///     base_url: "http://localhost:8080".to_string(),
///     method: Method::GET,
///     path: "/items/{item_id}".to_string(),
///     path_values: [("item_id".to_string(), json!(42))].into_iter().collect(),
///     query_values: [("query".to_string(), json!("test"))].into_iter().collect(),
///     body: None,
/// };
///
/// assert_eq!(request.full_path()?, "/items/42");
/// assert_eq!(request.url()?, "http://localhost:8080/items/42");
/// assert_eq!(request.query_string()?, "query=test");
/// # Ok::<(), callgen_core::CallGenError>(())
/// ```
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
#[display("{method} {path}")]
pub struct HttpRequest {
    /// Base URL from the active configuration, without a trailing slash.
    pub base_url: String,
    /// HTTP method of the remote operation.
    pub method: Method,
    /// The unresolved path template, e.g. `/items/{item_id}`.
    pub path: String,
    /// Values substituted into `{name}` placeholders.
    pub path_values: IndexMap<String, Value>,
    /// Values rendered as query string entries.
    pub query_values: IndexMap<String, Value>,
    /// Serialized request body, when any body parameter was provided.
    pub body: Option<Value>,
}

impl HttpRequest {
    /// Substitutes every `{name}` placeholder with its stringified value.
    ///
    /// # Errors
    ///
    /// A placeholder without a matching entry in `path_values` is a defect,
    /// not a silent no-op: this fails with
    /// [`CallGenError::UnresolvedPathPlaceholder`] listing every missing
    /// name. Composite values (arrays, objects, null) in path position fail
    /// with [`CallGenError::UnsupportedPathValue`].
    pub fn full_path(&self) -> Result<String, CallGenError> {
        let mut path = self.path.clone();
        let mut missing = Vec::new();

        for name in route::placeholder_names(&self.path) {
            match self.path_values.get(&name) {
                Some(value) => {
                    let substituted = scalar_to_string(&name, value)?;
                    path = replace_path_param(&path, &name, &substituted);
                }
                None => missing.push(name),
            }
        }

        if missing.is_empty() {
            Ok(path)
        } else {
            Err(CallGenError::UnresolvedPathPlaceholder {
                path: self.path.clone(),
                missing,
            })
        }
    }

    /// The full request URL: base URL plus resolved path.
    ///
    /// # Errors
    ///
    /// Fails when [`HttpRequest::full_path`] fails.
    pub fn url(&self) -> Result<String, CallGenError> {
        Ok(format!("{}{}", self.base_url, self.full_path()?))
    }

    /// Renders the query values as a form-encoded string, for transports
    /// that need one.
    ///
    /// Null values are skipped, arrays repeat the key per element, and
    /// nested objects are rejected.
    ///
    /// # Errors
    ///
    /// Fails with [`CallGenError::UnsupportedQueryValue`] for object values
    /// and with [`CallGenError::QueryError`] when encoding fails.
    pub fn query_string(&self) -> Result<String, CallGenError> {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        for (name, value) in &self.query_values {
            match value {
                Value::Null => {}
                Value::Array(elements) => {
                    for element in elements {
                        pairs.push((name, query_scalar(name, element)?));
                    }
                }
                Value::Object(_) => {
                    return Err(CallGenError::UnsupportedQueryValue {
                        name: name.clone(),
                        value: value.clone(),
                    });
                }
                other => pairs.push((name, query_scalar(name, other)?)),
            }
        }
        Ok(serde_urlencoded::to_string(&pairs)?)
    }
}

fn query_scalar(name: &str, value: &Value) -> Result<String, CallGenError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => {
            Err(CallGenError::UnsupportedQueryValue {
                name: name.to_string(),
                value: value.clone(),
            })
        }
    }
}
