use std::sync::LazyLock;

use http::Method;
use regex::Regex;

/// Regular expression for matching path parameters in the format `{param_name}`.
static RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?<name>\w+)}").expect("a valid regex"));

/// Extracts the placeholder names from a path template, in order of first
/// appearance and without duplicates.
pub(super) fn placeholder_names(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in RE.captures_iter(template) {
        if let Some(matched) = caps.name("name") {
            let name = matched.as_str();
            if !names.iter().any(|existing| existing == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}

/// A parsed route descriptor: HTTP method plus path template.
///
/// Routes are declared as a single string of the form `"METHOD /path/{param}"`
/// and parsed once per endpoint when it is wrapped. The template keeps its
/// `{name}` placeholders; substitution happens at call time (see
/// [`HttpRequest::full_path`](super::HttpRequest::full_path)).
///
/// # Examples
///
/// ```rust
/// use callgen_core::Route;
///
/// let route = Route::parse("GET /items/{item_id}").expect("a valid route");
/// assert_eq!(route.method(), &http::Method::GET);
/// assert_eq!(route.template(), "/items/{item_id}");
///
/// // Without a path, the template defaults to "/"
/// let route = Route::parse("GET").expect("a valid route");
/// assert_eq!(route.template(), "/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{method} {template}")]
pub struct Route {
    method: Method,
    template: String,
}

impl Route {
    /// Parses a `"METHOD /path"` route string.
    ///
    /// The string is split on the first space; when no space is present the
    /// template defaults to `"/"`. Returns `None` when the metadata is empty,
    /// the method is not a valid HTTP token, or the template does not start
    /// with `/` — the caller reports that as
    /// [`MissingRouteMetadata`](super::CallGenError::MissingRouteMetadata).
    pub fn parse(metadata: &str) -> Option<Self> {
        let metadata = metadata.trim();
        if metadata.is_empty() {
            return None;
        }

        let (method, template) = match metadata.split_once(' ') {
            Some((method, template)) => (method, template),
            None => (metadata, "/"),
        };

        let method = Method::from_bytes(method.as_bytes()).ok()?;
        if !template.starts_with('/') {
            return None;
        }

        Some(Self {
            method,
            template: template.to_string(),
        })
    }

    /// The HTTP method of the remote operation.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The path template, placeholders included.
    pub fn template(&self) -> &str {
        &self.template
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("GET /items/{item_id}", "GET", "/items/{item_id}")]
    #[case("POST /items", "POST", "/items")]
    #[case("DELETE /users/{user_id}/posts/{post_id}", "DELETE", "/users/{user_id}/posts/{post_id}")]
    #[case("GET /", "GET", "/")]
    #[case("GET", "GET", "/")]
    #[case("  PUT /items/{id}  ", "PUT", "/items/{id}")]
    fn should_parse_route(#[case] metadata: &str, #[case] method: &str, #[case] template: &str) {
        let route = Route::parse(metadata).expect("a valid route");
        assert_eq!(route.method().as_str(), method);
        assert_eq!(route.template(), template);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("GET items")]
    #[case("G@T /items")]
    fn should_reject_unparsable_route(#[case] metadata: &str) {
        assert!(Route::parse(metadata).is_none());
    }

    #[test]
    fn should_extract_placeholder_names_in_order() {
        let names = placeholder_names("/users/{user_id}/posts/{post_id}");
        assert_eq!(names, vec!["user_id".to_string(), "post_id".to_string()]);
    }

    #[test]
    fn should_deduplicate_placeholder_names() {
        let names = placeholder_names("/api/{version}/items/{id}/related/{id}");
        assert_eq!(names, vec!["version".to_string(), "id".to_string()]);
    }

    #[test]
    fn should_extract_nothing_from_literal_path() {
        assert!(placeholder_names("/items").is_empty());
    }

    #[test]
    fn should_display_route() {
        let route = Route::parse("GET /items/{item_id}").expect("a valid route");
        insta::assert_snapshot!(route, @"GET /items/{item_id}");
    }
}
