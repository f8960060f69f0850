use std::collections::BTreeSet;

use super::endpoint::{Endpoint, ParamType};
use super::route::{self, Route};

/// The partition of an endpoint's parameter names into path, query, and body
/// roles.
///
/// Computed once when an endpoint is wrapped and reused for every call. The
/// three sets are pairwise disjoint; together they cover every declared
/// parameter except reserved ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    path_params: BTreeSet<String>,
    query_params: BTreeSet<String>,
    body_params: BTreeSet<String>,
}

impl Classification {
    /// Classifies the endpoint's declared parameters against the parsed route.
    ///
    /// Placeholder names found in the path template become path parameters,
    /// regardless of how they were declared. Every remaining parameter is a
    /// body parameter when declared as a model, and a query parameter
    /// otherwise (scalars, and opaque types by conservative fallback).
    pub(super) fn of(route: &Route, endpoint: &Endpoint) -> Self {
        let path_params: BTreeSet<String> = route::placeholder_names(route.template())
            .into_iter()
            .collect();

        let mut query_params = BTreeSet::new();
        let mut body_params = BTreeSet::new();
        for decl in endpoint.params() {
            if path_params.contains(&decl.name) {
                continue;
            }
            match decl.ty {
                ParamType::Reserved => {}
                ParamType::Model => {
                    body_params.insert(decl.name.clone());
                }
                ParamType::Scalar | ParamType::Opaque => {
                    query_params.insert(decl.name.clone());
                }
            }
        }

        Self {
            path_params,
            query_params,
            body_params,
        }
    }

    /// Names substituted into `{name}` placeholders of the path template.
    pub fn path_params(&self) -> &BTreeSet<String> {
        &self.path_params
    }

    /// Names appended as query string entries.
    pub fn query_params(&self) -> &BTreeSet<String> {
        &self.query_params
    }

    /// Names serialized into the request payload.
    pub fn body_params(&self) -> &BTreeSet<String> {
        &self.body_params
    }
}
