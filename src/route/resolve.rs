//! Translate user-facing identifiers into route descriptors.

use url::form_urlencoded;

use super::{Route, RouteError, RouteTable};
use crate::config::RoutingConfig;
use crate::core::RouteKind;

/// Resolves names, query strings and route ids against a route table.
#[derive(Debug, Clone, Copy)]
pub struct RouteResolver<'a> {
    table: &'a RouteTable,
    routing: &'a RoutingConfig,
}

impl<'a> RouteResolver<'a> {
    pub const fn new(table: &'a RouteTable, routing: &'a RoutingConfig) -> Self {
        Self { table, routing }
    }

    /// See [`Route::create`].
    pub fn from_name_and_type(&self, name: &str, kind: RouteKind) -> Route {
        Route::create(self.table, self.routing, name, Some(kind))
    }

    /// Resolve `api=<name>` or `content=<name>` from a query string.
    ///
    /// A leading `?` or `&` is ignored. When both keys are present `api`
    /// wins, regardless of their order. A key without a value resolves
    /// with an empty name (the default API for `api`).
    pub fn from_query_string(&self, qs: &str) -> Route {
        Self::query_target(qs).map_or(Route::NotFound, |(kind, name)| {
            self.from_name_and_type(&name, kind)
        })
    }

    /// The route type and name a query string asks for, if it has an
    /// `api` or `content` key at all.
    pub fn query_target(qs: &str) -> Option<(RouteKind, String)> {
        let qs = qs.trim_start_matches(['?', '&']);
        if qs.is_empty() {
            return None;
        }

        let mut found: [Option<String>; 2] = [None, None];
        for (key, value) in form_urlencoded::parse(qs.as_bytes()) {
            let slot = match &*key {
                "api" => &mut found[0],
                "content" => &mut found[1],
                _ => continue,
            };
            // First occurrence of a key is the one that counts
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        RouteKind::ALL
            .into_iter()
            .zip(found)
            .find_map(|(kind, name)| name.map(|name| (kind, name)))
    }

    /// Resolve a `<type>:<name>` route id.
    ///
    /// Fails only when `<type>` is not a known route type.
    pub fn from_route_id(&self, id: &str) -> Result<Route, RouteError> {
        let (kind, name) = split_route_id(id)?;
        Ok(self.from_name_and_type(name, kind))
    }

    /// Resolve a path segment, ignoring its trailing slash.
    pub fn from_path_segment(&self, kind: RouteKind, segment: &str) -> Route {
        self.from_name_and_type(segment.trim_end_matches('/'), kind)
    }
}

/// Split a route id at its first colon. A missing colon means an empty name.
pub fn split_route_id(id: &str) -> Result<(RouteKind, &str), RouteError> {
    let (kind, name) = id.split_once(':').unwrap_or((id, ""));
    Ok((kind.parse()?, name))
}
