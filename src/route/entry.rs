//! Route table entries and their URL shapes.

use serde::{Deserialize, Serialize};
use url::form_urlencoded::byte_serialize;

use crate::config::{RoutingConfig, RoutingMethod};
use crate::core::{RouteKind, SourceType, UrlPath};

/// One row of the route table.
///
/// Path shapes depend on the routing method:
///
/// ```text
/// kind     name    path mode    query mode        content_path
/// api      _def_   /api/        ?api              -
/// api      web     /api/web/    ?api=web          -
/// content  guide   /guide/      ?content=guide    content/guide.html
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEntry {
    /// `<type>:<name>`
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RouteKind,
    pub name: String,
    /// URL-facing path (directory path or query string).
    pub path: String,
    /// Pre-rendered content, relative to the output dir. `None` for API routes.
    pub content_path: Option<String>,
    pub source_type: SourceType,
}

impl RouteEntry {
    /// Entry for an API reference route.
    pub fn api(name: &str, routing: &RoutingConfig) -> Self {
        let name = routing.normalize_name(name).into_owned();
        let is_default = name == routing.normalize_name(&routing.default_api);

        let path = match (routing.method, is_default) {
            (RoutingMethod::Path, true) => "/api/".to_string(),
            (RoutingMethod::Path, false) => UrlPath::from_page(&format!("api/{name}")).to_string(),
            (RoutingMethod::Query, true) => "?api".to_string(),
            (RoutingMethod::Query, false) => format!("?api={}", query_encode(&name)),
        };

        Self {
            id: route_id(RouteKind::Api, &name),
            kind: RouteKind::Api,
            name,
            path,
            content_path: None,
            source_type: SourceType::Js,
        }
    }

    /// Entry for a content route rendered from markdown or HTML.
    pub fn content(name: &str, source_type: SourceType, routing: &RoutingConfig) -> Self {
        let name = routing.normalize_name(name).into_owned();

        let path = match routing.method {
            RoutingMethod::Path => UrlPath::from_page(&name).to_string(),
            RoutingMethod::Query => format!("?content={}", query_encode(&name)),
        };

        Self {
            id: route_id(RouteKind::Content, &name),
            kind: RouteKind::Content,
            content_path: Some(format!("content/{name}.html")),
            name,
            path,
            source_type,
        }
    }

    /// Directory path for this route, independent of the routing method.
    ///
    /// Used for static redirect pages, which only exist in path mode.
    pub fn url_path(&self, routing: &RoutingConfig) -> UrlPath {
        match self.kind {
            RouteKind::Api if self.name == routing.normalize_name(&routing.default_api) => {
                UrlPath::from_page("/api/")
            }
            RouteKind::Api => UrlPath::from_page(&format!("api/{}", self.name)),
            RouteKind::Content => UrlPath::from_page(&self.name),
        }
    }
}

/// Build a route id: `<type>:<name>`.
pub fn route_id(kind: RouteKind, name: &str) -> String {
    format!("{}:{}", kind, name)
}

fn query_encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}
