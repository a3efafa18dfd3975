//! Route descriptor - the outcome of a route lookup.
//!
//! A descriptor is either `Found` (backed by a table entry) or `NotFound`.
//! Absence is a value, never an error: callers branch on [`Route::exists`].

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::{RouteEntry, RouteTable};
use crate::config::RoutingConfig;
use crate::core::{RouteKind, SourceType};
use crate::nav::{Completion, NavEvent, Renderer, Session};

/// Resolved route, or the not-found state.
#[derive(Debug, Clone, Default)]
pub enum Route {
    Found(Arc<RouteEntry>),
    #[default]
    NotFound,
}

impl Route {
    /// Look up `(kind, name)` in the table.
    ///
    /// - `name` is lowercased when routing is case-insensitive
    /// - an empty API name means the configured default API
    /// - no `kind` always yields `NotFound` (used for the 404 branch)
    pub fn create(
        table: &RouteTable,
        routing: &RoutingConfig,
        name: &str,
        kind: Option<RouteKind>,
    ) -> Self {
        let Some(kind) = kind else {
            return Self::NotFound;
        };

        let name = match kind {
            RouteKind::Api if name.is_empty() => routing.default_api.as_str(),
            _ => name,
        };
        if name.is_empty() {
            return Self::NotFound;
        }

        let name = routing.normalize_name(name);
        table
            .get(kind, &name)
            .map_or(Self::NotFound, |entry| Self::Found(Arc::clone(entry)))
    }

    #[inline]
    pub const fn not_found() -> Self {
        Self::NotFound
    }

    #[inline]
    pub const fn exists(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn entry(&self) -> Option<&RouteEntry> {
        match self {
            Self::Found(entry) => Some(entry),
            Self::NotFound => None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.entry().map(|e| e.id.as_str())
    }

    pub fn name(&self) -> Option<&str> {
        self.entry().map(|e| e.name.as_str())
    }

    pub fn kind(&self) -> Option<RouteKind> {
        self.entry().map(|e| e.kind)
    }

    pub fn path(&self) -> Option<&str> {
        self.entry().map(|e| e.path.as_str())
    }

    pub fn content_path(&self) -> Option<&str> {
        self.entry().and_then(|e| e.content_path.as_deref())
    }

    pub fn source_type(&self) -> Option<SourceType> {
        self.entry().map(|e| e.source_type)
    }

    /// Same route iff both exist and render the same path.
    pub fn is_equal_to(&self, other: &Route) -> bool {
        match (self.path(), other.path()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Whether this route is the one currently displayed in `session`.
    pub fn is_current(&self, session: &Session) -> bool {
        session
            .current_route()
            .is_some_and(|current| self.is_equal_to(current))
    }

    /// Load the route's data into the session and hand it to the renderer.
    ///
    /// API routes replace the session's loaded API; any other route clears
    /// it. A `route` event is emitted before rendering. The renderer reports
    /// its status through `done`.
    pub fn apply<'r>(
        &'r self,
        session: &mut Session,
        renderer: &mut dyn Renderer,
        done: Completion,
    ) -> &'r Self {
        match self.entry() {
            Some(entry) if entry.kind == RouteKind::Api => session.load_api(&entry.name),
            _ => session.clear_api(),
        }

        let payload = match self {
            Self::Found(entry) => Some(Arc::clone(entry)),
            Self::NotFound => None,
        };
        session.emit(&NavEvent::Route(payload));

        renderer.render(self, session, done);
        self
    }

    /// Plain projection for logging and debugging.
    pub fn projection(&self) -> RouteProjection<'_> {
        let entry = self.entry();
        RouteProjection {
            id: entry.map(|e| e.id.as_str()),
            content_path: entry.and_then(|e| e.content_path.as_deref()),
            path: entry.map(|e| e.path.as_str()),
            kind: entry.map(|e| e.kind),
            source_type: entry.map(|e| e.source_type),
            name: entry.map(|e| e.name.as_str()),
        }
    }
}

/// Flat view of a descriptor; absent fields are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteProjection<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<&'a str>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<RouteKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

impl fmt::Display for RouteProjection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind.map(RouteKind::as_str);
        let source_type = self.source_type.map(SourceType::as_str);
        let fields = [
            ("id", self.id),
            ("contentPath", self.content_path),
            ("path", self.path),
            ("type", kind),
            ("sourceType", source_type),
            ("name", self.name),
        ];

        let mut first = true;
        for (key, value) in fields {
            let Some(value) = value else { continue };
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
            first = false;
        }
        Ok(())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.projection(), f)
    }
}
