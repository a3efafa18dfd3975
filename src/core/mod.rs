//! Core types - pure abstractions shared across the codebase.

mod kind;
mod url;

pub use kind::{RouteKind, SourceType};
pub use url::UrlPath;
