//! Route classification enums shared by the builder and the runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::route::RouteError;

/// Route type: an API reference page or a content page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Api,
    Content,
}

impl RouteKind {
    /// All recognized kinds, in query-string precedence order.
    pub const ALL: [Self; 2] = [Self::Api, Self::Content];

    /// Name used in route ids and query-string keys.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Content => "content",
        }
    }
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteKind {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "api" => Ok(Self::Api),
            "content" => Ok(Self::Content),
            other => Err(RouteError::UnknownKind(other.to_string())),
        }
    }
}

/// Provenance of a route's documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// API documentation extracted from JavaScript sources.
    Js,
    /// Markdown content.
    Md,
    /// Hand-written HTML content.
    Html,
}

impl SourceType {
    /// Classify a content file by extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "md" | "markdown" => Some(Self::Md),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Js => "js",
            Self::Md => "md",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
