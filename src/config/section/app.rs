//! `[app]` section configuration.
//!
//! Settings shared by the build step and the navigation runtime. The whole
//! section is copied into the route manifest so a built site can be
//! navigated without the original config file.
//!
//! # Example
//!
//! ```toml
//! [app]
//! title = "My Library"
//! base = "/docs/"
//! entrance = "content:guide"
//!
//! [app.routing]
//! method = "path"
//! case_sensitive = false
//! default_api = "_def_"
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::core::UrlPath;
use crate::route::split_route_id;

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Document title.
    pub title: String,

    /// Base prefix the application is served under.
    pub base: UrlPath,

    /// Route id shown when nothing else is requested.
    pub entrance: String,

    /// Routing settings.
    pub routing: RoutingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            base: UrlPath::root(),
            entrance: "api".into(),
            routing: RoutingConfig::default(),
        }
    }
}

impl AppConfig {
    pub const ENTRANCE: FieldPath = FieldPath::new("app.entrance");

    /// Validate app configuration.
    ///
    /// # Checks
    /// - `entrance` is a route id with a known type
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Err(e) = split_route_id(&self.entrance) {
            diag.error_with_hint(
                Self::ENTRANCE,
                e.to_string(),
                "use \"api\", \"api:<name>\" or \"content:<name>\"",
            );
        }
        self.routing.validate(diag);
    }
}

/// `[app.routing]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// How routes appear in the URL.
    pub method: RoutingMethod,

    /// Match route names case-sensitively.
    pub case_sensitive: bool,

    /// Name of the API shown for `/api/` and `?api`.
    pub default_api: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            method: RoutingMethod::Query,
            case_sensitive: true,
            default_api: "_def_".into(),
        }
    }
}

impl RoutingConfig {
    pub const DEFAULT_API: FieldPath = FieldPath::new("app.routing.default_api");

    /// Apply case normalization to a route name.
    pub fn normalize_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if self.case_sensitive {
            Cow::Borrowed(name)
        } else {
            Cow::Owned(name.to_lowercase())
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.default_api.trim().is_empty() {
            diag.error(Self::DEFAULT_API, "must not be empty");
        } else if self.default_api.contains(['/', ':', '?', '&', '#']) {
            diag.error_with_hint(
                Self::DEFAULT_API,
                format!("'{}' contains a reserved character", self.default_api),
                "use a plain name such as \"_def_\"",
            );
        }
    }
}

/// Routing method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingMethod {
    /// Directory-style paths (`/api/web/`), history navigation.
    Path,
    /// Query-string parameters (`?api=web`), same-document navigation.
    #[default]
    Query,
}

impl RoutingMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.app.base, UrlPath::root());
        assert_eq!(config.app.entrance, "api");
        assert_eq!(config.app.routing.method, RoutingMethod::Query);
        assert!(config.app.routing.case_sensitive);
        assert_eq!(config.app.routing.default_api, "_def_");
    }

    #[test]
    fn test_routing_parsing() {
        let config = test_parse_config(
            "[app]\nbase = \"docs\"\nentrance = \"content:guide\"\n\
             [app.routing]\nmethod = \"path\"\ncase_sensitive = false\ndefault_api = \"core\"",
        );
        assert_eq!(config.app.base, "/docs/");
        assert_eq!(config.app.entrance, "content:guide");
        assert_eq!(config.app.routing.method, RoutingMethod::Path);
        assert!(!config.app.routing.case_sensitive);
        assert_eq!(config.app.routing.default_api, "core");
    }

    #[test]
    fn test_normalize_name() {
        let mut routing = RoutingConfig::default();
        assert_eq!(routing.normalize_name("Guide"), "Guide");
        routing.case_sensitive = false;
        assert_eq!(routing.normalize_name("Guide"), "guide");
    }

    #[test]
    fn test_validate_entrance() {
        let mut app = AppConfig::default();
        let mut diag = ConfigDiagnostics::new();
        app.validate(&mut diag);
        assert!(diag.is_empty());

        app.entrance = "page:home".into();
        let mut diag = ConfigDiagnostics::new();
        app.validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field, AppConfig::ENTRANCE);
    }

    #[test]
    fn test_validate_default_api() {
        let mut routing = RoutingConfig::default();
        routing.default_api = "a/b".into();
        let mut diag = ConfigDiagnostics::new();
        routing.validate(&mut diag);
        assert_eq!(diag.len(), 1);

        routing.default_api = " ".into();
        let mut diag = ConfigDiagnostics::new();
        routing.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }
}
