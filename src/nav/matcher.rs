//! Path patterns for path-mode routing.
//!
//! ```text
//! pattern              match
//! <base>               Root
//! <base>api/           Api(None)       default API
//! <base>api/<name>/    Api(Some(name))
//! <base><name>/        Content(name)   name may contain '/'
//! anything else        (none)          not found
//! ```

use regex::Regex;

use crate::core::UrlPath;

/// Result of matching a decoded path against the registered patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathMatch {
    Root,
    Api(Option<String>),
    Content(String),
}

/// Maps a path to a route shape. `None` means no pattern matched.
pub trait PathMatcher {
    fn match_path(&self, path: &UrlPath) -> Option<PathMatch>;
}

/// Regex-backed matcher with a base prefix.
#[derive(Debug, Clone)]
pub struct PatternRouter {
    base: UrlPath,
    api: Regex,
    content: Regex,
}

impl PatternRouter {
    pub fn new(base: &UrlPath) -> Result<Self, regex::Error> {
        let prefix = regex::escape(base.as_str());
        Ok(Self {
            base: base.clone(),
            api: Regex::new(&format!(r"^{prefix}api/(?:(?P<name>.+)/)?$"))?,
            content: Regex::new(&format!(r"^{prefix}(?P<name>.+)/$"))?,
        })
    }

    pub fn base(&self) -> &UrlPath {
        &self.base
    }
}

impl PathMatcher for PatternRouter {
    fn match_path(&self, path: &UrlPath) -> Option<PathMatch> {
        if *path == self.base {
            return Some(PathMatch::Root);
        }
        let path = path.as_str();
        if let Some(caps) = self.api.captures(path) {
            let name = caps.name("name").map(|m| m.as_str().to_string());
            return Some(PathMatch::Api(name));
        }
        self.content
            .captures(path)
            .and_then(|caps| caps.name("name"))
            .map(|m| PathMatch::Content(m.as_str().to_string()))
    }
}
