//! Navigation targets parsed from hrefs.

use std::fmt;
use std::sync::OnceLock;

use url::Url;

use crate::core::UrlPath;

/// One navigation request: decoded path plus raw query and fragment.
///
/// The query is read synchronously from the request itself, so there is
/// no window where it can disagree with the path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Navigation {
    pub path: UrlPath,
    /// Query string without the leading `?`.
    pub query: String,
    /// Fragment without the leading `#`.
    pub hash: String,
}

impl Navigation {
    /// Parse an href such as `/docs/api/web/?x=1#Foo` or `?content=guide`.
    pub fn parse(href: &str) -> Self {
        static BASE: OnceLock<Option<Url>> = OnceLock::new();
        let base = BASE.get_or_init(|| Url::parse("http://localhost/").ok());

        match base.as_ref().map(|base| base.join(href.trim())) {
            Some(Ok(url)) => Self {
                path: UrlPath::from_browser(url.path()),
                query: url.query().unwrap_or_default().to_string(),
                hash: url.fragment().unwrap_or_default().to_string(),
            },
            _ => Self::split(href),
        }
    }

    fn split(href: &str) -> Self {
        let (rest, hash) = href.split_once('#').unwrap_or((href, ""));
        let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
        Self {
            path: UrlPath::from_browser(path),
            query: query.to_string(),
            hash: hash.to_string(),
        }
    }

    /// Navigation to a path with no query or fragment.
    pub fn to_path(path: UrlPath) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }

    /// Browser-facing form of this navigation.
    pub fn href(&self) -> String {
        let mut href = self.path.to_encoded();
        if !self.query.is_empty() {
            href.push('?');
            href.push_str(&self.query);
        }
        if !self.hash.is_empty() {
            href.push('#');
            href.push_str(&self.hash);
        }
        href
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}
