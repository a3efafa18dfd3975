//! Static redirect pages for path-mode sites.
//!
//! A static host cannot serve the application document for a deep path.
//! Every route directory therefore gets an `index.html` that records the
//! base-relative href (path, query and fragment) in session storage and
//! sends the browser to the base; the
//! dispatcher then consumes the slot and redirects once more. `404.html`
//! does the same for hosts that serve it for unknown paths.

use std::fs;
use std::path::{Path, PathBuf};

use super::SiteError;
use crate::config::AppConfig;
use crate::core::UrlPath;
use crate::nav::REDIRECT_KEY;
use crate::route::RouteTable;
use crate::utils::html::{escape, script_string};

/// Page stored at `<path>/index.html` for one route.
pub fn redirect_page(app: &AppConfig, path: &UrlPath) -> String {
    let script = format!(
        "sessionStorage.setItem({key}, {path}+location.search+location.hash);\
         location.replace({base});",
        key = script_string(REDIRECT_KEY),
        path = script_string(&path.to_encoded()),
        base = script_string(&app.base.to_encoded()),
    );
    page(&app.title, &script)
}

/// Fallback page that records the live location instead.
pub fn not_found_page(app: &AppConfig) -> String {
    let script = format!(
        "var b={base},p=location.pathname;\
         if(p.indexOf(b)===0)p='/'+p.slice(b.length);\
         sessionStorage.setItem({key},p+location.search+location.hash);location.replace(b);",
        key = script_string(REDIRECT_KEY),
        base = script_string(&app.base.to_encoded()),
    );
    page(&app.title, &script)
}

fn page(title: &str, script: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<script>{}</script>\n</head>\n<body></body>\n</html>\n",
        escape(title),
        script
    )
}

/// Write one redirect page per route, plus `404.html`. Returns the pages written.
pub fn write_redirect_pages(
    app: &AppConfig,
    table: &RouteTable,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, SiteError> {
    let mut written = Vec::with_capacity(table.len() + 1);

    for entry in table.iter() {
        let path = entry.url_path(&app.routing);
        if path.is_root() {
            continue;
        }
        let dest = output_dir.join(path.trimmed()).join("index.html");
        write_file(&dest, &redirect_page(app, &path))?;
        written.push(dest);
    }

    let dest = output_dir.join("404.html");
    write_file(&dest, &not_found_page(app))?;
    written.push(dest);

    Ok(written)
}

fn write_file(dest: &Path, content: &str) -> Result<(), SiteError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| SiteError::Io(parent.to_path_buf(), e))?;
    }
    fs::write(dest, content).map_err(|e| SiteError::Io(dest.to_path_buf(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoutingMethod;
    use crate::core::SourceType;
    use crate::route::RouteEntry;

    fn app(base: &str) -> AppConfig {
        let mut app = AppConfig {
            title: "Docs <v2>".into(),
            base: UrlPath::from_page(base),
            ..AppConfig::default()
        };
        app.routing.method = RoutingMethod::Path;
        app
    }

    #[test]
    fn test_redirect_page_records_path_relative_to_base() {
        let page = redirect_page(&app("/docs/"), &UrlPath::from_page("/api/web/"));
        assert!(page.contains(
            r#"sessionStorage.setItem("redirectPath", "/api/web/"+location.search+location.hash)"#
        ));
        assert!(page.contains(r#"location.replace("/docs/")"#));
        assert!(page.contains("<title>Docs &lt;v2&gt;</title>"));
    }

    #[test]
    fn test_redirect_page_stores_encoded_path() {
        let page = redirect_page(&app("/"), &UrlPath::from_page("/guides/démarrage/"));
        assert!(page.contains(r#""/guides/d%C3%A9marrage/""#));
    }

    #[test]
    fn test_write_redirect_pages() {
        let dir = tempfile::tempdir().unwrap();
        let app = app("/");
        let table = RouteTable::from_entries(vec![
            RouteEntry::api("_def_", &app.routing),
            RouteEntry::api("web", &app.routing),
            RouteEntry::content("guides/intro", SourceType::Md, &app.routing),
        ])
        .unwrap();

        let written = write_redirect_pages(&app, &table, dir.path()).unwrap();
        assert_eq!(written.len(), 4);

        let web = fs::read_to_string(dir.path().join("api/web/index.html")).unwrap();
        assert!(web.contains(r#""/api/web/""#));
        let default = fs::read_to_string(dir.path().join("api/index.html")).unwrap();
        assert!(default.contains(r#""/api/""#));
        assert!(dir.path().join("guides/intro/index.html").is_file());

        let not_found = fs::read_to_string(dir.path().join("404.html")).unwrap();
        assert!(not_found.contains("location.pathname"));
    }
}
