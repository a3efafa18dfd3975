//! Site build.
//!
//! Pipeline: prepare -> scan -> table -> apis -> content -> manifest -> redirects
//!
//! ```text
//! public/
//! ├── apis.json              API documentation + symbols
//! ├── routes.json            app settings + route table
//! ├── content/<name>.html    rendered content
//! ├── <route>/index.html     redirect pages (path mode)
//! └── 404.html               redirect fallback (path mode)
//! ```

mod api;
mod content;
mod redirect;
mod scan;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use thiserror::Error;

pub use api::{ApiDocs, ApiRegistry};
pub use content::{MarkdownOptions, render_markdown, write_content};
pub use redirect::{not_found_page, redirect_page, write_redirect_pages};
pub use scan::{ApiSource, ContentSource, Sources, scan_content_dir, scan_sources};

use crate::config::{RoutingMethod, SiteConfig};
use crate::core::{RouteKind, SourceType};
use crate::logger::ProgressLine;
use crate::route::conflict::{detect_conflicts, print_conflicts};
use crate::route::{RouteManifest, RouteResolver, RouteTable};
use crate::utils::plural_count;
use crate::{debug, log};

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("failed to access {}", .0.display())]
    Io(PathBuf, #[source] io::Error),

    #[error("invalid JSON in {}", .0.display())]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("{} is not a JSON array of doclets", .0.display())]
    Doclets(PathBuf, #[source] serde_json::Error),

    #[error("{} is not a content file", .0.display())]
    NotContent(PathBuf),
}

/// What a build produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub routes: usize,
    pub apis: usize,
    pub contents: usize,
    pub redirects: usize,
}

/// Build the whole site into `config.build.output`.
pub fn build_site(config: &SiteConfig, quiet: bool) -> Result<BuildReport> {
    let output = config.build.output.as_path();
    let routing = &config.app.routing;
    prepare_output(output, config.build.clean)?;

    let sources = scan_sources(&config.build);
    debug!("build"; "{} and {}",
        plural_count(sources.apis.len(), "api"),
        plural_count(sources.contents.len(), "content file"));

    let claims = sources.claims(routing);
    let conflicts = detect_conflicts(&claims, routing, config.get_root());
    if !conflicts.is_empty() {
        print_conflicts(&conflicts);
        bail!("route conflicts");
    }
    let table = RouteTable::from_entries(claims.into_iter().map(|c| c.entry).collect())?;
    check_entrance(config, &table);

    let progress = (!quiet).then(|| {
        ProgressLine::new(&[
            ("api", sources.apis.len()),
            ("markdown", sources.count_by_type(SourceType::Md)),
            ("html", sources.count_by_type(SourceType::Html)),
        ])
    });

    let (apis, contents) = rayon::join(
        || build_apis(config, &sources.apis, progress.as_ref()),
        || build_contents(config, &table, &sources.contents, progress.as_ref()),
    );
    let apis = apis?;
    let contents = contents?;
    if let Some(p) = progress {
        p.finish();
    }
    apis.write(output)?;

    RouteManifest::new(config.app.clone(), &table).write(output)?;

    let redirects = match routing.method {
        RoutingMethod::Path => write_redirect_pages(&config.app, &table, output)?.len(),
        RoutingMethod::Query => 0,
    };

    let report = BuildReport {
        routes: table.len(),
        apis: apis.len(),
        contents,
        redirects,
    };
    if !quiet {
        log!("build"; "{}, {} pages in {}",
            plural_count(report.routes, "route"),
            report.redirects,
            config.root_relative(output).display());
    }
    Ok(report)
}

/// Create the output directory, removing it first when `clean`.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

fn check_entrance(config: &SiteConfig, table: &RouteTable) {
    let resolver = RouteResolver::new(table, &config.app.routing);
    if let Ok(route) = resolver.from_route_id(&config.app.entrance)
        && !route.exists()
    {
        log!("warning"; "entrance `{}` matches no route, the root will show not found",
            config.app.entrance);
    }
}

/// Load every API's doclets in parallel, keyed by normalized API name.
fn build_apis(
    config: &SiteConfig,
    sources: &[ApiSource],
    progress: Option<&ProgressLine>,
) -> Result<ApiRegistry> {
    let routing = &config.app.routing;
    let loaded: Vec<(String, ApiDocs)> = sources
        .par_iter()
        .map(|source| {
            let docs = ApiDocs::from_files(&source.files)
                .with_context(|| format!("Failed to load api `{}`", source.name))?;
            if let Some(p) = progress {
                p.inc("api");
            }
            Ok((routing.normalize_name(&source.name).into_owned(), docs))
        })
        .collect::<Result<_>>()?;

    let mut registry = ApiRegistry::default();
    for (name, docs) in loaded {
        debug!("api"; "{}: {}", name, plural_count(docs.symbols.len(), "symbol"));
        registry.insert(name, docs);
    }
    Ok(registry)
}

/// Render every content file to its `contentPath`. Returns the file count.
fn build_contents(
    config: &SiteConfig,
    table: &RouteTable,
    sources: &[ContentSource],
    progress: Option<&ProgressLine>,
) -> Result<usize> {
    let routing = &config.app.routing;
    let output = config.build.output.as_path();

    sources.par_iter().try_for_each(|source| {
        let name = routing.normalize_name(&source.name);
        let Some(content_path) = table
            .get(RouteKind::Content, &name)
            .and_then(|entry| entry.content_path.as_deref())
        else {
            bail!("no content route for {}", source.path.display());
        };

        write_content(&source.path, source.source_type, &output.join(content_path))
            .with_context(|| format!("Failed to render {}", config.root_relative(&source.path).display()))?;

        if let Some(p) = progress {
            p.inc(progress_counter(source.source_type));
        }
        Ok(())
    })?;

    Ok(sources.len())
}

const fn progress_counter(source_type: SourceType) -> &'static str {
    match source_type {
        SourceType::Md => "markdown",
        SourceType::Html => "html",
        SourceType::Js => "api",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    fn site(method: &str) -> (tempfile::TempDir, SiteConfig) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("doclets")).unwrap();
        fs::create_dir_all(root.join("docs/guides")).unwrap();
        fs::write(
            root.join("doclets/core.json"),
            r#"[{"longname":"Core","kind":"class"},{"longname":"x","undocumented":true}]"#,
        )
        .unwrap();
        fs::write(root.join("doclets/web.json"), r#"[{"longname":"Widget"}]"#).unwrap();
        fs::write(root.join("docs/guide.md"), "# Guide\n").unwrap();
        fs::write(root.join("docs/guides/intro.html"), "<p>intro</p>").unwrap();

        let mut config = test_parse_config(&format!(
            r#"
[app]
title = "Docs"
entrance = "content:guide"

[app.routing]
method = "{method}"

[build]
content_dir = "docs"

[build.api]
_def_ = ["doclets/core.json"]
web = ["doclets/web.json"]
"#
        ));
        config.set_root(root);
        config.build.normalize(root);
        (dir, config)
    }

    #[test]
    fn test_build_path_mode() {
        let (dir, config) = site("path");
        let report = build_site(&config, true).unwrap();
        assert_eq!(
            report,
            BuildReport {
                routes: 4,
                apis: 2,
                contents: 2,
                redirects: 5,
            }
        );

        let out = &config.build.output;
        assert_eq!(
            fs::read_to_string(out.join("content/guide.html")).unwrap(),
            "<h1>Guide</h1>\n"
        );
        assert!(out.join("content/guides/intro.html").is_file());
        assert!(out.join("api/index.html").is_file());
        assert!(out.join("guides/intro/index.html").is_file());
        assert!(out.join("404.html").is_file());

        let apis = ApiRegistry::load(out).unwrap();
        assert_eq!(apis.get("_def_").unwrap().symbols, ["Core"]);

        let (app, table) = RouteManifest::load(out).unwrap().into_parts().unwrap();
        assert_eq!(app.entrance, "content:guide");
        assert_eq!(table.get(RouteKind::Api, "web").unwrap().path, "/api/web/");
        drop(dir);
    }

    #[test]
    fn test_build_query_mode_has_no_redirects() {
        let (_dir, config) = site("query");
        let report = build_site(&config, true).unwrap();
        assert_eq!(report.redirects, 0);
        assert!(!config.build.output.join("404.html").exists());
        assert!(config.build.output.join(RouteManifest::FILE).is_file());
    }

    #[test]
    fn test_build_rejects_conflicts() {
        let (dir, mut config) = site("path");
        let dup = dir.path().join("guide.html");
        fs::write(&dup, "<p>dup</p>").unwrap();
        config.build.content.insert("guide".into(), dup);
        assert!(build_site(&config, true).is_err());
        assert!(!config.build.output.join(RouteManifest::FILE).exists());
    }

    #[test]
    fn test_build_clean_removes_stale_files() {
        let (_dir, mut config) = site("query");
        fs::create_dir_all(&config.build.output).unwrap();
        let stale = config.build.output.join("stale.html");
        fs::write(&stale, "old").unwrap();

        build_site(&config, true).unwrap();
        assert!(stale.exists());

        config.build.clean = true;
        build_site(&config, true).unwrap();
        assert!(!stale.exists());
    }

    #[test]
    fn test_build_missing_doclets() {
        let (dir, config) = site("query");
        fs::remove_file(dir.path().join("doclets/web.json")).unwrap();
        let err = build_site(&config, true).unwrap_err();
        assert!(format!("{err:#}").contains("web"));
    }
}
