//! `dossier navigate` - replay navigations against a built site.
//!
//! The first URL is an initial page load through a static host: in path
//! mode a deep URL first hits its redirect page, which stores the path and
//! sends the browser to the base. Later URLs are in-app navigations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};

use crate::config::{RoutingMethod, SiteConfig};
use crate::core::RouteKind;
use crate::nav::{
    Completion, Dispatch, Dispatcher, Navigation, REDIRECT_KEY, Renderer, STATUS_OK, Session,
};
use crate::route::{Route, RouteManifest};
use crate::site::ApiRegistry;
use crate::{debug, log};

/// Redirect hops followed before giving up.
const MAX_REDIRECTS: usize = 4;

/// Renders from the output directory: content files must exist, API
/// routes need loaded documentation data.
#[derive(Debug)]
pub struct FsRenderer {
    output: PathBuf,
}

impl FsRenderer {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
        }
    }

    fn status(&self, route: &Route, session: &Session) -> u16 {
        let Some(entry) = route.entry() else {
            return 404;
        };
        let found = match entry.kind {
            RouteKind::Api => session.loaded_api().is_some(),
            RouteKind::Content => entry
                .content_path
                .as_deref()
                .is_some_and(|path| self.output.join(path).is_file()),
        };
        if found { STATUS_OK } else { 404 }
    }
}

impl Renderer for FsRenderer {
    fn render(&mut self, route: &Route, session: &Session, done: Completion) {
        let status = self.status(route, session);
        match (route.entry(), session.loaded_api()) {
            (Some(entry), Some(api)) if entry.kind == RouteKind::Api => {
                debug!("render"; "{} ({} symbols)", entry.id, api.docs.symbols.len());
            }
            (Some(entry), _) => debug!("render"; "{} [{}]", entry.id, route),
            (None, _) => debug!("render"; "404 view for {}", done.navigation()),
        }
        done.finish(status);
    }
}

/// Run the `navigate` command.
pub fn run_navigate(config: &SiteConfig, urls: &[String]) -> Result<()> {
    let mut dispatcher = open_site(&config.build.output)?;
    dispatcher
        .session_mut()
        .subscribe(|event| log!("event"; "{}", event));

    for outcome in replay(&mut dispatcher, urls)? {
        debug!("nav"; "settled: {}", outcome);
    }
    Ok(())
}

/// Load manifest and API data from a built site.
pub fn open_site(output: &Path) -> Result<Dispatcher<FsRenderer>> {
    let manifest = RouteManifest::load(output)
        .with_context(|| format!("No built site in {} (run `dossier build`)", output.display()))?;
    let (app, table) = manifest.into_parts()?;
    let apis = ApiRegistry::load(output)?;

    let session = Session::new(app, Arc::new(table), apis)?;
    Ok(Dispatcher::new(session, FsRenderer::new(output))?)
}

/// Dispatch every URL in order, following redirects. Returns the final
/// outcome of each URL.
pub fn replay(dispatcher: &mut Dispatcher<FsRenderer>, urls: &[String]) -> Result<Vec<Dispatch>> {
    let mut outcomes = Vec::with_capacity(urls.len());
    for (i, url) in urls.iter().enumerate() {
        let nav = Navigation::parse(url);
        let nav = if i == 0 { initial_load(dispatcher, nav) } else { nav };
        outcomes.push(visit(dispatcher, nav)?);
    }
    Ok(outcomes)
}

/// What a static host does with a first request for `nav`.
fn initial_load<R: Renderer>(dispatcher: &mut Dispatcher<R>, nav: Navigation) -> Navigation {
    let base = dispatcher.session().app().base.clone();
    if dispatcher.session().app().routing.method != RoutingMethod::Path || nav.path == base {
        return nav;
    }

    let relative = Navigation {
        path: nav.path.strip_base(&base).unwrap_or_else(|| nav.path.clone()),
        ..nav.clone()
    };
    log!("host"; "{} served a redirect page", nav.path);
    dispatcher
        .session_mut()
        .storage_mut()
        .set(REDIRECT_KEY, relative.href());
    Navigation::to_path(base)
}

fn visit<R: Renderer>(dispatcher: &mut Dispatcher<R>, mut nav: Navigation) -> Result<Dispatch> {
    for _ in 0..=MAX_REDIRECTS {
        let (dispatch, settled) = dispatcher.go(&nav);
        log!("nav"; "{} -> {}", nav, dispatch);
        for outcome in settled.iter().filter(|s| !s.is_ok()) {
            log!("nav"; "{} rendered with status {}", outcome.navigation, outcome.status);
        }

        match dispatch {
            Dispatch::Redirect(target) => nav = target,
            other => return Ok(other),
        }
    }
    bail!("too many redirects starting from {}", nav)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::fs;
    use std::rc::Rc;

    use super::*;
    use crate::config::test_parse_config;
    use crate::nav::NavEvent;
    use crate::site::build_site;

    fn built_site(method: &str, base: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::write(root.join("core.json"), r#"[{"longname":"Core"}]"#).unwrap();
        fs::write(root.join("docs/guide.md"), "# Guide").unwrap();

        let mut config = test_parse_config(&format!(
            r#"
[app]
base = "{base}"
entrance = "content:guide"

[app.routing]
method = "{method}"

[build]
content_dir = "docs"

[build.api]
_def_ = ["core.json"]
web = ["core.json"]
"#
        ));
        config.set_root(root);
        config.build.normalize(root);
        build_site(&config, true).unwrap();
        let output = config.build.output.clone();
        (dir, output)
    }

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn current(dispatcher: &Dispatcher<FsRenderer>) -> Option<String> {
        dispatcher
            .session()
            .current_route()
            .and_then(Route::id)
            .map(str::to_string)
    }

    #[test]
    fn test_initial_deep_load_two_hops() {
        let (_dir, output) = built_site("path", "/docs/");
        let mut dispatcher = open_site(&output).unwrap();

        let outcomes = replay(&mut dispatcher, &urls(&["/docs/api/web/"])).unwrap();
        assert!(matches!(&outcomes[0], Dispatch::Rendering(r) if r.id() == Some("api:web")));
        assert_eq!(current(&dispatcher).as_deref(), Some("api:web"));
        assert!(dispatcher.session().storage().get(REDIRECT_KEY).is_none());
    }

    #[test]
    fn test_initial_load_keeps_fragment() {
        let (_dir, output) = built_site("path", "/docs/");
        let mut dispatcher = open_site(&output).unwrap();
        let navigated = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&navigated);
        dispatcher.session_mut().subscribe(move |event| {
            if let NavEvent::Navigate(nav) = event {
                sink.borrow_mut().push(nav.href());
            }
        });

        let outcomes = replay(&mut dispatcher, &urls(&["/docs/guide/?lang=en#install"])).unwrap();
        assert!(matches!(&outcomes[0], Dispatch::Rendering(r) if r.id() == Some("content:guide")));
        assert_eq!(*navigated.borrow(), ["/docs/guide/?lang=en#install"]);
    }

    #[test]
    fn test_in_app_navigation() {
        let (_dir, output) = built_site("path", "/");
        let mut dispatcher = open_site(&output).unwrap();

        let outcomes = replay(
            &mut dispatcher,
            &urls(&["/", "/guide/", "/guide/#top", "/missing/", "/api/"]),
        )
        .unwrap();
        assert!(matches!(&outcomes[0], Dispatch::Rendering(r) if r.id() == Some("content:guide")));
        assert!(matches!(&outcomes[1], Dispatch::Unchanged(_)));
        assert!(matches!(&outcomes[2], Dispatch::Unchanged(_)));
        assert!(matches!(&outcomes[3], Dispatch::NotFound));
        assert!(matches!(&outcomes[4], Dispatch::Rendering(r) if r.id() == Some("api:_def_")));
        assert_eq!(current(&dispatcher).as_deref(), Some("api:_def_"));
    }

    #[test]
    fn test_query_mode_has_no_redirect_hop() {
        let (_dir, output) = built_site("query", "/");
        let mut dispatcher = open_site(&output).unwrap();

        let outcomes = replay(&mut dispatcher, &urls(&["/?api=web", "?content=guide"])).unwrap();
        assert!(matches!(&outcomes[0], Dispatch::Rendering(r) if r.id() == Some("api:web")));
        assert!(matches!(&outcomes[1], Dispatch::Rendering(r) if r.id() == Some("content:guide")));
    }

    #[test]
    fn test_missing_content_file_keeps_previous_route() {
        let (_dir, output) = built_site("path", "/");
        fs::remove_file(output.join("content/guide.html")).unwrap();
        let mut dispatcher = open_site(&output).unwrap();

        replay(&mut dispatcher, &urls(&["/api/web/", "/guide/"])).unwrap();
        assert_eq!(current(&dispatcher).as_deref(), Some("api:web"));
    }

    #[test]
    fn test_open_site_without_build() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_site(dir.path()).unwrap_err();
        assert!(err.to_string().contains("dossier build"));
    }
}
