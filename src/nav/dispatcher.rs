//! Navigation dispatcher.
//!
//! Maps navigation requests to routes and drives the renderer:
//!
//! ```text
//! navigate(nav)
//!   query mode ............................ root
//!   path mode:  Root ...................... root
//!               Api(name) / Content(name) . show(resolved)
//!               no match .................. not found
//!
//! root:   redirect slot set (path mode) -> Redirect(slot), slot cleared
//!         query has an api/content key   -> show(parsed)
//!         otherwise                      -> show(entrance)
//!
//! show:   !exists      -> not found (renderer shows 404)
//!         is current   -> Unchanged, `navigate` event only
//!         otherwise    -> Rendering, settles in pump()
//! ```
//!
//! Completions are processed in the order renderers finish them, not the
//! order navigations started.

use std::fmt;

use crossbeam::channel::{self, Receiver, Sender};

use super::{
    Completion, NavError, NavEvent, Navigation, PathMatch, PathMatcher, PatternRouter, Renderer,
    Session, Settled, REDIRECT_KEY,
};
use crate::config::RoutingMethod;
use crate::core::RouteKind;
use crate::debug;
use crate::route::{Route, RouteResolver};

/// Immediate outcome of a navigation request.
#[derive(Debug, Clone)]
pub enum Dispatch {
    /// Send the browser here instead.
    Redirect(Navigation),
    /// Handed to the renderer; settles in [`Dispatcher::pump`].
    Rendering(Route),
    /// Already displayed; no reload.
    Unchanged(Route),
    /// Not-found view handed to the renderer.
    NotFound,
}

impl fmt::Display for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redirect(target) => write!(f, "redirect {target}"),
            Self::Rendering(route) => write!(f, "render {}", route.id().unwrap_or_default()),
            Self::Unchanged(route) => write!(f, "unchanged {}", route.id().unwrap_or_default()),
            Self::NotFound => f.write_str("not found"),
        }
    }
}

pub struct Dispatcher<R: Renderer> {
    session: Session,
    renderer: R,
    /// Path-mode patterns; `None` in query mode.
    matcher: Option<Box<dyn PathMatcher>>,
    tx: Sender<Settled>,
    rx: Receiver<Settled>,
}

impl<R: Renderer + fmt::Debug> fmt::Debug for Dispatcher<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("session", &self.session)
            .field("renderer", &self.renderer)
            .field("path_routing", &self.matcher.is_some())
            .field("pending", &self.rx.len())
            .finish()
    }
}

impl<R: Renderer> Dispatcher<R> {
    /// Set up routing for the session's method. Path mode registers the
    /// base-prefixed patterns.
    pub fn new(session: Session, renderer: R) -> Result<Self, NavError> {
        let matcher: Option<Box<dyn PathMatcher>> = match session.app().routing.method {
            RoutingMethod::Path => Some(Box::new(PatternRouter::new(&session.app().base)?)),
            RoutingMethod::Query => None,
        };
        Ok(Self::with_matcher(session, renderer, matcher))
    }

    /// Use a custom matcher (or none, for same-document routing).
    pub fn with_matcher(
        session: Session,
        renderer: R,
        matcher: Option<Box<dyn PathMatcher>>,
    ) -> Self {
        let (tx, rx) = channel::unbounded();
        Self {
            session,
            renderer,
            matcher,
            tx,
            rx,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Handle one navigation request.
    pub fn navigate(&mut self, nav: &Navigation) -> Dispatch {
        if self.matcher.is_none() {
            return self.root(nav);
        }

        let matched = self
            .matcher
            .as_ref()
            .and_then(|matcher| matcher.match_path(&nav.path));
        match matched {
            Some(PathMatch::Root) => self.root(nav),
            Some(PathMatch::Api(name)) => {
                let route = self
                    .session
                    .resolver()
                    .from_path_segment(RouteKind::Api, name.as_deref().unwrap_or_default());
                self.show(route, nav)
            }
            Some(PathMatch::Content(name)) => {
                let route = self
                    .session
                    .resolver()
                    .from_path_segment(RouteKind::Content, &name);
                self.show(route, nav)
            }
            None => self.not_found(nav),
        }
    }

    fn root(&mut self, nav: &Navigation) -> Dispatch {
        if self.matcher.is_some()
            && let Some(path) = self.session.storage_mut().take(REDIRECT_KEY)
        {
            // The slot holds a base-relative href, query and fragment included
            let mut target = Navigation::parse(&path);
            target.path = target.path.with_base(&self.session.app().base);
            debug!("nav"; "redirect slot consumed: {}", target);
            return Dispatch::Redirect(target);
        }

        let route = match RouteResolver::query_target(&nav.query) {
            Some((kind, name)) => self.session.resolver().from_name_and_type(&name, kind),
            None => self.session.entrance().clone(),
        };
        self.show(route, nav)
    }

    fn show(&mut self, route: Route, nav: &Navigation) -> Dispatch {
        if !route.exists() {
            return self.not_found(nav);
        }
        if route.is_current(&self.session) {
            self.session.emit(&NavEvent::Navigate(nav.clone()));
            return Dispatch::Unchanged(route);
        }

        let done = Completion::new(route.clone(), nav.clone(), self.tx.clone());
        route.apply(&mut self.session, &mut self.renderer, done);
        Dispatch::Rendering(route)
    }

    fn not_found(&mut self, nav: &Navigation) -> Dispatch {
        debug!("nav"; "no route for {}", nav);
        let done = Completion::new(Route::NotFound, nav.clone(), self.tx.clone());
        Route::not_found().apply(&mut self.session, &mut self.renderer, done);
        Dispatch::NotFound
    }

    /// Process every finished render, in completion order.
    ///
    /// A `200` emits `navigate` and makes the route current; anything else
    /// is left to the renderer to present.
    pub fn pump(&mut self) -> Vec<Settled> {
        let settled: Vec<Settled> = self.rx.try_iter().collect();
        for outcome in &settled {
            if !outcome.is_ok() {
                debug!("nav"; "render of {} finished with {}", outcome.navigation, outcome.status);
                continue;
            }
            if outcome.route.exists() {
                self.session.set_current(outcome.route.clone());
            }
            self.session
                .emit(&NavEvent::Navigate(outcome.navigation.clone()));
        }
        settled
    }

    /// Navigate, then settle whatever the renderer finished inline.
    pub fn go(&mut self, nav: &Navigation) -> (Dispatch, Vec<Settled>) {
        let dispatch = self.navigate(nav);
        let settled = self.pump();
        (dispatch, settled)
    }
}
