//! Renderer contract and completion delivery.
//!
//! The dispatcher never waits on a renderer. Each render gets a
//! [`Completion`] that posts a [`Settled`] message to the dispatcher's
//! queue; the dispatcher acts on it in `pump()`. Renderers may finish
//! inline or hold on to the completion and finish later.

use crossbeam::channel::Sender;

use super::{Navigation, Session};
use crate::route::Route;

/// HTTP-like status meaning "rendered".
pub const STATUS_OK: u16 = 200;

/// Loads and presents a route.
///
/// `Route::NotFound` must be presented as a 404 view.
pub trait Renderer {
    fn render(&mut self, route: &Route, session: &Session, done: Completion);
}

/// A render outcome waiting to be processed by the dispatcher.
#[derive(Debug, Clone)]
pub struct Settled {
    pub route: Route,
    pub navigation: Navigation,
    pub status: u16,
}

impl Settled {
    pub const fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// One-shot handle a renderer uses to report its status.
#[derive(Debug)]
#[must_use = "the dispatcher only settles a navigation once its completion is finished"]
pub struct Completion {
    route: Route,
    navigation: Navigation,
    tx: Sender<Settled>,
}

impl Completion {
    pub(crate) fn new(route: Route, navigation: Navigation, tx: Sender<Settled>) -> Self {
        Self {
            route,
            navigation,
            tx,
        }
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    /// Report the render status. A dropped dispatcher makes this a no-op.
    pub fn finish(self, status: u16) {
        let _ = self.tx.send(Settled {
            route: self.route,
            navigation: self.navigation,
            status,
        });
    }
}
