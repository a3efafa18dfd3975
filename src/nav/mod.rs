//! Navigation runtime.
//!
//! A [`Session`] owns all mutable navigation state. A [`Dispatcher`] maps
//! [`Navigation`] requests to routes and hands them to a [`Renderer`].
//! Path-mode URL shapes are matched by a [`PathMatcher`], so the whole
//! protocol runs on synthetic paths without a browser.

mod dispatcher;
mod event;
mod location;
mod matcher;
mod render;
mod session;
mod storage;

use thiserror::Error;

pub use dispatcher::{Dispatch, Dispatcher};
pub use event::{EventBus, NavEvent};
pub use location::Navigation;
pub use matcher::{PathMatch, PathMatcher, PatternRouter};
pub use render::{Completion, Renderer, STATUS_OK, Settled};
pub use session::{LoadedApi, Session};
pub use storage::{REDIRECT_KEY, SessionStorage};

#[derive(Debug, Error)]
pub enum NavError {
    #[error("invalid base path pattern")]
    Pattern(#[from] regex::Error),
}
