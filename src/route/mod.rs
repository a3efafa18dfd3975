//! Route model - table, descriptors and lookups.
//!
//! # Architecture
//!
//! ```text
//! build step                         runtime
//! ==========                         =======
//! RouteEntry (api / content)   ->    RouteTable (frozen, (type, name) index)
//!        |                                |
//!   routes.json  ------------------>  RouteResolver  ->  Route {Found, NotFound}
//! ```
//!
//! # Module Structure
//!
//! - [`conflict`]: duplicate id / path detection at build time
//! - `entry`: table rows and their URL shapes per routing method
//! - `table`: frozen table with exact `(type, name)` lookup
//! - `descriptor`: [`Route`], the result of a lookup
//! - `resolve`: names, query strings and route ids to descriptors
//! - `manifest`: `routes.json` read/write

pub mod conflict;
mod descriptor;
mod entry;
mod manifest;
mod resolve;
mod table;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use descriptor::{Route, RouteProjection};
pub use entry::{RouteEntry, route_id};
pub use manifest::RouteManifest;
pub use resolve::{RouteResolver, split_route_id};
pub use table::RouteTable;

/// Route-layer misconfiguration. Not-found is never an error.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("unknown route type `{0}` (expected `api` or `content`)")]
    UnknownKind(String),

    #[error("duplicate route `{0}`")]
    Duplicate(String),

    #[error("failed to access {}", .0.display())]
    Io(PathBuf, #[source] io::Error),

    #[error("invalid route manifest {}", .0.display())]
    Manifest(PathBuf, #[source] serde_json::Error),
}
