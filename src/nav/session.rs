//! Application session: every piece of mutable navigation state.
//!
//! One session per running application (or per test). Nothing here is
//! global, so independent sessions never observe each other.

use std::sync::Arc;

use super::{EventBus, NavEvent, SessionStorage};
use crate::config::AppConfig;
use crate::debug;
use crate::route::{Route, RouteError, RouteResolver, RouteTable};
use crate::site::{ApiDocs, ApiRegistry};

/// The API whose documentation is currently loaded.
#[derive(Debug, Clone)]
pub struct LoadedApi {
    pub name: String,
    pub docs: Arc<ApiDocs>,
}

#[derive(Debug)]
pub struct Session {
    app: AppConfig,
    table: Arc<RouteTable>,
    apis: ApiRegistry,
    /// Resolved once from `app.entrance`.
    entrance: Route,
    /// Last route whose render reported success.
    current: Option<Route>,
    loaded: Option<LoadedApi>,
    storage: SessionStorage,
    events: EventBus,
}

impl Session {
    /// Create a session, resolving the entrance route.
    ///
    /// Fails only when the entrance id names an unknown route type; an
    /// entrance that resolves to nothing is kept as `NotFound`.
    pub fn new(app: AppConfig, table: Arc<RouteTable>, apis: ApiRegistry) -> Result<Self, RouteError> {
        let entrance = RouteResolver::new(&table, &app.routing).from_route_id(&app.entrance)?;
        if !entrance.exists() {
            debug!("nav"; "entrance `{}` does not resolve", app.entrance);
        }

        Ok(Self {
            app,
            table,
            apis,
            entrance,
            current: None,
            loaded: None,
            storage: SessionStorage::default(),
            events: EventBus::default(),
        })
    }

    pub fn app(&self) -> &AppConfig {
        &self.app
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn resolver(&self) -> RouteResolver<'_> {
        RouteResolver::new(&self.table, &self.app.routing)
    }

    pub fn entrance(&self) -> &Route {
        &self.entrance
    }

    pub fn current_route(&self) -> Option<&Route> {
        self.current.as_ref()
    }

    pub(crate) fn set_current(&mut self, route: Route) {
        self.current = Some(route);
    }

    /// Replace the loaded API with `name`'s data.
    pub fn load_api(&mut self, name: &str) {
        self.loaded = self.apis.get(name).map(|docs| LoadedApi {
            name: name.to_string(),
            docs: Arc::clone(docs),
        });
        if self.loaded.is_none() {
            debug!("nav"; "no documentation data for api `{}`", name);
        }
    }

    pub fn clear_api(&mut self) {
        self.loaded = None;
    }

    pub fn loaded_api(&self) -> Option<&LoadedApi> {
        self.loaded.as_ref()
    }

    pub fn storage(&self) -> &SessionStorage {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut SessionStorage {
        &mut self.storage
    }

    pub fn subscribe(&mut self, f: impl FnMut(&NavEvent) + 'static) {
        self.events.subscribe(f);
    }

    pub fn emit(&mut self, event: &NavEvent) {
        self.events.emit(event);
    }
}
