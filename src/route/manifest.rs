//! Route manifest (`routes.json`) - the build step's hand-off to the runtime.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{RouteEntry, RouteError, RouteTable};
use crate::config::AppConfig;

/// App settings plus the ordered route entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteManifest {
    pub app: AppConfig,
    pub routes: Vec<RouteEntry>,
}

impl RouteManifest {
    /// File name inside the output directory.
    pub const FILE: &'static str = "routes.json";

    pub fn new(app: AppConfig, table: &RouteTable) -> Self {
        Self {
            app,
            routes: table.iter().cloned().collect(),
        }
    }

    /// Read `routes.json` from a built site.
    pub fn load(output_dir: &Path) -> Result<Self, RouteError> {
        let path = output_dir.join(Self::FILE);
        let content = fs::read_to_string(&path).map_err(|e| RouteError::Io(path.clone(), e))?;
        serde_json::from_str(&content).map_err(|e| RouteError::Manifest(path, e))
    }

    /// Write `routes.json` into the output directory.
    pub fn write(&self, output_dir: &Path) -> Result<(), RouteError> {
        let path = output_dir.join(Self::FILE);
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| RouteError::Manifest(path.clone(), e))?;
        fs::write(&path, json).map_err(|e| RouteError::Io(path, e))
    }

    /// Freeze the entries, re-checking table invariants.
    pub fn into_parts(self) -> Result<(AppConfig, RouteTable), RouteError> {
        let table = RouteTable::from_entries(self.routes)?;
        Ok((self.app, table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoutingMethod;
    use crate::core::{RouteKind, SourceType};

    fn manifest() -> RouteManifest {
        let mut app = AppConfig::default();
        app.title = "Docs".into();
        app.routing.method = RoutingMethod::Path;
        let table = RouteTable::from_entries(vec![
            RouteEntry::api("_def_", &app.routing),
            RouteEntry::content("guide", SourceType::Md, &app.routing),
        ])
        .unwrap();
        RouteManifest::new(app, &table)
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        manifest().write(dir.path()).unwrap();

        let loaded = RouteManifest::load(dir.path()).unwrap();
        assert_eq!(loaded.app.title, "Docs");
        assert_eq!(loaded.app.routing.method, RoutingMethod::Path);

        let (_, table) = loaded.into_parts().unwrap();
        assert_eq!(table.get(RouteKind::Content, "guide").unwrap().path, "/guide/");
    }

    #[test]
    fn test_load_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            RouteManifest::load(dir.path()),
            Err(RouteError::Io(..))
        ));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(RouteManifest::FILE), "{ not json").unwrap();
        assert!(matches!(
            RouteManifest::load(dir.path()),
            Err(RouteError::Manifest(..))
        ));
    }

    #[test]
    fn test_into_parts_rejects_duplicates() {
        let mut manifest = manifest();
        let dup = manifest.routes[1].clone();
        manifest.routes.push(dup);
        assert!(matches!(
            manifest.into_parts(),
            Err(RouteError::Duplicate(id)) if id == "content:guide"
        ));
    }
}
