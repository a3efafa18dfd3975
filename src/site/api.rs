//! API documentation data (`apis.json`).
//!
//! Doclet files are JSON arrays as produced by `jsdoc -X`. Each API merges
//! its files in order; the symbol list is derived from the merged doclets.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::SiteError;

/// Documentation and symbol list of one API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiDocs {
    pub documentation: Vec<Value>,
    pub symbols: Vec<String>,
}

impl ApiDocs {
    /// Merge doclet files and derive the symbol list.
    pub fn from_files(files: &[PathBuf]) -> Result<Self, SiteError> {
        let mut documentation = Vec::new();
        for path in files {
            let content =
                fs::read_to_string(path).map_err(|e| SiteError::Io(path.clone(), e))?;
            let doclets: Vec<Value> = serde_json::from_str(&content)
                .map_err(|e| SiteError::Doclets(path.clone(), e))?;
            documentation.extend(doclets);
        }
        Ok(Self::from_doclets(documentation))
    }

    pub fn from_doclets(documentation: Vec<Value>) -> Self {
        let symbols: BTreeSet<&str> = documentation
            .iter()
            .filter(|doclet| is_public_symbol(doclet))
            .filter_map(|doclet| doclet.get("longname")?.as_str())
            .collect();
        let symbols = symbols.into_iter().map(str::to_string).collect();
        Self {
            documentation,
            symbols,
        }
    }
}

/// Documented, not ignored, not a package, not private.
fn is_public_symbol(doclet: &Value) -> bool {
    let flag = |key: &str| doclet.get(key).and_then(Value::as_bool).unwrap_or(false);
    let field = |key: &str| doclet.get(key).and_then(Value::as_str);

    !flag("undocumented")
        && !flag("ignore")
        && field("kind") != Some("package")
        && field("access") != Some("private")
}

/// All APIs of a site, keyed by (normalized) API name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiRegistry(BTreeMap<String, Arc<ApiDocs>>);

impl ApiRegistry {
    /// File name inside the output directory.
    pub const FILE: &'static str = "apis.json";

    pub fn insert(&mut self, name: impl Into<String>, docs: ApiDocs) {
        self.0.insert(name.into(), Arc::new(docs));
    }

    pub fn get(&self, name: &str) -> Option<&Arc<ApiDocs>> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn load(output_dir: &Path) -> Result<Self, SiteError> {
        let path = output_dir.join(Self::FILE);
        let content = fs::read_to_string(&path).map_err(|e| SiteError::Io(path.clone(), e))?;
        serde_json::from_str(&content).map_err(|e| SiteError::Json(path, e))
    }

    pub fn write(&self, output_dir: &Path) -> Result<(), SiteError> {
        let path = output_dir.join(Self::FILE);
        let json = serde_json::to_string(self).map_err(|e| SiteError::Json(path.clone(), e))?;
        fs::write(&path, json).map_err(|e| SiteError::Io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_symbols_filtered_sorted_unique() {
        let docs = ApiDocs::from_doclets(vec![
            json!({ "longname": "Widget", "kind": "class" }),
            json!({ "longname": "Widget#render", "kind": "function" }),
            json!({ "longname": "Widget", "kind": "class" }),
            json!({ "longname": "Anchor", "kind": "class" }),
            json!({ "longname": "hidden", "undocumented": true }),
            json!({ "longname": "skipped", "ignore": true }),
            json!({ "longname": "package:undefined", "kind": "package" }),
            json!({ "longname": "Widget#_state", "access": "private" }),
            json!({ "longname": "Widget#size", "access": "protected" }),
            json!({ "kind": "class" }),
        ]);
        assert_eq!(docs.symbols, ["Anchor", "Widget", "Widget#render", "Widget#size"]);
        assert_eq!(docs.documentation.len(), 10);
    }

    #[test]
    fn test_from_files_merges_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        fs::write(&a, r#"[{"longname":"b.one"}]"#).unwrap();
        fs::write(&b, r#"[{"longname":"a.two"}]"#).unwrap();

        let docs = ApiDocs::from_files(&[a, b]).unwrap();
        assert_eq!(docs.documentation[0]["longname"], "b.one");
        assert_eq!(docs.symbols, ["a.two", "b.one"]);
    }

    #[test]
    fn test_from_files_rejects_non_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"longname":"x"}"#).unwrap();
        assert!(matches!(
            ApiDocs::from_files(&[path]),
            Err(SiteError::Doclets(..))
        ));
    }

    #[test]
    fn test_registry_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = ApiRegistry::default();
        registry.insert("_def_", ApiDocs::from_doclets(vec![json!({ "longname": "Core" })]));
        registry.write(dir.path()).unwrap();

        let loaded = ApiRegistry::load(dir.path()).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get("_def_").unwrap().symbols, ["Core"]);

        let raw: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join(ApiRegistry::FILE)).unwrap())
                .unwrap();
        assert!(raw["_def_"]["documentation"].is_array());
    }
}
