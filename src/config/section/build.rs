//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "public"
//! clean = false
//! content_dir = "docs"
//!
//! [build.api]
//! _def_ = ["doclets/core.json"]
//! web = ["doclets/web.json", "doclets/web-extra.json"]
//!
//! [build.content]
//! guide = "content/guide.md"
//! changelog = "CHANGELOG.md"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::core::SourceType;

/// Build settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Output directory.
    pub output: PathBuf,

    /// Remove the output directory before building.
    pub clean: bool,

    /// Directory walked for markdown/HTML content files.
    pub content_dir: Option<PathBuf>,

    /// API name -> doclet JSON files.
    pub api: BTreeMap<String, Vec<PathBuf>>,

    /// Content name -> markdown/HTML file.
    pub content: BTreeMap<String, PathBuf>,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            output: "public".into(),
            clean: false,
            content_dir: None,
            api: BTreeMap::new(),
            content: BTreeMap::new(),
        }
    }
}

impl BuildSectionConfig {
    pub const API: FieldPath = FieldPath::new("build.api");
    pub const CONTENT: FieldPath = FieldPath::new("build.content");
    pub const CONTENT_DIR: FieldPath = FieldPath::new("build.content_dir");

    /// Resolve every configured path against the project root.
    pub fn normalize(&mut self, root: &Path) {
        self.output = crate::utils::path::normalize_path(&root.join(&self.output));
        self.content_dir = self
            .content_dir
            .take()
            .map(|dir| crate::utils::path::normalize_path(&root.join(dir)));
        for files in self.api.values_mut() {
            for file in files.iter_mut() {
                *file = crate::utils::path::normalize_path(&root.join(&*file));
            }
        }
        for file in self.content.values_mut() {
            *file = crate::utils::path::normalize_path(&root.join(&*file));
        }
    }

    /// Validate build configuration.
    ///
    /// # Checks
    /// - Every `[build.content]` file has a markdown or HTML extension
    /// - Every `[build.api]` entry lists at least one file
    /// - `content_dir`, when set, is a directory
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (name, file) in &self.content {
            let supported = file
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(SourceType::from_extension)
                .is_some();
            if !supported {
                diag.error_with_hint(
                    Self::CONTENT,
                    format!("`{}` has unsupported file type: {}", name, file.display()),
                    "content files must end in .md, .markdown, .html or .htm",
                );
            }
        }

        for (name, files) in &self.api {
            if files.is_empty() {
                diag.error(Self::API, format!("`{}` lists no doclet files", name));
            }
        }

        if let Some(dir) = &self.content_dir
            && !dir.is_dir()
        {
            diag.error(
                Self::CONTENT_DIR,
                format!("not a directory: {}", dir.display()),
            );
        }
    }
}
