//! Source collection: configured APIs, configured content, and the
//! optional content directory.

use std::path::{Path, PathBuf};

use jwalk::WalkDir;

use crate::config::{BuildSectionConfig, RoutingConfig};
use crate::core::SourceType;
use crate::route::RouteEntry;
use crate::route::conflict::RouteClaim;
use crate::utils::slug::slugify_path;

/// One API and its doclet files.
#[derive(Debug, Clone)]
pub struct ApiSource {
    pub name: String,
    pub files: Vec<PathBuf>,
}

/// One content file and the route name it is published under.
#[derive(Debug, Clone)]
pub struct ContentSource {
    pub name: String,
    pub path: PathBuf,
    pub source_type: SourceType,
}

/// Everything the build turns into routes.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    pub apis: Vec<ApiSource>,
    pub contents: Vec<ContentSource>,
}

impl Sources {
    pub fn count_by_type(&self, source_type: SourceType) -> usize {
        self.contents
            .iter()
            .filter(|c| c.source_type == source_type)
            .count()
    }

    /// Route claims in build order: APIs first, then content.
    pub fn claims(&self, routing: &RoutingConfig) -> Vec<RouteClaim> {
        let apis = self.apis.iter().map(|api| RouteClaim {
            entry: RouteEntry::api(&api.name, routing),
            source: api.files.first().cloned().unwrap_or_default(),
        });
        let contents = self.contents.iter().map(|content| RouteClaim {
            entry: RouteEntry::content(&content.name, content.source_type, routing),
            source: content.path.clone(),
        });
        apis.chain(contents).collect()
    }
}

/// Collect all sources named by the build config.
///
/// Configured content comes first (in name order), followed by files found
/// under `content_dir` (in path order). Files with other extensions in
/// `content_dir` are skipped.
pub fn scan_sources(build: &BuildSectionConfig) -> Sources {
    let apis = build
        .api
        .iter()
        .map(|(name, files)| ApiSource {
            name: name.clone(),
            files: files.clone(),
        })
        .collect();

    let mut contents: Vec<ContentSource> = build
        .content
        .iter()
        .filter_map(|(name, path)| {
            Some(ContentSource {
                name: name.clone(),
                source_type: source_type_of(path)?,
                path: path.clone(),
            })
        })
        .collect();

    if let Some(dir) = &build.content_dir {
        contents.extend(scan_content_dir(dir));
    }

    Sources { apis, contents }
}

/// Walk a directory for markdown and HTML files.
pub fn scan_content_dir(dir: &Path) -> Vec<ContentSource> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .skip_hidden(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .collect();
    files.sort();

    files
        .into_iter()
        .filter_map(|path| {
            let source_type = source_type_of(&path)?;
            let name = slugify_path(path.strip_prefix(dir).ok()?);
            (!name.is_empty()).then_some(ContentSource {
                name,
                path,
                source_type,
            })
        })
        .collect()
}

fn source_type_of(path: &Path) -> Option<SourceType> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(SourceType::from_extension)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::config::RoutingMethod;

    fn write(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "# title").unwrap();
        path
    }

    #[test]
    fn test_scan_content_dir() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "guide.md");
        write(dir.path(), "guides/Getting Started.markdown");
        write(dir.path(), "about.htm");
        write(dir.path(), "logo.png");
        write(dir.path(), ".hidden/secret.md");

        let found = scan_content_dir(dir.path());
        let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["about", "guide", "guides/Getting-Started"]);
        assert_eq!(found[0].source_type, SourceType::Html);
        assert_eq!(found[2].source_type, SourceType::Md);
    }

    #[test]
    fn test_scan_sources_order_and_claims() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("docs");
        write(&docs, "intro.md");
        let changelog = write(dir.path(), "CHANGELOG.md");

        let mut build = BuildSectionConfig::default();
        build.api.insert("_def_".into(), vec![dir.path().join("core.json")]);
        build.api.insert("web".into(), vec![dir.path().join("web.json")]);
        build.content.insert("changelog".into(), changelog.clone());
        build.content_dir = Some(docs);

        let sources = scan_sources(&build);
        assert_eq!(sources.apis.len(), 2);
        assert_eq!(sources.count_by_type(SourceType::Md), 2);

        let routing = RoutingConfig {
            method: RoutingMethod::Path,
            ..RoutingConfig::default()
        };
        let claims = sources.claims(&routing);
        let ids: Vec<_> = claims.iter().map(|c| c.entry.id.as_str()).collect();
        assert_eq!(ids, ["api:_def_", "api:web", "content:changelog", "content:intro"]);
        assert_eq!(claims[2].source, changelog);
    }
}
