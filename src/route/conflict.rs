//! Route conflict detection for the build step.
//!
//! Two phases, like the table itself: collect every `(route, source)` claim,
//! then report all ids and paths claimed more than once. The table would
//! only report the first duplicate; the build reports them all.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use super::RouteEntry;
use crate::config::{RoutingConfig, RoutingMethod};
use crate::core::RouteKind;
use crate::log;
use crate::utils::plural_s;

/// A route entry together with the file that produced it.
#[derive(Debug, Clone)]
pub struct RouteClaim {
    pub entry: RouteEntry,
    pub source: PathBuf,
}

/// What collides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    /// Same `(type, name)` from several sources.
    Id(String),
    /// Same URL path from several routes.
    Path(String),
    /// Content route shadowed by the `/api/` branch in path mode.
    Reserved(String),
}

/// A conflict and every source involved (relative to root).
#[derive(Debug, Clone)]
pub struct RouteConflict {
    pub kind: ConflictKind,
    pub sources: Vec<PathBuf>,
}

/// Detect all conflicts among route claims.
pub fn detect_conflicts(
    claims: &[RouteClaim],
    routing: &RoutingConfig,
    root: &Path,
) -> Vec<RouteConflict> {
    let mut by_id: FxHashMap<&str, Vec<&Path>> = FxHashMap::default();
    let mut by_path: FxHashMap<&str, Vec<&Path>> = FxHashMap::default();
    let mut conflicts = Vec::new();

    for claim in claims {
        by_id
            .entry(claim.entry.id.as_str())
            .or_default()
            .push(&claim.source);
        by_path
            .entry(claim.entry.path.as_str())
            .or_default()
            .push(&claim.source);

        if is_reserved(&claim.entry, routing) {
            conflicts.push(RouteConflict {
                kind: ConflictKind::Reserved(claim.entry.id.clone()),
                sources: relativize_paths(&[&claim.source], root),
            });
        }
    }

    // Id conflicts imply path conflicts; report each group once
    let mut id_conflicts: Vec<_> = by_id
        .into_iter()
        .filter(|(_, sources)| sources.len() > 1)
        .map(|(id, sources)| RouteConflict {
            kind: ConflictKind::Id(id.to_string()),
            sources: relativize_paths(&sources, root),
        })
        .collect();
    let reported: Vec<&str> = claims
        .iter()
        .filter(|c| {
            id_conflicts
                .iter()
                .any(|conflict| conflict.kind == ConflictKind::Id(c.entry.id.clone()))
        })
        .map(|c| c.entry.path.as_str())
        .collect();
    let mut path_conflicts: Vec<_> = by_path
        .into_iter()
        .filter(|(path, sources)| sources.len() > 1 && !reported.contains(path))
        .map(|(path, sources)| RouteConflict {
            kind: ConflictKind::Path(path.to_string()),
            sources: relativize_paths(&sources, root),
        })
        .collect();

    id_conflicts.sort_by(|a, b| a.kind_str().cmp(b.kind_str()));
    path_conflicts.sort_by(|a, b| a.kind_str().cmp(b.kind_str()));
    conflicts.extend(id_conflicts);
    conflicts.extend(path_conflicts);
    conflicts
}

impl RouteConflict {
    fn kind_str(&self) -> &str {
        match &self.kind {
            ConflictKind::Id(s) | ConflictKind::Path(s) | ConflictKind::Reserved(s) => s,
        }
    }
}

/// In path mode `/api` and `/api/*` always take the API branch.
fn is_reserved(entry: &RouteEntry, routing: &RoutingConfig) -> bool {
    routing.method == RoutingMethod::Path
        && entry.kind == RouteKind::Content
        && (entry.name == "api" || entry.name.starts_with("api/"))
}

/// Convert absolute paths to relative paths.
fn relativize_paths(paths: &[&Path], root: &Path) -> Vec<PathBuf> {
    paths
        .iter()
        .map(|p| p.strip_prefix(root).unwrap_or(p).to_path_buf())
        .collect()
}

/// Print conflicts using the standard log format.
///
/// Output format:
/// ```text
/// [error] route conflicts (2 routes)
/// [route] content:guide (2 sources)
///   - docs/guide.md
///   - docs/guide.html
/// ```
pub fn print_conflicts(conflicts: &[RouteConflict]) {
    if conflicts.is_empty() {
        return;
    }

    log!("error"; "route conflicts ({} route{})", conflicts.len(), plural_s(conflicts.len()));

    for conflict in conflicts {
        eprintln!();
        match &conflict.kind {
            ConflictKind::Id(id) => {
                log!("route"; "{} ({} source{})", id, conflict.sources.len(), plural_s(conflict.sources.len()))
            }
            ConflictKind::Path(path) => {
                log!("route"; "path {} ({} source{})", path, conflict.sources.len(), plural_s(conflict.sources.len()))
            }
            ConflictKind::Reserved(id) => {
                log!("route"; "{} is shadowed by the api branch, rename it", id)
            }
        }
        for source in &conflict.sources {
            eprintln!("  - {}", source.display());
        }
    }
}
