//! `dossier routes` - print the route table of a built site.

use std::fmt::Write as _;

use anyhow::{Context, Result};

use crate::config::SiteConfig;
use crate::core::RouteKind;
use crate::log;
use crate::route::{RouteEntry, RouteManifest};
use crate::utils::plural_count;

pub fn print_routes(config: &SiteConfig, json: bool) -> Result<()> {
    let output = &config.build.output;
    let manifest = RouteManifest::load(output)
        .with_context(|| format!("No built site in {} (run `dossier build`)", output.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&manifest.routes)?);
        return Ok(());
    }

    let (app, table) = manifest.into_parts()?;
    log!("routes"; "{} ({} api, {} content), {} routing",
        plural_count(table.len(), "route"),
        table.count(RouteKind::Api),
        table.count(RouteKind::Content),
        app.routing.method.as_str());

    let entries: Vec<&RouteEntry> = table.iter().collect();
    print!("{}", format_table(&entries));
    Ok(())
}

/// Align `id  path  contentPath` columns.
fn format_table(entries: &[&RouteEntry]) -> String {
    let id_width = entries.iter().map(|e| e.id.len()).max().unwrap_or(0);
    let path_width = entries.iter().map(|e| e.path.len()).max().unwrap_or(0);

    let mut out = String::new();
    for entry in entries {
        let content = entry.content_path.as_deref().unwrap_or("-");
        let _ = writeln!(
            out,
            "{:id_width$}  {:path_width$}  {}",
            entry.id, entry.path, content
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RoutingConfig, RoutingMethod};
    use crate::core::SourceType;

    #[test]
    fn test_format_table() {
        let routing = RoutingConfig {
            method: RoutingMethod::Path,
            ..RoutingConfig::default()
        };
        let api = RouteEntry::api("_def_", &routing);
        let guide = RouteEntry::content("guide", SourceType::Md, &routing);

        let table = format_table(&[&api, &guide]);
        assert_eq!(
            table,
            "api:_def_      /api/    -\n\
             content:guide  /guide/  content/guide.html\n"
        );
    }
}
