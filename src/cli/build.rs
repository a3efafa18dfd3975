//! `dossier build`.

use anyhow::Result;

use crate::config::cfg;
use crate::debug;
use crate::site::build_site;

/// Build the site described by the published config.
pub fn run_build() -> Result<()> {
    let config = cfg();
    debug!("build"; "output: {}", config.build.output.display());
    let report = build_site(&config, false)?;
    debug!("build"; "{:?}", report);
    Ok(())
}
