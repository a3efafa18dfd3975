//! Dossier - documentation site builder with client-side routing.

mod cli;
mod config;
mod core;
mod logger;
mod nav;
mod route;
mod site;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{SiteConfig, init_config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = init_config(SiteConfig::load(&cli)?);

    match &cli.command {
        Commands::Build { .. } => cli::build::run_build(),
        Commands::Routes { json } => cli::routes::print_routes(&config, *json),
        Commands::Navigate { urls } => cli::navigate::run_navigate(&config, urls),
    }
}
