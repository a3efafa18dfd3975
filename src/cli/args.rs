//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Documentation site builder with client-side routing
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to current directory)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Config file path (default: dossier.toml)
    #[arg(short = 'C', long, global = true, default_value = "dossier.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build route table, API data, content and redirect pages
    #[command(visible_alias = "b")]
    Build {
        /// Clean output directory completely before building
        #[arg(short, long)]
        clean: bool,
    },

    /// Print the route table of a built site
    #[command(visible_alias = "r")]
    Routes {
        /// Print the raw manifest entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay navigations against a built site
    #[command(visible_alias = "n")]
    Navigate {
        /// URLs in visit order; the first one is an initial page load
        #[arg(required = true, value_name = "URL")]
        urls: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let cli = Cli::parse_from(["dossier", "build", "--clean", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("dossier.toml"));
        assert!(matches!(cli.command, Commands::Build { clean: true }));
    }

    #[test]
    fn test_parse_navigate() {
        let cli = Cli::parse_from(["dossier", "-C", "site/dossier.toml", "n", "/guide/", "?api"]);
        assert_eq!(cli.config, PathBuf::from("site/dossier.toml"));
        let Commands::Navigate { urls } = cli.command else {
            panic!("expected navigate");
        };
        assert_eq!(urls, ["/guide/", "?api"]);
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_keeps_capital_v() {
        let err = Cli::try_parse_from(["dossier", "-V"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_navigate_requires_url() {
        assert!(Cli::try_parse_from(["dossier", "navigate"]).is_err());
    }
}
