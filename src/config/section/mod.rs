//! Configuration section definitions.
//!
//! Each module corresponds to a section in `dossier.toml`:
//!
//! | Module  | TOML Section | Purpose                                  |
//! |---------|--------------|------------------------------------------|
//! | `app`   | `[app]`      | Title, base, entrance route, routing     |
//! | `build` | `[build]`    | Output dir, API and content sources      |

mod app;
mod build;

pub use app::{AppConfig, RoutingConfig, RoutingMethod};
pub use build::BuildSectionConfig;
