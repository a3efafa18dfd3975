//! Utility modules.

pub mod html;
pub mod path;
mod plural;
pub mod slug;

pub use plural::{plural_count, plural_s};
