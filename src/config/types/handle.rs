//! Global config handle.
//!
//! Uses `arc-swap` for lock-free reads; the config is published once after
//! loading and read through [`cfg`].

use crate::config::SiteConfig;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

/// Global config storage.
pub static CONFIG: LazyLock<ArcSwap<SiteConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(SiteConfig::default()));

#[inline]
pub fn cfg() -> Arc<SiteConfig> {
    CONFIG.load_full()
}

#[inline]
pub fn init_config(config: SiteConfig) -> Arc<SiteConfig> {
    let arc = Arc::new(config);
    CONFIG.store(Arc::clone(&arc));
    arc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_config_publishes() {
        let mut config = SiteConfig::default();
        config.app.title = "Published".into();
        let arc = init_config(config);
        assert_eq!(arc.app.title, "Published");
        assert_eq!(cfg().app.title, "Published");
    }
}
