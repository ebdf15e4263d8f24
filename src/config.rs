//! Detector configuration.
//!
//! Values come from CLI flags (with environment variable fallbacks, see
//! [`crate::cli::Cli`]) or are built directly by library callers.

use clap::ValueEnum;

/// Package name used when none is configured.
pub const DEFAULT_PACKAGE: &str = "detect-installer-test";

/// How many parent directories of the prefix are searched for `uv.lock`.
pub const UV_LOCK_SEARCH_DEPTH: usize = 3;

/// Which command upgrades a package inside a uv project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum UvUpgradeStrategy {
    /// `uv add <pkg> --upgrade-package <pkg>`
    #[default]
    Add,
    /// `uv lock --upgrade-package <pkg>`
    Lock,
}

/// Settings for a detection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorConfig {
    /// Package whose wheel metadata is read and that upgrade commands name.
    pub package: String,
    /// Upgrade command flavour for uv projects.
    pub uv_upgrade_strategy: UvUpgradeStrategy,
    /// Parent directories of the prefix searched for `uv.lock`.
    pub uv_lock_search_depth: usize,
}

impl DetectorConfig {
    /// Configuration for the given package with default settings.
    pub fn for_package(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::default()
        }
    }

    /// Set the uv upgrade strategy.
    pub fn with_uv_upgrade_strategy(mut self, strategy: UvUpgradeStrategy) -> Self {
        self.uv_upgrade_strategy = strategy;
        self
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            uv_upgrade_strategy: UvUpgradeStrategy::default(),
            uv_lock_search_depth: UV_LOCK_SEARCH_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = DetectorConfig::default();
        assert_eq!(config.package, "detect-installer-test");
        assert_eq!(config.uv_upgrade_strategy, UvUpgradeStrategy::Add);
        assert_eq!(config.uv_lock_search_depth, 3);
    }

    #[test]
    fn for_package_keeps_defaults() {
        let config = DetectorConfig::for_package("mypkg");
        assert_eq!(config.package, "mypkg");
        assert_eq!(config.uv_lock_search_depth, UV_LOCK_SEARCH_DEPTH);
    }

    #[test]
    fn with_uv_upgrade_strategy() {
        let config = DetectorConfig::for_package("mypkg")
            .with_uv_upgrade_strategy(UvUpgradeStrategy::Lock);
        assert_eq!(config.uv_upgrade_strategy, UvUpgradeStrategy::Lock);
    }

    #[test]
    fn strategy_parses_from_cli_value() {
        assert_eq!(
            UvUpgradeStrategy::from_str("lock", true),
            Ok(UvUpgradeStrategy::Lock)
        );
        assert!(UvUpgradeStrategy::from_str("sync", true).is_err());
    }
}
