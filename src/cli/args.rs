//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::Parser;

use crate::config::{DetectorConfig, UvUpgradeStrategy, DEFAULT_PACKAGE, UV_LOCK_SEARCH_DEPTH};

/// Report which package manager installed this program.
#[derive(Debug, Parser)]
#[command(name = "detect-installer-test")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Package whose metadata is inspected and upgrade command reported
    #[arg(long, env = "DETECT_INSTALLER_PACKAGE", default_value = DEFAULT_PACKAGE)]
    pub package: String,

    /// Upgrade command flavour for uv projects
    #[arg(
        long,
        env = "DETECT_INSTALLER_UV_UPGRADE_STRATEGY",
        value_enum,
        default_value_t = UvUpgradeStrategy::Add
    )]
    pub uv_upgrade_strategy: UvUpgradeStrategy,

    /// Include the upgrade command in the report
    #[arg(long)]
    pub upgrade_cmd: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Build the detector configuration from the parsed flags.
    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            package: self.package.clone(),
            uv_upgrade_strategy: self.uv_upgrade_strategy,
            uv_lock_search_depth: UV_LOCK_SEARCH_DEPTH,
        }
    }
}
