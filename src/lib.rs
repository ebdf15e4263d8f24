//! detect-installer - Find out which package manager installed a program.
//!
//! The detector inspects where the running executable lives (its prefix,
//! environment variables, and marker files such as Homebrew receipts or
//! wheel `INSTALLER` metadata) and names the installer responsible.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Detector configuration
//! - [`detection`] - Installer probes and the detector
//! - [`error`] - Error types and result aliases
//! - [`report`] - JSON report output
//!
//! # Example
//!
//! ```
//! use detect_installer::detection::{Detector, InstallContext, Installer};
//! use detect_installer::DetectorConfig;
//!
//! let ctx = InstallContext::new("/opt/homebrew/Cellar/mytool/1.0/bin/mytool");
//! let info = Detector::new(DetectorConfig::for_package("mytool")).detect(&ctx);
//! assert_eq!(info.installer(), Installer::Brew);
//! assert_eq!(info.upgrade_cmd(), Some("brew upgrade mytool"));
//! ```

pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod report;

pub use config::{DetectorConfig, UvUpgradeStrategy};
pub use detection::{detect_installer, Installer, InstallerInfo};
pub use error::{DetectError, Result};
