//! Installer detection.
//!
//! This module provides:
//! - [`Installer`] identifiers and their upgrade commands
//! - [`InstallContext`], the snapshot of where the program lives
//! - [`Probe`] implementations, one per kind of evidence
//! - [`Detector`], which runs the probes in priority order

pub mod context;
pub mod detector;
pub mod installer;
pub mod metadata;
pub mod probe;

pub use context::{derive_prefix, InstallContext};
pub use detector::{detect_installer, Detector};
pub use installer::{Installer, InstallerInfo};
pub use probe::Probe;
