//! Probe ordering and the detection entry points.

use super::context::InstallContext;
use super::installer::InstallerInfo;
use super::probe::{
    BrewProbe, CargoProbe, CondaProbe, MetadataProbe, PipxProbe, Probe, UvToolProbe,
};
use crate::config::DetectorConfig;

/// Runs probes in priority order and reports the first match.
///
/// Environment probes (where the executable lives) come before the
/// `INSTALLER` metadata: a pipx venv whose metadata says `pip` is pipx.
pub struct Detector {
    config: DetectorConfig,
    probes: Vec<Box<dyn Probe>>,
}

impl Detector {
    /// Create a detector with the built-in probes.
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            probes: vec![
                Box::new(PipxProbe),
                Box::new(UvToolProbe),
                Box::new(CondaProbe),
                Box::new(BrewProbe),
                Box::new(CargoProbe),
                Box::new(MetadataProbe),
            ],
        }
    }

    /// Names of the probes, in the order they run.
    pub fn probe_names(&self) -> Vec<&str> {
        self.probes.iter().map(|p| p.name()).collect()
    }

    /// Detect the installer for the given context.
    pub fn detect(&self, ctx: &InstallContext) -> InstallerInfo {
        tracing::debug!(
            "Detecting installer for {} (prefix {})",
            ctx.executable().display(),
            ctx.prefix().display()
        );

        for probe in &self.probes {
            if let Some(installer) = probe.probe(ctx, &self.config) {
                tracing::debug!("Probe '{}' matched: {}", probe.name(), installer);
                return InstallerInfo::new(
                    installer,
                    &self.config.package,
                    self.config.uv_upgrade_strategy,
                );
            }
            tracing::trace!("Probe '{}' did not match", probe.name());
        }

        tracing::debug!("No probe matched");
        InstallerInfo::unknown()
    }

    /// Detect the installer of the running program.
    pub fn detect_current(&self) -> InstallerInfo {
        match InstallContext::from_process() {
            Some(ctx) => self.detect(&ctx),
            None => InstallerInfo::unknown(),
        }
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

/// Detect how `package` was installed, judging by the running executable.
///
/// # Example
///
/// ```
/// use detect_installer::detect_installer;
///
/// let info = detect_installer("detect-installer-test");
/// println!("{}", info.installer());
/// ```
pub fn detect_installer(package: &str) -> InstallerInfo {
    Detector::new(DetectorConfig::for_package(package)).detect_current()
}
