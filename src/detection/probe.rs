//! Individual installer probes.
//!
//! Each probe looks at one kind of evidence and either claims the
//! installation or passes. The [`Detector`](super::Detector) runs them in
//! priority order.

use std::fs;
use std::path::{Path, PathBuf};

use super::context::InstallContext;
use super::installer::Installer;
use super::metadata;
use crate::config::DetectorConfig;

/// Trait for probe implementations.
pub trait Probe {
    /// The name of this probe, for logging.
    fn name(&self) -> &str;

    /// Return the installer this probe recognizes, if any.
    fn probe(&self, ctx: &InstallContext, config: &DetectorConfig) -> Option<Installer>;
}

/// Executables inside a pipx-managed virtualenv.
pub struct PipxProbe;

impl Probe for PipxProbe {
    fn name(&self) -> &str {
        "pipx"
    }

    fn probe(&self, ctx: &InstallContext, _config: &DetectorConfig) -> Option<Installer> {
        let prefix = ctx.prefix().to_string_lossy();
        (prefix.contains("pipx/venvs") || prefix.contains("pipx\\venvs"))
            .then_some(Installer::Pipx)
    }
}

/// Executables inside a `uv tool` environment.
pub struct UvToolProbe;

impl Probe for UvToolProbe {
    fn name(&self) -> &str {
        "uv-tool"
    }

    fn probe(&self, ctx: &InstallContext, _config: &DetectorConfig) -> Option<Installer> {
        let prefix = ctx.prefix().to_string_lossy();
        (prefix.contains("/uv/tools/") || prefix.contains("\\uv\\tools\\"))
            .then_some(Installer::UvTool)
    }
}

/// Conda (or mamba) environments.
pub struct CondaProbe;

/// Directory name prefixes of the common conda distributions.
const CONDA_DIR_PREFIXES: [&str; 4] = ["conda", "miniconda", "miniforge", "mambaforge"];

impl CondaProbe {
    fn variant(ctx: &InstallContext) -> Installer {
        if ctx.var("MAMBA_EXE").is_some() {
            Installer::Mamba
        } else {
            Installer::Conda
        }
    }

    fn in_active_env(ctx: &InstallContext) -> bool {
        let Some(conda_prefix) = ctx.var("CONDA_PREFIX") else {
            return false;
        };
        normcase(ctx.prefix()).starts_with(normcase(Path::new(conda_prefix)))
    }

    fn in_conda_tree(ctx: &InstallContext) -> bool {
        let prefix = ctx.prefix().to_string_lossy().to_lowercase().replace('\\', "/");
        prefix
            .split('/')
            .any(|part| CONDA_DIR_PREFIXES.iter().any(|p| part.starts_with(p)))
    }
}

impl Probe for CondaProbe {
    fn name(&self) -> &str {
        "conda"
    }

    fn probe(&self, ctx: &InstallContext, _config: &DetectorConfig) -> Option<Installer> {
        if Self::in_active_env(ctx) {
            tracing::debug!("Prefix is inside the active CONDA_PREFIX");
            return Some(Self::variant(ctx));
        }
        Self::in_conda_tree(ctx).then(|| Self::variant(ctx))
    }
}

/// Homebrew formulae.
pub struct BrewProbe;

/// Path fragments of the standard Homebrew prefixes, lowercased.
const BREW_PATH_MARKERS: [&str; 3] = ["/opt/homebrew/", "/usr/local/cellar/", "/home/linuxbrew/"];

/// Receipt Homebrew writes at the root of every keg.
const BREW_RECEIPT: &str = "INSTALL_RECEIPT.json";

impl BrewProbe {
    fn under_standard_prefix(executable: &Path) -> bool {
        let exe = executable.to_string_lossy().to_lowercase();
        BREW_PATH_MARKERS.iter().any(|marker| exe.contains(marker))
    }

    /// Find the keg (`Cellar/<name>/<version>/`) holding the executable.
    fn find_keg(executable: &Path) -> Option<&Path> {
        executable.ancestors().skip(1).find(|dir| {
            let is_cellar = dir
                .parent()
                .and_then(Path::parent)
                .and_then(Path::file_name)
                .is_some_and(|name| name.eq_ignore_ascii_case("Cellar"));
            is_cellar && dir.join(BREW_RECEIPT).is_file()
        })
    }
}

impl Probe for BrewProbe {
    fn name(&self) -> &str {
        "brew"
    }

    fn probe(&self, ctx: &InstallContext, _config: &DetectorConfig) -> Option<Installer> {
        if Self::under_standard_prefix(ctx.executable()) {
            return Some(Installer::Brew);
        }
        let keg = Self::find_keg(ctx.executable())?;
        tracing::debug!("Executable belongs to keg {}", keg.display());
        Some(Installer::Brew)
    }
}

/// Binaries placed by `cargo install`.
pub struct CargoProbe;

impl CargoProbe {
    fn cargo_bin(ctx: &InstallContext) -> Option<PathBuf> {
        let cargo_home = match ctx.var("CARGO_HOME") {
            Some(home) => PathBuf::from(home),
            None => ctx.home()?.join(".cargo"),
        };
        Some(cargo_home.join("bin"))
    }
}

impl Probe for CargoProbe {
    fn name(&self) -> &str {
        "cargo"
    }

    fn probe(&self, ctx: &InstallContext, _config: &DetectorConfig) -> Option<Installer> {
        let cargo_bin = Self::cargo_bin(ctx)?;
        let exe = ctx.executable();
        if exe.starts_with(&cargo_bin) {
            return Some(Installer::Cargo);
        }
        // The executable is canonicalized; compare against the resolved bin dir too
        let resolved = fs::canonicalize(&cargo_bin).ok()?;
        exe.starts_with(resolved).then_some(Installer::Cargo)
    }
}

/// The `INSTALLER` file in the package's wheel metadata.
pub struct MetadataProbe;

impl Probe for MetadataProbe {
    fn name(&self) -> &str {
        "metadata"
    }

    fn probe(&self, ctx: &InstallContext, config: &DetectorConfig) -> Option<Installer> {
        let value = metadata::read_installer(ctx.prefix(), &config.package)?;
        tracing::debug!("INSTALLER metadata says {:?}", value);

        match value.as_str() {
            "uv" if metadata::has_uv_lock(ctx.prefix(), config.uv_lock_search_depth) => {
                Some(Installer::UvProject)
            }
            "uv" => Some(Installer::UvPip),
            "pip" => Some(Installer::Pip),
            _ => None,
        }
    }
}

/// Lowercase paths on Windows, where the filesystem is case-insensitive.
fn normcase(path: &Path) -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(path.to_string_lossy().to_lowercase().replace('/', "\\"))
    } else {
        path.to_path_buf()
    }
}
