//! Installer identifiers and upgrade commands.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::UvUpgradeStrategy;

/// The mechanism that placed a program on this machine.
///
/// The serialized form (see [`Installer::as_str`]) is the identifier printed
/// in reports and is part of the public contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Installer {
    /// `pip install`
    #[serde(rename = "pip")]
    Pip,
    /// `uv pip install` into a plain virtualenv
    #[serde(rename = "uv-pip")]
    UvPip,
    /// `uv add` / `uv sync` inside a project with a `uv.lock`
    #[serde(rename = "uv-project")]
    UvProject,
    /// `uv tool install`
    #[serde(rename = "uv-tool")]
    UvTool,
    /// `pipx install`
    #[serde(rename = "pipx")]
    Pipx,
    /// Homebrew formula
    #[serde(rename = "brew")]
    Brew,
    /// Conda environment
    #[serde(rename = "conda")]
    Conda,
    /// Conda environment managed through mamba
    #[serde(rename = "mamba")]
    Mamba,
    /// `cargo install`
    #[serde(rename = "cargo")]
    Cargo,
    /// No probe matched
    #[serde(rename = "unknown")]
    Unknown,
}

impl Installer {
    /// Every recognized identifier, in probe-independent order.
    pub const ALL: [Installer; 10] = [
        Installer::Pip,
        Installer::UvPip,
        Installer::UvProject,
        Installer::UvTool,
        Installer::Pipx,
        Installer::Brew,
        Installer::Conda,
        Installer::Mamba,
        Installer::Cargo,
        Installer::Unknown,
    ];

    /// The identifier used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Installer::Pip => "pip",
            Installer::UvPip => "uv-pip",
            Installer::UvProject => "uv-project",
            Installer::UvTool => "uv-tool",
            Installer::Pipx => "pipx",
            Installer::Brew => "brew",
            Installer::Conda => "conda",
            Installer::Mamba => "mamba",
            Installer::Cargo => "cargo",
            Installer::Unknown => "unknown",
        }
    }

    /// The shell command that upgrades `package` for this installer.
    ///
    /// Returns `None` for [`Installer::Unknown`].
    pub fn upgrade_command(&self, package: &str, strategy: UvUpgradeStrategy) -> Option<String> {
        let cmd = match self {
            Installer::Pip => format!("pip install -U {package}"),
            Installer::UvPip => format!("uv pip install --upgrade {package}"),
            Installer::UvProject => match strategy {
                UvUpgradeStrategy::Add => format!("uv add {package} --upgrade-package {package}"),
                UvUpgradeStrategy::Lock => format!("uv lock --upgrade-package {package}"),
            },
            Installer::UvTool => format!("uv tool upgrade {package}"),
            Installer::Pipx => format!("pipx upgrade {package}"),
            Installer::Brew => format!("brew upgrade {package}"),
            Installer::Conda => format!("conda update {package}"),
            Installer::Mamba => format!("mamba update {package}"),
            Installer::Cargo => format!("cargo install {package} --force"),
            Installer::Unknown => return None,
        };
        Some(cmd)
    }
}

impl fmt::Display for Installer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Installer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Installer::ALL
            .into_iter()
            .find(|installer| installer.as_str() == s)
            .ok_or_else(|| format!("unrecognized installer: {s}"))
    }
}

/// Outcome of a detection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerInfo {
    installer: Installer,
    upgrade_cmd: Option<String>,
}

impl InstallerInfo {
    /// Build the info for `installer`, deriving its upgrade command.
    pub fn new(installer: Installer, package: &str, strategy: UvUpgradeStrategy) -> Self {
        Self {
            installer,
            upgrade_cmd: installer.upgrade_command(package, strategy),
        }
    }

    /// The result when nothing matched.
    pub fn unknown() -> Self {
        Self {
            installer: Installer::Unknown,
            upgrade_cmd: None,
        }
    }

    /// The detected installer.
    pub fn installer(&self) -> Installer {
        self.installer
    }

    /// The command that upgrades the package, if the installer has one.
    pub fn upgrade_cmd(&self) -> Option<&str> {
        self.upgrade_cmd.as_deref()
    }
}
