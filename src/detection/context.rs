//! The environment snapshot probes inspect.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variables probes read.
const PROBED_VARS: [&str; 3] = ["CONDA_PREFIX", "MAMBA_EXE", "CARGO_HOME"];

/// Read-only view of where the running program lives.
///
/// Probes never touch the live process environment; they only see what was
/// captured here, so detection can be exercised against fake layouts.
#[derive(Debug, Clone)]
pub struct InstallContext {
    executable: PathBuf,
    prefix: PathBuf,
    env: HashMap<String, String>,
    home: Option<PathBuf>,
}

impl InstallContext {
    /// Create a context for the given executable.
    ///
    /// The prefix is derived from the executable path (see [`derive_prefix`]),
    /// the environment starts empty and there is no home directory.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        let executable = executable.into();
        let prefix = derive_prefix(&executable);
        Self {
            executable,
            prefix,
            env: HashMap::new(),
            home: None,
        }
    }

    /// Capture the running process.
    ///
    /// Returns `None` when the executable path cannot be determined.
    pub fn from_process() -> Option<Self> {
        let exe = match env::current_exe() {
            Ok(path) => path,
            Err(e) => {
                tracing::debug!("Cannot resolve current executable: {}", e);
                return None;
            }
        };

        // Homebrew and pipx expose the binary through a symlink farm
        let executable = fs::canonicalize(&exe).unwrap_or(exe);
        tracing::trace!("Executable resolved to {}", executable.display());

        let mut ctx = Self::new(executable);
        for key in PROBED_VARS {
            if let Some(value) = env::var_os(key).and_then(|v| v.into_string().ok()) {
                ctx.env.insert(key.to_string(), value);
            }
        }
        ctx.home = dirs::home_dir();
        Some(ctx)
    }

    /// Override the derived prefix.
    pub fn with_prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set an environment variable in the snapshot.
    pub fn with_env(mut self, key: &str, value: impl Into<String>) -> Self {
        self.env.insert(key.to_string(), value.into());
        self
    }

    /// Set the home directory.
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// Path of the running executable.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Root of the environment that owns the executable.
    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    /// The user's home directory, if known.
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Look up an environment variable. Empty values count as unset.
    pub fn var(&self, key: &str) -> Option<&str> {
        self.env
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// The environment root for an executable: the parent of its `bin/` (or
/// `Scripts\`) directory.
///
/// `/venv/bin/tool` gives `/venv`. Executables not inside a directory
/// with a parent fall back to their own directory.
pub fn derive_prefix(executable: &Path) -> PathBuf {
    let Some(bin_dir) = executable.parent() else {
        return executable.to_path_buf();
    };
    bin_dir.parent().unwrap_or(bin_dir).to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_parent_of_bin() {
        assert_eq!(
            derive_prefix(Path::new("/home/u/.venv/bin/tool")),
            PathBuf::from("/home/u/.venv")
        );
    }

    #[test]
    fn prefix_of_top_level_binary() {
        assert_eq!(derive_prefix(Path::new("/tool")), PathBuf::from("/"));
    }

    #[test]
    fn new_context_derives_prefix() {
        let ctx = InstallContext::new("/opt/env/bin/tool");
        assert_eq!(ctx.executable(), Path::new("/opt/env/bin/tool"));
        assert_eq!(ctx.prefix(), Path::new("/opt/env"));
        assert!(ctx.home().is_none());
    }

    #[test]
    fn with_prefix_overrides() {
        let ctx = InstallContext::new("/opt/env/bin/tool").with_prefix("/elsewhere");
        assert_eq!(ctx.prefix(), Path::new("/elsewhere"));
    }

    #[test]
    fn empty_var_is_unset() {
        let ctx = InstallContext::new("/bin/tool")
            .with_env("MAMBA_EXE", "")
            .with_env("CONDA_PREFIX", "/opt/conda");
        assert_eq!(ctx.var("MAMBA_EXE"), None);
        assert_eq!(ctx.var("CONDA_PREFIX"), Some("/opt/conda"));
        assert_eq!(ctx.var("CARGO_HOME"), None);
    }

    #[test]
    fn from_process_resolves_test_binary() {
        let ctx = InstallContext::from_process().expect("test binary has a path");
        assert!(ctx.executable().is_absolute());
    }
}
