//! Wheel metadata lookups.
//!
//! Python installers record themselves in the `INSTALLER` file of the
//! package's `*.dist-info` directory. Binaries shipped as wheels (and
//! virtualenv-based Homebrew formulae) carry one next to their prefix.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

/// Runs of separators that PEP 503 collapses into a single `-`.
static SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_.]+").expect("SEPARATOR_REGEX must compile"));

/// Normalize a distribution name the way package indexes compare them.
pub fn normalize_package_name(name: &str) -> String {
    SEPARATOR_REGEX.replace_all(name, "-").to_lowercase()
}

/// `site-packages` directories under a prefix, sorted for stable lookup.
pub fn site_packages_dirs(prefix: &Path) -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    // POSIX layout: lib/pythonX.Y/site-packages
    for lib in ["lib", "lib64"] {
        let Ok(entries) = fs::read_dir(prefix.join(lib)) else {
            continue;
        };
        let mut found: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().starts_with("python"))
            .map(|entry| entry.path().join("site-packages"))
            .filter(|path| path.is_dir())
            .collect();
        found.sort();
        dirs.extend(found);
    }

    // Windows layout
    let windows = prefix.join("Lib").join("site-packages");
    if windows.is_dir() && !dirs.contains(&windows) {
        dirs.push(windows);
    }

    dirs
}

/// Find the `*.dist-info` directory for `package` under `prefix`.
pub fn find_dist_info(prefix: &Path, package: &str) -> Option<PathBuf> {
    let wanted = normalize_package_name(package);

    for site_packages in site_packages_dirs(prefix) {
        let Ok(entries) = fs::read_dir(&site_packages) else {
            continue;
        };
        let mut matches: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                let file_name = entry.file_name();
                let file_name = file_name.to_string_lossy();
                file_name
                    .strip_suffix(".dist-info")
                    .map(|stem| stem.split_once('-').map_or(stem, |(name, _)| name))
                    .is_some_and(|name| normalize_package_name(name) == wanted)
            })
            .map(|entry| entry.path())
            .collect();
        matches.sort();

        if let Some(found) = matches.into_iter().next() {
            tracing::trace!("Found dist-info at {}", found.display());
            return Some(found);
        }
    }

    None
}

/// Read the `INSTALLER` value recorded for `package`.
///
/// The value is trimmed and lowercased. A missing or blank file gives `None`.
pub fn read_installer(prefix: &Path, package: &str) -> Option<String> {
    let dist_info = find_dist_info(prefix, package)?;
    let content = match fs::read_to_string(dist_info.join("INSTALLER")) {
        Ok(content) => content,
        Err(e) => {
            tracing::trace!("No INSTALLER in {}: {}", dist_info.display(), e);
            return None;
        }
    };

    let value = content.trim().to_lowercase();
    (!value.is_empty()).then_some(value)
}

/// Whether a `uv.lock` sits in one of the first `max_depth` parents of `prefix`.
pub fn has_uv_lock(prefix: &Path, max_depth: usize) -> bool {
    prefix
        .ancestors()
        .skip(1)
        .take(max_depth)
        .any(|dir| dir.join("uv.lock").is_file())
}
