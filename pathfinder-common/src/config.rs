// pathfinder-common/src/config.rs
use std::env;
use std::path::PathBuf;

use tracing::debug;

#[cfg(windows)]
const DEFAULT_TARGET_BINARY: &str = "node.exe";
#[cfg(not(windows))]
const DEFAULT_TARGET_BINARY: &str = "node";

#[cfg(windows)]
const DEFAULT_MARKER_RELATIVE: &str = "../nvm.exe";
#[cfg(not(windows))]
const DEFAULT_MARKER_RELATIVE: &str = "../nvm";

#[cfg(windows)]
pub const DEFAULT_SEPARATOR: char = ';';
#[cfg(not(windows))]
pub const DEFAULT_SEPARATOR: char = ':';

pub const DEFAULT_MANAGED_LABEL: &str = "NVM_SYMLINK";

const SEARCH_PATH_VAR: &str = "PATH";
const TARGET_OVERRIDE_VAR: &str = "PATHFINDER_TARGET";
const MARKER_OVERRIDE_VAR: &str = "PATHFINDER_MARKER";
const MANAGED_SYMLINK_VAR: &str = "NVM_SYMLINK";

/// Inputs for a single scan of the executable search path.
///
/// Built from the process environment by [`ScanConfig::load`], or explicitly
/// with [`ScanConfig::new`] so a scan can run against a synthetic search path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Raw search path value. `None` when the variable is not set.
    pub search_path: Option<String>,
    pub separator: char,
    /// File name that makes a directory qualify.
    pub target_binary: String,
    /// Marker location relative to the real path of a symlinked directory.
    pub marker_relative: PathBuf,
    /// Label printed next to managed entries.
    pub managed_label: String,
    /// Where the version manager keeps its symlink, if known.
    pub managed_symlink: Option<PathBuf>,
}

impl ScanConfig {
    pub fn new(
        search_path: impl Into<String>,
        target_binary: impl Into<String>,
        marker_relative: impl Into<PathBuf>,
    ) -> Self {
        Self {
            search_path: Some(search_path.into()),
            separator: DEFAULT_SEPARATOR,
            target_binary: target_binary.into(),
            marker_relative: marker_relative.into(),
            managed_label: DEFAULT_MANAGED_LABEL.to_string(),
            managed_symlink: None,
        }
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_managed_symlink(mut self, path: impl Into<PathBuf>) -> Self {
        self.managed_symlink = Some(path.into());
        self
    }

    pub fn load() -> Self {
        debug!("Loading pathfinder configuration");

        let search_path = env::var_os(SEARCH_PATH_VAR).map(|v| v.to_string_lossy().into_owned());
        if search_path.is_none() {
            debug!("{} is not set in the environment", SEARCH_PATH_VAR);
        }

        let target_binary = non_empty_var(TARGET_OVERRIDE_VAR).unwrap_or_else(|| {
            debug!(
                "{} not set, using default target binary: {}",
                TARGET_OVERRIDE_VAR, DEFAULT_TARGET_BINARY
            );
            DEFAULT_TARGET_BINARY.to_string()
        });

        let marker_relative = non_empty_var(MARKER_OVERRIDE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MARKER_RELATIVE));

        let managed_symlink = non_empty_var(MANAGED_SYMLINK_VAR).map(PathBuf::from);

        debug!(
            "Configuration loaded: target={}, marker={}, symlink={:?}",
            target_binary,
            marker_relative.display(),
            managed_symlink
        );

        Self {
            search_path,
            separator: DEFAULT_SEPARATOR,
            target_binary,
            marker_relative,
            managed_label: DEFAULT_MANAGED_LABEL.to_string(),
            managed_symlink,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::load()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}
