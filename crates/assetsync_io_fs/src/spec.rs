//! Sync specification models, planned operations and top-level error types.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::conf::{C_DIR_DESTINATION_DEFAULT, C_DIR_SOURCE_DEFAULT, C_NAME_EXCLUDED_DEFAULT};

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Pattern matching mode for exclusion lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumPatternMode {
    /// Exact segment equality.
    Literal,
    /// Shell-like wildcards (`*`, `?`, character classes).
    Glob,
    /// Regular expression pattern.
    Regex,
}

/// Kind of one source tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumEntryKind {
    /// Directory, recreated empty and then filled.
    Directory,
    /// Regular file, copied with content and metadata.
    File,
    /// Symbolic link, recreated as a link (never followed).
    Symlink,
}

impl fmt::Display for EnumEntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory => write!(f, "dir"),
            Self::File => write!(f, "file"),
            Self::Symlink => write!(f, "symlink"),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsAndOperations

/// Input options for `sync_tree`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSyncOptions {
    /// Source tree root; must be an existing directory.
    pub path_dir_source: PathBuf,
    /// Destination tree root; destroyed and rebuilt on every real run.
    pub path_dir_destination: PathBuf,
    /// Patterns matched against every relative path segment.
    pub patterns_exclude: Vec<String>,
    /// Pattern interpretation mode.
    pub rule_pattern: EnumPatternMode,
    /// Do not mutate filesystem; report what would happen.
    pub if_dry_run: bool,
}

impl Default for SpecSyncOptions {
    fn default() -> Self {
        Self {
            path_dir_source: PathBuf::from(C_DIR_SOURCE_DEFAULT),
            path_dir_destination: PathBuf::from(C_DIR_DESTINATION_DEFAULT),
            patterns_exclude: vec![C_NAME_EXCLUDED_DEFAULT.to_string()],
            rule_pattern: EnumPatternMode::Literal,
            if_dry_run: false,
        }
    }
}

impl SpecSyncOptions {
    /// Options for an explicit source/destination pair with default exclusions.
    pub fn new(
        path_dir_source: impl Into<PathBuf>,
        path_dir_destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            path_dir_source: path_dir_source.into(),
            path_dir_destination: path_dir_destination.into(),
            ..Self::default()
        }
    }

    /// Same options with dry-run toggled.
    pub fn with_dry_run(mut self, if_dry_run: bool) -> Self {
        self.if_dry_run = if_dry_run;
        self
    }
}

/// One planned (dry-run) or executed (real run) action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSyncOperation {
    /// Recursive delete of an existing destination root.
    RemoveDestination(PathBuf),
    /// Creation of a fresh, empty destination root.
    CreateDestination(PathBuf),
    /// Mirror one source entry at `path_rel` under the destination root.
    CopyEntry {
        /// Path relative to both roots.
        path_rel: PathBuf,
        /// Entry kind discovered during traversal.
        kind: EnumEntryKind,
        /// Source file size; zero for directories and symlinks.
        n_bytes: u64,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Failures that abort a sync run. There is no partial-success path.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Source root is absent or not a directory.
    #[error("Source directory does not exist: {}", .0.display())]
    SourceMissing(PathBuf),

    /// Source and destination overlap (`src` contains `dst` or vice versa).
    #[error(
        "Source and destination directories overlap: {} <-> {}",
        .path_dir_source.display(),
        .path_dir_destination.display()
    )]
    SourceDestinationOverlap {
        /// Source directory as given.
        path_dir_source: PathBuf,
        /// Destination directory as given.
        path_dir_destination: PathBuf,
    },

    /// Invalid exclusion pattern.
    #[error("Invalid exclusion pattern: {0}")]
    InvalidPattern(String),

    /// Filesystem failure while planning or applying an operation.
    #[error("Failed to {action} {}: {source}", .path.display())]
    Io {
        /// Short verb phrase, e.g. `copy` or `read directory`.
        action: &'static str,
        /// Path the action was applied to.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: io::Error,
    },
}

impl SyncError {
    /// Build a [`SyncError::Io`] for `path`.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;

    use super::{EnumPatternMode, SpecSyncOptions, SyncError};

    #[test]
    fn default_options_use_conventional_layout() {
        let spec_sync_options = SpecSyncOptions::default();
        assert_eq!(spec_sync_options.path_dir_source, PathBuf::from("assets"));
        assert_eq!(
            spec_sync_options.path_dir_destination,
            PathBuf::from("web/public/assets")
        );
        assert_eq!(spec_sync_options.patterns_exclude, vec!["ignore".to_string()]);
        assert_eq!(spec_sync_options.rule_pattern, EnumPatternMode::Literal);
        assert!(!spec_sync_options.if_dry_run);
    }

    #[test]
    fn io_error_message_names_action_and_path() {
        let err = SyncError::io(
            "copy",
            "/tmp/x.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "Failed to copy /tmp/x.txt: denied");
    }
}
