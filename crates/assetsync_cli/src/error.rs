//! Error types and exit codes for assetsync

use std::io;

use assetsync_io_fs::SyncError;

/// Successful run, or help printed.
pub const N_EXIT_SUCCESS: u8 = 0;
/// Source directory does not exist.
pub const N_EXIT_SOURCE_MISSING: u8 = 1;
/// Unrecognized argument.
pub const N_EXIT_INVALID_ARGUMENT: u8 = 2;
/// Any other failure (I/O, overlapping roots, bad pattern).
pub const N_EXIT_FAILURE: u8 = 3;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that end an invocation
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from the sync engine
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Writing progress output failed
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Sync(SyncError::SourceMissing(_)) => N_EXIT_SOURCE_MISSING,
            Self::Sync(_) | Self::Output(_) => N_EXIT_FAILURE,
        }
    }
}

/// Exit status once clap's help or usage message has been printed.
///
/// Usage errors keep their status even if stderr is unwritable. Help that
/// could not be written is an output failure.
pub fn exit_code_for_parse_error(err: &clap::Error, res_print: &io::Result<()>) -> u8 {
    if err.use_stderr() {
        N_EXIT_INVALID_ARGUMENT
    } else if res_print.is_err() {
        N_EXIT_FAILURE
    } else {
        N_EXIT_SUCCESS
    }
}
