//! CLI argument definitions using clap derive.

use std::ffi::OsString;

use assetsync_io_fs::SpecSyncOptions;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

/// End-of-options marker; the command takes no positionals, so it is never meaningful.
const C_TOKEN_END_OF_OPTIONS: &str = "--";

/// Mirror `assets/` into `web/public/assets/`, skipping every `ignore/` subtree.
///
/// The destination is deleted and rebuilt from scratch on every run.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "assetsync", args_override_self = true)]
pub struct Cli {
    /// Print the planned operations without touching the filesystem
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,
}

impl Cli {
    /// Build the run configuration from the conventional paths and parsed flags.
    pub fn into_options(self) -> SpecSyncOptions {
        SpecSyncOptions::default().with_dry_run(self.dry_run)
    }
}

/// Parse raw process arguments (program name first).
///
/// Same as [`Cli::try_parse_from`], except that a bare `--` is rejected as an
/// unexpected argument instead of being silently consumed.
pub fn parse_args<I, T>(tokens: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let l_tokens: Vec<OsString> = tokens.into_iter().map(Into::into).collect();
    if l_tokens
        .iter()
        .skip(1)
        .any(|token| token == C_TOKEN_END_OF_OPTIONS)
    {
        return Err(Cli::command().error(
            ErrorKind::UnknownArgument,
            format!("unexpected argument '{C_TOKEN_END_OF_OPTIONS}' found"),
        ));
    }
    Cli::try_parse_from(l_tokens)
}
