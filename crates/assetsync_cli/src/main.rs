//! assetsync
//!
//! Mirrors the asset tree into the web output before packaging, dropping
//! development-only `ignore/` subtrees.

mod cli;
mod error;
mod reporter;

use std::io;
use std::process::ExitCode;

use assetsync_io_fs::sync_tree;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::{CliError, Result, exit_code_for_parse_error};
use reporter::ConsoleReporter;

fn main() -> ExitCode {
    // Parse before anything else so bad flags never reach the filesystem.
    let cli = match cli::parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => {
            let res_print = e.print();
            let n_exit = exit_code_for_parse_error(&e, &res_print);
            match res_print {
                Err(err_print) if !e.use_stderr() => {
                    eprintln!("error: {}", CliError::Output(err_print));
                }
                _ => {}
            }
            return ExitCode::from(n_exit);
        }
    };

    init_tracing();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let spec_sync_options = cli.into_options();
    tracing::debug!(options = ?spec_sync_options, "resolved options");

    let mut reporter = ConsoleReporter::new(io::stdout().lock());
    let report_sync = sync_tree(&spec_sync_options, &mut reporter)?;
    reporter.finish(&report_sync)?;
    Ok(())
}
