//! Console progress lines for planned/applied operations.

use std::io::{self, Write};

use assetsync_io_fs::{EnumEntryKind, ReportSync, SpecSyncOperation, SyncReporter};

/// Writes one line per operation, e.g. `copied b/b.txt` or `would copy b/b.txt`.
///
/// Write failures never interrupt the sync; the first one is surfaced by
/// [`ConsoleReporter::finish`].
pub struct ConsoleReporter<W: Write> {
    writer: W,
    err_write: Option<io::Error>,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            err_write: None,
        }
    }

    fn write_line(&mut self, line: &str) {
        if self.err_write.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.writer, "{line}") {
            self.err_write = Some(e);
        }
    }

    /// Print the summary line, then surface the first write failure if any.
    pub fn finish(mut self, report_sync: &ReportSync) -> io::Result<()> {
        self.write_line(&report_sync.to_string());
        if let Some(e) = self.err_write.take() {
            return Err(e);
        }
        self.writer.flush()
    }
}

pub(crate) fn format_operation(spec_op: &SpecSyncOperation, if_dry_run: bool) -> String {
    let (verb_done, verb_planned, target) = match spec_op {
        SpecSyncOperation::RemoveDestination(path) => {
            ("removed", "remove", path.display().to_string())
        }
        SpecSyncOperation::CreateDestination(path) => {
            ("created", "create", path.display().to_string())
        }
        SpecSyncOperation::CopyEntry { path_rel, kind, .. } => {
            let target = match kind {
                EnumEntryKind::Directory => format!("{}/", path_rel.display()),
                EnumEntryKind::File => path_rel.display().to_string(),
                EnumEntryKind::Symlink => format!("{} (symlink)", path_rel.display()),
            };
            ("copied", "copy", target)
        }
    };
    if if_dry_run {
        format!("would {verb_planned} {target}")
    } else {
        format!("{verb_done} {target}")
    }
}

impl<W: Write> SyncReporter for ConsoleReporter<W> {
    fn on_operation(&mut self, spec_op: &SpecSyncOperation, if_dry_run: bool) {
        let line = format_operation(spec_op, if_dry_run);
        self.write_line(&line);
    }

    fn on_warning(&mut self, warning: &str) {
        self.write_line(&format!("warning: {warning}"));
    }
}
