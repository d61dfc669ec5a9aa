//! Sync report models, mutable report builder and the per-operation reporter seam.

use std::fmt;

use crate::conf::{C_PREFIX_REPORT_DRY_RUN, C_PREFIX_REPORT_SYNC};
use crate::spec::{EnumEntryKind, SpecSyncOperation};

/// Observer for planned/applied operations.
///
/// Called once per operation, in plan order. In a real run the call happens
/// after the operation's side effect succeeded; in a dry run nothing is applied.
pub trait SyncReporter {
    /// Report one operation.
    fn on_operation(&mut self, spec_op: &SpecSyncOperation, if_dry_run: bool);

    /// Report a non-fatal traversal warning.
    fn on_warning(&mut self, _warning: &str) {}
}

/// Reporter that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl SyncReporter for NullReporter {
    fn on_operation(&mut self, _spec_op: &SpecSyncOperation, _if_dry_run: bool) {}
}

/// Aggregate counters for one `sync_tree` run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportSync {
    /// Whether operations were only planned.
    pub if_dry_run: bool,
    /// Total scanned source entries (excluded subtrees count once, at their root).
    pub cnt_scanned: u64,
    /// Entries pruned by the exclusion predicate.
    pub cnt_excluded: u64,
    /// Directories mirrored (or planned).
    pub cnt_dirs: u64,
    /// Regular files mirrored (or planned).
    pub cnt_files: u64,
    /// Symbolic links mirrored (or planned).
    pub cnt_symlinks: u64,
    /// Sum of regular file sizes.
    pub n_bytes: u64,
    /// Non-fatal warnings collected during traversal.
    pub warnings: Vec<String>,
}

impl ReportSync {
    /// Number of mirrored entries of any kind.
    pub fn entry_count(&self) -> u64 {
        self.cnt_dirs + self.cnt_files + self.cnt_symlinks
    }

    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} scanned={} excluded={} dirs={} files={} symlinks={} bytes={} warnings={}",
            self.cnt_scanned,
            self.cnt_excluded,
            self.cnt_dirs,
            self.cnt_files,
            self.cnt_symlinks,
            self.n_bytes,
            self.warning_count()
        )
    }
}

impl fmt::Display for ReportSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.if_dry_run {
            C_PREFIX_REPORT_DRY_RUN
        } else {
            C_PREFIX_REPORT_SYNC
        };
        write!(f, "{}", self.format(prefix))
    }
}

/// Mutable accumulator for sync statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportSyncBuilder {
    /// See [`ReportSync::cnt_scanned`].
    pub cnt_scanned: u64,
    /// See [`ReportSync::cnt_excluded`].
    pub cnt_excluded: u64,
    /// See [`ReportSync::cnt_dirs`].
    pub cnt_dirs: u64,
    /// See [`ReportSync::cnt_files`].
    pub cnt_files: u64,
    /// See [`ReportSync::cnt_symlinks`].
    pub cnt_symlinks: u64,
    /// See [`ReportSync::n_bytes`].
    pub n_bytes: u64,
    /// See [`ReportSync::warnings`].
    pub warnings: Vec<String>,
}

impl ReportSyncBuilder {
    /// Count one mirrored entry operation. Root operations are not counted.
    pub fn add_operation(&mut self, spec_op: &SpecSyncOperation) {
        let SpecSyncOperation::CopyEntry { kind, n_bytes, .. } = spec_op else {
            return;
        };
        match kind {
            EnumEntryKind::Directory => self.cnt_dirs += 1,
            EnumEntryKind::File => {
                self.cnt_files += 1;
                self.n_bytes += n_bytes;
            }
            EnumEntryKind::Symlink => self.cnt_symlinks += 1,
        }
    }

    /// Add warning message.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Finalize builder into immutable report.
    pub fn build(self, if_dry_run: bool) -> ReportSync {
        ReportSync {
            if_dry_run,
            cnt_scanned: self.cnt_scanned,
            cnt_excluded: self.cnt_excluded,
            cnt_dirs: self.cnt_dirs,
            cnt_files: self.cnt_files,
            cnt_symlinks: self.cnt_symlinks,
            n_bytes: self.n_bytes,
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{ReportSync, ReportSyncBuilder};
    use crate::spec::{EnumEntryKind, SpecSyncOperation};

    #[test]
    fn report_sync_format() {
        let report = ReportSync {
            if_dry_run: false,
            cnt_scanned: 6,
            cnt_excluded: 1,
            cnt_dirs: 1,
            cnt_files: 3,
            cnt_symlinks: 1,
            n_bytes: 42,
            warnings: vec!["w".to_string()],
        };

        assert_eq!(report.entry_count(), 5);
        assert_eq!(report.warning_count(), 1);

        let txt = report.format("[SYNC]");
        assert_eq!(
            txt,
            "[SYNC] scanned=6 excluded=1 dirs=1 files=3 symlinks=1 bytes=42 warnings=1"
        );
        assert_eq!(report.to_string(), txt);
    }

    #[test]
    fn dry_run_report_uses_dry_run_prefix() {
        let report = ReportSyncBuilder::default().build(true);
        assert!(report.to_string().starts_with("[DRY-RUN] "));
    }

    #[test]
    fn builder_counts_entries_by_kind() {
        let mut builder = ReportSyncBuilder::default();
        builder.add_operation(&SpecSyncOperation::RemoveDestination(PathBuf::from("d")));
        builder.add_operation(&SpecSyncOperation::CreateDestination(PathBuf::from("d")));
        builder.add_operation(&SpecSyncOperation::CopyEntry {
            path_rel: PathBuf::from("b"),
            kind: EnumEntryKind::Directory,
            n_bytes: 0,
        });
        builder.add_operation(&SpecSyncOperation::CopyEntry {
            path_rel: PathBuf::from("b/b.txt"),
            kind: EnumEntryKind::File,
            n_bytes: 10,
        });
        builder.add_operation(&SpecSyncOperation::CopyEntry {
            path_rel: PathBuf::from("a.txt"),
            kind: EnumEntryKind::File,
            n_bytes: 5,
        });

        let report = builder.build(false);
        assert_eq!(report.cnt_dirs, 1);
        assert_eq!(report.cnt_files, 2);
        assert_eq!(report.cnt_symlinks, 0);
        assert_eq!(report.n_bytes, 15);
    }
}
