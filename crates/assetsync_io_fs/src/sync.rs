//! Tree planning and mirror orchestration.

use std::fs;
use std::path::{Path, PathBuf};

use crate::exclude::{PathExclusion, SpecExcludePatterns};
use crate::report::{ReportSync, ReportSyncBuilder, SyncReporter};
use crate::spec::{EnumEntryKind, SpecSyncOperation, SpecSyncOptions, SyncError};
use crate::util::{
    copy_file_with_metadata, create_symbolic_link, is_overlap, is_present, remove_path,
};

/// Ordered operations for one run, plus what traversal observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecSyncPlan {
    /// Operations in application order.
    pub operations: Vec<SpecSyncOperation>,
    /// Source entries visited (pruned subtree roots included).
    pub cnt_scanned: u64,
    /// Source entries pruned by the exclusion predicate.
    pub cnt_excluded: u64,
    /// Non-fatal traversal warnings.
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone)]
struct SpecSourceEntry {
    path_rel: PathBuf,
    name_entry: String,
    kind: EnumEntryKind,
    n_bytes: u64,
}

struct SpecPlanContext<'a> {
    path_dir_src: &'a Path,
    exclusion: &'a dyn PathExclusion,
    spec_plan: SpecSyncPlan,
}

/// Mirror `path_dir_source` into `path_dir_destination` using the exclusion
/// patterns carried by `spec_sync_options`.
///
/// See [`sync_tree_with`] for the run semantics.
pub fn sync_tree(
    spec_sync_options: &SpecSyncOptions,
    reporter: &mut dyn SyncReporter,
) -> Result<ReportSync, SyncError> {
    let spec_exclude_pats = SpecExcludePatterns::from_raw(
        &spec_sync_options.patterns_exclude,
        spec_sync_options.rule_pattern,
    )?;
    sync_tree_with(spec_sync_options, &spec_exclude_pats, reporter)
}

/// Mirror the source tree into the destination with a caller-supplied
/// exclusion predicate.
///
/// This function performs:
/// 1. Source validation (must be an existing directory not overlapping the destination).
/// 2. Planning: remove the destination if present, recreate it, then one
///    copy per non-excluded entry in depth-first, name-sorted order.
/// 3. Real run: each operation is applied, then reported. Dry run: each
///    operation is reported as hypothetical and nothing is touched.
///
/// The first failure aborts the run and is returned as is; the destination may
/// then be partially populated.
pub fn sync_tree_with(
    spec_sync_options: &SpecSyncOptions,
    exclusion: &dyn PathExclusion,
    reporter: &mut dyn SyncReporter,
) -> Result<ReportSync, SyncError> {
    let if_dry_run = spec_sync_options.if_dry_run;
    let spec_plan = plan_sync(spec_sync_options, exclusion)?;

    let mut builder_sync_report = ReportSyncBuilder {
        cnt_scanned: spec_plan.cnt_scanned,
        cnt_excluded: spec_plan.cnt_excluded,
        ..ReportSyncBuilder::default()
    };
    for warning in spec_plan.warnings {
        reporter.on_warning(&warning);
        builder_sync_report.add_warning(warning);
    }

    for spec_op in &spec_plan.operations {
        if !if_dry_run {
            apply_operation(spec_op, spec_sync_options)?;
            tracing::debug!(op = ?spec_op, "applied");
        }
        builder_sync_report.add_operation(spec_op);
        reporter.on_operation(spec_op, if_dry_run);
    }

    let report_sync = builder_sync_report.build(if_dry_run);
    tracing::info!(
        dry_run = if_dry_run,
        entries = report_sync.entry_count(),
        excluded = report_sync.cnt_excluded,
        bytes = report_sync.n_bytes,
        "sync finished"
    );
    Ok(report_sync)
}

/// Compute the full operation list without touching the filesystem.
pub fn plan_sync(
    spec_sync_options: &SpecSyncOptions,
    exclusion: &dyn PathExclusion,
) -> Result<SpecSyncPlan, SyncError> {
    let path_dir_src = spec_sync_options.path_dir_source.as_path();
    let path_dir_dst = spec_sync_options.path_dir_destination.as_path();

    match fs::metadata(path_dir_src) {
        Ok(meta_src) if meta_src.is_dir() => {}
        _ => return Err(SyncError::SourceMissing(path_dir_src.to_path_buf())),
    }
    if is_overlap(path_dir_src, path_dir_dst) {
        return Err(SyncError::SourceDestinationOverlap {
            path_dir_source: path_dir_src.to_path_buf(),
            path_dir_destination: path_dir_dst.to_path_buf(),
        });
    }

    tracing::info!(
        source = %path_dir_src.display(),
        destination = %path_dir_dst.display(),
        dry_run = spec_sync_options.if_dry_run,
        "planning sync"
    );

    let mut spec_plan_ctx = SpecPlanContext {
        path_dir_src,
        exclusion,
        spec_plan: SpecSyncPlan::default(),
    };

    let b_dst_present =
        is_present(path_dir_dst).map_err(|e| SyncError::io("inspect", path_dir_dst, e))?;
    if b_dst_present {
        spec_plan_ctx
            .spec_plan
            .operations
            .push(SpecSyncOperation::RemoveDestination(path_dir_dst.to_path_buf()));
    }
    spec_plan_ctx
        .spec_plan
        .operations
        .push(SpecSyncOperation::CreateDestination(path_dir_dst.to_path_buf()));

    walk_directory(Path::new(""), &mut spec_plan_ctx)?;
    Ok(spec_plan_ctx.spec_plan)
}

/// Apply one operation. Entry paths are resolved against the option roots.
pub fn apply_operation(
    spec_op: &SpecSyncOperation,
    spec_sync_options: &SpecSyncOptions,
) -> Result<(), SyncError> {
    match spec_op {
        SpecSyncOperation::RemoveDestination(path_dir_dst) => {
            remove_path(path_dir_dst).map_err(|e| SyncError::io("remove", path_dir_dst, e))
        }
        SpecSyncOperation::CreateDestination(path_dir_dst) => fs::create_dir_all(path_dir_dst)
            .map_err(|e| SyncError::io("create directory", path_dir_dst, e)),
        SpecSyncOperation::CopyEntry { path_rel, kind, .. } => {
            let path_src = spec_sync_options.path_dir_source.join(path_rel);
            let path_dst = spec_sync_options.path_dir_destination.join(path_rel);
            match kind {
                EnumEntryKind::Directory => fs::create_dir(&path_dst)
                    .map_err(|e| SyncError::io("create directory", path_dst, e)),
                EnumEntryKind::File => copy_file_with_metadata(&path_src, &path_dst)
                    .map(|_| ())
                    .map_err(|e| SyncError::io("copy", path_src, e)),
                EnumEntryKind::Symlink => create_symbolic_link(&path_src, &path_dst)
                    .map_err(|e| SyncError::io("link", path_dst, e)),
            }
        }
    }
}

fn walk_directory(
    path_dir_rel: &Path,
    spec_plan_ctx: &mut SpecPlanContext<'_>,
) -> Result<(), SyncError> {
    let path_dir_abs = spec_plan_ctx.path_dir_src.join(path_dir_rel);
    let iter_entries = fs::read_dir(&path_dir_abs)
        .map_err(|e| SyncError::io("read directory", &path_dir_abs, e))?;

    let mut l_dirs: Vec<SpecSourceEntry> = Vec::new();
    let mut l_others: Vec<SpecSourceEntry> = Vec::new();

    for _entry_res in iter_entries {
        let entry = _entry_res.map_err(|e| SyncError::io("read directory", &path_dir_abs, e))?;
        let path_entry = entry.path();
        let name_entry = entry.file_name().to_string_lossy().to_string();
        let path_rel = path_dir_rel.join(entry.file_name());
        spec_plan_ctx.spec_plan.cnt_scanned += 1;

        if spec_plan_ctx.exclusion.is_excluded(&path_rel) {
            tracing::debug!(path = %path_rel.display(), "excluded subtree");
            spec_plan_ctx.spec_plan.cnt_excluded += 1;
            continue;
        }

        let meta_entry = fs::symlink_metadata(&path_entry)
            .map_err(|e| SyncError::io("inspect", &path_entry, e))?;
        let cfg_file_type = meta_entry.file_type();

        let (kind, n_bytes) = if cfg_file_type.is_symlink() {
            (EnumEntryKind::Symlink, 0)
        } else if cfg_file_type.is_dir() {
            (EnumEntryKind::Directory, 0)
        } else if cfg_file_type.is_file() {
            (EnumEntryKind::File, meta_entry.len())
        } else {
            let warning = format!("Special file skipped: {}", path_entry.display());
            tracing::warn!("{warning}");
            spec_plan_ctx.spec_plan.warnings.push(warning);
            continue;
        };

        let spec_entry = SpecSourceEntry {
            path_rel,
            name_entry,
            kind,
            n_bytes,
        };
        if kind == EnumEntryKind::Directory {
            l_dirs.push(spec_entry);
        } else {
            l_others.push(spec_entry);
        }
    }

    l_dirs.sort_by(|a, b| a.name_entry.cmp(&b.name_entry));
    l_others.sort_by(|a, b| a.name_entry.cmp(&b.name_entry));

    for _dir_entry in l_dirs {
        spec_plan_ctx.spec_plan.operations.push(SpecSyncOperation::CopyEntry {
            path_rel: _dir_entry.path_rel.clone(),
            kind: EnumEntryKind::Directory,
            n_bytes: 0,
        });
        walk_directory(&_dir_entry.path_rel, spec_plan_ctx)?;
    }

    for _other_entry in l_others {
        spec_plan_ctx.spec_plan.operations.push(SpecSyncOperation::CopyEntry {
            path_rel: _other_entry.path_rel,
            kind: _other_entry.kind,
            n_bytes: _other_entry.n_bytes,
        });
    }
    Ok(())
}
