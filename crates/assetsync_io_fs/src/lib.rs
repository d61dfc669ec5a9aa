//! `assetsync_io_fs` v1:
//! Rust-side asset mirror engine.
//!
//! - `conf`    : conventional defaults
//! - `spec`    : options/operations/errors
//! - `exclude` : pluggable exclusion predicates
//! - `sync`    : planning and mirror orchestration
//! - `report`  : run-time report model and reporter seam
//! - `util`    : shared filesystem helpers

pub mod conf;
pub mod exclude;
pub mod report;
pub mod spec;
pub mod sync;
mod util;

pub use exclude::{PathExclusion, SpecExcludePatterns};
pub use report::{NullReporter, ReportSync, ReportSyncBuilder, SyncReporter};
pub use spec::{EnumEntryKind, EnumPatternMode, SpecSyncOperation, SpecSyncOptions, SyncError};
pub use sync::{SpecSyncPlan, apply_operation, plan_sync, sync_tree, sync_tree_with};
