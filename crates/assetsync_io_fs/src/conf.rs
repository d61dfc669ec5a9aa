//! Conventional defaults for the asset mirror.

/// Source asset tree, relative to the working directory.
pub const C_DIR_SOURCE_DEFAULT: &str = "assets";
/// Public asset directory under the web output, relative to the working directory.
pub const C_DIR_DESTINATION_DEFAULT: &str = "web/public/assets";
/// Path segment marking a development-only subtree that never ships.
pub const C_NAME_EXCLUDED_DEFAULT: &str = "ignore";
/// Summary prefix for real runs.
pub const C_PREFIX_REPORT_SYNC: &str = "[SYNC]";
/// Summary prefix for dry runs.
pub const C_PREFIX_REPORT_DRY_RUN: &str = "[DRY-RUN]";
