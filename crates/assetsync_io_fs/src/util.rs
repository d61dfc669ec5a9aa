use std::fs;
use std::io;
use std::path::{Path, PathBuf};

////////////////////////////////////////////////////////////////////////////////
// #region PathUtilities

fn _absolutize_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(path)
}

/// Resolve the deepest existing ancestor and re-append the missing tail.
fn _normalize_path(path: &Path) -> PathBuf {
    let path_abs = _absolutize_path(path);
    let mut path_existing = path_abs.as_path();
    let mut l_tail = Vec::new();
    loop {
        if let Ok(resolved) = fs::canonicalize(path_existing) {
            let mut path_resolved = resolved;
            for part in l_tail.iter().rev() {
                path_resolved.push(part);
            }
            return path_resolved;
        }
        match (path_existing.parent(), path_existing.file_name()) {
            (Some(parent), Some(name)) => {
                l_tail.push(name.to_os_string());
                path_existing = parent;
            }
            _ => return path_abs,
        }
    }
}

pub(crate) fn is_overlap(src: &Path, dst: &Path) -> bool {
    let src_resolved = _normalize_path(src);
    let dst_resolved = _normalize_path(dst);
    dst_resolved.starts_with(&src_resolved) || src_resolved.starts_with(&dst_resolved)
}

/// `true` when anything (file, directory, dangling symlink) sits at `path`.
pub(crate) fn is_present(path: &Path) -> Result<bool, io::Error> {
    match fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FilesystemActions

/// Remove whatever sits at `path`; directories are removed recursively,
/// symlinks are removed without touching their target.
pub(crate) fn remove_path(path: &Path) -> Result<(), io::Error> {
    let meta_path = fs::symlink_metadata(path)?;
    if meta_path.file_type().is_dir() {
        return fs::remove_dir_all(path);
    }
    #[cfg(windows)]
    {
        use std::os::windows::fs::FileTypeExt;
        if meta_path.file_type().is_symlink_dir() {
            return fs::remove_dir(path);
        }
    }
    fs::remove_file(path)
}

pub(crate) fn create_symbolic_link(path_src: &Path, path_dst: &Path) -> Result<(), io::Error> {
    let target = fs::read_link(path_src)?;

    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(&target, path_dst)
    }
    #[cfg(windows)]
    {
        use std::os::windows::fs::{symlink_dir, symlink_file};
        if path_src.is_dir() {
            symlink_dir(&target, path_dst)
        } else {
            symlink_file(&target, path_dst)
        }
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = (target, path_dst);
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "Symbolic links are unsupported on this platform",
        ))
    }
}

/// Copy file bytes, permission bits and timestamps. Returns bytes written.
pub(crate) fn copy_file_with_metadata(
    path_file_src: &Path,
    path_file_dst: &Path,
) -> Result<u64, io::Error> {
    let n_bytes = fs::copy(path_file_src, path_file_dst)?;
    apply_metadata(path_file_src, path_file_dst)?;
    Ok(n_bytes)
}

fn apply_metadata(path_file_src: &Path, path_file_dst: &Path) -> Result<(), io::Error> {
    use filetime::{FileTime, set_file_times};

    let stat_src = fs::metadata(path_file_src)?;
    fs::set_permissions(path_file_dst, stat_src.permissions())?;

    let file_time_access = FileTime::from_last_access_time(&stat_src);
    let file_time_modify = FileTime::from_last_modification_time(&stat_src);
    set_file_times(path_file_dst, file_time_access, file_time_modify)?;

    #[cfg(target_os = "linux")]
    copy_xattrs_linux(path_file_src, path_file_dst);
    Ok(())
}

/// Best effort: filesystems without xattr support are silently skipped.
#[cfg(target_os = "linux")]
fn copy_xattrs_linux(path_file_src: &Path, path_file_dst: &Path) {
    let iter_xattr_names = match xattr::list(path_file_src) {
        Ok(v) => v,
        Err(_) => return,
    };

    for name in iter_xattr_names {
        let Some(raw_value) = xattr::get(path_file_src, &name).ok().flatten() else {
            continue;
        };
        if let Err(e) = xattr::set(path_file_dst, &name, &raw_value) {
            tracing::debug!(
                path = %path_file_dst.display(),
                xattr = ?name,
                "xattr not copied: {e}"
            );
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::{is_overlap, is_present, remove_path};

    #[test]
    fn overlap_detects_nested_destination() {
        let tmp = TempDir::new().expect("tempdir");
        let src = tmp.path().join("src");
        fs::create_dir_all(&src).expect("mkdir src");

        assert!(is_overlap(&src, &src.join("out")));
        assert!(is_overlap(&src.join("a/b"), &src));
        assert!(is_overlap(&src, &src));
        assert!(!is_overlap(&src, &tmp.path().join("dst")));
        assert!(!is_overlap(&src, &tmp.path().join("src_other")));
    }

    #[test]
    fn remove_path_handles_files_and_trees() {
        let tmp = TempDir::new().expect("tempdir");
        let file = tmp.path().join("f.txt");
        fs::write(&file, "x").expect("write");
        remove_path(&file).expect("remove file");
        assert!(!is_present(&file).expect("stat"));

        let dir = tmp.path().join("d");
        fs::create_dir_all(dir.join("a/b")).expect("mkdir");
        fs::write(dir.join("a/b/c.txt"), "x").expect("write");
        remove_path(&dir).expect("remove dir");
        assert!(!is_present(&dir).expect("stat"));
    }

    #[cfg(unix)]
    #[test]
    fn remove_path_keeps_symlink_target() {
        let tmp = TempDir::new().expect("tempdir");
        let target = tmp.path().join("target");
        fs::create_dir_all(&target).expect("mkdir");
        fs::write(target.join("keep.txt"), "x").expect("write");
        let link = tmp.path().join("link");
        std::os::unix::fs::symlink(&target, &link).expect("symlink");

        remove_path(&link).expect("remove link");
        assert!(!is_present(&link).expect("stat"));
        assert!(target.join("keep.txt").exists());
    }
}
