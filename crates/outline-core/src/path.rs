//! Cache-key normalisation for file paths.

use std::path::{Component, Path, PathBuf};

/// Normalise a path into the form used as a cache key.
///
/// Relative paths are joined onto the current directory, `.` and `..` are
/// resolved lexically, and the result is rebuilt component by component so
/// separators follow the platform. Symlinks are not resolved and the file
/// does not need to exist.
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}
