use std::path::{Component, Path, PathBuf};

use tracing::trace;

/// File access used by the resolver.
///
/// Read failures are not errors: a file that cannot be read contributes no
/// definitions.
pub trait SourceLoader {
    fn read(
        &self,
        path: &Path,
    ) -> Option<String>;

    /// Resolve an `@import` path against the directory of the importing file.
    fn resolve_import(
        &self,
        base_dir: &Path,
        relative: &str,
    ) -> PathBuf {
        normalize_path(&base_dir.join(relative))
    }
}

/// Reads sources from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn read(
        &self,
        path: &Path,
    ) -> Option<String> {
        match std::fs::read_to_string(path) {
            Ok(text) => Some(text),
            Err(error) => {
                trace!("Cannot read {}: {error}", path.display());
                None
            },
        }
    }
}

/// Make `path` absolute and fold `.` / `..` components lexically.
///
/// Symlinks are not followed, so this works for files that do not exist.
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {},
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            },
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}

#[cfg(test)]
#[path = "../../tests/src/resolve/loader_tests.rs"]
mod tests;
