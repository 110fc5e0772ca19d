//! Path utilities for walking between module directories

use std::path::{Component, Path, PathBuf};

use crate::error::Result;

/// How to get from one directory to another through their common ancestor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativePath {
    /// Number of `..` steps from the base up to `common`
    pub ascend: usize,
    /// Deepest directory containing both paths
    pub common: PathBuf,
    /// Directory names from `common` down to the target
    pub descend: Vec<String>,
}

impl RelativePath {
    /// The target expressed relative to the base, e.g. `../../x/y`
    pub fn to_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        for _ in 0..self.ascend {
            path.push("..");
        }
        for name in &self.descend {
            path.push(name);
        }
        if path.as_os_str().is_empty() {
            path.push(".");
        }
        path
    }

    /// Directories visited when walking down, starting below `common`
    pub fn descend_dirs(&self) -> Vec<PathBuf> {
        let mut current = self.common.clone();
        self.descend
            .iter()
            .map(|name| {
                current.push(name);
                current.clone()
            })
            .collect()
    }
}

/// Resolve `.` and `..` without touching the filesystem
pub fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() && !path.has_root() {
                    result.push("..");
                }
            }
            other => result.push(other.as_os_str()),
        }
    }
    result
}

/// Make a path absolute against the working directory, then normalize it
pub fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(normalize(&std::path::absolute(path)?))
}

/// Compute the walk from `base` to `target`, comparing whole components
///
/// Returns `None` when the two paths share no common ancestor, such as
/// different drive prefixes on Windows.
pub fn relative_path(base: &Path, target: &Path) -> Result<Option<RelativePath>> {
    let base = absolute(base)?;
    let target = absolute(target)?;
    Ok(relative_between(&base, &target))
}

/// Same as [`relative_path`] for paths that are already absolute and normalized
pub fn relative_between(base: &Path, target: &Path) -> Option<RelativePath> {
    let base: Vec<Component> = base.components().collect();
    let target: Vec<Component> = target.components().collect();

    let shared = base
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();
    if shared == 0 {
        return None;
    }

    let common: PathBuf = base[..shared].iter().collect();
    let descend = target[shared..]
        .iter()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    Some(RelativePath {
        ascend: base.len() - shared,
        common,
        descend,
    })
}
