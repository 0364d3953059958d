//! Removal of installed environments.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::Result;

/// Delete each of `dirs`. Absent entries are skipped.
///
/// Returns the paths that were actually removed.
pub fn reset_environment(dirs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();

    for dir in dirs {
        let result = if dir.is_dir() {
            fs::remove_dir_all(dir)
        } else {
            fs::remove_file(dir)
        };

        match result {
            Ok(()) => {
                tracing::debug!("removed {}", dir.display());
                removed.push(dir.clone());
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("{} not present, nothing to remove", dir.display());
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn removes_existing_directories() {
        let temp = TempDir::new().unwrap();
        let venv = temp.path().join(".venv");
        let deps = temp.path().join("node_modules");
        fs::create_dir_all(venv.join("bin")).unwrap();
        fs::create_dir_all(deps.join("electron")).unwrap();
        fs::write(deps.join("electron/index.js"), "").unwrap();

        let removed = reset_environment(&[venv.clone(), deps.clone()]).unwrap();

        assert_eq!(removed, vec![venv.clone(), deps.clone()]);
        assert!(!venv.exists());
        assert!(!deps.exists());
    }

    #[test]
    fn absent_directories_are_not_an_error() {
        let temp = TempDir::new().unwrap();
        let removed = reset_environment(&[
            temp.path().join(".venv"),
            temp.path().join("node_modules"),
        ])
        .unwrap();
        assert!(removed.is_empty());
    }

    #[test]
    fn reset_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let deps = temp.path().join("node_modules");
        fs::create_dir(&deps).unwrap();

        assert_eq!(reset_environment(&[deps.clone()]).unwrap().len(), 1);
        assert!(reset_environment(&[deps]).unwrap().is_empty());
    }
}
