//! One server per snapshot file.
//!
//! Two servers sharing a snapshot would each overwrite the other's state at
//! shutdown, so the server holds an exclusive lock next to the snapshot.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// A lock guard that releases the lock when dropped
pub struct LockGuard {
    _file: File,
}

fn lock_path(snapshot_path: &Path) -> PathBuf {
    let mut name = snapshot_path.file_name().unwrap_or_default().to_os_string();
    name.push(".lock");
    snapshot_path.with_file_name(name)
}

/// Acquire an exclusive lock for `snapshot_path`, failing if another
/// instance already holds it.
pub fn acquire_lock(snapshot_path: &Path) -> Result<LockGuard> {
    if let Some(dir) = snapshot_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let path = lock_path(snapshot_path);
    let file = File::create(&path).context("Failed to create lock file")?;

    file.try_lock_exclusive().map_err(|_| {
        anyhow::anyhow!(
            "Another calhub-server instance is already using this snapshot.\n\
            If you believe this is an error, remove: {}",
            path.display()
        )
    })?;

    Ok(LockGuard { _file: file })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_second_lock_fails_until_first_is_dropped() {
        let dir = TempDir::new().unwrap();
        let snapshot = dir.path().join("data/snapshot.json");

        let guard = acquire_lock(&snapshot).unwrap();
        assert!(dir.path().join("data/snapshot.json.lock").exists());
        assert!(acquire_lock(&snapshot).is_err());

        drop(guard);
        assert!(acquire_lock(&snapshot).is_ok());
    }
}
