//! Whole-index snapshot persistence.
//!
//! The snapshot is one JSON document holding the entire `UserIndex`. It is
//! read once at startup and written once at shutdown.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{CalHubError, CalHubResult};
use crate::index::UserIndex;

/// Load the index stored at `path`.
///
/// Returns `Ok(None)` when the file is missing or empty.
pub fn load(path: &Path) -> CalHubResult<Option<UserIndex>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(None);
    }

    let index: UserIndex = serde_json::from_str(&content)
        .map_err(|e| CalHubError::Decode(format!("{}: {e}", path.display())))?;
    check_consistency(&index)
        .map_err(|reason| CalHubError::Decode(format!("{}: {reason}", path.display())))?;

    Ok(Some(index))
}

/// Load the index at `path`, or start from an empty one if there is none yet.
pub fn load_or_default(path: &Path) -> CalHubResult<UserIndex> {
    match load(path)? {
        Some(index) => {
            info!(path = %path.display(), users = index.len(), "Loaded snapshot");
            Ok(index)
        }
        None => {
            info!(path = %path.display(), "No snapshot found, starting with an empty index");
            Ok(UserIndex::new())
        }
    }
}

/// Write the whole index to `path`.
///
/// Writes a sibling temp file, flushes it to disk and renames it over `path`,
/// so a crash mid-write leaves the previous snapshot intact.
pub fn save(index: &UserIndex, path: &Path) -> CalHubResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(index)
        .map_err(|e| CalHubError::Encode(format!("{}: {e}", path.display())))?;

    let temp = temp_path(path);
    let mut file = File::create(&temp)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    drop(file);
    fs::rename(&temp, path)?;

    debug!(path = %path.display(), users = index.len(), "Saved snapshot");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

// Both maps must describe the same set of users.
fn check_consistency(index: &UserIndex) -> Result<(), String> {
    let mut count = 0;
    for name in index.usernames() {
        count += 1;
        let Some(id) = index.user_id_for(name) else {
            continue;
        };
        match index.user_for(id) {
            Some(user) if user.username() == name && user.id() == id => {}
            Some(_) => return Err(format!("user record for '{name}' does not match its keys")),
            None => return Err(format!("username '{name}' points at missing user {id}")),
        }
    }

    if count != index.len() {
        return Err(format!(
            "{} usernames but {} user records",
            count,
            index.len()
        ));
    }
    Ok(())
}
