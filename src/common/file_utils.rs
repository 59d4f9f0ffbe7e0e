use crate::errors::AppError;
use log::debug;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn ensure_parent_directory(file_path: &Path) -> Result<(), AppError> {
    let Some(dir_path) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    if !dir_path.exists() {
        debug!("State directory '{}' does not exist, attempting to create it.", dir_path.display());
        fs::create_dir_all(dir_path).map_err(|e| {
            AppError::Io(format!(
                "Failed to create directory '{}': {}",
                dir_path.display(),
                e
            ))
        })?;
    } else if !dir_path.is_dir() {
        return Err(AppError::Io(format!(
            "Path '{}' exists but is not a directory.",
            dir_path.display()
        )));
    }
    Ok(())
}

/// Writes `contents` next to `file_path` and renames it into place, so a
/// reader sees either the old file or the new one.
pub fn write_atomically(file_path: &Path, contents: &str) -> Result<(), AppError> {
    ensure_parent_directory(file_path)?;
    let tmp_path = temporary_sibling(file_path);
    {
        let mut file = fs::File::create(&tmp_path).map_err(|e| {
            AppError::Io(format!("Failed to create '{}': {}", tmp_path.display(), e))
        })?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, file_path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        AppError::Io(format!(
            "Failed to move '{}' into place at '{}': {}",
            tmp_path.display(),
            file_path.display(),
            e
        ))
    })
}

fn temporary_sibling(file_path: &Path) -> PathBuf {
    let mut name = file_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    file_path.with_file_name(name)
}

/// Turns a MAC address into something usable as a directory name on every platform.
pub fn mac_to_dir_name(mac: &str) -> String {
    mac.trim().replace(':', "_")
}
