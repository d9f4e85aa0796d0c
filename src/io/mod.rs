pub mod output;
pub mod trend;

pub use output::{create_writer, OutputFormat, OutputWriter};

use crate::errors::{StoreError, StoreResult};
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

/// Read a whole file, mapping "not found" to `None`.
pub fn read_if_exists(path: &Path) -> StoreResult<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::io("read", path, e)),
    }
}

/// Sibling temp path so the final rename stays on one filesystem.
fn temp_path_for(target: &Path) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "store".to_string());
    target.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()))
}

/// Replace `target` with `data` via temp file and rename.
///
/// On failure the previous contents of `target` are left as they were.
pub fn write_atomically(target: &Path, data: &[u8]) -> StoreResult<()> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io("create directory", parent, e))?;
        }
    }

    let temp_path = temp_path_for(target);
    if let Err(e) = fs::write(&temp_path, data) {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::io("write", &temp_path, e));
    }

    fs::rename(&temp_path, target).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        StoreError::io("replace", target, e)
    })
}
