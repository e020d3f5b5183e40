//! Placement of the generated Go file on disk.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::Builder;
use thiserror::Error;

/// Mode given to generated sources on unix: owner rw, group r.
pub const GENERATED_FILE_MODE: u32 = 0o640;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("cannot create output directory {dir}: {source}")]
    CreateDir { dir: PathBuf, source: io::Error },
    #[error("cannot write generated source for {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("cannot move generated source into place at {path}: {source}")]
    Persist { path: PathBuf, source: io::Error },
}

/// Writes a fully rendered Go source next to `path` and renames it into
/// place, so an existing file is either kept or fully replaced.
pub fn write_generated(path: &Path, source: &str) -> Result<(), WriteError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|err| WriteError::CreateDir {
        dir: dir.clone(),
        source: err,
    })?;

    let write_error = |err| WriteError::Write {
        path: path.to_path_buf(),
        source: err,
    };

    let mut staged = Builder::new()
        .prefix(".paypalc")
        .suffix(".go.tmp")
        .tempfile_in(&dir)
        .map_err(write_error)?;
    staged
        .as_file_mut()
        .write_all(source.as_bytes())
        .map_err(write_error)?;
    staged.as_file_mut().sync_all().map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(
            staged.path(),
            fs::Permissions::from_mode(GENERATED_FILE_MODE),
        )
        .map_err(write_error)?;
    }

    staged
        .persist(path)
        .map(|_| ())
        .map_err(|err| WriteError::Persist {
            path: path.to_path_buf(),
            source: err.error,
        })
}
