// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::WriteError;

/// Writes `content` at `path` only when the on-disk bytes differ.
///
/// Returns whether the destination changed. The write goes through a
/// temporary file in the target directory and is renamed over the
/// destination, so no partial-write state is ever observable at `path`.
pub fn write_if_changed(path: &Path, content: &str) -> Result<bool, WriteError> {
    match fs::read(path) {
        Ok(existing) if existing == content.as_bytes() => {
            debug!("unchanged: {}", path.display());
            return Ok(false);
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(WriteError {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    let dir = path.parent().ok_or_else(|| WriteError {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "path has no parent directory"),
    })?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|source| WriteError {
        path: path.to_path_buf(),
        source,
    })?;
    tmp.write_all(content.as_bytes())
        .map_err(|source| WriteError {
            path: path.to_path_buf(),
            source,
        })?;
    tmp.persist(path).map_err(|err| WriteError {
        path: path.to_path_buf(),
        source: err.error,
    })?;

    debug!("wrote: {}", path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_write_reports_changed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.toml");
        assert!(write_if_changed(&path, "type = \"file\"\n").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "type = \"file\"\n");
    }

    #[test]
    fn test_identical_rewrite_reports_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.toml");
        write_if_changed(&path, "type = \"file\"\n").unwrap();
        assert!(!write_if_changed(&path, "type = \"file\"\n").unwrap());
    }

    #[test]
    fn test_different_content_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.toml");
        write_if_changed(&path, "type = \"file\"\n").unwrap();
        assert!(write_if_changed(&path, "type = \"journald\"\n").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "type = \"journald\"\n");
    }

    #[test]
    fn test_missing_parent_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("a.toml");
        let error = write_if_changed(&path, "x = 1\n").unwrap_err();
        assert!(error.to_string().contains("a.toml"));
    }
}
