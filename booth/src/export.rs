//! Writing export blobs to disk.

use std::path::{Path, PathBuf};

use crate::BoothError;

/// Write `contents` to `<dir>/<filename>`, creating `dir` if needed, and
/// return the full path. Existing files are overwritten.
pub fn write_export(dir: &Path, filename: &str, contents: &str) -> Result<PathBuf, BoothError> {
    if filename.is_empty() || filename.contains(['/', '\\']) {
        return Err(BoothError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("invalid export filename '{filename}'"),
        )));
    }
    std::fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    std::fs::write(&path, contents)?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "export written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_into_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("exports");
        let path = write_export(&target, "a.csv", "x,y\n").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "x,y\n");
    }

    #[test]
    fn rejects_path_separators() {
        let dir = tempfile::tempdir().unwrap();
        assert!(write_export(dir.path(), "../escape.txt", "").is_err());
    }
}
