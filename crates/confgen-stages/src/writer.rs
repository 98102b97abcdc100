//! Artifact output: atomic replace of the destination file.
use std::io::Write;
use std::path::Path;

use confgen_core::GeneratorError;

/// Write `contents` to `path` through a sibling temp file, then rename it over
/// the destination. A failed write leaves the previous file untouched.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), GeneratorError> {
    let display = path.display().to_string();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| GeneratorError::write(&display, e))?;

    let mut tmp =
        tempfile::NamedTempFile::new_in(parent).map_err(|e| GeneratorError::write(&display, e))?;
    tmp.write_all(contents)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| GeneratorError::write(&display, e))?;
    tmp.persist(path)
        .map_err(|e| GeneratorError::write(&display, e.error))?;
    Ok(())
}

/// True when `path` already holds exactly `contents`. A missing file is stale.
pub fn is_up_to_date(path: &Path, contents: &[u8]) -> Result<bool, GeneratorError> {
    match std::fs::read(path) {
        Ok(existing) => Ok(existing == contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(GeneratorError::write(path.display().to_string(), e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_parents_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local/platformsh/platformsh_config.go");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        let leftovers = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();

        let err = write_atomic(&blocker.join("config.go"), b"x").unwrap_err();
        assert_eq!(err.category(), "WRITE");
    }

    #[test]
    fn test_up_to_date() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.go");

        assert!(!is_up_to_date(&path, b"x").unwrap());
        std::fs::write(&path, "x").unwrap();
        assert!(is_up_to_date(&path, b"x").unwrap());
        assert!(!is_up_to_date(&path, b"y").unwrap());
    }
}
