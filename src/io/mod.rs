pub mod output;

use crate::core::errors::{Error, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::file_system("failed to read file", path, e))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| Error::file_system("failed to write file", path, e))
}

pub fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("problem.txt");
        write_file(&path, "x + 1 = 2").unwrap();
        assert!(path.is_file());
        assert_eq!(read_file(&path).unwrap(), "x + 1 = 2");
    }

    #[test]
    fn missing_file_carries_its_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.txt");
        match read_file(&path) {
            Err(Error::FileSystem { path: Some(p), .. }) => assert_eq!(p, path),
            other => panic!("expected file system error, got {other:?}"),
        }
    }
}
