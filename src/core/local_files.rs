use std::fs;
use std::path::{Path, PathBuf};

use glob_match::glob_match;

use crate::error::{Error, Result};

/// Entry returned from directory listing
#[derive(Debug, Clone)]
pub struct Entry {
    pub path: PathBuf,
    pub is_file: bool,
}

impl Entry {
    pub fn name(&self) -> String {
        crate::paths::file_name(&self.path)
    }
}

/// Trait for the file operations the tools need
pub trait FileSystem {
    fn read(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, content: &str) -> Result<()>;
    fn list(&self, dir: &Path) -> Result<Vec<Entry>>;
    fn ensure_dir(&self, dir: &Path) -> Result<()>;
}

/// Local filesystem implementation
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFs {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::internal_io(
                    format!("File not found: {}", path.display()),
                    Some("read file".to_string()),
                )
            } else {
                Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
            }
        })
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        // Atomic write: write to temp file, then rename
        let parent = path.parent().ok_or_else(|| {
            Error::internal_io(
                format!("Invalid path: {}", path.display()),
                Some("write file".to_string()),
            )
        })?;

        let filename = path.file_name().ok_or_else(|| {
            Error::internal_io(
                format!("Invalid path: {}", path.display()),
                Some("write file".to_string()),
            )
        })?;

        let tmp_path = parent.join(format!(".{}.tmp", filename.to_string_lossy()));

        fs::write(&tmp_path, content)
            .map_err(|e| Error::internal_io(e.to_string(), Some("write temp file".to_string())))?;

        fs::rename(&tmp_path, path)
            .map_err(|e| Error::internal_io(e.to_string(), Some("rename temp file".to_string())))?;

        Ok(())
    }

    fn list(&self, dir: &Path) -> Result<Vec<Entry>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(dir)
            .map_err(|e| Error::internal_io(e.to_string(), Some("list directory".to_string())))?;

        let mut result = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            let is_file = path.is_file();
            result.push(Entry { path, is_file });
        }

        result.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
        Ok(result)
    }

    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| {
                Error::internal_io(e.to_string(), Some("create directory".to_string()))
            })?;
        }
        Ok(())
    }
}

/// Convenience function to get local filesystem
pub fn local() -> LocalFs {
    LocalFs::new()
}

/// Regular files in `dir` whose name matches `pattern`, sorted by file name.
///
/// Directories (even ones named `*.json`) are skipped.
pub fn files_matching(fs: &dyn FileSystem, dir: &Path, pattern: &str) -> Result<Vec<Entry>> {
    Ok(fs
        .list(dir)?
        .into_iter()
        .filter(|entry| entry.is_file && glob_match(pattern, &entry.name()))
        .collect())
}

/// Like [`files_matching`], but a missing directory is an argument error.
pub fn require_files_matching(
    fs: &dyn FileSystem,
    dir: &Path,
    pattern: &str,
    field: &str,
) -> Result<Vec<Entry>> {
    if !dir.is_dir() {
        return Err(Error::validation_invalid_argument(
            field,
            format!("Directory not found: {}", dir.display()),
            None,
            None,
        )
        .with_hint(format!("Check the --{} argument", field)));
    }
    files_matching(fs, dir, pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_local_fs_write_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");
        let fs = local();

        fs.write(&path, "hello world").unwrap();
        let content = fs.read(&path).unwrap();
        assert_eq!(content, "hello world");
        assert!(!dir.path().join(".test.txt.tmp").exists());
    }

    #[test]
    fn test_local_fs_list_is_sorted() {
        let dir = tempdir().unwrap();
        let fs = local();

        fs.write(&dir.path().join("b.json"), "{}").unwrap();
        fs.write(&dir.path().join("a.json"), "{}").unwrap();
        fs.write(&dir.path().join("c.txt"), "text").unwrap();

        let names: Vec<_> = fs.list(dir.path()).unwrap().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["a.json", "b.json", "c.txt"]);
    }

    #[test]
    fn test_files_matching_skips_directories() {
        let dir = tempdir().unwrap();
        let fs = local();

        fs.write(&dir.path().join("items.json"), "{}").unwrap();
        fs.write(&dir.path().join("notes.txt"), "x").unwrap();
        std::fs::create_dir(dir.path().join("nested.json")).unwrap();

        let entries = files_matching(&fs, dir.path(), "*.json").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name(), "items.json");
    }

    #[test]
    fn test_missing_dir_lists_empty() {
        let dir = tempdir().unwrap();
        let fs = local();
        let missing = dir.path().join("absent");

        assert!(files_matching(&fs, &missing, "*").unwrap().is_empty());
        let err = require_files_matching(&fs, &missing, "*", "input_dir").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }

    #[test]
    fn test_ensure_dir_creates_nested() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("out").join("deeper");
        local().ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
