use crate::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Base relabel config directory (~/.config/relabel/ on Unix-likes)
pub fn relabel() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let appdata = env::var("APPDATA").map_err(|_| {
            Error::internal_unexpected(
                "APPDATA environment variable not set on Windows".to_string(),
            )
        })?;
        Ok(PathBuf::from(appdata).join("relabel"))
    }

    #[cfg(not(windows))]
    {
        let home = env::var("HOME").map_err(|_| {
            Error::internal_unexpected(
                "HOME environment variable not set on Unix-like system".to_string(),
            )
        })?;
        Ok(PathBuf::from(home).join(".config").join("relabel"))
    }
}

/// Global relabel.json config file path
pub fn relabel_json() -> Result<PathBuf> {
    Ok(relabel()?.join("relabel.json"))
}

/// Expand a user-supplied path argument (`~/exports` and `$VAR` forms).
pub fn expand(path: &str) -> PathBuf {
    match shellexpand::full(path) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(shellexpand::tilde(path).as_ref()),
    }
}

/// File stem used as a report heading (`monsters.json` -> `monsters`).
pub fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// File name for display and for mirroring into an output directory.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_leaves_plain_relative_paths_alone() {
        assert_eq!(expand("input_files"), PathBuf::from("input_files"));
    }

    #[test]
    fn stem_drops_extension() {
        assert_eq!(stem(Path::new("src/equipment.json")), "equipment");
        assert_eq!(stem(Path::new("archive.tar.json")), "archive.tar");
    }

    #[test]
    fn file_name_keeps_extension() {
        assert_eq!(file_name(Path::new("in/items.txt")), "items.txt");
    }
}
