//! Prefix scan over JSON documents.
//!
//! Every string value anywhere in a document is tested against a pattern
//! anchored at the start of the string. Files that are not valid JSON are
//! reported and skipped; the scan carries on with the next file.

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

use crate::error::{Error, Result};
use crate::local_files::{self, FileSystem};

/// Pattern matched at the start of a string value.
#[derive(Debug, Clone)]
pub struct ScanPattern {
    source: String,
    regex: Regex,
}

impl ScanPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{})", pattern)).map_err(|e| {
            Error::validation_invalid_argument(
                "pattern",
                format!("Invalid regex pattern: {}", e),
                Some(pattern.to_string()),
                None,
            )
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

/// Outcome for one scanned file: its matches, or the decode error that
/// caused it to be skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileScan {
    pub file: String,
    pub path: String,
    pub matches: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileScan {
    pub fn is_skipped(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanOutput {
    pub src: String,
    pub pattern: String,
    pub match_count: usize,
    pub skipped_count: usize,
    pub files: Vec<FileScan>,
}

impl ScanOutput {
    /// Console rendering in file order: `Found in <file>: <value>` per match,
    /// `Could not decode JSON in file: <path>` per skipped file.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for scanned in &self.files {
            if scanned.is_skipped() {
                out.push_str(&format!("Could not decode JSON in file: {}\n", scanned.path));
                continue;
            }
            for value in &scanned.matches {
                out.push_str(&format!("Found in {}: {}\n", scanned.file, value));
            }
        }
        out
    }
}

/// Depth-first walk collecting matching strings. Object members are visited
/// in document order, then array items in index order.
pub fn collect_matches(value: &Value, pattern: &ScanPattern) -> Vec<String> {
    let mut found = Vec::new();
    visit(value, pattern, &mut found);
    found
}

fn visit(value: &Value, pattern: &ScanPattern, found: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for child in map.values() {
                visit(child, pattern, found);
            }
        }
        Value::Array(items) => {
            for item in items {
                visit(item, pattern, found);
            }
        }
        Value::String(s) => {
            if pattern.matches(s) {
                found.push(s.clone());
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// Scan every file in `dir` whose name matches `file_glob`, in file name
/// order. A missing directory scans nothing. Skipped files are only reported
/// through the returned [`FileScan`] entries.
pub fn scan_directory(
    fs: &dyn FileSystem,
    dir: &Path,
    pattern: &ScanPattern,
    file_glob: &str,
) -> Result<ScanOutput> {
    let entries = local_files::files_matching(fs, dir, file_glob)?;

    let mut files = Vec::with_capacity(entries.len());
    for entry in &entries {
        let raw = fs.read(&entry.path)?;
        let scanned = match serde_json::from_str::<Value>(&raw) {
            Ok(document) => FileScan {
                file: entry.name(),
                path: entry.path.display().to_string(),
                matches: collect_matches(&document, pattern),
                error: None,
            },
            Err(e) => FileScan {
                file: entry.name(),
                path: entry.path.display().to_string(),
                matches: Vec::new(),
                error: Some(e.to_string()),
            },
        };
        files.push(scanned);
    }

    Ok(ScanOutput {
        src: dir.display().to_string(),
        pattern: pattern.as_str().to_string(),
        match_count: files.iter().map(|f| f.matches.len()).sum(),
        skipped_count: files.iter().filter(|f| f.is_skipped()).count(),
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn aeon() -> ScanPattern {
        ScanPattern::new("Aeon Stone").unwrap()
    }

    #[test]
    fn pattern_is_anchored_at_start() {
        let pattern = aeon();
        assert!(pattern.matches("Aeon Stone (Tourmaline Sphere)"));
        assert!(!pattern.matches("Greater Aeon Stone"));
        assert!(!pattern.matches("aeon stone"));
    }

    #[test]
    fn alternation_stays_anchored() {
        let pattern = ScanPattern::new("Aeon|Wayfinder").unwrap();
        assert!(pattern.matches("Wayfinder of Rescue"));
        assert!(!pattern.matches("Lesser Wayfinder"));
    }

    #[test]
    fn invalid_pattern_is_argument_error() {
        let err = ScanPattern::new("Aeon (Stone").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
        assert_eq!(err.details["field"], "pattern");
    }

    #[test]
    fn walks_nested_values_depth_first_in_document_order() {
        let document: Value = serde_json::from_str(
            r#"{
                "zeta": "Aeon Stone (Pink Rhomboid)",
                "items": [
                    {"name": "Aeon Stone (Clear Spindle)", "level": 3},
                    ["Aeon Stone (Gold Nodule)", 7, null, true],
                    "Bag of Holding"
                ],
                "alpha": {"deep": {"deeper": "Aeon Stone (Dull Gray)"}}
            }"#,
        )
        .unwrap();

        assert_eq!(
            collect_matches(&document, &aeon()),
            vec![
                "Aeon Stone (Pink Rhomboid)",
                "Aeon Stone (Clear Spindle)",
                "Aeon Stone (Gold Nodule)",
                "Aeon Stone (Dull Gray)",
            ]
        );
    }

    #[test]
    fn top_level_string_and_scalars() {
        assert_eq!(collect_matches(&json!("Aeon Stone"), &aeon()), vec!["Aeon Stone"]);
        assert!(collect_matches(&json!(12), &aeon()).is_empty());
        assert!(collect_matches(&json!({"Aeon Stone": 1}), &aeon()).is_empty());
    }

    #[test]
    fn malformed_file_is_skipped_and_scan_continues() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a_broken.json"), "{ not json").unwrap();
        std::fs::write(
            dir.path().join("b_items.json"),
            r#"{"results": [{"text": "Aeon Stone (Orange Prism)"}]}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("c_notes.txt"), "Aeon Stone").unwrap();

        let output = scan_directory(&local_files::local(), dir.path(), &aeon(), "*.json").unwrap();

        assert_eq!(output.files.len(), 2);
        assert_eq!(output.skipped_count, 1);
        assert_eq!(output.match_count, 1);
        assert!(output.files[0].is_skipped());
        assert!(output.files[0].path.ends_with("a_broken.json"));
        assert_eq!(output.files[1].file, "b_items.json");
        assert_eq!(output.files[1].matches, vec!["Aeon Stone (Orange Prism)"]);

        let text = output.to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Could not decode JSON in file: "));
        assert_eq!(lines[1], "Found in b_items.json: Aeon Stone (Orange Prism)");
    }

    #[test]
    fn missing_directory_scans_nothing() {
        let dir = tempdir().unwrap();
        let output =
            scan_directory(&local_files::local(), &dir.path().join("absent"), &aeon(), "*.json")
                .unwrap();
        assert!(output.files.is_empty());
        assert_eq!(output.to_text(), "");
    }
}
