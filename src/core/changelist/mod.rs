//! Change-list extraction.
//!
//! Builds a rename dictionary from the change-log lookup document, matches
//! every result item of the source JSON files against it and renders the
//! hits as a markdown report.

mod lookup;
mod report;

pub use lookup::{
    extract_rename_dictionary, normalize_new_name, RenameDictionary, NEW_NAME_HEADER, REMOVED,
};
pub use report::render_markdown;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::{Error, Result};
use crate::local_files::{self, FileSystem};
use crate::paths;

static NAME_PARTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s*(\(.*?\))?$").unwrap());

static SPELL_LEVEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)(?:st|nd|rd|th)-level Spell").unwrap());

/// A per-entity export: `{"results": [{"text": "..."}, ...]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub results: Vec<ResultItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultItem {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    pub original: String,
    pub new: String,
}

/// Changes found in one source file, named by the file stem.
#[derive(Debug, Clone, Serialize)]
pub struct FileChanges {
    pub name: String,
    pub changes: Vec<ChangeRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub file: String,
    pub rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangesOutput {
    pub lookup: String,
    pub output: String,
    pub renames: usize,
    pub rows: usize,
    pub files: Vec<FileSummary>,
}

/// Split `"Longsword (Masterwork)"` into `("Longsword", "(Masterwork)")`.
/// Names without a trailing parenthetical get an empty second part.
pub fn split_parenthetical(name: &str) -> (String, String) {
    let trimmed = name.trim();
    match NAME_PARTS.captures(trimmed) {
        Some(caps) => (
            caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default().to_string(),
            caps.get(2).map(|m| m.as_str()).unwrap_or_default().to_string(),
        ),
        None => (trimmed.to_string(), String::new()),
    }
}

/// `3rd-level Spell` -> `3-rank Spell`.
pub fn level_to_rank(text: &str) -> String {
    SPELL_LEVEL.replace_all(text, "${1}-rank Spell").into_owned()
}

pub fn find_changes(dictionary: &RenameDictionary, result_set: &ResultSet) -> Vec<ChangeRecord> {
    result_set
        .results
        .iter()
        .filter_map(|item| {
            let (base, parenthetical) = split_parenthetical(&item.text);
            let replacement = dictionary.get(&base)?;

            let new = if parenthetical.is_empty() {
                replacement.clone()
            } else {
                format!("{} {}", replacement, parenthetical)
            };

            Some(ChangeRecord {
                original: item.text.clone(),
                new: level_to_rank(&new),
            })
        })
        .collect()
}

fn read_json(fs: &dyn FileSystem, path: &Path) -> Result<Value> {
    let raw = fs.read(path)?;
    serde_json::from_str(&raw).map_err(|e| {
        Error::validation_invalid_json(
            e,
            Some(format!("parse {}", path.display())),
            Some(raw.chars().take(200).collect::<String>()),
        )
    })
}

/// Build the dictionary from `lookup_path`, process every `*.json` file in
/// `src_dir` in file name order and write the markdown report to `output`.
///
/// Any malformed JSON document aborts the run before the report is written.
pub fn run(
    fs: &dyn FileSystem,
    lookup_path: &Path,
    src_dir: &Path,
    output: &Path,
) -> Result<ChangesOutput> {
    let dictionary = extract_rename_dictionary(&read_json(fs, lookup_path)?)?;
    log_status!(
        "changes",
        "Loaded {} renames from {}",
        dictionary.len(),
        lookup_path.display()
    );

    let entries = local_files::require_files_matching(fs, src_dir, "*.json", "src")?;

    let mut sections = Vec::with_capacity(entries.len());
    for entry in &entries {
        let result_set: ResultSet =
            serde_json::from_value(read_json(fs, &entry.path)?).map_err(|e| {
                Error::validation_invalid_json(
                    e,
                    Some(format!("read results from {}", entry.path.display())),
                    None,
                )
            })?;

        let changes = find_changes(&dictionary, &result_set);
        log_status!("changes", "{}: {} renamed", entry.name(), changes.len());
        sections.push(FileChanges {
            name: paths::stem(&entry.path),
            changes,
        });
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs.ensure_dir(parent)?;
    }
    fs.write(output, &render_markdown(&sections))?;
    log_status!("changes", "Wrote {}", output.display());

    let files: Vec<FileSummary> = entries
        .iter()
        .zip(&sections)
        .map(|(entry, section)| FileSummary {
            file: entry.name(),
            rows: section.changes.len(),
        })
        .collect();

    Ok(ChangesOutput {
        lookup: lookup_path.display().to_string(),
        output: output.display().to_string(),
        renames: dictionary.len(),
        rows: files.iter().map(|f| f.rows).sum(),
        files,
    })
}
