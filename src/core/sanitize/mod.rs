//! Line sanitizer for exported item name lists.
//!
//! Three passes per file:
//! - every line goes through the ordered [`rules::RULES`]; empty results are dropped
//! - a line that is only a qualifier keyword is folded into the line before it
//! - exact duplicates are removed, keeping the first occurrence

mod keywords;
pub mod rules;
mod title_case;

pub use keywords::{Keywords, CATEGORIES, COARSE_GRADES, GRADES, ITEM_TYPES};
pub use title_case::title_case;

use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

use crate::error::Result;
use crate::local_files::{self, FileSystem};
use crate::paths;
use rules::{Patterns, RULES};

/// Compiled sanitizer for one keyword configuration.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    patterns: Patterns,
    qualifiers: HashSet<String>,
}

impl Sanitizer {
    pub fn new(keywords: &Keywords) -> Result<Self> {
        Ok(Self {
            patterns: Patterns::compile(keywords)?,
            qualifiers: keywords.qualifiers().collect(),
        })
    }

    /// Run one line through every rule. `None` when nothing survives.
    pub fn sanitize_line(&self, line: &str) -> Option<String> {
        let line = line.trim_end_matches(['\r', '\n']);
        let sanitized = RULES
            .iter()
            .fold(line.to_string(), |acc, rule| (rule.apply)(&acc, &self.patterns));
        let sanitized = sanitized.trim();

        if sanitized.is_empty() {
            None
        } else {
            Some(sanitized.to_string())
        }
    }

    pub fn is_qualifier(&self, line: &str) -> bool {
        self.qualifiers.contains(&line.trim().to_lowercase())
    }

    /// Fold bare qualifier lines into the preceding kept line as `Prev (Qualifier)`.
    /// A qualifier with nothing before it is dropped.
    pub fn merge_qualifier_lines(&self, lines: Vec<String>) -> Vec<String> {
        let mut merged: Vec<String> = Vec::with_capacity(lines.len());

        for line in lines {
            if self.is_qualifier(&line) {
                if let Some(previous) = merged.last_mut() {
                    *previous = format!("{} ({})", previous.trim(), line.trim());
                }
            } else {
                merged.push(line);
            }
        }

        merged
    }

    /// All three passes over a whole document.
    pub fn sanitize_text(&self, text: &str) -> Vec<String> {
        let sanitized: Vec<String> = text
            .lines()
            .filter_map(|line| self.sanitize_line(line))
            .collect();

        dedup_lines(self.merge_qualifier_lines(sanitized))
    }
}

/// Drop exact repeats, keeping first occurrences in order.
pub fn dedup_lines(lines: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    lines
        .into_iter()
        .filter(|line| seen.insert(line.clone()))
        .collect()
}

/// Serialize sanitized lines, one per line with a trailing newline each.
pub fn render_lines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{}\n", line)).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedFile {
    pub input: String,
    pub output: String,
    pub lines_read: usize,
    pub lines_written: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizeOutput {
    pub input_dir: String,
    pub output_dir: String,
    pub files: Vec<SanitizedFile>,
}

pub fn process_file(
    fs: &dyn FileSystem,
    sanitizer: &Sanitizer,
    input: &Path,
    output: &Path,
) -> Result<SanitizedFile> {
    let content = fs.read(input)?;
    let lines = sanitizer.sanitize_text(&content);
    fs.write(output, &render_lines(&lines))?;

    Ok(SanitizedFile {
        input: input.display().to_string(),
        output: output.display().to_string(),
        lines_read: content.lines().count(),
        lines_written: lines.len(),
    })
}

/// Sanitize every regular file in `input_dir`, hidden ones included, into a
/// same-named file in `output_dir`, creating `output_dir` when missing.
pub fn process_all(
    fs: &dyn FileSystem,
    sanitizer: &Sanitizer,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<SanitizeOutput> {
    let entries = local_files::require_files_matching(fs, input_dir, "*", "input_dir")?;
    fs.ensure_dir(output_dir)?;

    let mut files = Vec::new();
    for entry in &entries {
        let output_file = output_dir.join(paths::file_name(&entry.path));
        let processed = process_file(fs, sanitizer, &entry.path, &output_file)?;
        log_status!(
            "sanitize",
            "Processed {} -> {}",
            entry.path.display(),
            output_file.display()
        );
        files.push(processed);
    }

    Ok(SanitizeOutput {
        input_dir: input_dir.display().to_string(),
        output_dir: output_dir.display().to_string(),
        files,
    })
}
