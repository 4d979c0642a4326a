//! Rename dictionary extraction from change-log pages.
//!
//! The lookup document carries HTML fragments at `pages[].text.content`.
//! Every `<table>` in them is read as: first row = headers, each later row =
//! one renamed entry keyed by its first cell.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use serde_json_path::JsonPath;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// Original display name -> replacement name (or [`REMOVED`]).
pub type RenameDictionary = HashMap<String, String>;

pub const PAGE_CONTENT_PATH: &str = "$.pages[*].text.content";
pub const NEW_NAME_HEADER: &str = "New Name";
pub const REMOVED: &str = "removed";

/// Em dash as written by the change log, plus its mis-decoded form.
const REMOVED_PLACEHOLDERS: &[&str] = &["\u{2014}", "\u{e2}\u{20ac}\u{201d}"];

static UUID_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@UUID\[.*?\]\{(.*?)\}").unwrap());

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| Error::internal_unexpected(format!("Invalid selector '{}': {:?}", css, e)))
}

pub fn extract_rename_dictionary(lookup: &Value) -> Result<RenameDictionary> {
    let path = JsonPath::parse(PAGE_CONTENT_PATH).map_err(|e| {
        Error::internal_unexpected(format!("Invalid JSONPath '{}': {}", PAGE_CONTENT_PATH, e))
    })?;

    let mut dictionary = RenameDictionary::new();
    for content in path.query(lookup).all().into_iter().filter_map(Value::as_str) {
        collect_table_renames(content, &mut dictionary)?;
    }

    Ok(dictionary)
}

fn collect_table_renames(html: &str, dictionary: &mut RenameDictionary) -> Result<()> {
    let document = Html::parse_fragment(html);
    let table_selector = selector("table")?;
    let row_selector = selector("tr")?;
    let cell_selector = selector("th, td")?;

    for table in document.select(&table_selector) {
        let mut rows = table.select(&row_selector);
        let Some(header_row) = rows.next() else {
            continue;
        };

        let new_name_index = header_row
            .select(&cell_selector)
            .map(cell_text)
            .position(|header| header == NEW_NAME_HEADER);

        for row in rows {
            let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
            let Some(first) = cells.first() else {
                continue;
            };

            let original = cell_text(*first);
            if original.is_empty() {
                continue;
            }

            let new_name = new_name_index
                .and_then(|idx| cells.get(idx))
                .map(|cell| cell_text(*cell))
                .unwrap_or_default();

            dictionary.insert(original, normalize_new_name(&new_name));
        }
    }

    Ok(())
}

/// Text of a cell with every text node trimmed and empty ones dropped.
fn cell_text(cell: ElementRef) -> String {
    cell.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Map the em dash placeholder to [`REMOVED`] and unwrap
/// `@UUID[Compendium...]{Label}` references to `Label`.
pub fn normalize_new_name(cell: &str) -> String {
    if REMOVED_PLACEHOLDERS.contains(&cell) {
        return REMOVED.to_string();
    }
    UUID_REFERENCE.replace_all(cell, "$1").trim().to_string()
}
