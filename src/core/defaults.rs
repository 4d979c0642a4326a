use serde::{Deserialize, Serialize};
use std::fs;

use crate::paths;
use crate::sanitize::Keywords;

/// Root configuration structure for relabel.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RelabelConfig {
    #[serde(default)]
    pub defaults: Defaults,
}

/// All configurable defaults that can be overridden via relabel.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Defaults {
    #[serde(default)]
    pub keywords: Keywords,

    #[serde(default)]
    pub changes: ChangesConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub sanitize: SanitizeConfig,
}

/// Input/output locations for the change-list extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangesConfig {
    #[serde(default = "default_lookup")]
    pub lookup: String,

    #[serde(default = "default_src")]
    pub src: String,

    #[serde(default = "default_report")]
    pub output: String,
}

/// Pattern scanner settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_src")]
    pub src: String,

    /// Regex matched at the start of every string value
    #[serde(default = "default_scan_pattern")]
    pub pattern: String,

    /// Glob selecting which file names in `src` are scanned
    #[serde(default = "default_scan_files")]
    pub files: String,
}

/// Line sanitizer directories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizeConfig {
    #[serde(default = "default_input_dir")]
    pub input_dir: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for ChangesConfig {
    fn default() -> Self {
        Self {
            lookup: default_lookup(),
            src: default_src(),
            output: default_report(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            src: default_src(),
            pattern: default_scan_pattern(),
            files: default_scan_files(),
        }
    }
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_lookup() -> String {
    "remaster-changes.json".to_string()
}

fn default_src() -> String {
    "src".to_string()
}

fn default_report() -> String {
    "combined_results.md".to_string()
}

fn default_scan_pattern() -> String {
    "Aeon Stone".to_string()
}

fn default_scan_files() -> String {
    "*.json".to_string()
}

fn default_input_dir() -> String {
    "input_files".to_string()
}

fn default_output_dir() -> String {
    "output_files".to_string()
}

// =============================================================================
// Loading functions
// =============================================================================

/// Load defaults, merging file config with built-in defaults.
/// If relabel.json is missing or invalid, silently returns built-in defaults.
pub fn load_defaults() -> Defaults {
    load_config().defaults
}

/// Load the full relabel.json config, falling back to defaults on any error.
pub fn load_config() -> RelabelConfig {
    load_config_from_file().unwrap_or_default()
}

/// Attempt to load config from relabel.json file.
fn load_config_from_file() -> crate::Result<RelabelConfig> {
    let path = paths::relabel_json()?;

    if !path.exists() {
        return Err(crate::Error::other("relabel.json not found"));
    }

    let content = fs::read_to_string(&path).map_err(|e| {
        crate::Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    parse_config(&content, &path.display().to_string())
}

fn parse_config(content: &str, origin: &str) -> crate::Result<RelabelConfig> {
    serde_json::from_str(content).map_err(|e| crate::Error::config_invalid_json(origin, e))
}

/// Check if relabel.json file exists
pub fn config_exists() -> bool {
    paths::relabel_json()
        .map(|p| p.exists())
        .unwrap_or(false)
}

/// Delete relabel.json file (reset to defaults)
pub fn reset_config() -> crate::Result<bool> {
    let path = paths::relabel_json()?;

    if path.exists() {
        fs::remove_file(&path).map_err(|e| {
            crate::Error::internal_io(e.to_string(), Some(format!("delete {}", path.display())))
        })?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Get the path to relabel.json (for display purposes)
pub fn config_path() -> crate::Result<String> {
    Ok(paths::relabel_json()?.display().to_string())
}

/// Get built-in defaults (ignoring any file config)
pub fn builtin_defaults() -> Defaults {
    Defaults::default()
}
