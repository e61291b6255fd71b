pub mod check;
pub mod completions;
pub mod index;
pub mod man_pages;

use console::Style;
use groove_core::StoreConfig;
use std::path::Path;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_CONFIG_ERROR: u8 = 2;
pub const EXIT_IO_ERROR: u8 = 3;

pub fn json_pretty(value: &impl serde::Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}

pub fn load_config(repo: &Path, explicit: Option<&Path>) -> Result<StoreConfig, String> {
    StoreConfig::resolve(repo, explicit).map_err(|e| format!("config error: {e}"))
}

/// Colour `text` for the given status; unknown statuses are left plain.
pub fn colorize_status(status: &str, text: &str) -> String {
    match status {
        "valid" | "passed" => Style::new().green().apply_to(text).to_string(),
        "invalid" | "failed" => Style::new().red().apply_to(text).to_string(),
        "heading" => Style::new().blue().apply_to(text).to_string(),
        _ => text.to_owned(),
    }
}
