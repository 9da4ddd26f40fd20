//! Folder name generator.

use super::filename::sanitize_filename;

/// Generate the show folder name.
pub fn generate_show_folder(show_name: &str) -> String {
    sanitize_filename(show_name)
}

/// Generate season folder name.
///
/// Format: `Season ${seasonNr2}`
pub fn generate_season_folder(season_number: u16) -> String {
    format!("Season {:02}", season_number)
}
