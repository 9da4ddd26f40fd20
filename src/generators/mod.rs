//! Output path generators.

pub mod filename;
pub mod folder;

use std::path::{Path, PathBuf};

/// Build the canonical destination of an episode under `output_root`.
///
/// `<root>/<show>/Season NN/<show> - SNNENN - Episode NN.<ext>`
pub fn episode_destination(
    output_root: &Path,
    show_name: &str,
    season_number: u16,
    episode_number: u16,
    last_episode: Option<u16>,
    extension: &str,
) -> PathBuf {
    output_root
        .join(folder::generate_show_folder(show_name))
        .join(folder::generate_season_folder(season_number))
        .join(filename::generate_episode_filename(
            show_name,
            season_number,
            episode_number,
            last_episode,
            extension,
        ))
}
