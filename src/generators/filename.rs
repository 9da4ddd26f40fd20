//! Filename generator.

/// Generate an episode filename.
///
/// Format: `${show} - S${seasonNr2}E${episodeNr2} - Episode ${episodeNr2}.${ext}`.
/// A multi-episode file spans its range: `S01E01-E02 - Episode 01-02`.
pub fn generate_episode_filename(
    show_name: &str,
    season_number: u16,
    episode_number: u16,
    last_episode: Option<u16>,
    extension: &str,
) -> String {
    let (code, label) = match last_episode.filter(|&last| last > episode_number) {
        Some(last) => (
            format!("S{:02}E{:02}-E{:02}", season_number, episode_number, last),
            format!("{:02}-{:02}", episode_number, last),
        ),
        None => (
            format!("S{:02}E{:02}", season_number, episode_number),
            format!("{:02}", episode_number),
        ),
    };

    format!(
        "{} - {} - Episode {}.{}",
        sanitize_filename(show_name),
        code,
        label,
        extension.to_lowercase()
    )
}

/// Sanitize a string for use in filenames.
pub fn sanitize_filename(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .collect::<String>()
        .trim()
        .to_string()
}
