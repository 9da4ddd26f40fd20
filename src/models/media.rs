//! Show, season and episode data models.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How a show folder lays out its media files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderStructure {
    /// Media files sit directly in the show folder.
    DirectFiles,
    /// Media files sit in per-season subdirectories.
    SeasonSubfolders,
}

impl std::fmt::Display for FolderStructure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FolderStructure::DirectFiles => write!(f, "direct files"),
            FolderStructure::SeasonSubfolders => write!(f, "season subfolders"),
        }
    }
}

/// A top-level show directory under the input root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowFolder {
    /// Directory name as found on disk.
    pub raw_name: String,
    /// Cleaned display name used for output paths.
    pub normalized_name: String,
    /// Full path to the show directory.
    pub path: PathBuf,
    /// Detected layout.
    pub structure: FolderStructure,
}

/// How an episode number was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMethod {
    /// Taken from a pattern match on the filename.
    ExplicitPattern,
    /// Assigned from sorted filename order.
    PositionalFallback,
}

/// A recognized media file found while scanning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaFile {
    /// Full path to the file.
    pub original_path: PathBuf,
    /// File name without path.
    pub filename: String,
    /// Extension in lowercase, without the dot.
    pub extension: String,
    /// Season number found in the filename.
    pub extracted_season: Option<u16>,
    /// Episode number found in the filename.
    pub extracted_episode: Option<u16>,
    /// Last episode of a multi-episode file (`S01E01-E02`).
    #[serde(default)]
    pub extracted_last_episode: Option<u16>,
}

impl MediaFile {
    /// Key used to order files deterministically inside a season.
    pub fn sort_key(&self) -> (String, String) {
        (self.filename.to_lowercase(), self.filename.clone())
    }
}

/// Files that belong to one season of a show.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonGroup {
    /// Season number, always >= 1.
    pub season_number: u16,
    /// Season subdirectory the files came from (absent for direct files).
    pub source_folder: Option<PathBuf>,
    /// Files in this season.
    pub files: Vec<MediaFile>,
}

/// A media file with its final episode number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedEpisode {
    /// The scanned file.
    pub file: MediaFile,
    /// Final episode number, always >= 1 and unique within the season.
    pub episode_number: u16,
    /// Last episode covered by a multi-episode file. Every number in
    /// `episode_number..=last_episode` belongs to this file.
    pub last_episode: Option<u16>,
    /// How the episode number was decided.
    pub method: ResolutionMethod,
}

impl ResolvedEpisode {
    /// Episode numbers this file occupies.
    pub fn episodes(&self) -> std::ops::RangeInclusive<u16> {
        self.episode_number..=self.last_episode.unwrap_or(self.episode_number)
    }
}

/// A season whose files all have distinct episode numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedSeason {
    pub season_number: u16,
    pub source_folder: Option<PathBuf>,
    /// Episodes ordered by episode number.
    pub episodes: Vec<ResolvedEpisode>,
}
