//! Show folder scanner.
//!
//! Classifies each show folder as direct files or season subfolders by
//! looking at its immediate children, and groups its media files into
//! seasons. Nothing below the season level is visited.

use crate::core::normalizer::normalize_show_name;
use crate::core::patterns::{self, MAX_SEASON};
use crate::models::media::{FolderStructure, MediaFile, SeasonGroup, ShowFolder};
use crate::models::plan::PlanIssue;
use crate::utils::{chinese, fs as fs_utils};
use crate::Result;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

static RE_SEASON_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^a-z])season[\s._-]*(\d+)")
        .expect("Failed to create regex pattern for Season N folders")
});

static RE_SEASON_SHORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^a-z0-9])s(\d{1,2})(?:[^0-9]|$)")
        .expect("Failed to create regex pattern for SNN folders")
});

static RE_SEASON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{1,2})\s*$").expect("Failed to create regex pattern for numeric folders"));

static RE_FIRST_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("Failed to create regex pattern for integers"));

/// Scanner configuration.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Ignore sample files and extras directories.
    pub skip_samples: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self { skip_samples: true }
    }
}

/// Outcome of scanning one show folder.
#[derive(Debug, Clone)]
pub enum ScanOutcome {
    /// The folder holds media in a recognized layout.
    Found(ShowScan),
    /// Nothing to plan. `skipped` lists what was looked at and set aside
    /// (unrecognized subfolders, samples, extras).
    NoMedia { skipped: Vec<PlanIssue> },
}

impl ScanOutcome {
    /// The scanned show, if any media was found.
    pub fn found(self) -> Option<ShowScan> {
        match self {
            ScanOutcome::Found(scan) => Some(scan),
            ScanOutcome::NoMedia { .. } => None,
        }
    }
}

/// Result of scanning one show folder.
#[derive(Debug, Clone)]
pub struct ShowScan {
    /// The detected show.
    pub show: ShowFolder,
    /// Season groups in processing order (subfolder seasons first, then loose files).
    pub groups: Vec<SeasonGroup>,
    /// Files and folders that were looked at but not planned.
    pub skipped: Vec<PlanIssue>,
}

/// Immediate children of a show folder.
#[derive(Debug, Default)]
struct FolderContents {
    /// Recognized media files directly in the folder, sorted by name.
    media_files: Vec<PathBuf>,
    /// Subdirectories, sorted by name.
    subdirs: Vec<PathBuf>,
    /// Sample files that were ignored.
    samples: Vec<PathBuf>,
}

/// Season folder recognized by name.
#[derive(Debug)]
struct SeasonFolder {
    path: PathBuf,
    number: Option<u16>,
    media_files: Vec<PathBuf>,
}

/// Check if a directory name looks like a season folder.
///
/// Returns `Some(number)` for season folders, where `number` is `None` when
/// the name is a season folder without a usable season number (for example
/// `Season 0`).
pub fn parse_season_folder(name: &str) -> Option<Option<u16>> {
    let name = patterns::strip_episode_total(name);

    let captured = if let Some(caps) = RE_SEASON_WORD.captures(&name) {
        captured_number(&caps)
    } else if let Some(caps) = RE_SEASON_SHORT.captures(&name) {
        captured_number(&caps)
    } else if let Some(caps) = RE_SEASON_NUMERIC.captures(&name) {
        captured_number(&caps)
    } else if let Some(number) = patterns::chinese_season(&name) {
        Some(number)
    } else {
        return None;
    };

    let number = captured
        .and_then(patterns::valid_season)
        .or_else(|| first_valid_integer(&name));

    Some(number)
}

fn captured_number(caps: &regex::Captures<'_>) -> Option<u32> {
    caps.get(1).and_then(|m| chinese::parse_number(m.as_str()))
}

/// First integer in a name that is a valid season number.
fn first_valid_integer(name: &str) -> Option<u16> {
    RE_FIRST_INTEGER
        .find_iter(name)
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .find_map(patterns::valid_season)
}

/// List the immediate children of a directory.
fn read_contents(path: &Path, config: &ScannerConfig) -> Result<FolderContents> {
    let mut contents = FolderContents::default();

    for entry in WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by(|a, b| {
            a.file_name()
                .to_string_lossy()
                .to_lowercase()
                .cmp(&b.file_name().to_string_lossy().to_lowercase())
        })
    {
        let entry = entry.map_err(|e| crate::Error::other(format!("{}: {}", path.display(), e)))?;
        let entry_path = entry.path();

        if entry.file_type().is_dir() {
            contents.subdirs.push(entry_path.to_path_buf());
        } else if entry.file_type().is_file() && fs_utils::is_video_file(entry_path) {
            let filename = entry.file_name().to_string_lossy();
            if config.skip_samples && fs_utils::is_sample_filename(&filename) {
                tracing::debug!("Sample file ignored: {}", entry_path.display());
                contents.samples.push(entry_path.to_path_buf());
                continue;
            }
            contents.media_files.push(entry_path.to_path_buf());
        }
    }

    Ok(contents)
}

/// Detect the layout of a show folder.
///
/// Returns `None` when the folder holds no recognized media in either layout.
pub fn detect_structure(path: &Path) -> Result<Option<FolderStructure>> {
    Ok(scan_show(path, &ScannerConfig::default())?
        .found()
        .map(|scan| scan.show.structure))
}

/// Scan a show folder into season groups.
///
/// A folder without usable media is [`ScanOutcome::NoMedia`] (a skip, not an
/// error).
pub fn scan_show(path: &Path, config: &ScannerConfig) -> Result<ScanOutcome> {
    let contents = read_contents(path, config)?;
    let mut skipped: Vec<PlanIssue> = contents
        .samples
        .iter()
        .map(|p| PlanIssue::new(p, "sample file"))
        .collect();

    // Season subfolders with at least one media file
    let mut season_folders = Vec::new();
    for subdir in &contents.subdirs {
        let name = dir_name(subdir);
        if config.skip_samples && fs_utils::is_extras_dir_name(&name) {
            tracing::debug!("Extras folder ignored: {}", subdir.display());
            skipped.push(PlanIssue::new(subdir, "extras folder"));
            continue;
        }

        let sub_contents = read_contents(subdir, config)?;
        skipped.extend(
            sub_contents
                .samples
                .iter()
                .map(|p| PlanIssue::new(p, "sample file")),
        );

        match parse_season_folder(&name) {
            Some(number) if !sub_contents.media_files.is_empty() => {
                season_folders.push(SeasonFolder {
                    path: subdir.clone(),
                    number,
                    media_files: sub_contents.media_files,
                });
            }
            Some(_) => {
                tracing::debug!("Season folder without media: {}", subdir.display());
            }
            None if !sub_contents.media_files.is_empty() => {
                tracing::debug!("Not a season folder: {}", subdir.display());
                skipped.push(PlanIssue::new(subdir, "not a recognized season folder"));
            }
            None => {}
        }
    }

    let structure = if !season_folders.is_empty() {
        FolderStructure::SeasonSubfolders
    } else if !contents.media_files.is_empty() {
        FolderStructure::DirectFiles
    } else {
        tracing::debug!("No media found in {}", path.display());
        return Ok(ScanOutcome::NoMedia { skipped });
    };

    let mut groups = season_groups_from_folders(season_folders);
    if !contents.media_files.is_empty() {
        if structure == FolderStructure::SeasonSubfolders {
            tracing::debug!(
                "{} loose files next to season folders in {}",
                contents.media_files.len(),
                path.display()
            );
        }
        groups.extend(season_groups_from_files(&contents.media_files));
    }

    let raw_name = dir_name(path);
    let show = ShowFolder {
        normalized_name: normalize_show_name(&raw_name),
        raw_name,
        path: path.to_path_buf(),
        structure,
    };

    Ok(ScanOutcome::Found(ShowScan {
        show,
        groups,
        skipped,
    }))
}

/// Build one season group per season folder.
///
/// Folders without a usable number take their 1-based position among the
/// sorted season folders.
fn season_groups_from_folders(folders: Vec<SeasonFolder>) -> Vec<SeasonGroup> {
    folders
        .into_iter()
        .enumerate()
        .map(|(index, folder)| {
            let season_number = folder.number.unwrap_or_else(|| {
                let position = u16::try_from(index + 1).unwrap_or(MAX_SEASON);
                tracing::debug!(
                    "Using positional season {} for {}",
                    position,
                    folder.path.display()
                );
                position
            });
            SeasonGroup {
                season_number,
                files: folder.media_files.iter().map(|p| media_file(p)).collect(),
                source_folder: Some(folder.path),
            }
        })
        .collect()
}

/// Split loose files into season groups by the season found in their names.
///
/// Files without a season marker join the pool's default season: the most
/// common season found among the files, or 1 when none carries one.
fn season_groups_from_files(paths: &[PathBuf]) -> Vec<SeasonGroup> {
    let files: Vec<MediaFile> = paths.iter().map(|p| media_file(p)).collect();

    let mut counts: HashMap<u16, usize> = HashMap::new();
    for season in files.iter().filter_map(|f| f.extracted_season) {
        *counts.entry(season).or_default() += 1;
    }
    let default_season = counts
        .iter()
        .max_by(|(sa, ca), (sb, cb)| ca.cmp(cb).then(sb.cmp(sa)))
        .map(|(season, _)| *season)
        .unwrap_or(1);

    let mut by_season: BTreeMap<u16, Vec<MediaFile>> = BTreeMap::new();
    for file in files {
        let season = file.extracted_season.unwrap_or(default_season);
        by_season.entry(season).or_default().push(file);
    }

    by_season
        .into_iter()
        .map(|(season_number, files)| SeasonGroup {
            season_number,
            source_folder: None,
            files,
        })
        .collect()
}

/// Build a media file with the season/episode found in its name.
fn media_file(path: &Path) -> MediaFile {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let extraction = patterns::extract(&filename);

    MediaFile {
        original_path: path.to_path_buf(),
        extension: fs_utils::get_extension(path).unwrap_or_default(),
        extracted_season: extraction.season(),
        extracted_episode: extraction.episode(),
        extracted_last_episode: extraction.last_episode(),
        filename,
    }
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
