//! Episode number resolution.
//!
//! Gives every file in a season group a distinct episode number. Explicit
//! numbers from the filename are kept; files without one (or whose number is
//! already taken) are numbered by sorted filename, skipping claimed numbers.
//! A multi-episode file claims every number of its range.

use crate::models::media::{
    MediaFile, ResolutionMethod, ResolvedEpisode, ResolvedSeason, SeasonGroup,
};
use crate::models::plan::PlanIssue;
use std::collections::BTreeSet;

/// A resolved season plus the warnings raised while resolving it.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub season: ResolvedSeason,
    pub warnings: Vec<PlanIssue>,
}

/// Resolve final episode numbers for one season group.
///
/// The group's season number is authoritative: a file whose name carries a
/// different season keeps its episode number and a warning is recorded.
pub fn resolve_group(group: SeasonGroup) -> Resolution {
    let SeasonGroup {
        season_number,
        source_folder,
        mut files,
    } = group;

    files.sort_by_key(MediaFile::sort_key);

    let mut warnings = Vec::new();
    let mut claimed: BTreeSet<u16> = BTreeSet::new();
    let mut episodes = Vec::with_capacity(files.len());
    let mut fallback = Vec::new();

    for file in files {
        if let Some(season) = file.extracted_season {
            if season != season_number {
                tracing::debug!(
                    "Season mismatch for '{}': filename says {}, folder says {}",
                    file.filename,
                    season,
                    season_number
                );
                warnings.push(PlanIssue::new(
                    &file.original_path,
                    format!(
                        "filename season {} differs from season {}; using season {}",
                        season, season_number, season_number
                    ),
                ));
            }
        }

        match file.extracted_episode {
            Some(episode) => {
                let last = file
                    .extracted_last_episode
                    .filter(|&last| last > episode)
                    .unwrap_or(episode);

                if (episode..=last).all(|n| !claimed.contains(&n)) {
                    claimed.extend(episode..=last);
                    episodes.push(ResolvedEpisode {
                        file,
                        episode_number: episode,
                        last_episode: (last > episode).then_some(last),
                        method: ResolutionMethod::ExplicitPattern,
                    });
                    continue;
                }

                tracing::debug!(
                    "Duplicate episode {} in season {}: '{}' will be renumbered",
                    episode,
                    season_number,
                    file.filename
                );
                warnings.push(PlanIssue::new(
                    &file.original_path,
                    format!(
                        "episode {} already claimed in season {}; renumbered",
                        describe_range(episode, last),
                        season_number
                    ),
                ));
                fallback.push(file);
            }
            None => fallback.push(file),
        }
    }

    // `fallback` keeps filename order from the sort above.
    let mut next = 1u16;
    for file in fallback {
        while claimed.contains(&next) {
            next += 1;
        }
        claimed.insert(next);
        tracing::debug!(
            "Positional episode {} for '{}' in season {}",
            next,
            file.filename,
            season_number
        );
        episodes.push(ResolvedEpisode {
            file,
            episode_number: next,
            last_episode: None,
            method: ResolutionMethod::PositionalFallback,
        });
    }

    episodes.sort_by_key(|e| e.episode_number);

    Resolution {
        season: ResolvedSeason {
            season_number,
            source_folder,
            episodes,
        },
        warnings,
    }
}

fn describe_range(first: u16, last: u16) -> String {
    if last > first {
        format!("{}-{}", first, last)
    } else {
        first.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::PathBuf;

    fn file(name: &str, season: Option<u16>, episode: Option<u16>) -> MediaFile {
        MediaFile {
            original_path: PathBuf::from("/tv/Show").join(name),
            filename: name.to_string(),
            extension: "mkv".to_string(),
            extracted_season: season,
            extracted_episode: episode,
            extracted_last_episode: None,
        }
    }

    fn range_file(name: &str, first: u16, last: u16) -> MediaFile {
        MediaFile {
            extracted_last_episode: Some(last),
            ..file(name, Some(1), Some(first))
        }
    }

    fn group(season: u16, files: Vec<MediaFile>) -> SeasonGroup {
        SeasonGroup {
            season_number: season,
            source_folder: None,
            files,
        }
    }

    fn numbers(resolution: &Resolution) -> Vec<(String, u16, ResolutionMethod)> {
        resolution
            .season
            .episodes
            .iter()
            .map(|e| (e.file.filename.clone(), e.episode_number, e.method))
            .collect()
    }

    #[test]
    fn test_explicit_numbers_kept() {
        let resolution = resolve_group(group(
            1,
            vec![file("b.mkv", Some(1), Some(2)), file("a.mkv", Some(1), Some(1))],
        ));

        assert_eq!(
            numbers(&resolution),
            vec![
                ("a.mkv".to_string(), 1, ResolutionMethod::ExplicitPattern),
                ("b.mkv".to_string(), 2, ResolutionMethod::ExplicitPattern),
            ]
        );
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn test_positional_fallback_by_sorted_name() {
        let resolution = resolve_group(group(
            1,
            vec![file("Pilot.mkv", None, None), file("another.mkv", None, None)],
        ));

        assert_eq!(
            numbers(&resolution),
            vec![
                ("another.mkv".to_string(), 1, ResolutionMethod::PositionalFallback),
                ("Pilot.mkv".to_string(), 2, ResolutionMethod::PositionalFallback),
            ]
        );
    }

    #[test]
    fn test_fallback_skips_claimed_numbers() {
        let resolution = resolve_group(group(
            1,
            vec![
                file("a.mkv", None, None),
                file("b.mkv", None, Some(1)),
                file("c.mkv", None, None),
                file("d.mkv", None, Some(3)),
            ],
        ));

        assert_eq!(
            numbers(&resolution),
            vec![
                ("b.mkv".to_string(), 1, ResolutionMethod::ExplicitPattern),
                ("a.mkv".to_string(), 2, ResolutionMethod::PositionalFallback),
                ("d.mkv".to_string(), 3, ResolutionMethod::ExplicitPattern),
                ("c.mkv".to_string(), 4, ResolutionMethod::PositionalFallback),
            ]
        );
    }

    #[test]
    fn test_duplicate_explicit_episode_renumbered() {
        let resolution = resolve_group(group(
            1,
            vec![file("Show E01 v2.mkv", None, Some(1)), file("Show E01.mkv", None, Some(1))],
        ));

        assert_eq!(
            numbers(&resolution),
            vec![
                ("Show E01 v2.mkv".to_string(), 1, ResolutionMethod::ExplicitPattern),
                ("Show E01.mkv".to_string(), 2, ResolutionMethod::PositionalFallback),
            ]
        );
        assert_eq!(resolution.warnings.len(), 1);
        assert_eq!(resolution.warnings[0].path, PathBuf::from("/tv/Show/Show E01.mkv"));
    }

    #[test]
    fn test_season_mismatch_warns_and_keeps_group_season() {
        let mut g = group(2, vec![file("Show.S03E04.mkv", Some(3), Some(4))]);
        g.source_folder = Some(PathBuf::from("/tv/Show/Season 2"));
        let resolution = resolve_group(g);

        assert_eq!(resolution.season.season_number, 2);
        assert_eq!(resolution.season.episodes[0].episode_number, 4);
        assert_eq!(resolution.warnings.len(), 1);
        assert!(resolution.warnings[0].reason.contains("season 3"));
    }

    #[test]
    fn test_episodes_unique_and_positive() {
        let files = vec![
            file("x.mkv", None, Some(2)),
            file("y.mkv", None, Some(2)),
            file("z.mkv", None, Some(2)),
            file("w.mkv", None, None),
            file("v.mkv", None, Some(1)),
        ];
        let resolution = resolve_group(group(1, files));

        let episodes: Vec<u16> = resolution
            .season
            .episodes
            .iter()
            .map(|e| e.episode_number)
            .collect();
        let unique: HashSet<u16> = episodes.iter().copied().collect();
        assert_eq!(unique.len(), episodes.len());
        assert!(episodes.iter().all(|&e| e >= 1));
        assert_eq!(resolution.warnings.len(), 2);
    }

    #[test]
    fn test_range_claims_every_episode() {
        let resolution = resolve_group(group(
            1,
            vec![
                range_file("Show.S01E01-E02.mkv", 1, 2),
                file("Show.S01E03.mkv", Some(1), Some(3)),
                file("Unnumbered.mkv", None, None),
            ],
        ));

        let episodes: Vec<(u16, Option<u16>)> = resolution
            .season
            .episodes
            .iter()
            .map(|e| (e.episode_number, e.last_episode))
            .collect();
        assert_eq!(episodes, vec![(1, Some(2)), (3, None), (4, None)]);
        assert_eq!(
            resolution.season.episodes[0].episodes().collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn test_overlapping_range_is_renumbered() {
        let resolution = resolve_group(group(
            1,
            vec![
                file("Show.S01E02.mkv", Some(1), Some(2)),
                range_file("Show.S01E01-E02.mkv", 1, 2),
            ],
        ));

        // Sorted by name the range comes first and takes 1 and 2.
        assert_eq!(resolution.season.episodes[0].episode_number, 1);
        assert_eq!(resolution.season.episodes[0].last_episode, Some(2));
        assert_eq!(resolution.season.episodes[1].episode_number, 3);
        assert_eq!(
            resolution.season.episodes[1].method,
            ResolutionMethod::PositionalFallback
        );
        assert_eq!(resolution.warnings.len(), 1);
        assert!(resolution.warnings[0].reason.contains("episode 2 already claimed"));
    }

    #[test]
    fn test_range_blocked_by_earlier_episode() {
        let resolution = resolve_group(group(
            1,
            vec![
                file("A.S01E02.mkv", Some(1), Some(2)),
                range_file("B.S01E01-E03.mkv", 1, 3),
            ],
        ));

        assert_eq!(
            numbers(&resolution),
            vec![
                ("B.S01E01-E03.mkv".to_string(), 1, ResolutionMethod::PositionalFallback),
                ("A.S01E02.mkv".to_string(), 2, ResolutionMethod::ExplicitPattern),
            ]
        );
        assert_eq!(resolution.season.episodes[0].last_episode, None);
        assert!(resolution.warnings[0].reason.contains("episode 1-3"));
    }
}
