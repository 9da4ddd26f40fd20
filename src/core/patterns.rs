//! Season/episode pattern extraction.
//!
//! Filenames are checked against an ordered list of detectors, most specific
//! first. The first detector that matches decides the result; looser rules are
//! never consulted once a stricter one has matched.

use crate::utils::chinese;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::Path;
use std::sync::LazyLock;

/// Highest season number accepted from a filename or folder name.
pub const MAX_SEASON: u16 = 100;

/// Highest episode number accepted from a filename.
pub const MAX_EPISODE: u16 = 999;

static RE_SEASON_EPISODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)s(\d{1,2})[.\s_-]*ep?[.\s_-]*(\d{1,3})")
        .expect("Failed to create regex pattern for S01E01")
});

static RE_RANGE_SEASON_DASH_SEASON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)s(\d{1,2})[.\s_-]*ep?(\d{1,3})\s*-\s*s(\d{1,2})[.\s_-]*ep?(\d{1,3})")
        .expect("Failed to create regex pattern for S01E01-S01E02")
});

static RE_RANGE_SEASON_DASH_EPISODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)s(\d{1,2})[.\s_-]*ep?(\d{1,3})\s*-\s*ep?(\d{1,3})(?:[^0-9]|$)")
        .expect("Failed to create regex pattern for S01E01-E02")
});

static RE_RANGE_CROSS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9])(\d{1,2})[xX](\d{1,3})\s*-\s*(\d{1,2})[xX](\d{1,3})(?:[^0-9]|$)")
        .expect("Failed to create regex pattern for 01x02-01x03")
});

static RE_RANGE_SEASON_CONCAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)s(\d{1,2})[.\s_-]*ep?(\d{1,3})ep?(\d{1,3})(?:[^0-9]|$)")
        .expect("Failed to create regex pattern for S01E01E02")
});

static RE_RANGE_EPISODE_CONCAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^a-z])ep?(\d{1,3})ep?(\d{1,3})(?:[^0-9]|$)")
        .expect("Failed to create regex pattern for E01E02")
});

static RE_CROSS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9])(\d{1,2})[xX](\d{1,3})(?:[^0-9]|$)")
        .expect("Failed to create regex pattern for 1x01")
});

static RE_SEASON_WORD_EPISODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)season[\s._-]*(\d{1,2}).*?(?:episode|ep|e)[\s._-]*(\d{1,3})")
        .expect("Failed to create regex pattern for Season 1 Episode 1")
});

/// `第十五集`, `第3集` or a bare numeral run such as `六十集`.
static RE_CHINESE_EPISODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?:第\s*([{n}\d]+)|([{n}]+))\s*集",
        n = chinese::NUMERAL_CHARS
    ))
    .expect("Failed to create regex pattern for 第N集")
});

/// `第二季`, `三季` or `01单元`.
static RE_CHINESE_SEASON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?:第\s*([{n}\d]+)|([{n}]+))\s*季|(\d+)\s*单元",
        n = chinese::NUMERAL_CHARS
    ))
    .expect("Failed to create regex pattern for 第N季")
});

/// `全40集` is an episode count, not a season or episode.
static RE_CHINESE_EPISODE_TOTAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"全\s*[{}\d]+\s*集", chinese::NUMERAL_CHARS))
        .expect("Failed to create regex pattern for 全N集")
});

static RE_EPISODE_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^a-z])(?:episode|ep|e)[\s._-]*(\d{1,3})(?:[^0-9]|$)")
        .expect("Failed to create regex pattern for E01")
});

static RE_TOKEN_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\s._\-\[\]()]+").expect("Failed to create regex pattern for token separators")
});

/// Release noise that would otherwise look like episode numbers.
static RE_NOISE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:\d{3,4}[pi]|[248]k|[xh]26[45]|(?:19|20)\d{2}|\d{1,2}bit|(?:ddp?|aac|ac3|eac3|dts|truehd)\d?|\d{3,4}x\d{3,4})$",
    )
    .expect("Failed to create regex pattern for release noise")
});

static RE_CODEC_DOTTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:[hx]\.26[45]|(?:ddp?|aac|ac3|eac3|dts|truehd)?[257]\.[01](?:[^0-9]|$))")
        .expect("Failed to create regex pattern for dotted codec tags")
});

/// Which detector produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternRule {
    /// `S01E01-E02`, `S01E01-S01E02`, `S01E01E02`, `01x02-01x03`, `E01E02`
    EpisodeRange,
    /// `S01E02`, `s1.e2`, `S01EP02`
    SeasonEpisode,
    /// `1x02`
    Cross,
    /// `Season 1 ... Episode 2`
    SeasonWordEpisode,
    /// `第二集`, `六十集`
    ChineseEpisode,
    /// `Episode 2`, `Ep02`, `E02`
    EpisodeOnly,
    /// Bare numbers such as `2 05` or `05`
    BareNumbers,
}

/// Result of running the detectors over a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    Matched {
        season: Option<u16>,
        episode: u16,
        /// Set for multi-episode files; always greater than `episode`.
        last_episode: Option<u16>,
        rule: PatternRule,
    },
    Unmatched,
}

impl Extraction {
    pub fn season(&self) -> Option<u16> {
        match self {
            Extraction::Matched { season, .. } => *season,
            Extraction::Unmatched => None,
        }
    }

    pub fn episode(&self) -> Option<u16> {
        match self {
            Extraction::Matched { episode, .. } => Some(*episode),
            Extraction::Unmatched => None,
        }
    }

    pub fn last_episode(&self) -> Option<u16> {
        match self {
            Extraction::Matched { last_episode, .. } => *last_episode,
            Extraction::Unmatched => None,
        }
    }
}

/// Raw numbers a detector pulled out of a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Hit {
    season: Option<u32>,
    episode: u32,
    last: Option<u32>,
}

impl Hit {
    fn single(season: Option<u32>, episode: u32) -> Self {
        Self {
            season,
            episode,
            last: None,
        }
    }
}

struct Detector {
    rule: PatternRule,
    detect: fn(&str) -> Option<Hit>,
}

/// Detectors in evaluation order.
const DETECTORS: &[Detector] = &[
    Detector {
        rule: PatternRule::EpisodeRange,
        detect: detect_episode_range,
    },
    Detector {
        rule: PatternRule::SeasonEpisode,
        detect: detect_season_episode,
    },
    Detector {
        rule: PatternRule::Cross,
        detect: detect_cross,
    },
    Detector {
        rule: PatternRule::SeasonWordEpisode,
        detect: detect_season_word_episode,
    },
    Detector {
        rule: PatternRule::ChineseEpisode,
        detect: detect_chinese_episode,
    },
    Detector {
        rule: PatternRule::EpisodeOnly,
        detect: detect_episode_only,
    },
    Detector {
        rule: PatternRule::BareNumbers,
        detect: detect_bare_numbers,
    },
];

/// Extract season and episode numbers from a filename.
///
/// The extension is ignored. The first detector that matches decides: if its
/// episode number falls outside `1..=MAX_EPISODE` the file is unmatched and
/// left to positional numbering. An out-of-range season is dropped while the
/// episode is kept.
pub fn extract(filename: &str) -> Extraction {
    let stem = strip_episode_total(file_stem(filename));

    for detector in DETECTORS {
        let Some(hit) = (detector.detect)(&stem) else {
            continue;
        };

        let episode = valid_episode(hit.episode);
        let last_episode = hit.last.map(valid_episode);
        let (Some(episode), None | Some(Some(_))) = (episode, last_episode) else {
            tracing::debug!(
                "{:?} match in '{}' has episode out of range: {:?}",
                detector.rule,
                filename,
                hit
            );
            return Extraction::Unmatched;
        };

        let season = hit.season.and_then(valid_season);
        let last_episode = last_episode.flatten();
        tracing::debug!(
            "Matched {:?} in '{}': season={:?} episode={} last={:?}",
            detector.rule,
            filename,
            season,
            episode,
            last_episode
        );
        return Extraction::Matched {
            season,
            episode,
            last_episode,
            rule: detector.rule,
        };
    }

    Extraction::Unmatched
}

/// Accept a season number only inside `1..=MAX_SEASON`.
pub fn valid_season(value: u32) -> Option<u16> {
    u16::try_from(value)
        .ok()
        .filter(|s| (1..=MAX_SEASON).contains(s))
}

/// Accept an episode number only inside `1..=MAX_EPISODE`.
pub fn valid_episode(value: u32) -> Option<u16> {
    u16::try_from(value)
        .ok()
        .filter(|e| (1..=MAX_EPISODE).contains(e))
}

/// Remove `全N集` episode counts from a name.
pub fn strip_episode_total(text: &str) -> Cow<'_, str> {
    RE_CHINESE_EPISODE_TOTAL.replace_all(text, " ")
}

/// Season number from a Chinese season marker (`第二季`, `三季`, `01单元`).
///
/// Returns `Some(0)` for a marker whose number cannot be read, so callers can
/// tell "marker without a usable number" from "no marker".
pub fn chinese_season(text: &str) -> Option<u32> {
    let caps = RE_CHINESE_SEASON.captures(text)?;
    let numeral = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3))?;
    Some(chinese::parse_number(numeral.as_str()).unwrap_or(0))
}

fn file_stem(filename: &str) -> &str {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
}

fn capture_number(caps: &regex::Captures<'_>, index: usize) -> Option<u32> {
    caps.get(index)?.as_str().parse().ok()
}

fn captured_pair(re: &Regex, text: &str) -> Option<Hit> {
    let caps = re.captures(text)?;
    Some(Hit::single(
        Some(capture_number(&caps, 1)?),
        capture_number(&caps, 2)?,
    ))
}

/// Multi-episode files. A range only counts when both ends share a season
/// and the last episode is greater than the first.
fn detect_episode_range(stem: &str) -> Option<Hit> {
    let two_seasons = |re: &Regex| -> Option<Hit> {
        let caps = re.captures(stem)?;
        let (season, first) = (capture_number(&caps, 1)?, capture_number(&caps, 2)?);
        let (other_season, last) = (capture_number(&caps, 3)?, capture_number(&caps, 4)?);
        (season == other_season && last > first).then_some(Hit {
            season: Some(season),
            episode: first,
            last: Some(last),
        })
    };
    let one_season = |re: &Regex| -> Option<Hit> {
        let caps = re.captures(stem)?;
        let (season, first, last) = (
            capture_number(&caps, 1)?,
            capture_number(&caps, 2)?,
            capture_number(&caps, 3)?,
        );
        (last > first).then_some(Hit {
            season: Some(season),
            episode: first,
            last: Some(last),
        })
    };
    let no_season = |re: &Regex| -> Option<Hit> {
        let caps = re.captures(stem)?;
        let (first, last) = (capture_number(&caps, 1)?, capture_number(&caps, 2)?);
        (last > first).then_some(Hit {
            season: None,
            episode: first,
            last: Some(last),
        })
    };

    two_seasons(&RE_RANGE_SEASON_DASH_SEASON)
        .or_else(|| one_season(&RE_RANGE_SEASON_DASH_EPISODE))
        .or_else(|| two_seasons(&RE_RANGE_CROSS))
        .or_else(|| one_season(&RE_RANGE_SEASON_CONCAT))
        .or_else(|| no_season(&RE_RANGE_EPISODE_CONCAT))
}

fn detect_season_episode(stem: &str) -> Option<Hit> {
    captured_pair(&RE_SEASON_EPISODE, stem)
}

fn detect_cross(stem: &str) -> Option<Hit> {
    captured_pair(&RE_CROSS, stem)
}

fn detect_season_word_episode(stem: &str) -> Option<Hit> {
    captured_pair(&RE_SEASON_WORD_EPISODE, stem)
}

fn detect_chinese_episode(stem: &str) -> Option<Hit> {
    if !chinese::contains_chinese(stem) {
        return None;
    }
    let caps = RE_CHINESE_EPISODE.captures(stem)?;
    let numeral = caps.get(1).or_else(|| caps.get(2))?;
    let episode = chinese::parse_number(numeral.as_str()).unwrap_or(0);
    Some(Hit::single(chinese_season(stem), episode))
}

fn detect_episode_only(stem: &str) -> Option<Hit> {
    let caps = RE_EPISODE_ONLY.captures(stem)?;
    Some(Hit::single(None, capture_number(&caps, 1)?))
}

/// Bare number heuristic.
///
/// Two numbers in adjacent tokens, the first with at most two digits, are read
/// as season and episode. Otherwise the first number is an episode candidate
/// and no season is guessed.
fn detect_bare_numbers(stem: &str) -> Option<Hit> {
    let numbers = number_tokens(stem);

    let first_index = numbers.iter().position(Option::is_some)?;
    let first = numbers[first_index].as_deref()?;

    if first.len() <= 2 {
        if let Some(Some(second)) = numbers.get(first_index + 1) {
            return Some(Hit::single(Some(first.parse().ok()?), second.parse().ok()?));
        }
    }

    Some(Hit::single(None, first.parse().ok()?))
}

/// Split a stem into tokens with release noise removed.
///
/// Each element is `Some(digits)` for a 1-3 digit number and `None` for any
/// other token, so adjacency in the returned list means adjacency in the name.
fn number_tokens(stem: &str) -> Vec<Option<String>> {
    let cleaned = RE_CODEC_DOTTED.replace_all(stem, " ");

    RE_TOKEN_SEPARATOR
        .split(&cleaned)
        .filter(|token| !token.is_empty() && !RE_NOISE_TOKEN.is_match(token))
        .flat_map(split_digit_runs)
        .map(|token| {
            let is_number =
                (1..=3).contains(&token.len()) && token.chars().all(|c| c.is_ascii_digit());
            is_number.then(|| token.to_string())
        })
        .collect()
}

/// Split a token where it switches between digits and non-digits.
fn split_digit_runs(token: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut previous_digit = None;

    for (index, c) in token.char_indices() {
        let is_digit = c.is_ascii_digit();
        if previous_digit.is_some_and(|prev| prev != is_digit) {
            parts.push(&token[start..index]);
            start = index;
        }
        previous_digit = Some(is_digit);
    }
    parts.push(&token[start..]);
    parts
}
