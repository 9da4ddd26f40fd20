//! Show name normalization.
//!
//! Turns raw folder names such as `Breaking.Bad.S01.1080p.BluRay.x264-GROUP`
//! into display names such as `Breaking Bad`. Pure and deterministic; running
//! it on its own output returns the same string.

use regex::Regex;
use std::sync::LazyLock;

static RE_BRACKETED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[[^\]]*\]|\{[^}]*\}|【[^】]*】").expect("Failed to create regex pattern for group tags")
});

static RE_DISALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\w\s\-.()'&,!]").expect("Failed to create regex pattern for disallowed characters")
});

static RE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Failed to create regex pattern for whitespace"));

/// Words that only occur in release tags. The first one ends the name.
static RE_RELEASE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)^(?:
            \d{3,4}[pi] | [248]k | hdr\d*
          | [xh]\.?26[45] | hevc | xvid | divx | \d{1,2}bit
          | blu-?ray | bdrip | brrip | bdremux | remux | web-?dl | webrip | hdtv | dvdrip | hdrip
          | aac\d?(?:\.\d)? | ac3 | eac3 | dts(?:-hd)? | truehd | ddp?\d?(?:\.\d)?
          | s\d{1,2}(?:-?s?\d{1,2})? | s\d{1,2}e\d{1,3}
        )$",
    )
    .expect("Failed to create regex pattern for release tags")
});

/// Tag words that are also ordinary English ("Dark Web", "The Complete Works").
/// Dropped only when they lead into a release tag.
static RE_WEAK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:uhd|sdr|avc|web|dvd|atmos|flac|complete|proper|repack|internal)$")
        .expect("Failed to create regex pattern for weak release tags")
});

/// Small words kept lowercase unless they start the name.
const MINOR_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "for", "in", "of", "on", "or", "the", "to", "vs",
];

/// Normalize a raw folder or file name into a display-quality show name.
///
/// Falls back to the trimmed raw name when cleaning would leave nothing.
pub fn normalize_show_name(raw: &str) -> String {
    let without_tags = RE_BRACKETED.replace_all(raw, " ");

    // Dots separate words only in names that have no spaces ("Mr. Robot" keeps its dot).
    let spaced = if without_tags.trim().contains(' ') {
        without_tags.replace('_', " ")
    } else {
        without_tags.replace(['_', '.'], " ")
    };

    let mut words: Vec<&str> = spaced.split_whitespace().collect();
    words.truncate(title_length(&words));

    let joined = words.join(" ");
    let cleaned = RE_DISALLOWED.replace_all(&joined, "");
    let collapsed = RE_WHITESPACE.replace_all(&cleaned, " ");
    let trimmed = collapsed
        .trim()
        .trim_end_matches(|c: char| c == '-' || c == '.' || c == ',' || c.is_whitespace());

    if trimmed.is_empty() {
        return RE_WHITESPACE.replace_all(raw.trim(), " ").into_owned();
    }

    title_case(trimmed)
}

/// Number of leading words that belong to the title.
///
/// The title ends at the first release tag, together with any weak tag words
/// right before it. The first word always stays.
fn title_length(words: &[&str]) -> usize {
    let Some(tag) = (1..words.len()).find(|&i| RE_RELEASE_TAG.is_match(bare(words[i]))) else {
        return words.len();
    };

    let mut end = tag;
    while end > 1 && RE_WEAK_TAG.is_match(bare(words[end - 1])) {
        end -= 1;
    }
    end
}

fn bare(word: &str) -> &str {
    word.trim_matches(|c: char| c == '(' || c == ')' || c == '-')
}

/// Capitalize words that are entirely lowercase; leave every other word alone.
fn title_case(name: &str) -> String {
    name.split(' ')
        .enumerate()
        .map(|(index, word)| {
            let has_upper = word.chars().any(char::is_uppercase);
            let has_lower = word.chars().any(char::is_lowercase);
            if has_upper || !has_lower {
                return word.to_string();
            }
            if index > 0 && MINOR_WORDS.contains(&word) {
                return word.to_string();
            }
            capitalize(word)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_name() {
        assert_eq!(
            normalize_show_name("Breaking.Bad.S01.1080p.BluRay.x264-GROUP"),
            "Breaking Bad"
        );
        assert_eq!(normalize_show_name("the_wire_complete_720p"), "The Wire");
    }

    #[test]
    fn test_group_tags_removed() {
        assert_eq!(normalize_show_name("[SubGroup] Fullmetal Alchemist"), "Fullmetal Alchemist");
        assert_eq!(normalize_show_name("Dark {WEB} [x265]"), "Dark");
    }

    #[test]
    fn test_separators_collapse() {
        assert_eq!(normalize_show_name("  The   Office  "), "The Office");
        assert_eq!(normalize_show_name("Game_of_Thrones"), "Game of Thrones");
    }

    #[test]
    fn test_keeps_existing_casing() {
        assert_eq!(normalize_show_name("NCIS"), "NCIS");
        assert_eq!(normalize_show_name("iCarly"), "iCarly");
        assert_eq!(normalize_show_name("The IT Crowd"), "The IT Crowd");
        assert_eq!(normalize_show_name("the office"), "The Office");
    }

    #[test]
    fn test_dots_kept_when_spaced() {
        assert_eq!(normalize_show_name("Mr. Robot"), "Mr. Robot");
    }

    #[test]
    fn test_year_and_parentheses_kept() {
        assert_eq!(normalize_show_name("The Office (US)"), "The Office (US)");
        assert_eq!(normalize_show_name("Doctor.Who.2005.720p.HDTV"), "Doctor Who 2005");
    }

    #[test]
    fn test_chinese_name() {
        assert_eq!(normalize_show_name("琅琊榜"), "琅琊榜");
        assert_eq!(normalize_show_name("琅琊榜.1080p"), "琅琊榜");
    }

    #[test]
    fn test_idempotent() {
        for raw in [
            "Breaking.Bad.S01.1080p.BluRay.x264-GROUP",
            "the office",
            "Mr. Robot",
            "Game_of_Thrones",
            "NCIS",
            "Dark Web",
        ] {
            let once = normalize_show_name(raw);
            assert_eq!(normalize_show_name(&once), once, "not idempotent for {raw}");
        }
    }

    #[test]
    fn test_ordinary_words_are_not_tags() {
        assert_eq!(normalize_show_name("Dark Web"), "Dark Web");
        assert_eq!(normalize_show_name("The Complete Works"), "The Complete Works");
        assert_eq!(normalize_show_name("Proper Manners"), "Proper Manners");
    }

    #[test]
    fn test_weak_tags_before_release_tag_are_dropped() {
        assert_eq!(normalize_show_name("Dark.WEB.x265"), "Dark");
        assert_eq!(normalize_show_name("Chernobyl.Complete.UHD.2160p"), "Chernobyl");
        assert_eq!(normalize_show_name("Fargo Complete S01 1080p"), "Fargo");
    }

    #[test]
    fn test_leading_tag_word_is_kept() {
        // A name that is only a tag-like word is still a name.
        assert_eq!(normalize_show_name("Web"), "Web");
    }

    #[test]
    fn test_empty_fallback() {
        assert_eq!(normalize_show_name("[group]"), "[group]");
    }
}
