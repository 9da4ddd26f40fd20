//! Chinese numeral utilities.

/// Characters accepted as Chinese numerals in season/episode markers.
pub const NUMERAL_CHARS: &str = "零一二三四五六七八九十壹贰叁肆伍陆柒捌玖拾";

/// Value of a single Chinese numeral character.
fn numeral_value(c: char) -> Option<u32> {
    let value = match c {
        '零' => 0,
        '一' | '壹' => 1,
        '二' | '贰' => 2,
        '三' | '叁' => 3,
        '四' | '肆' => 4,
        '五' | '伍' => 5,
        '六' | '陆' => 6,
        '七' | '柒' => 7,
        '八' | '捌' => 8,
        '九' | '玖' => 9,
        '十' | '拾' => 10,
        _ => return None,
    };
    Some(value)
}

/// Parse a number written in Arabic digits or Chinese numerals.
///
/// Handles `十五` (15), `二十` (20), `二十三` (23), `六十` (60) and plain
/// digit strings. Returns `None` for anything else.
pub fn parse_number(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if text.chars().all(|c| c.is_ascii_digit()) {
        return text.parse().ok();
    }

    let mut total = 0u32;
    let mut pending = 0u32;
    for c in text.chars() {
        match numeral_value(c)? {
            0 => {}
            10 => {
                // A bare 十 means ten; 二十 multiplies the pending digit.
                total += if pending == 0 { 10 } else { pending * 10 };
                pending = 0;
            }
            digit => pending = digit,
        }
    }

    let value = total + pending;
    (value > 0).then_some(value)
}

/// Check if a string contains Chinese characters.
pub fn contains_chinese(s: &str) -> bool {
    s.chars().any(is_chinese_char)
}

/// Check if a character is a Chinese character.
fn is_chinese_char(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}' |  // CJK Unified Ideographs
        '\u{3400}'..='\u{4DBF}' |  // CJK Unified Ideographs Extension A
        '\u{F900}'..='\u{FAFF}' |  // CJK Compatibility Ideographs
        '\u{20000}'..='\u{2A6DF}'  // CJK Unified Ideographs Extension B
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_chinese() {
        assert!(contains_chinese("琅琊榜"));
        assert!(contains_chinese("Nirvana in Fire 琅琊榜"));
        assert!(!contains_chinese("The Office"));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("3"), Some(3));
        assert_eq!(parse_number("12"), Some(12));
        assert_eq!(parse_number("三"), Some(3));
        assert_eq!(parse_number("十"), Some(10));
        assert_eq!(parse_number("十五"), Some(15));
        assert_eq!(parse_number("二十"), Some(20));
        assert_eq!(parse_number("二十三"), Some(23));
        assert_eq!(parse_number("六十"), Some(60));
        assert_eq!(parse_number("叁"), Some(3));
        assert_eq!(parse_number("零"), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
    }
}
