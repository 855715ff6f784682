//! Free-text duration and count parsing.
use regex::Regex;
use std::sync::LazyLock;

const HALF_GLYPH: char = '½';

// `h` must not start a word such as "hours"; digits may follow ("12h30m").
static HOURS_SHORTHAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d*\.\d+|\d+)\s*h(?:[^a-z]|$)").expect("static regex"));
static MINUTES_SHORTHAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*(?:minutes?|mins?|m)\b").expect("static regex")
});
static HOURS_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d*\.\d+|\d+)\s*hours?\b").expect("static regex"));
static COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d[\d,]*(?:\.\d+)?)\s*([km])?\b").expect("static regex"));

/// Collapse whitespace, spell out the half glyph, lowercase.
fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(HALF_GLYPH, ".5")
        .to_lowercase()
}

fn first_number(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Parse a duration such as `"32h 15m"`, `"12½ Hours"` or `"8 Hour"` into
/// whole minutes.
///
/// Returns `None` when nothing parses or the total rounds to zero; zero is
/// never a meaningful completion time.
///
/// ```
/// use hltb_times::parse_duration;
///
/// assert_eq!(parse_duration("12h 30m"), Some(750));
/// assert_eq!(parse_duration("32½ Hours"), Some(1950));
/// assert_eq!(parse_duration("0 Hours"), None);
/// ```
pub fn parse_duration(text: &str) -> Option<u32> {
    let text = normalize_text(text);
    if !text.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let hours = first_number(&HOURS_SHORTHAND, &text).or_else(|| first_number(&HOURS_WORD, &text));
    let minutes = first_number(&MINUTES_SHORTHAND, &text);
    if hours.is_none() && minutes.is_none() {
        return None;
    }
    let total = hours.unwrap_or(0.0) * 60.0 + minutes.unwrap_or(0.0);

    let rounded = total.round();
    if rounded < 1.0 || rounded > f64::from(u32::MAX) {
        return None;
    }
    Some(rounded as u32)
}

/// Parse a submission count such as `"1,234"`, `"Polled: 87"` or `"1.2K"`.
///
/// Zero is a valid count; text without digits yields `None`.
pub fn parse_count(text: &str) -> Option<u32> {
    let text = normalize_text(text);
    let caps = COUNT.captures(&text)?;
    let digits = caps.get(1)?.as_str().replace(',', "");
    let value = digits.parse::<f64>().ok()?;
    let scale = match caps.get(2).map(|m| m.as_str()) {
        Some("k") => 1_000.0,
        Some("m") => 1_000_000.0,
        _ => 1.0,
    };

    let count = (value * scale).round();
    if count > f64::from(u32::MAX) {
        return None;
    }
    Some(count as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_and_minutes_shorthand() {
        assert_eq!(parse_duration("12h 30m"), Some(750));
        assert_eq!(parse_duration("32h 15m"), Some(1935));
        assert_eq!(parse_duration("5h"), Some(300));
        assert_eq!(parse_duration("45m"), Some(45));
        assert_eq!(parse_duration("12h30m"), Some(750));
        assert_eq!(parse_duration("32h15m"), Some(1935));
        assert_eq!(parse_duration("2 h 5 m"), Some(125));
    }

    #[test]
    fn hour_words_combine_with_minutes() {
        assert_eq!(parse_duration("1 Hour 30 Mins"), Some(90));
        assert_eq!(parse_duration("12 Hours 30 Minutes"), Some(750));
        assert_eq!(parse_duration("1½ Hours 10 min"), Some(100));
    }

    #[test]
    fn hour_words_and_half_glyph() {
        assert_eq!(parse_duration("32½ Hours"), Some(1950));
        assert_eq!(parse_duration("8 Hours"), Some(480));
        assert_eq!(parse_duration("8 Hour"), Some(480));
        assert_eq!(parse_duration("12.5 Hours"), Some(750));
        assert_eq!(parse_duration("½ Hours"), Some(30));
    }

    #[test]
    fn whitespace_and_case_are_ignored() {
        assert_eq!(parse_duration("  12\u{a0}HOURS "), Some(720));
        assert_eq!(parse_duration("2H\n\t15M"), Some(135));
    }

    #[test]
    fn minute_words() {
        assert_eq!(parse_duration("45 mins"), Some(45));
        assert_eq!(parse_duration("1h 5 minutes"), Some(65));
    }

    #[test]
    fn unknowns() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("N/A"), None);
        assert_eq!(parse_duration("--"), None);
        assert_eq!(parse_duration("0 Hours"), None);
        assert_eq!(parse_duration("0h 0m"), None);
        assert_eq!(parse_duration("Hours"), None);
    }

    #[test]
    fn bare_numbers_without_units_are_unknown() {
        assert_eq!(parse_duration("12"), None);
    }

    #[test]
    fn only_first_match_per_pattern_counts() {
        assert_eq!(parse_duration("Average 12h 30m (was 14h)"), Some(750));
        assert_eq!(parse_duration("Main 3 Hours, Extras 9 Hours"), Some(180));
    }

    #[test]
    fn shorthand_takes_precedence_over_hour_words() {
        assert_eq!(parse_duration("2h or 10 Hours"), Some(120));
    }

    #[test]
    fn rounds_to_nearest_minute() {
        assert_eq!(parse_duration("0.01 Hours"), Some(1));
        assert_eq!(parse_duration("0.005 Hours"), None);
        assert_eq!(parse_duration("1.26h"), Some(76));
    }

    #[test]
    fn counts() {
        assert_eq!(parse_count("1,234"), Some(1234));
        assert_eq!(parse_count("Polled: 87"), Some(87));
        assert_eq!(parse_count("1.2K"), Some(1200));
        assert_eq!(parse_count("3K Polled"), Some(3000));
        assert_eq!(parse_count("0"), Some(0));
        assert_eq!(parse_count("N/A"), None);
        assert_eq!(parse_count(""), None);
    }
}
