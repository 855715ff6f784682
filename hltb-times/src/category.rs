//! Completion categories, stat kinds, and the label classifier.
use serde::Serialize;

/// Scope of play a statistic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CompletionCategory {
    MainStory,
    MainPlusExtras,
    Completionist,
}

/// Label prefixes in match order; the first hit wins.
const LABEL_PREFIXES: &[(&str, CompletionCategory)] = &[
    ("main story", CompletionCategory::MainStory),
    ("main + extras", CompletionCategory::MainPlusExtras),
    ("main + sides", CompletionCategory::MainPlusExtras),
    ("completionist", CompletionCategory::Completionist),
];

impl CompletionCategory {
    pub const ALL: [CompletionCategory; 3] = [
        CompletionCategory::MainStory,
        CompletionCategory::MainPlusExtras,
        CompletionCategory::Completionist,
    ];

    /// Prefix used for this category's output fields (`main_avg`, ...).
    pub fn key_prefix(self) -> &'static str {
        match self {
            CompletionCategory::MainStory => "main",
            CompletionCategory::MainPlusExtras => "extra",
            CompletionCategory::Completionist => "completionist",
        }
    }

    /// Resolve a field-key label: the page label itself or one of the short
    /// aliases different layouts use.
    pub fn from_key_label(label: &str) -> Option<Self> {
        if let Some(category) = classify(label) {
            return Some(category);
        }
        match normalize_label(label).as_str() {
            "main" => Some(CompletionCategory::MainStory),
            "extra" | "extras" | "main_extra" | "main_extras" | "main_plus_extras" => {
                Some(CompletionCategory::MainPlusExtras)
            }
            "complete" | "completionist" => Some(CompletionCategory::Completionist),
            _ => None,
        }
    }
}

/// One of the five statistics reported per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum StatKind {
    Polled,
    Average,
    Median,
    Rushed,
    Leisure,
}

impl StatKind {
    pub const ALL: [StatKind; 5] = [
        StatKind::Polled,
        StatKind::Average,
        StatKind::Median,
        StatKind::Rushed,
        StatKind::Leisure,
    ];

    /// The four duration kinds, in column order.
    pub const DURATIONS: [StatKind; 4] = [
        StatKind::Average,
        StatKind::Median,
        StatKind::Rushed,
        StatKind::Leisure,
    ];

    pub fn key_suffix(self) -> &'static str {
        match self {
            StatKind::Polled => "polled",
            StatKind::Average => "avg",
            StatKind::Median => "median",
            StatKind::Rushed => "rushed",
            StatKind::Leisure => "leisure",
        }
    }

    pub fn is_duration(self) -> bool {
        !matches!(self, StatKind::Polled)
    }

    pub fn from_key_suffix(suffix: &str) -> Option<Self> {
        match suffix.trim().to_lowercase().as_str() {
            "polled" => Some(StatKind::Polled),
            "avg" | "average" => Some(StatKind::Average),
            "median" | "med" => Some(StatKind::Median),
            "rushed" | "rush" => Some(StatKind::Rushed),
            "leisure" => Some(StatKind::Leisure),
            _ => None,
        }
    }

    /// Find the stat a piece of page text names ("Average", "Rushed 9h").
    /// When several are named, the earliest one wins.
    pub fn find_in_text(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        [
            ("polled", StatKind::Polled),
            ("average", StatKind::Average),
            ("median", StatKind::Median),
            ("rushed", StatKind::Rushed),
            ("leisure", StatKind::Leisure),
        ]
        .into_iter()
        .filter_map(|(word, kind)| lower.find(word).map(|pos| (pos, kind)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, kind)| kind)
    }
}

fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Map a statistics block label to its category by prefix.
///
/// Trailing footnote markers and suffixes are tolerated; unknown labels
/// yield `None` and the block should be skipped.
///
/// ```
/// use hltb_times::{CompletionCategory, classify};
///
/// assert_eq!(classify("Completionist†"), Some(CompletionCategory::Completionist));
/// assert_eq!(classify("Co-Op"), None);
/// ```
pub fn classify(label: &str) -> Option<CompletionCategory> {
    let label = normalize_label(label);
    LABEL_PREFIXES
        .iter()
        .find(|(prefix, _)| label.starts_with(prefix))
        .map(|(_, category)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_labels() {
        assert_eq!(classify("Main Story"), Some(CompletionCategory::MainStory));
        assert_eq!(
            classify("Main + Extras"),
            Some(CompletionCategory::MainPlusExtras)
        );
        assert_eq!(
            classify("Main + Sides"),
            Some(CompletionCategory::MainPlusExtras)
        );
        assert_eq!(
            classify("Completionist"),
            Some(CompletionCategory::Completionist)
        );
    }

    #[test]
    fn prefix_match_tolerates_suffixes() {
        assert_eq!(
            classify("Completionist†"),
            Some(CompletionCategory::Completionist)
        );
        assert_eq!(
            classify("  MAIN   STORY (Solo) "),
            Some(CompletionCategory::MainStory)
        );
    }

    #[test]
    fn prefix_match_is_anchored() {
        assert_eq!(classify("Co-Op"), None);
        assert_eq!(classify("All PlayStyles"), None);
        assert_eq!(classify("Not the Main Story"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn key_labels_accept_aliases() {
        assert_eq!(
            CompletionCategory::from_key_label("main"),
            Some(CompletionCategory::MainStory)
        );
        assert_eq!(
            CompletionCategory::from_key_label("extra"),
            Some(CompletionCategory::MainPlusExtras)
        );
        assert_eq!(
            CompletionCategory::from_key_label("main story"),
            Some(CompletionCategory::MainStory)
        );
        assert_eq!(CompletionCategory::from_key_label("speedrun"), None);
    }

    #[test]
    fn stat_words_in_text() {
        assert_eq!(StatKind::find_in_text("Average 12h"), Some(StatKind::Average));
        assert_eq!(StatKind::find_in_text("LEISURE"), Some(StatKind::Leisure));
        assert_eq!(StatKind::find_in_text("Single-Player"), None);
        assert_eq!(
            StatKind::find_in_text("Median 9h Average 10h"),
            Some(StatKind::Median)
        );
    }
}
