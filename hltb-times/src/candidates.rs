use serde::Serialize;

/// One search hit: the title as displayed and its page link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchCandidate {
    pub title: String,
    pub href: String,
}

impl SearchCandidate {
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
        }
    }
}

fn comparable(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Pick the candidate whose title equals `query` (ignoring case and
/// whitespace), else the first candidate in search order.
///
/// ```
/// use hltb_times::{SearchCandidate, select_best_match};
///
/// let hits = vec![
///     SearchCandidate::new("Hades II", "/game/145000"),
///     SearchCandidate::new("Hades", "/game/62941"),
/// ];
/// assert_eq!(select_best_match(&hits, "hades").map(|c| c.href.as_str()), Some("/game/62941"));
/// assert_eq!(select_best_match(&[], "hades"), None);
/// ```
pub fn select_best_match<'a>(
    candidates: &'a [SearchCandidate],
    query: &str,
) -> Option<&'a SearchCandidate> {
    let wanted = comparable(query);
    candidates
        .iter()
        .find(|c| comparable(&c.title) == wanted)
        .or_else(|| candidates.first())
}
