//! Layout-independent normalization into a [`TimeRecord`].
use crate::category::{CompletionCategory, StatKind};
use crate::record::TimeRecord;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;

/// Whatever a layout extractor managed to read, keyed `<label>_<stat>`.
///
/// Labels vary by layout: `"main_avg"`, `"main story_avg"` and
/// `"Main Story_avg"` all name the same field. Keys iterate in byte order,
/// so when aliases of one field disagree the lexically smallest key wins
/// in [`normalize`], not the one extracted first.
pub type ExtractedFields = BTreeMap<String, u32>;

static GAME_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/game/(\d+)(?:[/?#]|$)").expect("static regex"));

/// The numeric game id from a `/game/<digits>` path segment.
pub fn game_id_from_url(url: &str) -> Option<u64> {
    GAME_ID
        .captures(url)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Split a field key at its last `_` and resolve both halves.
pub fn resolve_field_key(key: &str) -> Option<(CompletionCategory, StatKind)> {
    let (label, suffix) = key.rsplit_once('_')?;
    let stat = StatKind::from_key_suffix(suffix)?;
    let category = CompletionCategory::from_key_label(label)?;
    Some((category, stat))
}

/// Build a complete record from a source URL and an extracted field map.
///
/// Fields absent from `extracted` stay unknown; keys that do not resolve
/// are ignored. Aliased keys are applied in key order (see
/// [`ExtractedFields`]). A zero duration is unknown, a zero poll count is kept.
pub fn normalize(source_url: &str, extracted: &ExtractedFields) -> TimeRecord {
    let mut record = TimeRecord {
        hltb_id: game_id_from_url(source_url),
        ..TimeRecord::UNKNOWN
    };

    for (key, &value) in extracted {
        let Some((category, stat)) = resolve_field_key(key) else {
            debug!(target: "hltb.normalize", %key, "ignoring unrecognized field");
            continue;
        };
        if stat.is_duration() && value == 0 {
            continue;
        }
        if !record.fill(category, stat, value) {
            debug!(target: "hltb.normalize", %key, "field already set; keeping first value");
        }
    }

    record
}
