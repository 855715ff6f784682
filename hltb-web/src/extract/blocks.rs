use super::{ExtractError, LayoutExtractor, selector, text_of};
use hltb_times::{ExtractedFields, StatKind, classify, parse_count, parse_duration};
use scraper::Html;

const BLOCKS: &str = r#"[class*="GameStats_game_times"] > ul > li"#;
const LABEL: &str = "h4";
const POLLED: &str = "h5";
const STAT_LINES: &str = "div > div";

/// Detailed stat blocks: an `h4` label, an `h5` poll count, and one nested
/// line per stat ("Average 12½ Hours").
///
/// Blocks without any stat line are left for [`SummaryList`](super::SummaryList).
pub struct StatBlocks;

impl LayoutExtractor for StatBlocks {
    fn name(&self) -> &'static str {
        "stat_blocks"
    }

    fn extract(&self, doc: &Html) -> Result<ExtractedFields, ExtractError> {
        let blocks = selector(BLOCKS)?;
        let label_sel = selector(LABEL)?;
        let polled_sel = selector(POLLED)?;
        let lines = selector(STAT_LINES)?;

        let mut fields = ExtractedFields::new();
        for block in doc.select(&blocks) {
            let Some(label) = block.select(&label_sel).next().map(text_of) else {
                continue;
            };
            if classify(&label).is_none() {
                continue;
            }
            let key = label.to_lowercase();

            let mut found = false;
            for line in block.select(&lines) {
                let text = text_of(line);
                let Some(kind) = StatKind::find_in_text(&text).filter(|k| k.is_duration()) else {
                    continue;
                };
                if let Some(minutes) = parse_duration(&text) {
                    fields
                        .entry(format!("{key}_{}", kind.key_suffix()))
                        .or_insert(minutes);
                    found = true;
                }
            }
            if !found {
                continue;
            }

            let polled = block
                .select(&polled_sel)
                .next()
                .map(text_of)
                .filter(|t| parse_duration(t).is_none())
                .and_then(|t| parse_count(&t));
            if let Some(polled) = polled {
                fields
                    .entry(format!("{key}_{}", StatKind::Polled.key_suffix()))
                    .or_insert(polled);
            }
        }
        Ok(fields)
    }
}
