use super::{ExtractError, LayoutExtractor, selector, text_of};
use hltb_times::{ExtractedFields, StatKind, classify, parse_duration};
use scraper::Html;

const ITEMS: &str = r#"[class*="GameStats_game_times"] li"#;
const LABEL: &str = "h4";
const VALUE: &str = "h5";

/// Header summary: `h4` label over an `h5` duration, read as the average.
pub struct SummaryList;

impl LayoutExtractor for SummaryList {
    fn name(&self) -> &'static str {
        "summary_list"
    }

    fn extract(&self, doc: &Html) -> Result<ExtractedFields, ExtractError> {
        let items = selector(ITEMS)?;
        let label_sel = selector(LABEL)?;
        let value_sel = selector(VALUE)?;

        let mut fields = ExtractedFields::new();
        for item in doc.select(&items) {
            let label = item.select(&label_sel).next().map(text_of);
            let value = item.select(&value_sel).next().map(text_of);
            let (Some(label), Some(value)) = (label, value) else {
                continue;
            };
            if classify(&label).is_none() {
                continue;
            }
            if let Some(minutes) = parse_duration(&value) {
                fields
                    .entry(format!("{label}_{}", StatKind::Average.key_suffix()))
                    .or_insert(minutes);
            }
        }
        Ok(fields)
    }
}
