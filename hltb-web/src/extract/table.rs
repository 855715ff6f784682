use super::{ExtractError, LayoutExtractor, selector, text_of};
use hltb_times::{ExtractedFields, StatKind, classify, parse_count, parse_duration};
use scraper::Html;

const TABLES: &str = r#"table[class*="GameTimeTable"]"#;
const HEADER_CELLS: &str = "thead tr td, thead tr th";
const BODY_ROWS: &str = "tbody tr";
const CELLS: &str = "td";

/// Spreadsheet layout: one row per category, one column per stat.
///
/// Columns are mapped by header text; without a header they are assumed to
/// be Polled, Average, Median, Rushed, Leisure.
pub struct GameTimeTable;

fn column_kinds(headers: &[String]) -> Vec<Option<StatKind>> {
    match headers.split_first() {
        Some((_, rest)) if !rest.is_empty() => {
            rest.iter().map(|h| StatKind::find_in_text(h)).collect()
        }
        _ => StatKind::ALL.iter().copied().map(Some).collect(),
    }
}

impl LayoutExtractor for GameTimeTable {
    fn name(&self) -> &'static str {
        "game_time_table"
    }

    fn extract(&self, doc: &Html) -> Result<ExtractedFields, ExtractError> {
        let tables = selector(TABLES)?;
        let header_cells = selector(HEADER_CELLS)?;
        let rows = selector(BODY_ROWS)?;
        let cells = selector(CELLS)?;

        let mut fields = ExtractedFields::new();
        for table in doc.select(&tables) {
            let headers: Vec<String> = table.select(&header_cells).map(text_of).collect();
            let columns = column_kinds(&headers);

            for row in table.select(&rows) {
                let texts: Vec<String> = row.select(&cells).map(text_of).collect();
                let Some((label, values)) = texts.split_first() else {
                    continue;
                };
                let Some(category) = classify(label) else {
                    continue;
                };
                for (kind, raw) in columns.iter().zip(values) {
                    let Some(kind) = kind else { continue };
                    let parsed = if kind.is_duration() {
                        parse_duration(raw)
                    } else {
                        parse_count(raw)
                    };
                    if let Some(value) = parsed {
                        fields
                            .entry(format!("{}_{}", category.key_prefix(), kind.key_suffix()))
                            .or_insert(value);
                    }
                }
            }
        }
        Ok(fields)
    }
}
