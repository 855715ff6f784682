//! Layout extraction strategies over a static HTML snapshot.
//!
//! The game page has shipped several incompatible markups over time. Each
//! one gets a [`LayoutExtractor`]; [`LayoutChain`] tries them in order and
//! hands the first non-empty field map to the normalizer.

mod blocks;
mod search;
mod summary;
mod table;

pub use blocks::StatBlocks;
pub use search::search_candidates;
pub use summary::SummaryList;
pub use table::GameTimeTable;

use hltb_times::ExtractedFields;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid selector {selector:?}: {message}")]
    Selector { selector: String, message: String },
}

pub(crate) fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// Visible text of an element with whitespace collapsed.
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether `css` matches anything in `html`.
pub fn selector_matches(html: &str, css: &str) -> Result<bool, ExtractError> {
    let sel = selector(css)?;
    Ok(Html::parse_document(html).select(&sel).next().is_some())
}

/// One page-markup variant.
pub trait LayoutExtractor: Send + Sync {
    fn name(&self) -> &'static str;

    fn extract(&self, doc: &Html) -> Result<ExtractedFields, ExtractError>;
}

/// Ordered set of layouts with graceful fallback.
pub struct LayoutChain {
    layouts: Vec<Box<dyn LayoutExtractor>>,
}

impl Default for LayoutChain {
    fn default() -> Self {
        Self::new(vec![
            Box::new(GameTimeTable),
            Box::new(StatBlocks),
            Box::new(SummaryList),
        ])
    }
}

impl LayoutChain {
    pub fn new(layouts: Vec<Box<dyn LayoutExtractor>>) -> Self {
        Self { layouts }
    }

    /// Run each layout until one yields fields. Errors are logged and
    /// skipped; if nothing matches the map is empty.
    pub fn extract(&self, html: &str) -> ExtractedFields {
        let doc = Html::parse_document(html);
        for layout in &self.layouts {
            match layout.extract(&doc) {
                Ok(fields) if !fields.is_empty() => {
                    info!(
                        target: "extract.layout",
                        layout = layout.name(),
                        fields = fields.len(),
                        "extract.layout.hit"
                    );
                    return fields;
                }
                Ok(_) => {
                    debug!(target: "extract.layout", layout = layout.name(), "extract.layout.miss");
                }
                Err(e) => {
                    warn!(
                        target: "extract.layout",
                        layout = layout.name(),
                        error = %e,
                        "extract.layout.error"
                    );
                }
            }
        }
        warn!(target: "extract.layout", "no layout matched; returning empty fields");
        ExtractedFields::new()
    }
}
