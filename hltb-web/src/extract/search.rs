use super::{ExtractError, selector, text_of};
use hltb_times::SearchCandidate;
use scraper::Html;
use std::collections::HashSet;

const RESULT_LINKS: &str = r#"[class*="GameCard_search_list"] h2 a[href^="/game/"]"#;
const ANY_TITLE_LINKS: &str = r#"h2 a[href^="/game/"], h3 a[href^="/game/"]"#;

/// Search hits in page order, deduplicated by link.
pub fn search_candidates(html: &str) -> Result<Vec<SearchCandidate>, ExtractError> {
    let doc = Html::parse_document(html);
    for css in [RESULT_LINKS, ANY_TITLE_LINKS] {
        let links = selector(css)?;
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for link in doc.select(&links) {
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            if !seen.insert(href.to_string()) {
                continue;
            }
            let mut title = text_of(link);
            if title.is_empty() {
                title = link.value().attr("title").unwrap_or_default().trim().to_string();
            }
            candidates.push(SearchCandidate::new(title, href));
        }
        if !candidates.is_empty() {
            return Ok(candidates);
        }
    }
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_result_list_in_order() {
        let html = r#"
<ul class="GameCard_search_list__IuMbi">
  <li><h2><a href="/game/31402">The Witcher 3: Wild Hunt - Blood and Wine</a></h2></li>
  <li><h2><a href="/game/10270"> The Witcher 3:
      Wild Hunt </a></h2></li>
  <li><h2><a href="/game/10270">duplicate</a></h2></li>
  <li><h2><a href="/forum/1">Not a game</a></h2></li>
</ul>"#;
        let hits = search_candidates(html).unwrap();
        assert_eq!(
            hits,
            vec![
                SearchCandidate::new("The Witcher 3: Wild Hunt - Blood and Wine", "/game/31402"),
                SearchCandidate::new("The Witcher 3: Wild Hunt", "/game/10270"),
            ]
        );
    }

    #[test]
    fn falls_back_to_any_title_link() {
        let html = r#"<div><h3><a href="/game/7" title="Celeste"></a></h3></div>"#;
        let hits = search_candidates(html).unwrap();
        assert_eq!(hits, vec![SearchCandidate::new("Celeste", "/game/7")]);
    }

    #[test]
    fn no_results() {
        assert!(search_candidates("<main>No results</main>").unwrap().is_empty());
    }
}
