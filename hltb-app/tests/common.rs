#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::{Result, anyhow};
use hltb_web::browser::{BrowserCapturer, CaptureSession, PageCapture};
use hltb_web::extract::selector_matches;
use url::Url;

pub const SEARCH_PAGE: &str = r#"
<main>
  <ul class="GameCard_search_list__IuMbi">
    <li><h2><a href="/game/83226">Celeste</a></h2></li>
    <li><h2><a href="/game/90213">Celeste Classic</a></h2></li>
  </ul>
</main>"#;

pub const EMPTY_SEARCH_PAGE: &str = "<main><h3>No results</h3></main>";

pub const GAME_PAGE: &str = r#"
<main>
  <table class="GameTimeTable_game_main_table__7uN3H">
    <thead><tr><td>Single-Player</td><td>Polled</td><td>Average</td><td>Median</td><td>Rushed</td><td>Leisure</td></tr></thead>
    <tbody>
      <tr><td>Main Story</td><td>1,230</td><td>8h 10m</td><td>8h</td><td>6h</td><td>11h</td></tr>
      <tr><td>Main + Extras</td><td>640</td><td>13h</td><td>12h</td><td>9h 30m</td><td>19h</td></tr>
    </tbody>
  </table>
</main>"#;

/// Canned pages keyed by URL path; counts opened and closed sessions.
#[derive(Clone, Default)]
pub struct FakeCapturer {
    pages: Arc<HashMap<&'static str, &'static str>>,
    fail: bool,
    pub opened: Arc<AtomicUsize>,
    pub closed: Arc<AtomicUsize>,
}

impl FakeCapturer {
    pub fn serving(pages: &[(&'static str, &'static str)]) -> Self {
        Self {
            pages: Arc::new(pages.iter().copied().collect()),
            ..Self::default()
        }
    }

    pub fn broken() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl BrowserCapturer for FakeCapturer {
    async fn open_session(&self) -> Result<Box<dyn CaptureSession>> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession(self.clone())))
    }
}

struct FakeSession(FakeCapturer);

#[async_trait::async_trait]
impl CaptureSession for FakeSession {
    async fn capture(
        &mut self,
        url: &Url,
        ready_selector: &str,
        _wait: Duration,
    ) -> Result<PageCapture> {
        if self.0.fail {
            return Err(anyhow!("chrome not reachable"));
        }
        let html = self.0.pages.get(url.path()).copied().unwrap_or_default();
        Ok(PageCapture {
            url: url.clone(),
            html: html.to_string(),
            ready: selector_matches(html, ready_selector)?,
        })
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.0.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
