use crate::browser::{BrowserCapturer, CaptureSession, FantocciniCapturer};
use crate::extract::{LayoutChain, search_candidates};
use crate::static_page::StaticCapturer;
use anyhow::anyhow;
use hltb_common::{HltbError, Result};
use hltb_config::{Backend, ScraperConfig};
use hltb_drivers::hltb_browser::driver::DriverOptions;
use hltb_times::{TimeRecord, game_id_from_url, normalize, select_best_match};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

/// Present on the search page once results have rendered.
pub const SEARCH_READY_SELECTOR: &str = r#"a[href^="/game/"]"#;
/// Present on a game page once its content has rendered.
pub const GAME_READY_SELECTOR: &str = "main";

/// Result of one successful lookup.
#[derive(Debug, Clone, Serialize)]
pub struct GameLookup {
    pub hltb_url: String,
    pub times: TimeRecord,
}

/// Finds a game's page and extracts its completion times, one capture
/// session per lookup.
pub struct HltbClient {
    capturer: Arc<dyn BrowserCapturer>,
    base_url: Url,
    wait: Duration,
    request_timeout: Duration,
    layouts: LayoutChain,
}

impl HltbClient {
    pub fn new(capturer: Arc<dyn BrowserCapturer>, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| HltbError::Config(format!("invalid base_url {base_url:?}: {e}")))?;
        let defaults = ScraperConfig::default();
        Ok(Self {
            capturer,
            base_url,
            wait: defaults.wait_timeout(),
            request_timeout: defaults.request_timeout(),
            layouts: LayoutChain::default(),
        })
    }

    /// Build the client and capture backend described by `cfg`.
    pub fn from_config(cfg: &ScraperConfig) -> Result<Self> {
        let capturer: Arc<dyn BrowserCapturer> = match cfg.backend {
            Backend::Browser => Arc::new(FantocciniCapturer::new(DriverOptions {
                webdriver_url: cfg.webdriver_url.clone(),
                headless: cfg.headless,
                user_agent: cfg.user_agent.clone(),
                accept_language: cfg.accept_language.clone(),
            })),
            Backend::Static => Arc::new(StaticCapturer::from_config(cfg)?),
        };
        Ok(Self::new(capturer, &cfg.base_url)?
            .with_wait(cfg.wait_timeout())
            .with_request_timeout(cfg.request_timeout()))
    }

    /// Budget for a page's ready selector to appear.
    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    /// Budget for a whole lookup.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_layouts(mut self, layouts: LayoutChain) -> Self {
        self.layouts = layouts;
        self
    }

    /// `<base>/?q=<name>`
    pub fn search_url(&self, name: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path("/");
        url.query_pairs_mut().clear().append_pair("q", name);
        url
    }

    /// Search for `name`, pick the best hit, and return its times.
    ///
    /// The capture session is closed on every path before this returns.
    pub async fn lookup(&self, name: &str) -> Result<GameLookup> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HltbError::Validation("game name must not be blank".into()));
        }

        let started = Instant::now();
        info!(target: "hltb.lookup", %name, "hltb.lookup.start");

        let mut session = self.capturer.open_session().await?;
        let outcome = match tokio::time::timeout(
            self.request_timeout,
            self.run(session.as_mut(), name),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(HltbError::Timeout(self.request_timeout.as_secs())),
        };
        if let Err(e) = session.close().await {
            warn!(target: "hltb.lookup", error = %e, "failed to close capture session");
        }

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &outcome {
            Ok(found) => info!(
                target: "hltb.lookup",
                %name,
                hltb_url = %found.hltb_url,
                known_stats = found.times.known_stats(),
                elapsed_ms,
                "hltb.lookup.done"
            ),
            Err(e) => warn!(target: "hltb.lookup", %name, error = %e, elapsed_ms, "hltb.lookup.failed"),
        }
        outcome
    }

    async fn run(&self, session: &mut dyn CaptureSession, name: &str) -> Result<GameLookup> {
        let search_url = self.search_url(name);
        let search = session
            .capture(&search_url, SEARCH_READY_SELECTOR, self.wait)
            .await?;
        let candidates = if search.ready {
            search_candidates(&search.html).map_err(anyhow::Error::from)?
        } else {
            warn!(target: "hltb.lookup", %name, "search results never appeared");
            Vec::new()
        };
        debug!(target: "hltb.lookup", %name, candidates = candidates.len(), "hltb.lookup.candidates");

        let best = select_best_match(&candidates, name)
            .ok_or_else(|| HltbError::NotFound(name.to_string()))?;
        let game_url = self
            .base_url
            .join(&best.href)
            .map_err(|e| anyhow!("bad game link {:?}: {e}", best.href))?;
        debug!(target: "hltb.lookup", title = %best.title, url = %game_url, "hltb.lookup.selected");

        let page = session
            .capture(&game_url, GAME_READY_SELECTOR, self.wait)
            .await?;
        // Report where the browser ended up, e.g. after a canonical redirect.
        let final_url = page.url;
        if final_url != game_url {
            debug!(target: "hltb.lookup", from = %game_url, to = %final_url, "hltb.lookup.redirected");
        }
        let times = if page.ready {
            let fields = self.layouts.extract(&page.html);
            normalize(final_url.as_str(), &fields)
        } else {
            warn!(target: "hltb.lookup", url = %final_url, "game page never became ready; returning unknown times");
            TimeRecord {
                hltb_id: game_id_from_url(final_url.as_str()),
                ..TimeRecord::UNKNOWN
            }
        };

        Ok(GameLookup {
            hltb_url: final_url.to_string(),
            times,
        })
    }
}
