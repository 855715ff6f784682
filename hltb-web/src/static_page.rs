//! Browser-less capture: fetch server-rendered HTML over plain HTTP.
use crate::browser::{BrowserCapturer, CaptureSession, PageCapture};
use crate::extract::selector_matches;
use anyhow::Result;
use hltb_common::HltbError;
use hltb_config::ScraperConfig;
use hltb_drivers::hltb_browser::fingerprint::UserAgentManager;
use hltb_http::{HttpClient, RequestOpts, header_map};
use std::time::Duration;
use tracing::debug;
use url::Url;

pub struct StaticCapturer {
    http: HttpClient,
}

impl StaticCapturer {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Build a client carrying the configured user agent, language, and
    /// extra headers on every request.
    pub fn from_config(cfg: &ScraperConfig) -> Result<Self, HltbError> {
        let user_agent = UserAgentManager::new().http_user_agent(cfg.user_agent.as_deref());
        let mut pairs: Vec<(&str, &str)> = vec![
            ("User-Agent", user_agent.as_str()),
            ("Accept", "text/html,application/xhtml+xml"),
            ("Accept-Language", cfg.accept_language.as_str()),
        ];
        pairs.extend(cfg.headers.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        let headers = header_map(pairs).map_err(|e| HltbError::Config(e.to_string()))?;
        let http = HttpClient::new(headers).map_err(|e| HltbError::Config(e.to_string()))?;
        Ok(Self::new(http))
    }
}

#[async_trait::async_trait]
impl BrowserCapturer for StaticCapturer {
    async fn open_session(&self) -> Result<Box<dyn CaptureSession>> {
        Ok(Box::new(StaticSession {
            http: self.http.clone(),
        }))
    }
}

struct StaticSession {
    http: HttpClient,
}

#[async_trait::async_trait]
impl CaptureSession for StaticSession {
    async fn capture(
        &mut self,
        url: &Url,
        ready_selector: &str,
        _wait: Duration,
    ) -> Result<PageCapture> {
        let html = self.http.get_text(url, RequestOpts::default()).await?;
        let ready = selector_matches(&html, ready_selector)?;
        debug!(target: "static.capture", %url, ready, html_len = html.len(), "static.capture.done");
        Ok(PageCapture {
            url: url.clone(),
            html,
            ready,
        })
    }

    async fn close(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}
