#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use anyhow::{Result, anyhow};
use hltb_common::observability::{LogConfig, LogFormat};
use hltb_web::browser::{BrowserCapturer, CaptureSession, PageCapture};
use hltb_web::extract::selector_matches;
use url::Url;

static INIT_PATH: OnceLock<std::path::PathBuf> = OnceLock::new();

pub fn init_test_tracing() {
    let _ = INIT_PATH.get_or_init(|| {
        let config = LogConfig {
            app_name: "hltb-tests",
            log_dir: Some(std::env::temp_dir().join("hltb-tests")),
            emit_stderr: true,
            format: if std::env::var("HLTB_LOG_FORMAT")
                .map(|raw| raw.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(false)
            {
                LogFormat::Json
            } else {
                LogFormat::Text
            },
            default_filter: "debug".to_string(),
        };

        hltb_common::observability::init_logging(config).unwrap_or_default()
    });
}

pub fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {path}: {e}"))
}

/// Serves canned pages keyed by URL path and counts session lifecycles.
#[derive(Clone, Default)]
pub struct FixtureCapturer {
    pages: Arc<HashMap<String, String>>,
    pub opened: Arc<AtomicUsize>,
    pub closed: Arc<AtomicUsize>,
    pub captured: Arc<std::sync::Mutex<Vec<String>>>,
    fail_open: bool,
    fail_capture: bool,
    delay: Option<Duration>,
    redirects: Arc<HashMap<String, String>>,
}

impl FixtureCapturer {
    pub fn new<I, K>(pages: I) -> Self
    where
        I: IntoIterator<Item = (K, String)>,
        K: Into<String>,
    {
        Self {
            pages: Arc::new(pages.into_iter().map(|(k, v)| (k.into(), v)).collect()),
            ..Self::default()
        }
    }

    pub fn failing_open() -> Self {
        Self {
            fail_open: true,
            ..Self::default()
        }
    }

    pub fn failing_capture() -> Self {
        Self {
            fail_capture: true,
            ..Self::default()
        }
    }

    /// Requests for path `from` end up at absolute URL `to`.
    pub fn with_redirect(mut self, from: &str, to: &str) -> Self {
        Arc::make_mut(&mut self.redirects).insert(from.to_string(), to.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn captured(&self) -> Vec<String> {
        self.captured.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl BrowserCapturer for FixtureCapturer {
    async fn open_session(&self) -> Result<Box<dyn CaptureSession>> {
        if self.fail_open {
            return Err(anyhow!("webdriver unreachable"));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FixtureSession {
            capturer: self.clone(),
        }))
    }
}

struct FixtureSession {
    capturer: FixtureCapturer,
}

#[async_trait::async_trait]
impl CaptureSession for FixtureSession {
    async fn capture(
        &mut self,
        url: &Url,
        ready_selector: &str,
        _wait: Duration,
    ) -> Result<PageCapture> {
        self.capturer.captured.lock().unwrap().push(url.to_string());
        if let Some(delay) = self.capturer.delay {
            tokio::time::sleep(delay).await;
        }
        if self.capturer.fail_capture {
            return Err(anyhow!("navigation failed: net::ERR_CONNECTION_RESET"));
        }
        let html = self
            .capturer
            .pages
            .get(url.path())
            .cloned()
            .unwrap_or_default();
        let ready = selector_matches(&html, ready_selector)?;
        let landed = match self.capturer.redirects.get(url.path()) {
            Some(to) => Url::parse(to)?,
            None => url.clone(),
        };
        Ok(PageCapture {
            url: landed,
            html,
            ready,
        })
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.capturer.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
