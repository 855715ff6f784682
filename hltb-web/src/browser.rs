use anyhow::Result;
use hltb_drivers::hltb_browser::driver::{DriverOptions, HltbDriver};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// HTML snapshot of one loaded page.
#[derive(Debug, Clone)]
pub struct PageCapture {
    pub url: Url,
    pub html: String,
    /// Whether the ready selector appeared within the wait budget.
    pub ready: bool,
}

/// One scoped page-loading session. Callers must [`close`](Self::close) it
/// on every path.
#[async_trait::async_trait]
pub trait CaptureSession: Send {
    async fn capture(
        &mut self,
        url: &Url,
        ready_selector: &str,
        wait: Duration,
    ) -> Result<PageCapture>;

    async fn close(self: Box<Self>) -> Result<()>;
}

#[async_trait::async_trait]
pub trait BrowserCapturer: Send + Sync {
    async fn open_session(&self) -> Result<Box<dyn CaptureSession>>;
}

/// Concrete capturer backed by the fantoccini-based driver.
pub struct FantocciniCapturer {
    options: DriverOptions,
}

impl FantocciniCapturer {
    pub fn new(options: DriverOptions) -> Self {
        Self { options }
    }
}

#[async_trait::async_trait]
impl BrowserCapturer for FantocciniCapturer {
    async fn open_session(&self) -> Result<Box<dyn CaptureSession>> {
        let driver = HltbDriver::new(&self.options).await?;
        Ok(Box::new(FantocciniSession { driver }))
    }
}

struct FantocciniSession {
    driver: HltbDriver,
}

#[async_trait::async_trait]
impl CaptureSession for FantocciniSession {
    async fn capture(
        &mut self,
        url: &Url,
        ready_selector: &str,
        wait: Duration,
    ) -> Result<PageCapture> {
        let page = self.driver.goto(url.as_str()).await?;
        let ready = page.wait_for(ready_selector, wait).await?;
        let html = page.get_content().await?;
        let final_url = match page.get_url().await {
            Ok(current) => Url::parse(&current).unwrap_or_else(|_| url.clone()),
            Err(_) => url.clone(),
        };
        debug!(
            target: "browser.capture",
            url = %final_url,
            ready,
            html_len = html.len(),
            "browser.capture.done"
        );
        Ok(PageCapture {
            url: final_url,
            html,
            ready,
        })
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.driver.close().await
    }
}
