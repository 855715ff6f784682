use crate::hltb_browser::fingerprint::UserAgentProfile;
use anyhow::{Context, Result};
use fantoccini::{error::CmdError, Client, Locator};
use std::time::Duration;
use tracing::{debug, warn};

const CORE_EVASIONS: &str = r#"
    Object.defineProperty(navigator, 'webdriver', { get: () => undefined });
    if (!window.chrome) window.chrome = { runtime: {} };
"#;

/// Page wrapper providing navigation, waits, and content access.
pub struct HltbPage {
    pub(crate) client: Client,
    pub(crate) profile: UserAgentProfile,
}

impl HltbPage {
    /// Construct a page wrapper around an existing WebDriver client.
    pub fn new(client: Client, profile: UserAgentProfile) -> Self {
        Self { client, profile }
    }

    /// Navigate to `url`; returns once the DOM content has loaded.
    pub async fn goto(&self, url: &str) -> Result<()> {
        debug!(target: "browser.page", %url, "browser.page.goto");
        self.client
            .goto(url)
            .await
            .with_context(|| format!("navigation to {url} failed"))?;
        self.apply_evasions().await
    }

    async fn apply_evasions(&self) -> Result<()> {
        let platform = format!(
            "Object.defineProperty(navigator, 'platform', {{ get: () => '{}' }});",
            self.profile.platform
        );
        self.client.execute(CORE_EVASIONS, vec![]).await?;
        self.client.execute(&platform, vec![]).await?;
        Ok(())
    }

    /// Wait up to `timeout` for `selector` to match.
    ///
    /// Returns `Ok(false)` when the wait budget runs out; only driver
    /// failures are errors.
    pub async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<bool> {
        match self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await
        {
            Ok(_) => Ok(true),
            Err(CmdError::WaitTimeout) => {
                warn!(
                    target: "browser.wait",
                    %selector,
                    timeout_ms = timeout.as_millis() as u64,
                    "browser.wait.timeout"
                );
                Ok(false)
            }
            Err(e) => Err(anyhow::Error::from(e)
                .context(format!("waiting for selector {selector:?} failed"))),
        }
    }

    /// Return the full page HTML source.
    pub async fn get_content(&self) -> Result<String> {
        self.client.source().await.map_err(anyhow::Error::from)
    }

    /// Return the current page URL (after any redirects).
    pub async fn get_url(&self) -> Result<String> {
        self.client
            .current_url()
            .await
            .map(|url| url.to_string())
            .map_err(anyhow::Error::from)
    }
}
