use crate::hltb_browser::{
    fingerprint::{UserAgentManager, UserAgentProfile},
    launch::build_launch_arguments,
    page::HltbPage,
};
use anyhow::{Context, Result};
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use tracing::debug;
use webdriver::capabilities::Capabilities;

/// Connection and launch settings for one browser session.
#[derive(Debug, Clone)]
pub struct DriverOptions {
    /// WebDriver endpoint, e.g. a local chromedriver.
    pub webdriver_url: String,
    pub headless: bool,
    pub user_agent: Option<String>,
    pub accept_language: String,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            headless: true,
            user_agent: None,
            accept_language: "en-US,en".to_string(),
        }
    }
}

/// Builds the capabilities for a new session. `eager` page loading returns
/// from navigation once the DOM content has loaded.
pub fn build_capabilities(options: &DriverOptions, profile: &UserAgentProfile) -> Capabilities {
    let mut caps = Capabilities::new();
    let args = build_launch_arguments(options.headless, profile, &options.accept_language);
    caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
    caps.insert("pageLoadStrategy".to_string(), json!("eager"));
    caps
}

/// Thin wrapper around a `fantoccini` WebDriver client.
pub struct HltbDriver {
    pub client: Client,
    pub profile: UserAgentProfile,
}

impl HltbDriver {
    /// Start a new browser session on the configured WebDriver service.
    pub async fn new(options: &DriverOptions) -> Result<Self> {
        let profile = UserAgentManager::new().session_profile(options.user_agent.as_deref());
        let caps = build_capabilities(options, &profile);

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&options.webdriver_url)
            .await
            .with_context(|| format!("failed to open WebDriver session at {}", options.webdriver_url))?;

        debug!(
            target: "browser.session",
            webdriver_url = %options.webdriver_url,
            headless = options.headless,
            user_agent = %profile.user_agent,
            "browser.session.open"
        );

        Ok(Self { client, profile })
    }

    /// Navigate to `url` and return an [`HltbPage`] for it.
    pub async fn goto(&self, url: &str) -> Result<HltbPage> {
        let page = HltbPage::new(self.client.clone(), self.profile.clone());
        page.goto(url).await?;
        Ok(page)
    }

    /// Close the underlying browser session.
    pub async fn close(self) -> Result<()> {
        self.client
            .close()
            .await
            .context("failed to close WebDriver session")?;
        debug!(target: "browser.session", "browser.session.closed");
        Ok(())
    }
}
