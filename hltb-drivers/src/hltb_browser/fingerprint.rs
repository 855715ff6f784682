use rand::prelude::SliceRandom;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Snapshot of user agent, viewport, and locale characteristics.
pub struct UserAgentProfile {
    pub user_agent: String,
    pub viewport: (u32, u32),
    pub platform: String,
}

impl UserAgentProfile {
    fn windows_chrome() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string(),
            viewport: (1920, 1080),
            platform: "Win32".to_string(),
        }
    }

    fn mac_chrome() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string(),
            viewport: (1440, 900),
            platform: "MacIntel".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
/// Maintains a small pool of plausible desktop profiles.
pub struct UserAgentManager {
    desktop_profiles: Vec<UserAgentProfile>,
}

impl Default for UserAgentManager {
    fn default() -> Self {
        Self::new()
    }
}

impl UserAgentManager {
    /// Create a new manager with built-in desktop profiles.
    pub fn new() -> Self {
        Self {
            desktop_profiles: vec![
                UserAgentProfile::windows_chrome(),
                UserAgentProfile::mac_chrome(),
            ],
        }
    }

    /// Pick a profile for one browser session. A configured user agent
    /// replaces the profile's own string but keeps its viewport.
    pub fn session_profile(&self, user_agent_override: Option<&str>) -> UserAgentProfile {
        let mut rng = rand::thread_rng();
        let mut profile = self
            .desktop_profiles
            .choose(&mut rng)
            .cloned()
            .unwrap_or_else(UserAgentProfile::windows_chrome);
        if let Some(ua) = user_agent_override.map(str::trim).filter(|ua| !ua.is_empty()) {
            profile.user_agent = ua.to_string();
        }
        profile
    }

    /// The user agent used for plain HTTP fetches.
    pub fn http_user_agent(&self, user_agent_override: Option<&str>) -> String {
        self.session_profile(user_agent_override).user_agent
    }
}
