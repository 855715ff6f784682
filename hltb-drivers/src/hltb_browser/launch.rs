use super::fingerprint::UserAgentProfile;

/// Construct Chromium command-line arguments for one session.
pub fn build_launch_arguments(
    headless: bool,
    profile: &UserAgentProfile,
    accept_language: &str,
) -> Vec<String> {
    let mut args = vec![
        "--no-sandbox".to_string(),
        "--disable-setuid-sandbox".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--disable-blink-features=AutomationControlled".to_string(),
        "--disable-infobars".to_string(),
        "--disable-extensions".to_string(),
        format!("--user-agent={}", profile.user_agent),
        format!("--window-size={},{}", profile.viewport.0, profile.viewport.1),
    ];
    if let Some(lang) = accept_language
        .split(',')
        .map(str::trim)
        .find(|l| !l.is_empty())
    {
        args.push(format!("--lang={lang}"));
    }
    if headless {
        args.push("--headless=new".to_string());
        args.push("--disable-gpu".to_string());
    }
    args
}
