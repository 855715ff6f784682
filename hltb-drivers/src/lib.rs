//! Driver layer for browser automation.
//!
//! This crate exposes the WebDriver session wrapper and page helpers used
//! to load HLTB pages in a headless Chromium.
//!
//! - [`hltb_browser::driver::HltbDriver`]: WebDriver client wrapper
//! - [`hltb_browser::page::HltbPage`]: navigation, DOM-ready waits, page source
//! - [`hltb_browser::launch`]: Chromium command-line arguments
//! - [`hltb_browser::fingerprint`]: desktop user-agent profiles
pub mod hltb_browser;
