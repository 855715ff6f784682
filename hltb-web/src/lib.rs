//! Page acquisition and completion-time extraction.
//!
//! - Capture backends behind [`browser::BrowserCapturer`]: a WebDriver
//!   browser session ([`browser::FantocciniCapturer`]) or a plain HTTP fetch
//!   ([`static_page::StaticCapturer`])
//! - Layout extraction strategies over a static HTML snapshot (`extract`)
//! - The per-request search → select → extract → normalize flow (`lookup`)

pub mod browser;
pub mod extract;
pub mod lookup;
pub mod static_page;

pub use lookup::{GameLookup, HltbClient};
