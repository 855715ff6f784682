//! Completion-time parsing and normalization.
//!
//! Everything in this crate is pure and synchronous: page text goes in,
//! a fixed-shape [`TimeRecord`] comes out.
//!
//! - [`duration`]: free-text durations ("12½ Hours", "32h 15m") to minutes
//! - [`category`]: completion categories, stat kinds, and the label classifier
//! - [`normalize`]: layout-specific field maps to a [`TimeRecord`]
//! - [`candidates`]: choosing a game page among search results
//!
//! ```
//! use hltb_times::{ExtractedFields, normalize};
//!
//! let mut fields = ExtractedFields::new();
//! fields.insert("Main Story_avg".into(), 750);
//!
//! let record = normalize("https://howlongtobeat.com/game/10270", &fields);
//! assert_eq!(record.hltb_id, Some(10270));
//! assert_eq!(record.main_avg, Some(750));
//! assert_eq!(record.completionist_avg, None);
//! ```

pub mod candidates;
pub mod category;
pub mod duration;
pub mod normalize;
pub mod record;

pub use candidates::{SearchCandidate, select_best_match};
pub use category::{CompletionCategory, StatKind, classify};
pub use duration::{parse_count, parse_duration};
pub use normalize::{ExtractedFields, game_id_from_url, normalize, resolve_field_key};
pub use record::TimeRecord;
