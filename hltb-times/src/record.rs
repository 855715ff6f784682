use crate::category::{CompletionCategory, StatKind};
use serde::{Deserialize, Serialize};

/// Normalized completion times for one game.
///
/// Durations are whole minutes, `*_polled` are submission counts. Every
/// field is always serialized; unknown values become `null`, never a
/// missing key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRecord {
    pub hltb_id: Option<u64>,

    pub main_polled: Option<u32>,
    pub main_avg: Option<u32>,
    pub main_median: Option<u32>,
    pub main_rushed: Option<u32>,
    pub main_leisure: Option<u32>,

    pub extra_polled: Option<u32>,
    pub extra_avg: Option<u32>,
    pub extra_median: Option<u32>,
    pub extra_rushed: Option<u32>,
    pub extra_leisure: Option<u32>,

    pub completionist_polled: Option<u32>,
    pub completionist_avg: Option<u32>,
    pub completionist_median: Option<u32>,
    pub completionist_rushed: Option<u32>,
    pub completionist_leisure: Option<u32>,
}

impl TimeRecord {
    /// A record with every field unknown.
    pub const UNKNOWN: TimeRecord = TimeRecord {
        hltb_id: None,
        main_polled: None,
        main_avg: None,
        main_median: None,
        main_rushed: None,
        main_leisure: None,
        extra_polled: None,
        extra_avg: None,
        extra_median: None,
        extra_rushed: None,
        extra_leisure: None,
        completionist_polled: None,
        completionist_avg: None,
        completionist_median: None,
        completionist_rushed: None,
        completionist_leisure: None,
    };

    fn slot_mut(&mut self, category: CompletionCategory, stat: StatKind) -> &mut Option<u32> {
        use CompletionCategory::*;
        use StatKind::*;
        match (category, stat) {
            (MainStory, Polled) => &mut self.main_polled,
            (MainStory, Average) => &mut self.main_avg,
            (MainStory, Median) => &mut self.main_median,
            (MainStory, Rushed) => &mut self.main_rushed,
            (MainStory, Leisure) => &mut self.main_leisure,
            (MainPlusExtras, Polled) => &mut self.extra_polled,
            (MainPlusExtras, Average) => &mut self.extra_avg,
            (MainPlusExtras, Median) => &mut self.extra_median,
            (MainPlusExtras, Rushed) => &mut self.extra_rushed,
            (MainPlusExtras, Leisure) => &mut self.extra_leisure,
            (Completionist, Polled) => &mut self.completionist_polled,
            (Completionist, Average) => &mut self.completionist_avg,
            (Completionist, Median) => &mut self.completionist_median,
            (Completionist, Rushed) => &mut self.completionist_rushed,
            (Completionist, Leisure) => &mut self.completionist_leisure,
        }
    }

    pub fn get(&self, category: CompletionCategory, stat: StatKind) -> Option<u32> {
        let mut copy = *self;
        *copy.slot_mut(category, stat)
    }

    /// Set a field unless it already holds a value. Returns whether the
    /// value was stored.
    pub fn fill(&mut self, category: CompletionCategory, stat: StatKind, value: u32) -> bool {
        let slot = self.slot_mut(category, stat);
        if slot.is_some() {
            return false;
        }
        *slot = Some(value);
        true
    }

    /// Number of stat fields that hold a value.
    pub fn known_stats(&self) -> usize {
        CompletionCategory::ALL
            .iter()
            .flat_map(|c| StatKind::ALL.iter().map(move |s| (*c, *s)))
            .filter(|(c, s)| self.get(*c, *s).is_some())
            .count()
    }
}
