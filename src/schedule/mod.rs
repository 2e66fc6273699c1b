//! Day schedule resolution.
//!
//! A schedule configuration is an ordered list of time points, each anchored
//! to a fixed clock time or to sunrise/sunset with a signed minute offset.
//! The configured order is the intended chronological order; this module
//! realizes it as actual, non-decreasing instants for one calendar day.
//!
//! The resolved [`DaySchedule`] always carries one bridging entry from the
//! previous day and one from the next, so a caller comparing "now" against
//! the sequence finds a bracketing pair even near midnight.

pub mod resolve;
pub mod timepoint;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono_tz::Tz;
use std::cmp::Ordering;

pub use resolve::compute_schedule;
pub use timepoint::{Anchor, SolarAnchor, TimePointSpec};

/// An absolute instant paired with the light state that takes effect there.
///
/// Produced only by schedule resolution; ordering is total, by instant first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTimestamp {
    pub time: DateTime<Tz>,
    pub color_temperature: u32,
    pub brightness: u8,
}

impl ResolvedTimestamp {
    pub(crate) fn new(time: DateTime<Tz>, color_temperature: u32, brightness: u8) -> Self {
        Self {
            time,
            color_temperature,
            brightness,
        }
    }
}

impl Ord for ResolvedTimestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.color_temperature.cmp(&other.color_temperature))
            .then_with(|| self.brightness.cmp(&other.brightness))
    }
}

impl PartialOrd for ResolvedTimestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The resolved schedule for one device on one day.
///
/// Contains exactly `N + 2` entries for `N` configured time points: the
/// previous day's final entry, the `N` entries in their configured order, and
/// the next day's first entry. Fresh per invocation; a date or configuration
/// change produces a new value rather than mutating this one.
#[derive(Debug, Clone)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub entries: Vec<ResolvedTimestamp>,
    /// The real (unadjusted) sunrise this schedule was resolved against
    pub sunrise: DateTime<Tz>,
    /// The real (unadjusted) sunset this schedule was resolved against
    pub sunset: DateTime<Tz>,
}

impl DaySchedule {
    /// The entry in effect at `now`: the last entry at or before it.
    ///
    /// When two entries share an instant, the later-indexed one supersedes
    /// the earlier exactly at the shared instant.
    pub fn active_entry(&self, now: DateTime<Tz>) -> Option<&ResolvedTimestamp> {
        self.entries.iter().rev().find(|entry| entry.time <= now)
    }

    /// The first entry strictly after `now`, if any remains in the window.
    pub fn next_change(&self, now: DateTime<Tz>) -> Option<&ResolvedTimestamp> {
        self.entries.iter().find(|entry| entry.time > now)
    }
}
