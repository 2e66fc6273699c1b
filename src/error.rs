//! Error types for schedule resolution and device lookup.
//!
//! Every failure surfaces as a [`ScheduleError`] value; the resolver never
//! panics on bad configuration and never returns a partial schedule alongside
//! an error. Resolution is a pure function of its inputs, so retrying only
//! makes sense after the configuration has been edited.

use chrono::{DateTime, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use thiserror::Error;

/// Errors produced while resolving a day's light schedule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// A time-point text matched neither the fixed-time nor the solar grammar.
    #[error("invalid time point \"{text}\": {reason}")]
    Parse { text: String, reason: String },

    /// Two entries are configured out of chronological order and neither is a
    /// solar anchor that could be slid to repair the order.
    #[error(
        "time points \"{earlier}\" and \"{later}\" are configured out of order \
         and cannot be reordered by shifting solar events"
    )]
    Order { earlier: String, later: String },

    /// An inversion survived both clamping passes; no adjustment of the solar
    /// anchors can realize the configured order on this day.
    #[error(
        "schedule cannot be satisfied: \"{entry}\" resolves to {entry_time} but \
         \"{next_entry}\" resolves to {next_time} \
         (sunrise {real_sunrise} adjusted to {adjusted_sunrise}, \
         sunset {real_sunset} adjusted to {adjusted_sunset})"
    )]
    Unsatisfiable {
        entry: String,
        next_entry: String,
        entry_time: DateTime<Tz>,
        next_time: DateTime<Tz>,
        real_sunrise: DateTime<Tz>,
        real_sunset: DateTime<Tz>,
        adjusted_sunrise: DateTime<Tz>,
        adjusted_sunset: DateTime<Tz>,
    },

    /// The device is not associated with any configured schedule.
    #[error("device {device_id} is not associated with any schedule")]
    DeviceNotFound { device_id: u32 },

    /// A fixed clock time does not exist on the target date in the schedule's
    /// timezone (daylight saving gap).
    #[error("time {time} does not exist on {date} in the schedule's timezone")]
    InvalidLocalTime { date: NaiveDate, time: NaiveTime },

    /// The schedule contains no time points.
    #[error("schedule contains no time points")]
    Empty,

    /// The solar calculator rejected its inputs.
    #[error("solar calculation failed: {0}")]
    Solar(String),
}
