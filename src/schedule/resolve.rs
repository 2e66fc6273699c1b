//! The schedule resolution engine.
//!
//! Resolution turns the configured, intended-chronological list of time
//! points into actual instants for one day. Fixed clock times are inviolable;
//! solar-anchored points are elastic. When the day's real sunrise or sunset
//! would place a solar point on the wrong side of a neighbor, the engine
//! shifts a per-call *adjusted* copy of that solar event by the minimum
//! amount that restores the order, plus a one-minute margin.
//!
//! Two sweeps share the adjusted anchors: a forward sweep pushes solar points
//! later when they land before their predecessor, and a backward sweep pulls
//! them earlier when they land after their successor. An inversion between
//! two fixed points, or between two solar points in a disallowed
//! combination, can never be repaired by shifting and fails immediately. Any
//! inversion that survives both sweeps makes the whole schedule
//! unsatisfiable.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use super::timepoint::{Anchor, SolarAnchor, TimePointSpec};
use super::{DaySchedule, ResolvedTimestamp};
use crate::constants::ORDERING_MARGIN_MINUTES;
use crate::error::ScheduleError;

/// Adjusted solar anchors for a single resolution call.
///
/// Seeded from the real sunrise/sunset, mutated only while resolving one
/// day's schedule, discarded afterward. Shifting an anchor moves every time
/// point hanging off it without perturbing fixed points.
#[derive(Debug, Clone, Copy)]
struct AdjustedSun {
    sunrise: DateTime<Tz>,
    sunset: DateTime<Tz>,
}

impl AdjustedSun {
    fn get(&self, event: SolarAnchor) -> DateTime<Tz> {
        match event {
            SolarAnchor::Sunrise => self.sunrise,
            SolarAnchor::Sunset => self.sunset,
        }
    }

    fn shift(&mut self, event: SolarAnchor, delta: Duration) {
        match event {
            SolarAnchor::Sunrise => self.sunrise = self.sunrise + delta,
            SolarAnchor::Sunset => self.sunset = self.sunset + delta,
        }
    }
}

/// Resolve a spec to an absolute instant on `date` using the given anchors.
///
/// Pure and total for a parsed spec, except that a fixed time falling into a
/// daylight-saving gap has no instant and is an error. A fixed time in the
/// repeated hour of a backward transition resolves to its first occurrence.
fn resolve_anchor(
    spec: &TimePointSpec,
    date: NaiveDate,
    tz: Tz,
    sun: &AdjustedSun,
) -> Result<DateTime<Tz>, ScheduleError> {
    match spec.anchor() {
        Anchor::Fixed(time) => local_instant(date, *time, tz),
        Anchor::Solar {
            event,
            offset_minutes,
        } => Ok(sun.get(*event) + Duration::minutes(*offset_minutes)),
    }
}

fn local_instant(date: NaiveDate, time: NaiveTime, tz: Tz) -> Result<DateTime<Tz>, ScheduleError> {
    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .ok_or(ScheduleError::InvalidLocalTime { date, time })
}

/// Compute the resolved schedule for one day.
///
/// `specs` is the configured list in its intended chronological order;
/// `sunrise` and `sunset` are the day's real solar instants in the
/// schedule's timezone. Returns `specs.len() + 2` entries: the previous
/// day's final entry, the resolved specs, and the next day's first entry.
///
/// The computation is pure and deterministic; resolving the same inputs
/// twice yields identical output.
pub fn compute_schedule(
    specs: &[TimePointSpec],
    sunrise: DateTime<Tz>,
    sunset: DateTime<Tz>,
    date: NaiveDate,
) -> Result<DaySchedule, ScheduleError> {
    if specs.is_empty() {
        return Err(ScheduleError::Empty);
    }

    let tz = sunrise.timezone();
    let margin = Duration::minutes(ORDERING_MARGIN_MINUTES);
    let start_of_day = local_instant(date, NaiveTime::MIN, tz)?;
    let end_of_day = local_instant(date, NaiveTime::from_hms_opt(23, 59, 59).unwrap(), tz)?;
    let start_of_next_day = local_instant(date + Duration::days(1), NaiveTime::MIN, tz)?;

    let mut sun = AdjustedSun { sunrise, sunset };

    // Forward sweep: compare each entry to its predecessor and push a solar
    // current entry later when it lands before the predecessor. The synthetic
    // predecessor of the first entry is a fixed point at start of day.
    let mut prev_instant = start_of_day;
    let mut prev: Option<&TimePointSpec> = None;
    for spec in specs {
        let current = resolve_anchor(spec, date, tz, &sun)?;
        if current >= prev_instant {
            prev_instant = current;
            prev = Some(spec);
            continue;
        }

        match (prev.map(TimePointSpec::anchor), spec.anchor()) {
            // Two exact clock times out of order: nothing to slide.
            (None | Some(Anchor::Fixed(_)), Anchor::Fixed(_)) => {
                return Err(order_error(prev, spec));
            }
            // Solar against solar is only repairable for a sunrise entry
            // followed by a sunset entry; anything else (sunset before
            // sunrise, or one event out of its own offset order) is a
            // configuration error.
            (
                Some(Anchor::Solar { event: prev_ev, .. }),
                Anchor::Solar { event: cur_ev, .. },
            ) if !(*prev_ev == SolarAnchor::Sunrise && *cur_ev == SolarAnchor::Sunset) => {
                return Err(order_error(prev, spec));
            }
            (_, Anchor::Solar { event, .. }) => {
                let shifted = prev_instant + margin;
                log_warning!(
                    "\"{}\" resolved to {} before its predecessor at {}; shifting adjusted {} to {}",
                    spec.text(),
                    current.format("%H:%M"),
                    prev_instant.format("%H:%M"),
                    event.name(),
                    (sun.get(*event) + (shifted - current)).format("%H:%M"),
                );
                sun.shift(*event, shifted - current);
                prev_instant = shifted;
            }
            (_, Anchor::Fixed(_)) => {
                // Fixed entry behind a solar predecessor; the backward sweep
                // pulls the solar anchor back instead.
                prev_instant = current;
            }
        }
        prev = Some(spec);
    }

    // Backward sweep: symmetric, pulling a solar current entry earlier when
    // it lands after its successor. The synthetic successor of the last
    // entry is a fixed point at end of day. This catches inversions visible
    // only from the late-day side.
    let mut next_instant = end_of_day;
    let mut next: Option<&TimePointSpec> = None;
    for spec in specs.iter().rev() {
        let current = resolve_anchor(spec, date, tz, &sun)?;
        if current <= next_instant {
            next_instant = current;
            next = Some(spec);
            continue;
        }

        match (spec.anchor(), next.map(TimePointSpec::anchor)) {
            (Anchor::Fixed(_), None | Some(Anchor::Fixed(_))) => {
                return Err(order_error_from_successor(spec, next));
            }
            (
                Anchor::Solar { event: cur_ev, .. },
                Some(Anchor::Solar { event: next_ev, .. }),
            ) if !(*cur_ev == SolarAnchor::Sunrise && *next_ev == SolarAnchor::Sunset) => {
                return Err(order_error_from_successor(spec, next));
            }
            (Anchor::Solar { event, .. }, _) => {
                let shifted = next_instant - margin;
                log_warning!(
                    "\"{}\" resolved to {} after its successor at {}; shifting adjusted {} to {}",
                    spec.text(),
                    current.format("%H:%M"),
                    next_instant.format("%H:%M"),
                    event.name(),
                    (sun.get(*event) + (shifted - current)).format("%H:%M"),
                );
                sun.shift(*event, shifted - current);
                next_instant = shifted;
            }
            (Anchor::Fixed(_), _) => {
                next_instant = current;
            }
        }
        next = Some(spec);
    }

    let first_spec = &specs[0];
    let last_spec = &specs[specs.len() - 1];

    // Previous-day bridge: the last configured entry resolved against
    // yesterday, approximating yesterday's solar events by shifting the real
    // ones back a day. Clamped to just before start of day so it always
    // precedes the window.
    let prev_sun = AdjustedSun {
        sunrise: sunrise - Duration::days(1),
        sunset: sunset - Duration::days(1),
    };
    let mut bridge_prev = resolve_anchor(last_spec, date - Duration::days(1), tz, &prev_sun)?;
    if bridge_prev >= start_of_day {
        bridge_prev = start_of_day - margin;
    }

    // Next-day bridge: the first configured entry resolved against tomorrow,
    // clamped to no earlier than start of the next day.
    let next_sun = AdjustedSun {
        sunrise: sunrise + Duration::days(1),
        sunset: sunset + Duration::days(1),
    };
    let mut bridge_next = resolve_anchor(first_spec, date + Duration::days(1), tz, &next_sun)?;
    if bridge_next < start_of_next_day {
        bridge_next = start_of_next_day;
    }

    // Final resolution with the settled anchors, in configured order.
    let mut entries = Vec::with_capacity(specs.len() + 2);
    entries.push(ResolvedTimestamp::new(
        bridge_prev,
        last_spec.color_temperature(),
        last_spec.brightness(),
    ));
    for spec in specs {
        let instant = resolve_anchor(spec, date, tz, &sun)?;
        entries.push(ResolvedTimestamp::new(
            instant,
            spec.color_temperature(),
            spec.brightness(),
        ));
    }
    entries.push(ResolvedTimestamp::new(
        bridge_next,
        first_spec.color_temperature(),
        first_spec.brightness(),
    ));

    // Any adjacent pair still out of order means the solar anchors were
    // squeezed past both neighbors; the configuration cannot be realized.
    for (index, pair) in entries.windows(2).enumerate() {
        if pair[0].time > pair[1].time {
            return Err(ScheduleError::Unsatisfiable {
                entry: entry_label(index, specs),
                next_entry: entry_label(index + 1, specs),
                entry_time: pair[0].time,
                next_time: pair[1].time,
                real_sunrise: sunrise,
                real_sunset: sunset,
                adjusted_sunrise: sun.sunrise,
                adjusted_sunset: sun.sunset,
            });
        }
    }

    Ok(DaySchedule {
        date,
        entries,
        sunrise,
        sunset,
    })
}

fn order_error(prev: Option<&TimePointSpec>, current: &TimePointSpec) -> ScheduleError {
    ScheduleError::Order {
        earlier: prev
            .map(|spec| spec.text().to_owned())
            .unwrap_or_else(|| "start of day".to_owned()),
        later: current.text().to_owned(),
    }
}

fn order_error_from_successor(
    current: &TimePointSpec,
    next: Option<&TimePointSpec>,
) -> ScheduleError {
    ScheduleError::Order {
        earlier: current.text().to_owned(),
        later: next
            .map(|spec| spec.text().to_owned())
            .unwrap_or_else(|| "end of day".to_owned()),
    }
}

/// Describe an assembled entry by its originating spec, accounting for the
/// bridging entries at either end.
fn entry_label(index: usize, specs: &[TimePointSpec]) -> String {
    if index == 0 {
        format!("{} (previous day)", specs[specs.len() - 1].text())
    } else if index == specs.len() + 1 {
        format!("{} (next day)", specs[0].text())
    } else {
        specs[index - 1].text().to_owned()
    }
}
