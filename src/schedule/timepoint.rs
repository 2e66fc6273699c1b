//! Time-point parsing.
//!
//! Accepted grammar, case-insensitive and whitespace-tolerant:
//!
//! ```text
//! HH:MM                              fixed clock time, hour 0-23, minute 0-59
//! sunrise | sunset                   solar event, offset 0
//! sunrise|sunset (+|-) N <unit>      solar event with signed minute offset;
//!                                    unit is m, min, mins, minute or minutes
//! ```
//!
//! The two alternatives are matched by separate, fully anchored patterns so
//! that a partial match can never be mistaken for a complete one: `"sunrise
//! - 1h"` is rejected instead of being misread as a bare `"sunrise"`. Text
//! that matches neither pattern is a hard error, never a defaulted time.
//!
//! Offsets are limited to one day in either direction; a grammatical but
//! absurd offset is a parse error rather than an overflow later.

use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::MAX_SOLAR_OFFSET_MINUTES;
use crate::error::ScheduleError;

static FIXED_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{1,2}):(\d{2})\s*$").expect("fixed time pattern is valid"));

static SOLAR_SPEC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(sunrise|sunset)(?:\s*([+-])\s*(\d+)\s*(?:m|min|mins|minute|minutes))?\s*$")
        .expect("solar spec pattern is valid")
});

/// The solar event a time point is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolarAnchor {
    Sunrise,
    Sunset,
}

impl SolarAnchor {
    pub fn name(self) -> &'static str {
        match self {
            SolarAnchor::Sunrise => "sunrise",
            SolarAnchor::Sunset => "sunset",
        }
    }
}

/// The reference instant a time point is defined relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// An exact clock time on the target date. Inviolable: resolution never
    /// moves a fixed point.
    Fixed(NaiveTime),
    /// A solar event plus a signed minute offset. Elastic: resolution may
    /// slide the event's adjusted instant to preserve the configured order.
    Solar {
        event: SolarAnchor,
        offset_minutes: i64,
    },
}

/// One configured schedule entry: a parsed time anchor and the light state to
/// reach at it. Immutable once parsed; constructed only through
/// [`TimePointSpec::parse`], so an unparsed spec is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimePointSpec {
    text: String,
    anchor: Anchor,
    color_temperature: u32,
    brightness: u8,
}

impl TimePointSpec {
    /// Parse a textual time specification into a typed spec.
    pub fn parse(
        text: &str,
        color_temperature: u32,
        brightness: u8,
    ) -> Result<Self, ScheduleError> {
        let anchor = parse_anchor(text)?;
        Ok(Self {
            text: text.trim().to_owned(),
            anchor,
            color_temperature,
            brightness,
        })
    }

    /// The raw text this spec was parsed from, trimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    pub fn color_temperature(&self) -> u32 {
        self.color_temperature
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }
}

fn parse_anchor(text: &str) -> Result<Anchor, ScheduleError> {
    if let Some(caps) = FIXED_TIME.captures(text) {
        let hour: u32 = caps[1]
            .parse()
            .map_err(|_| parse_error(text, "hour is not a valid number"))?;
        let minute: u32 = caps[2]
            .parse()
            .map_err(|_| parse_error(text, "minute is not a valid number"))?;
        let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
            parse_error(
                text,
                &format!("{hour:02}:{minute:02} is not a valid time of day"),
            )
        })?;
        return Ok(Anchor::Fixed(time));
    }

    if let Some(caps) = SOLAR_SPEC.captures(text) {
        let event = if caps[1].eq_ignore_ascii_case("sunrise") {
            SolarAnchor::Sunrise
        } else {
            SolarAnchor::Sunset
        };
        let offset_minutes = match caps.get(2) {
            Some(sign) => {
                let minutes: i64 = caps[3]
                    .parse()
                    .map_err(|_| parse_error(text, "offset is not a valid number of minutes"))?;
                if minutes > MAX_SOLAR_OFFSET_MINUTES {
                    return Err(parse_error(
                        text,
                        &format!("offset exceeds {MAX_SOLAR_OFFSET_MINUTES} minutes (one day)"),
                    ));
                }
                if sign.as_str() == "-" { -minutes } else { minutes }
            }
            None => 0,
        };
        return Ok(Anchor::Solar {
            event,
            offset_minutes,
        });
    }

    Err(parse_error(
        text,
        "expected HH:MM, sunrise or sunset, optionally with a signed minute offset",
    ))
}

fn parse_error(text: &str, reason: &str) -> ScheduleError {
    ScheduleError::Parse {
        text: text.trim().to_owned(),
        reason: reason.to_owned(),
    }
}
