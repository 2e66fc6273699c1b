//! Configuration system for sunsched with validation and device lookup.
//!
//! Configuration is TOML-based: a geographic location, an optional IANA
//! timezone, and one or more named schedules, each associating a list of
//! device ids with an ordered list of time-point entries. Entry times are
//! parsed into typed [`TimePointSpec`]s at load time, so everything past
//! loading operates on validated values only; an unparsed entry cannot
//! reach the resolver.
//!
//! ```toml
//! timezone = "Europe/Berlin"
//!
//! [location]
//! latitude = 52.52
//! longitude = 13.405
//!
//! [[schedule]]
//! name = "living room"
//! devices = [1, 2]
//!
//! [[schedule.entry]]
//! time = "8:00"
//! color_temperature = 2700
//! brightness = 80
//!
//! [[schedule.entry]]
//! time = "sunrise + 30m"
//! color_temperature = 5000
//! brightness = 100
//! ```
//!
//! Validation rejects out-of-range coordinates, unknown timezones,
//! color temperatures outside 1000-10000 K, brightness above 100%, schedules
//! without entries, and device ids claimed by more than one schedule.
//! Versioning and migration of the on-disk format are not handled here.

pub mod builder;
pub mod loading;
pub mod validation;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Deserialize;

use crate::constants::DEFAULT_TIMEZONE;
use crate::error::ScheduleError;
use crate::schedule::{DaySchedule, TimePointSpec, compute_schedule};
use crate::solar::SolarCalculator;

// Re-export public API
pub use builder::create_default_config;
pub use loading::{get_config_path, load, load_from_path, load_from_str};

/// On-disk configuration document, as deserialized from TOML.
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct ConfigFile {
    pub(crate) location: LocationSection,
    pub(crate) timezone: Option<String>,
    #[serde(default, rename = "schedule")]
    pub(crate) schedules: Vec<ScheduleSection>,
}

/// Geolocation for which sunrise and sunset are calculated.
#[derive(Debug, Deserialize, Clone, Copy)]
pub(crate) struct LocationSection {
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
}

/// One named schedule and the devices it drives.
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct ScheduleSection {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) devices: Vec<u32>,
    #[serde(default, rename = "entry")]
    pub(crate) entries: Vec<EntrySection>,
}

/// One raw schedule entry: a time-point text and the light state to reach.
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct EntrySection {
    pub(crate) time: String,
    pub(crate) color_temperature: u32,
    pub(crate) brightness: u8,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Tz,
    pub schedules: Vec<LightSchedule>,
}

/// A named schedule with its device associations and parsed time points,
/// in their configured (intended chronological) order.
#[derive(Debug, Clone)]
pub struct LightSchedule {
    name: String,
    devices: Vec<u32>,
    specs: Vec<TimePointSpec>,
}

impl LightSchedule {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn devices(&self) -> &[u32] {
        &self.devices
    }

    pub fn specs(&self) -> &[TimePointSpec] {
        &self.specs
    }
}

impl Config {
    /// Build the runtime configuration from a validated file document,
    /// parsing every entry's time text.
    pub(crate) fn from_file_format(file: ConfigFile) -> Result<Self> {
        let timezone: Tz = file
            .timezone
            .as_deref()
            .unwrap_or(DEFAULT_TIMEZONE)
            .parse()
            .map_err(|e| anyhow::anyhow!("unknown timezone: {e}"))?;

        let mut schedules = Vec::with_capacity(file.schedules.len());
        for section in file.schedules {
            let mut specs = Vec::with_capacity(section.entries.len());
            for entry in &section.entries {
                let spec =
                    TimePointSpec::parse(&entry.time, entry.color_temperature, entry.brightness)
                        .with_context(|| {
                            format!("invalid entry in schedule \"{}\"", section.name)
                        })?;
                specs.push(spec);
            }
            schedules.push(LightSchedule {
                name: section.name,
                devices: section.devices,
                specs,
            });
        }

        Ok(Self {
            latitude: file.location.latitude,
            longitude: file.location.longitude,
            timezone,
            schedules,
        })
    }

    /// Find the schedule associated with a device.
    ///
    /// Validation guarantees a device id appears in at most one schedule, so
    /// the first match is the only match.
    pub fn schedule_for_device(&self, device_id: u32) -> Result<&LightSchedule, ScheduleError> {
        self.schedules
            .iter()
            .find(|schedule| schedule.devices.contains(&device_id))
            .ok_or(ScheduleError::DeviceNotFound { device_id })
    }

    /// Resolve one schedule for one day using this configuration's location
    /// and timezone.
    pub fn resolve_schedule(
        &self,
        schedule: &LightSchedule,
        date: NaiveDate,
        solar: &dyn SolarCalculator,
    ) -> Result<DaySchedule, ScheduleError> {
        let sunrise = solar
            .sunrise(date, self.latitude, self.longitude)?
            .with_timezone(&self.timezone);
        let sunset = solar
            .sunset(date, self.latitude, self.longitude)?
            .with_timezone(&self.timezone);
        compute_schedule(schedule.specs(), sunrise, sunset, date)
    }

    /// Resolve the schedule for a device on a day: device lookup followed by
    /// [`Config::resolve_schedule`].
    pub fn schedule_for_day(
        &self,
        device_id: u32,
        date: NaiveDate,
        solar: &dyn SolarCalculator,
    ) -> Result<DaySchedule, ScheduleError> {
        let schedule = self.schedule_for_device(device_id)?;
        self.resolve_schedule(schedule, date, solar)
    }
}

#[cfg(test)]
mod tests;
