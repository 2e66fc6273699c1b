//! Solar event calculation behind a substitutable trait.
//!
//! Schedule resolution treats sunrise and sunset as opaque instants supplied
//! by a collaborator. [`SolarTimes`] is the production implementation backed
//! by the `sunrise` crate's astronomical model; [`FixedSolarTimes`] is a
//! deterministic stand-in for tests and for embedders that already know
//! their solar times.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use sunrise::{Coordinates, SolarDay, SolarEvent};

use crate::error::ScheduleError;

/// Pure source of sunrise/sunset instants for a date and location.
pub trait SolarCalculator {
    /// The sunrise instant on `date` at the given coordinates.
    fn sunrise(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
    ) -> Result<DateTime<Utc>, ScheduleError>;

    /// The sunset instant on `date` at the given coordinates.
    fn sunset(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
    ) -> Result<DateTime<Utc>, ScheduleError>;
}

/// Astronomical sunrise/sunset calculation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolarTimes;

impl SolarTimes {
    fn event(
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
        event: SolarEvent,
    ) -> Result<DateTime<Utc>, ScheduleError> {
        let coord = Coordinates::new(latitude, longitude).ok_or_else(|| {
            ScheduleError::Solar(format!("invalid coordinates {latitude:.4}, {longitude:.4}"))
        })?;
        Ok(SolarDay::new(coord, date).event_time(event))
    }
}

impl SolarCalculator for SolarTimes {
    fn sunrise(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
    ) -> Result<DateTime<Utc>, ScheduleError> {
        Self::event(date, latitude, longitude, SolarEvent::Sunrise)
    }

    fn sunset(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
    ) -> Result<DateTime<Utc>, ScheduleError> {
        Self::event(date, latitude, longitude, SolarEvent::Sunset)
    }
}

/// Deterministic solar calculator returning the same local times every day.
///
/// Coordinates are ignored; the configured wall-clock times are interpreted
/// in `timezone` on the requested date.
#[derive(Debug, Clone, Copy)]
pub struct FixedSolarTimes {
    pub timezone: Tz,
    pub sunrise: NaiveTime,
    pub sunset: NaiveTime,
}

impl FixedSolarTimes {
    fn at(&self, date: NaiveDate, time: NaiveTime) -> Result<DateTime<Utc>, ScheduleError> {
        self.timezone
            .from_local_datetime(&date.and_time(time))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or(ScheduleError::InvalidLocalTime { date, time })
    }
}

impl SolarCalculator for FixedSolarTimes {
    fn sunrise(
        &self,
        date: NaiveDate,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<DateTime<Utc>, ScheduleError> {
        self.at(date, self.sunrise)
    }

    fn sunset(
        &self,
        date: NaiveDate,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<DateTime<Utc>, ScheduleError> {
        self.at(date, self.sunset)
    }
}
