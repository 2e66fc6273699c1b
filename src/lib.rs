//! # Sunsched Library
//!
//! Internal library for the sunsched binary and for embedding the schedule
//! resolver in other daemons.
//!
//! Sunsched computes, for one device and one calendar day, the ordered
//! sequence of target lighting states (color temperature, brightness) the
//! device should move through. Each configured time point is anchored either
//! to a fixed clock time (`"8:00"`) or to a solar event with an optional
//! signed offset (`"sunrise"`, `"sunset - 45m"`). Because sunrise and sunset
//! drift day to day, a solar-anchored point can land on the wrong side of a
//! fixed neighbor; the resolver slides solar anchors just far enough to
//! restore the configured order, or reports the configuration as
//! unsatisfiable when no slide can.
//!
//! ## Architecture
//!
//! - **Schedule resolution**: `schedule` module with the time-point parser
//!   and the two-pass clamping engine producing a [`DaySchedule`]
//! - **Solar events**: `solar` module wrapping the astronomical calculation
//!   behind the [`solar::SolarCalculator`] trait
//! - **Configuration**: `config` module for TOML-based schedule definitions
//!   with validation and per-device lookup
//! - **Infrastructure**: structured logging and error types

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod config;
pub mod constants;
pub mod error;
pub mod schedule;
pub mod solar;

pub use error::ScheduleError;
pub use schedule::{Anchor, DaySchedule, ResolvedTimestamp, TimePointSpec, compute_schedule};
