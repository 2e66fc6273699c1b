//! Application-wide constants.

/// Margin inserted when a solar anchor is slid past a neighboring time point,
/// in minutes. Guarantees strict ordering between the clamped entry and the
/// neighbor it would otherwise invert with.
pub const ORDERING_MARGIN_MINUTES: i64 = 1;

/// Largest accepted solar offset magnitude, in minutes (one day). Keeps
/// anchor arithmetic far from `chrono::Duration` overflow.
pub const MAX_SOLAR_OFFSET_MINUTES: i64 = 1440;

/// Minimum configurable color temperature in Kelvin
pub const MINIMUM_COLOR_TEMP: u32 = 1000;
/// Maximum configurable color temperature in Kelvin
pub const MAXIMUM_COLOR_TEMP: u32 = 10000;

/// Maximum configurable brightness percentage
pub const MAXIMUM_BRIGHTNESS: u8 = 100;

/// Timezone assumed when the configuration does not name one
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "sunsched.toml";

/// Process exit code for fatal errors
pub const EXIT_FAILURE: i32 = 1;
