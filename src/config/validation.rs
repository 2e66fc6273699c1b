//! Configuration validation.
//!
//! Checks the deserialized document before it is compiled into runtime
//! values, so a misconfigured file fails at load time with a message naming
//! the offending field rather than surfacing later during resolution.

use anyhow::Result;
use chrono_tz::Tz;
use std::collections::HashMap;

use super::ConfigFile;
use crate::constants::{MAXIMUM_BRIGHTNESS, MAXIMUM_COLOR_TEMP, MINIMUM_COLOR_TEMP};

/// Validate a configuration document.
pub(crate) fn validate_config(file: &ConfigFile) -> Result<()> {
    let lat = file.location.latitude;
    if !(-90.0..=90.0).contains(&lat) {
        anyhow::bail!("latitude must be between -90 and 90 degrees (got {})", lat);
    }

    let lon = file.location.longitude;
    if !(-180.0..=180.0).contains(&lon) {
        anyhow::bail!(
            "longitude must be between -180 and 180 degrees (got {})",
            lon
        );
    }

    if let Some(tz) = file.timezone.as_deref()
        && tz.parse::<Tz>().is_err()
    {
        anyhow::bail!("timezone \"{}\" is not a known IANA timezone", tz);
    }

    if file.schedules.is_empty() {
        anyhow::bail!("configuration defines no schedules");
    }

    // A device driven by two schedules would have two competing states for
    // the same instant; reject instead of picking one.
    let mut device_owners: HashMap<u32, usize> = HashMap::new();
    for (index, schedule) in file.schedules.iter().enumerate() {
        if schedule.name.trim().is_empty() {
            anyhow::bail!("every schedule must have a non-empty name");
        }

        if schedule.entries.is_empty() {
            anyhow::bail!("schedule \"{}\" has no entries", schedule.name);
        }

        for device in &schedule.devices {
            if let Some(owner) = device_owners.insert(*device, index) {
                if owner == index {
                    anyhow::bail!(
                        "device {} is listed twice in schedule \"{}\"",
                        device,
                        schedule.name
                    );
                }
                anyhow::bail!(
                    "device {} is associated with both \"{}\" and \"{}\"",
                    device,
                    file.schedules[owner].name,
                    schedule.name
                );
            }
        }

        for entry in &schedule.entries {
            if !(MINIMUM_COLOR_TEMP..=MAXIMUM_COLOR_TEMP).contains(&entry.color_temperature) {
                anyhow::bail!(
                    "color_temperature ({}) in schedule \"{}\" must be between {} and {} Kelvin",
                    entry.color_temperature,
                    schedule.name,
                    MINIMUM_COLOR_TEMP,
                    MAXIMUM_COLOR_TEMP
                );
            }

            if entry.brightness > MAXIMUM_BRIGHTNESS {
                anyhow::bail!(
                    "brightness ({}%) in schedule \"{}\" must not exceed {}%",
                    entry.brightness,
                    schedule.name,
                    MAXIMUM_BRIGHTNESS
                );
            }
        }
    }

    Ok(())
}
