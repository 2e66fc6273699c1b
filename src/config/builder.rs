//! Default configuration generation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Template written on first run. The schedule mirrors a common household
/// cycle: dim warm light before dawn, full bright daylight from sunrise,
/// warming back down through the evening.
const DEFAULT_CONFIG: &str = r#"# sunsched configuration
#
# Entry times may be a fixed clock time ("8:00"), a solar event ("sunrise",
# "sunset"), or a solar event with a signed minute offset ("sunset - 30m").
# Entries are listed in the order the light should move through them.

# timezone = "Europe/Berlin"   # IANA name; defaults to UTC

[location]
latitude = 52.52
longitude = 13.405

[[schedule]]
name = "default"
devices = []

[[schedule.entry]]
time = "4:00"
color_temperature = 2000
brightness = 60

[[schedule.entry]]
time = "sunrise"
color_temperature = 2750
brightness = 100

[[schedule.entry]]
time = "sunset - 30m"
color_temperature = 2750
brightness = 100

[[schedule.entry]]
time = "20:00"
color_temperature = 2300
brightness = 80

[[schedule.entry]]
time = "22:00"
color_temperature = 2000
brightness = 60
"#;

/// Write the default configuration to `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))?;
    log_decorated!("Default configuration generated at {}", path.display());
    Ok(())
}
