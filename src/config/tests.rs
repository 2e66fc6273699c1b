use chrono::{NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Europe;

use super::*;
use crate::solar::FixedSolarTimes;

const VALID_CONFIG: &str = r#"
timezone = "Europe/Berlin"

[location]
latitude = 52.52
longitude = 13.405

[[schedule]]
name = "living room"
devices = [1, 2]

[[schedule.entry]]
time = "8:00"
color_temperature = 2700
brightness = 80

[[schedule.entry]]
time = "sunrise"
color_temperature = 3000
brightness = 90

[[schedule.entry]]
time = "10:00"
color_temperature = 6000
brightness = 100

[[schedule]]
name = "bedroom"
devices = [7]

[[schedule.entry]]
time = "22:00"
color_temperature = 2000
brightness = 60
"#;

fn test_solar() -> FixedSolarTimes {
    FixedSolarTimes {
        timezone: Europe::Berlin,
        sunrise: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
        sunset: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
    }
}

#[test]
fn loads_valid_configuration() {
    let config = load_from_str(VALID_CONFIG).unwrap();
    assert_eq!(config.timezone, Europe::Berlin);
    assert_eq!(config.latitude, 52.52);
    assert_eq!(config.schedules.len(), 2);

    let living_room = &config.schedules[0];
    assert_eq!(living_room.name(), "living room");
    assert_eq!(living_room.devices(), &[1, 2]);
    assert_eq!(living_room.specs().len(), 3);
    assert_eq!(living_room.specs()[1].text(), "sunrise");
}

#[test]
fn timezone_defaults_to_utc() {
    let config = load_from_str(
        r#"
[location]
latitude = 0.0
longitude = 0.0

[[schedule]]
name = "default"

[[schedule.entry]]
time = "12:00"
color_temperature = 4000
brightness = 100
"#,
    )
    .unwrap();
    assert_eq!(config.timezone, chrono_tz::UTC);
}

#[test]
fn device_lookup_finds_the_owning_schedule() {
    let config = load_from_str(VALID_CONFIG).unwrap();
    assert_eq!(config.schedule_for_device(2).unwrap().name(), "living room");
    assert_eq!(config.schedule_for_device(7).unwrap().name(), "bedroom");
}

#[test]
fn unknown_device_is_not_found() {
    let config = load_from_str(VALID_CONFIG).unwrap();
    let err = config.schedule_for_device(42).unwrap_err();
    assert_eq!(err, ScheduleError::DeviceNotFound { device_id: 42 });
}

#[test]
fn resolves_schedule_for_device_and_day() {
    let config = load_from_str(VALID_CONFIG).unwrap();
    let date = NaiveDate::from_ymd_opt(2021, 4, 28).unwrap();

    let schedule = config.schedule_for_day(1, date, &test_solar()).unwrap();
    assert_eq!(schedule.entries.len(), 5);
    assert_eq!(
        schedule.entries[2].time,
        Europe::Berlin
            .with_ymd_and_hms(2021, 4, 28, 8, 30, 0)
            .unwrap()
    );
    assert_eq!(schedule.entries[2].color_temperature, 3000);
}

#[test]
fn device_lookup_failure_propagates_from_day_resolution() {
    let config = load_from_str(VALID_CONFIG).unwrap();
    let date = NaiveDate::from_ymd_opt(2021, 4, 28).unwrap();
    let err = config.schedule_for_day(42, date, &test_solar()).unwrap_err();
    assert_eq!(err, ScheduleError::DeviceNotFound { device_id: 42 });
}

mod validation_tests {
    use super::*;

    fn config_with(body: &str) -> String {
        format!(
            r#"
[location]
latitude = 52.52
longitude = 13.405

{body}
"#
        )
    }

    const MINIMAL_SCHEDULE: &str = r#"
[[schedule]]
name = "default"

[[schedule.entry]]
time = "12:00"
color_temperature = 4000
brightness = 100
"#;

    #[test]
    fn rejects_out_of_range_coordinates() {
        let text = format!(
            r#"
[location]
latitude = 95.0
longitude = 13.405

{MINIMAL_SCHEDULE}
"#
        );
        let err = load_from_str(&text).unwrap_err();
        assert!(err.to_string().contains("latitude"));

        let text = format!(
            r#"
[location]
latitude = 52.52
longitude = -200.0

{MINIMAL_SCHEDULE}
"#
        );
        let err = load_from_str(&text).unwrap_err();
        assert!(err.to_string().contains("longitude"));
    }

    #[test]
    fn rejects_unknown_timezone() {
        let text = format!("timezone = \"Mars/Olympus_Mons\"\n{}", config_with(MINIMAL_SCHEDULE));
        let err = load_from_str(&text).unwrap_err();
        assert!(err.to_string().contains("timezone"));
    }

    #[test]
    fn rejects_configuration_without_schedules() {
        let err = load_from_str(&config_with("")).unwrap_err();
        assert!(err.to_string().contains("no schedules"));
    }

    #[test]
    fn rejects_schedule_without_entries() {
        let body = r#"
[[schedule]]
name = "empty"
devices = [1]
"#;
        let err = load_from_str(&config_with(body)).unwrap_err();
        assert!(err.to_string().contains("no entries"));
    }

    #[test]
    fn rejects_color_temperature_out_of_range() {
        let body = r#"
[[schedule]]
name = "default"

[[schedule.entry]]
time = "12:00"
color_temperature = 500
brightness = 100
"#;
        let err = load_from_str(&config_with(body)).unwrap_err();
        assert!(err.to_string().contains("color_temperature"));
    }

    #[test]
    fn rejects_brightness_above_one_hundred() {
        let body = r#"
[[schedule]]
name = "default"

[[schedule.entry]]
time = "12:00"
color_temperature = 4000
brightness = 150
"#;
        let err = load_from_str(&config_with(body)).unwrap_err();
        assert!(err.to_string().contains("brightness"));
    }

    #[test]
    fn rejects_device_claimed_by_two_schedules() {
        let body = r#"
[[schedule]]
name = "first"
devices = [1]

[[schedule.entry]]
time = "12:00"
color_temperature = 4000
brightness = 100

[[schedule]]
name = "second"
devices = [1]

[[schedule.entry]]
time = "13:00"
color_temperature = 4000
brightness = 100
"#;
        let err = load_from_str(&config_with(body)).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("device 1"));
        assert!(message.contains("first"));
        assert!(message.contains("second"));
    }

    #[test]
    fn rejects_device_listed_twice_in_one_schedule() {
        let body = r#"
[[schedule]]
name = "repeated"
devices = [1, 1]

[[schedule.entry]]
time = "12:00"
color_temperature = 4000
brightness = 100
"#;
        let err = load_from_str(&config_with(body)).unwrap_err();
        assert!(
            err.to_string()
                .contains("device 1 is listed twice in schedule \"repeated\"")
        );
    }

    #[test]
    fn rejects_unparsable_entry_time() {
        let body = r#"
[[schedule]]
name = "default"

[[schedule.entry]]
time = "sunrise - 1h"
color_temperature = 4000
brightness = 100
"#;
        let err = load_from_str(&config_with(body)).unwrap_err();
        assert!(format!("{err:#}").contains("invalid time point"));
    }
}

mod loading_tests {
    use super::*;

    #[test]
    fn default_configuration_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sunsched.toml");

        create_default_config(&path).unwrap();
        let config = load_from_path(&path).unwrap();

        assert_eq!(config.schedules.len(), 1);
        assert_eq!(config.schedules[0].name(), "default");
        assert_eq!(config.schedules[0].specs().len(), 5);
    }

    #[test]
    fn missing_file_is_a_readable_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = load_from_path(&path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read configuration"));
    }
}
