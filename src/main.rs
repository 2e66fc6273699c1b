//! sunsched binary: resolve and print light schedules.
//!
//! Loads the configuration, resolves the requested day's schedule for one
//! device or for every configured schedule, and prints the resulting
//! sequence. The surrounding daemon that sleeps until the next entry and
//! drives the lights is a separate concern; this binary exists to inspect
//! what that daemon would do.

use anyhow::Result;
use chrono::{NaiveDate, Utc};

use sunsched::args::{self, CliAction};
use sunsched::config::{self, Config};
use sunsched::constants::EXIT_FAILURE;
use sunsched::schedule::DaySchedule;
use sunsched::solar::SolarTimes;
use sunsched::{
    log_block_start, log_decorated, log_end, log_error, log_indented, log_pipe, log_version,
};

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            log_pipe!();
            log_error!("{e:#}");
            log_end!();
            std::process::exit(EXIT_FAILURE);
        }
    }
}

fn run() -> Result<()> {
    let action = CliAction::from_args(std::env::args().skip(1))?;
    match action {
        CliAction::ShowHelp => {
            args::print_help();
            Ok(())
        }
        CliAction::ShowVersion => {
            args::print_version();
            Ok(())
        }
        CliAction::Preview {
            config_path,
            device_id,
            date,
        } => preview(config_path, device_id, date),
    }
}

fn preview(
    config_path: Option<std::path::PathBuf>,
    device_id: Option<u32>,
    date: Option<NaiveDate>,
) -> Result<()> {
    log_version!();

    let config = match config_path {
        Some(path) => config::load_from_path(&path)?,
        None => config::load()?,
    };
    let date = date.unwrap_or_else(|| Utc::now().with_timezone(&config.timezone).date_naive());
    let solar = SolarTimes;

    match device_id {
        Some(id) => {
            let schedule = config.schedule_for_day(id, date, &solar)?;
            let name = config.schedule_for_device(id)?.name().to_owned();
            print_schedule(&name, &config, &schedule);
        }
        None => {
            for light_schedule in &config.schedules {
                let schedule = config.resolve_schedule(light_schedule, date, &solar)?;
                print_schedule(light_schedule.name(), &config, &schedule);
            }
        }
    }

    log_end!();
    Ok(())
}

fn print_schedule(name: &str, config: &Config, schedule: &DaySchedule) {
    log_block_start!("Schedule \"{}\" on {}", name, schedule.date);
    log_indented!("Sunrise: {}", schedule.sunrise.format("%H:%M"));
    log_indented!(" Sunset: {}", schedule.sunset.format("%H:%M"));
    for entry in &schedule.entries {
        log_indented!(
            "{} → {}K at {}%",
            entry.time.format("%Y-%m-%d %H:%M"),
            entry.color_temperature,
            entry.brightness
        );
    }

    let now = Utc::now().with_timezone(&config.timezone);
    if let Some(active) = schedule.active_entry(now) {
        log_decorated!(
            "Active now: {}K at {}%",
            active.color_temperature,
            active.brightness
        );
    }
}
