//! Command-line argument parsing.
//!
//! Hand-rolled parsing for the small flag surface of the preview binary;
//! unknown arguments fall back to the help text rather than erroring
//! cryptically.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Resolve and print schedules with these settings
    Preview {
        /// Explicit configuration file; default path when absent
        config_path: Option<PathBuf>,
        /// Preview only the schedule owning this device; all schedules when absent
        device_id: Option<u32>,
        /// Target date; today in the configured timezone when absent
        date: Option<NaiveDate>,
    },
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
}

impl CliAction {
    /// Parse command-line arguments (without the program name).
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut config_path = None;
        let mut device_id = None;
        let mut date = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(CliAction::ShowHelp),
                "-V" | "--version" => return Ok(CliAction::ShowVersion),
                "--config" => {
                    let value = args.next().context("--config requires a file path")?;
                    config_path = Some(PathBuf::from(value));
                }
                "--device" => {
                    let value = args.next().context("--device requires a device id")?;
                    device_id = Some(
                        value
                            .parse()
                            .with_context(|| format!("invalid device id \"{value}\""))?,
                    );
                }
                "--date" => {
                    let value = args.next().context("--date requires a date")?;
                    date = Some(
                        NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                            .with_context(|| format!("invalid date \"{value}\" (expected YYYY-MM-DD)"))?,
                    );
                }
                _ => return Ok(CliAction::ShowHelp),
            }
        }

        Ok(CliAction::Preview {
            config_path,
            device_id,
            date,
        })
    }
}

/// Print usage information.
pub fn print_help() {
    println!(
        "sunsched v{} - solar-anchored light schedule resolution",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Usage: sunsched [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config <PATH>   Configuration file (default: XDG config directory)");
    println!("  --device <ID>     Resolve the schedule owning this device only");
    println!("  --date <DATE>     Target date as YYYY-MM-DD (default: today)");
    println!("  -h, --help        Print help");
    println!("  -V, --version     Print version");
}

/// Print version information.
pub fn print_version() {
    println!("sunsched v{}", env!("CARGO_PKG_VERSION"));
}
