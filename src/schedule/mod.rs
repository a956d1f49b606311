//! Scheduling shell
//!
//! Chooses how runs are triggered:
//! - once, then exit
//! - in a fixed-interval loop
//! - from a cron job alongside the HTTP trigger (server mode)

mod cron_job;
mod interval;

pub use cron_job::{next_delay, parse_cron, CronJob};
pub use interval::run_interval;

use crate::config::ScheduleConfig;
use std::time::Duration;

/// Execution mode of the process
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// One run, then exit
    Once,
    /// Run, sleep, repeat
    Interval(Duration),
    /// HTTP trigger on `port`, plus a cron job when an expression is set
    Serve { port: u16, cron: Option<String> },
}

/// Picks the execution mode
///
/// # Arguments
///
/// * `schedule` - Scheduling settings from the config
/// * `serve` - Whether the HTTP server was requested
/// * `force_once` - Run once even if an interval or cron schedule is configured
///
/// A configured cron expression implies server mode, since cron runs only
/// happen while the process stays up.
pub fn select_mode(schedule: &ScheduleConfig, serve: bool, force_once: bool) -> Mode {
    if serve || (schedule.cron.is_some() && !force_once) {
        return Mode::Serve {
            port: schedule.web_port,
            cron: schedule.cron.clone(),
        };
    }

    match schedule.interval {
        Some(interval) if !force_once => Mode::Interval(interval),
        _ => Mode::Once,
    }
}
