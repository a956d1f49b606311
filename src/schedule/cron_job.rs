//! Cron-triggered background runs

use crate::run::Orchestrator;
use crate::ScheduleError;
use chrono::{DateTime, Utc};
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Crontab day-of-week numbers (0 and 7 are Sunday) as day names
const DAY_NAMES: [&str; 8] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

/// Parses a cron expression
///
/// Standard 5-field crontab expressions (`min hour dom mon dow`) get a `0`
/// seconds field prepended and their numeric weekdays rewritten as day
/// names, since the `cron` crate numbers weekdays from Sunday = 1. Six and
/// seven field expressions are used as-is.
///
/// # Example
///
/// ```
/// use subgist::schedule::parse_cron;
///
/// assert!(parse_cron("0 */6 * * *").is_ok());
/// assert!(parse_cron("0 9 * * 0").is_ok());
/// assert!(parse_cron("not a schedule").is_err());
/// ```
pub fn parse_cron(expr: &str) -> Result<Schedule, ScheduleError> {
    let expr = expr.trim();
    let fields: Vec<&str> = expr.split_whitespace().collect();
    let normalized = if fields.len() == 5 {
        format!(
            "0 {} {}",
            fields[..4].join(" "),
            crontab_day_of_week(fields[4])
        )
    } else {
        expr.to_string()
    };

    Schedule::from_str(&normalized).map_err(|e| ScheduleError::InvalidCron {
        expr: expr.to_string(),
        message: e.to_string(),
    })
}

/// Rewrites a crontab day-of-week field using day names
///
/// Items that are not plain day numbers (`*`, names, out-of-range values)
/// are passed through for the parser to accept or reject.
pub fn crontab_day_of_week(field: &str) -> String {
    field
        .split(',')
        .map(translate_day_item)
        .collect::<Vec<_>>()
        .join(",")
}

fn translate_day_item(item: &str) -> String {
    let (base, step) = match item.split_once('/') {
        Some((base, step)) => (base, Some(step)),
        None => (item, None),
    };

    let translated = match base.split_once('-') {
        Some((start, end)) => match (day_index(start), day_index(end)) {
            // `n-7` wraps onto Sunday, which sorts first in the crate's numbering
            (Some(0), Some(7)) => "SUN-SAT".to_string(),
            (Some(7), Some(7)) => "SUN".to_string(),
            (Some(start), Some(7)) if step.is_none() => format!("{}-SAT,SUN", DAY_NAMES[start]),
            (Some(start), Some(7)) => format!("{}-SAT", DAY_NAMES[start]),
            (Some(start), Some(end)) => format!("{}-{}", DAY_NAMES[start], DAY_NAMES[end]),
            _ => base.to_string(),
        },
        None => day_index(base)
            .map(|day| DAY_NAMES[day].to_string())
            .unwrap_or_else(|| base.to_string()),
    };

    match step {
        Some(step) => format!("{}/{}", translated, step),
        None => translated,
    }
}

fn day_index(value: &str) -> Option<usize> {
    value.parse::<usize>().ok().filter(|day| *day < DAY_NAMES.len())
}

/// Delay from `now` until the schedule's next fire time
pub fn next_delay(schedule: &Schedule, now: DateTime<Utc>) -> Option<Duration> {
    schedule
        .after(&now)
        .next()
        .map(|next| (next - now).to_std().unwrap_or(Duration::ZERO))
}

/// Handle to a background cron job
///
/// The job is aborted when the handle is dropped.
pub struct CronJob {
    expr: String,
    handle: JoinHandle<()>,
}

impl CronJob {
    /// Starts a background task that runs the orchestrator on every trigger
    ///
    /// Triggers that fire while a run is still in progress are not queued;
    /// the next wait starts once the run completes.
    pub fn spawn(orchestrator: Arc<Orchestrator>, expr: &str) -> Result<Self, ScheduleError> {
        let schedule = parse_cron(expr)?;
        let expr = expr.trim().to_string();
        let task_expr = expr.clone();

        let handle = tokio::spawn(async move {
            loop {
                let Some(delay) = next_delay(&schedule, Utc::now()) else {
                    tracing::warn!("Cron schedule '{}' has no upcoming triggers", task_expr);
                    break;
                };
                tracing::debug!("Next cron run in {}s", delay.as_secs());
                tokio::time::sleep(delay).await;

                tracing::info!("Cron trigger '{}' fired", task_expr);
                let outcome = orchestrator.run().await;
                if !outcome.success {
                    tracing::warn!("Scheduled run failed: {}", outcome.message);
                }
            }
        });

        tracing::info!("Registered cron job '{}'", expr);
        Ok(Self { expr, handle })
    }

    pub fn expr(&self) -> &str {
        &self.expr
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stops the background task
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for CronJob {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
