//! Askama templates for the trigger pages
//!
//! Template files live in `templates/`; askama escapes every interpolated
//! value, so log text and messages can be passed through as-is.

use crate::links::LinkOrigin;
use crate::run::RunOutcome;
use askama::Template;

/// Landing page describing the service.
#[derive(Template, Debug)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    /// Active cron expression, if scheduled runs are enabled
    pub cron: Option<&'a str>,
}

/// Result page for a triggered run.
///
/// Shows the outcome message, the link source and the captured run log.
#[derive(Template, Debug)]
#[template(path = "outcome.html")]
pub struct OutcomeTemplate<'a> {
    pub success: bool,
    /// "Success" or "Failed"
    pub status: &'a str,
    pub message: &'a str,
    pub origin: Option<LinkOrigin>,
    pub link_count: usize,
    pub duration_ms: i64,
    /// Captured log lines of this run only
    pub log: &'a str,
}

impl<'a> OutcomeTemplate<'a> {
    pub fn new(outcome: &'a RunOutcome) -> Self {
        Self {
            success: outcome.success,
            status: if outcome.success { "Success" } else { "Failed" },
            message: &outcome.message,
            origin: outcome.origin,
            link_count: outcome.link_count,
            duration_ms: (outcome.finished_at - outcome.started_at).num_milliseconds(),
            log: &outcome.log,
        }
    }
}

pub fn render_index(cron: Option<&str>) -> askama::Result<String> {
    IndexTemplate { cron }.render()
}

pub fn render_outcome(outcome: &RunOutcome) -> askama::Result<String> {
    OutcomeTemplate::new(outcome).render()
}
