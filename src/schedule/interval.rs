//! Fixed-interval run loop

use crate::run::{Orchestrator, RunOutcome};
use std::time::Duration;

/// Runs the orchestrator, sleeps for `interval`, and repeats
///
/// Runs never overlap: the sleep starts only after a run has finished.
/// With `max_runs` set, the loop returns the outcomes after that many runs
/// (without sleeping after the last one); otherwise it never returns.
pub async fn run_interval(
    orchestrator: &Orchestrator,
    interval: Duration,
    max_runs: Option<usize>,
) -> Vec<RunOutcome> {
    let mut outcomes = Vec::new();
    let mut completed = 0usize;

    loop {
        let outcome = orchestrator.run().await;
        completed += 1;
        if outcome.success {
            tracing::info!("Run {} succeeded: {}", completed, outcome.message);
        } else {
            tracing::warn!("Run {} failed: {}", completed, outcome.message);
        }

        if max_runs.is_some() {
            outcomes.push(outcome);
        }
        if max_runs.is_some_and(|max| completed >= max) {
            return outcomes;
        }

        tracing::info!("Next run in {}s", interval.as_secs());
        tokio::time::sleep(interval).await;
    }
}
