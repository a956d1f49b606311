//! Interval and cron scheduling tests

use crate::common::{link_file, test_source};
use std::sync::Arc;
use std::time::{Duration, Instant};
use subgist::schedule::{run_interval, CronJob};
use subgist::Orchestrator;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_interval_runs_do_not_overlap() {
    let server = MockServer::start().await;
    let file = link_file("vmess://abc\n");

    Mock::given(method("GET"))
        .and(path("/sub"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("merged")
                .set_delay(Duration::from_millis(100)),
        )
        .expect(3)
        .mount(&server)
        .await;

    let orchestrator = Orchestrator::new(test_source(&server, &file.path().to_string_lossy()))
        .expect("Failed to build orchestrator");
    let interval = Duration::from_millis(200);

    let start = Instant::now();
    let outcomes = run_interval(&orchestrator, interval, Some(3)).await;
    let elapsed = start.elapsed();

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes.iter().all(|o| o.success));
    // Two sleeps between three runs
    assert!(elapsed >= interval * 2);

    for pair in outcomes.windows(2) {
        let gap = pair[1].started_at - pair[0].finished_at;
        assert!(gap.num_milliseconds() >= 200);
    }
}

#[tokio::test]
async fn test_interval_continues_after_failed_run() {
    let orchestrator = Orchestrator::new(
        subgist::config::MapSource::new().with("SOURCE_FILE", "/nonexistent/subgist/links.txt"),
    )
    .expect("Failed to build orchestrator");

    let outcomes = run_interval(&orchestrator, Duration::from_millis(10), Some(2)).await;

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| !o.success));
}

#[tokio::test]
async fn test_cron_job_triggers_runs() {
    let server = MockServer::start().await;
    let file = link_file("vmess://abc\n");

    Mock::given(method("GET"))
        .and(path("/sub"))
        .respond_with(ResponseTemplate::new(200).set_body_string("merged"))
        .mount(&server)
        .await;

    let orchestrator = Orchestrator::new(test_source(&server, &file.path().to_string_lossy()))
        .expect("Failed to build orchestrator");

    // Every second
    let job = CronJob::spawn(Arc::new(orchestrator), "* * * * * *").expect("Failed to spawn");
    assert!(job.is_running());

    tokio::time::sleep(Duration::from_millis(2500)).await;
    job.stop();

    let requests = server
        .received_requests()
        .await
        .expect("Request recording disabled");
    assert!(!requests.is_empty());
}
