#![cfg(test)]
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use ciphercert_common::config::Config;
use ciphercert_common::error::RunError;
use ciphercert_common::scan::run::RunResult;
use ciphercert_common::scan::target::{Target, TargetList};
use ciphercert_core::api::CipherApi;
use ciphercert_core::error::ApiError;
use ciphercert_core::http::{HttpResponse, MockHttpClient, ReqwestHttpClient};
use ciphercert_core::runner::{BulkRunner, CancelToken};
use tempfile::NamedTempFile;
use tokio::net::TcpListener;

const SCAN: &str = "POST /api/scan";

fn config() -> Config {
    Config {
        api_url: "http://127.0.0.1:8000".into(),
        timeout_secs: 30,
        quiet: 0,
        no_banner: true,
    }
}

fn runner(mock: &MockHttpClient) -> BulkRunner<CipherApi<MockHttpClient>> {
    BulkRunner::new(CipherApi::from_config(mock.clone(), &config()))
}

fn targets_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn names(targets: &[Target]) -> Vec<&str> {
    targets.iter().map(Target::as_str).collect()
}

fn requested_domains(mock: &MockHttpClient) -> Vec<String> {
    mock.get_calls()
        .into_iter()
        .map(|call| {
            let body: serde_json::Value =
                serde_json::from_str(call.body.as_deref().unwrap()).unwrap();
            body["domain"].as_str().unwrap().to_string()
        })
        .collect()
}

/*************************************************************
                       Target files
**************************************************************/

#[tokio::test]
async fn file_run_partitions_in_input_order() {
    let file = targets_file("example.com\n\n  bad.invalid  \nexample.org\n");
    let targets = TargetList::from_file(file.path()).unwrap();

    let mock = MockHttpClient::new();
    mock.add_status(SCAN, 200, "{}");
    mock.add_status(SCAN, 500, r#"{"detail":"Could not resolve hostname"}"#);
    mock.add_status(SCAN, 200, "{}");

    let result: RunResult = runner(&mock).run_batch(&targets).await.unwrap();

    assert_eq!(names(&result.successful), vec!["example.com", "example.org"]);
    assert_eq!(names(&result.failed), vec!["bad.invalid"]);
    assert!(result.skipped.is_empty());
    assert_eq!(result.progress.current, 3);
    assert_eq!(result.progress.total, 3);

    assert_eq!(
        requested_domains(&mock),
        vec!["example.com", "bad.invalid", "example.org"]
    );
}

#[tokio::test]
async fn every_request_carries_the_configured_timeout() {
    let file = targets_file("a.example\nb.example\n");
    let targets = TargetList::from_file(file.path()).unwrap();

    let mock = MockHttpClient::new();
    mock.add_status(SCAN, 200, "{}");
    mock.add_status(SCAN, 201, "{}");

    let result = runner(&mock).run_batch(&targets).await.unwrap();

    assert_eq!(result.successful.len(), 2);
    for call in mock.get_calls() {
        assert_eq!(call.path, "/api/scan");
        assert_eq!(call.endpoint, "http://127.0.0.1:8000");
        assert_eq!(call.timeout, Some(Duration::from_secs(30)));
    }
}

#[tokio::test]
async fn blank_file_is_rejected_without_requests() {
    let file = targets_file("\n   \n\t\n");
    let targets = TargetList::from_file(file.path()).unwrap();

    let mock = MockHttpClient::new();
    let runner = runner(&mock);

    assert_eq!(runner.run_batch(&targets).await, Err(RunError::InvalidInput));
    assert_eq!(mock.call_count(), 0);
    assert!(!runner.is_running());
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(TargetList::from_file(&dir.path().join("nope.txt")).is_err());
}

/*************************************************************
                       Failure handling
**************************************************************/

#[tokio::test]
async fn unreachable_backend_fails_every_target() {
    let targets = TargetList::parse("one.example\ntwo.example\nthree.example");

    let mock = MockHttpClient::new();
    for _ in 0..3 {
        mock.add_response(
            SCAN,
            Err(ApiError::Other(anyhow::anyhow!("connection refused"))),
        );
    }

    let result = runner(&mock).run_batch(&targets).await.unwrap();

    assert!(result.successful.is_empty());
    assert_eq!(
        names(&result.failed),
        vec!["one.example", "two.example", "three.example"]
    );
    assert_eq!(mock.call_count(), 3);
}

#[tokio::test]
async fn redirects_and_client_errors_count_as_failures() {
    let targets = TargetList::parse("moved.example\nforbidden.example\nok.example");

    let mock = MockHttpClient::new();
    mock.add_status(SCAN, 302, "");
    mock.add_status(SCAN, 403, "");
    mock.add_status(SCAN, 200, "{}");

    let result = runner(&mock).run_batch(&targets).await.unwrap();

    assert_eq!(names(&result.failed), vec!["moved.example", "forbidden.example"]);
    assert_eq!(names(&result.successful), vec!["ok.example"]);
}

/// Accepts connections and holds them open without ever answering.
async fn silent_backend() -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicUsize::new(0));

    let counter = accepted.clone();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            held.push(socket);
        }
    });

    (format!("http://{addr}"), accepted)
}

#[tokio::test]
async fn timed_out_attempt_fails_and_run_moves_on() {
    let (endpoint, accepted) = silent_backend().await;
    let api = CipherApi::new(
        ReqwestHttpClient::new(),
        endpoint,
        Some(Duration::from_millis(100)),
    );
    let targets = TargetList::parse("stalled.example
next.example");

    let start = Instant::now();
    let result = BulkRunner::new(api).run_batch(&targets).await.unwrap();

    assert!(result.successful.is_empty());
    assert_eq!(names(&result.failed), vec!["stalled.example", "next.example"]);
    assert_eq!(result.progress.current, 2);
    assert_eq!(accepted.load(Ordering::SeqCst), 2);
    assert!(start.elapsed() < Duration::from_secs(5));
}

/*************************************************************
                       Sequencing
**************************************************************/

#[tokio::test]
async fn attempts_never_overlap() {
    let targets = TargetList::parse("slow.example\nfast.example");

    let mock = MockHttpClient::new();
    let release = mock.add_response_with_trigger(
        SCAN,
        Ok(HttpResponse {
            status: 200,
            body: "{}".into(),
        }),
    );
    mock.add_status(SCAN, 200, "{}");

    let runner = runner(&mock);
    let run = runner.run_batch(&targets);
    tokio::pin!(run);

    // The first request is parked on its trigger, the second must not start
    tokio::select! {
        _ = &mut run => panic!("run finished while the first request was held"),
        _ = tokio::time::sleep(Duration::from_millis(50)) => {}
    }
    assert_eq!(mock.call_count(), 1);
    assert!(runner.is_running());

    release.send(()).unwrap();
    let result = run.await.unwrap();

    assert_eq!(names(&result.successful), vec!["slow.example", "fast.example"]);
    assert_eq!(mock.max_in_flight(), 1);
    assert!(!runner.is_running());
}

#[tokio::test]
async fn second_batch_is_refused_while_one_is_running() {
    let targets = TargetList::parse("held.example");

    let mock = MockHttpClient::new();
    let release = mock.add_response_with_trigger(
        SCAN,
        Ok(HttpResponse {
            status: 200,
            body: "{}".into(),
        }),
    );

    let runner = runner(&mock);
    let first = runner.run_batch(&targets);
    tokio::pin!(first);

    tokio::select! {
        _ = &mut first => panic!("run finished while the request was held"),
        _ = tokio::time::sleep(Duration::from_millis(50)) => {}
    }

    assert_eq!(
        runner.run_batch(&targets).await,
        Err(RunError::AlreadyRunning)
    );

    release.send(()).unwrap();
    assert_eq!(first.await.unwrap().successful.len(), 1);
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn cancelled_run_skips_the_rest() {
    let targets = TargetList::parse("first.example\nsecond.example\nthird.example");

    let mock = MockHttpClient::new();
    let release = mock.add_response_with_trigger(
        SCAN,
        Ok(HttpResponse {
            status: 200,
            body: "{}".into(),
        }),
    );

    let runner = runner(&mock);
    let cancel = CancelToken::new();
    let run = runner.run_batch_with(&targets, &(), &cancel);
    tokio::pin!(run);

    tokio::select! {
        _ = &mut run => panic!("run finished while the request was held"),
        _ = tokio::time::sleep(Duration::from_millis(50)) => {}
    }
    cancel.cancel();
    release.send(()).unwrap();

    let result = run.await.unwrap();
    assert_eq!(names(&result.successful), vec!["first.example"]);
    assert_eq!(names(&result.skipped), vec!["second.example", "third.example"]);
    assert_eq!(result.progress.current, 1);
    assert_eq!(mock.call_count(), 1);
}
