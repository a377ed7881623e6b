#![cfg(test)]
use ciphercert_common::history::report::{CSV_HEADER, HistorySummary};
use ciphercert_common::scan::target::TargetList;
use ciphercert_core::api::CipherApi;
use ciphercert_core::error::ApiError;
use ciphercert_core::history::HistoryService;
use ciphercert_core::http::MockHttpClient;
use ciphercert_core::runner::BulkRunner;
use reqwest::Method;

const ENDPOINT: &str = "http://127.0.0.1:8000";

const STORED: &str = r#"[
    {"id": 2, "domain": "example.org", "status": "warning", "issuer": "Sectigo, Ltd", "expiryDate": "Nov 02, 2026", "grade": "B", "score": 75, "timestamp": "2026-10-18 09:00:05"},
    {"id": 1, "domain": "example.com", "status": "secure", "issuer": "R3", "expiryDate": "Jan 05, 2027", "grade": "A", "score": 92, "timestamp": "2026-10-18 09:00:01"}
]"#;

fn api(mock: &MockHttpClient) -> CipherApi<MockHttpClient> {
    CipherApi::new(mock.clone(), ENDPOINT, None)
}

/// A bulk run stores scans on the backend; the history view reads them back.
#[tokio::test]
async fn bulk_run_then_history() {
    let mock = MockHttpClient::new();
    mock.add_status("POST /api/scan", 200, "{}");
    mock.add_status("POST /api/scan", 500, "");
    mock.add_status("POST /api/scan", 200, "{}");
    mock.add_status("GET /api/history", 200, STORED);

    let targets = TargetList::parse("example.com\nbad.invalid\nexample.org");
    let result = BulkRunner::new(api(&mock)).run_batch(&targets).await.unwrap();
    assert_eq!(result.successful.len(), 2);

    let records = HistoryService::new(api(&mock)).records(None).await.unwrap();
    let domains: Vec<&str> = records.iter().map(|r| r.domain.as_str()).collect();
    assert_eq!(domains, vec!["example.org", "example.com"]);

    let methods: Vec<Method> = mock.get_calls().into_iter().map(|c| c.method).collect();
    assert_eq!(
        methods,
        vec![Method::POST, Method::POST, Method::POST, Method::GET]
    );
}

#[tokio::test]
async fn search_matches_issuer_case_insensitively() {
    let mock = MockHttpClient::new();
    mock.add_status("GET /api/history", 200, STORED);

    let records = HistoryService::new(api(&mock))
        .records(Some("sectigo"))
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].domain, "example.org");
}

#[tokio::test]
async fn export_writes_quoted_csv() {
    let mock = MockHttpClient::new();
    mock.add_status("GET /api/history", 200, STORED);

    let (csv, rows) = HistoryService::new(api(&mock))
        .export_csv(None)
        .await
        .unwrap();

    assert_eq!(rows, 2);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(
        lines[1],
        r#"2026-10-18 09:00:05,example.org,warning,B,"Sectigo, Ltd","Nov 02, 2026""#
    );
    assert_eq!(
        lines[2],
        r#"2026-10-18 09:00:01,example.com,secure,A,R3,"Jan 05, 2027""#
    );
}

#[tokio::test]
async fn export_with_no_match_is_header_only() {
    let mock = MockHttpClient::new();
    mock.add_status("GET /api/history", 200, STORED);

    let (csv, rows) = HistoryService::new(api(&mock))
        .export_csv(Some("nothing-like-this"))
        .await
        .unwrap();

    assert_eq!(rows, 0);
    assert_eq!(csv, CSV_HEADER);
}

#[tokio::test]
async fn dashboard_counts_statuses() {
    let mock = MockHttpClient::new();
    mock.add_status("GET /api/history", 200, STORED);

    let summary = HistoryService::new(api(&mock)).summary().await.unwrap();

    assert_eq!(
        summary,
        HistorySummary {
            total: 2,
            secure: 1,
            warning: 1,
            expired: 0,
            average_score: 84,
        }
    );
}

#[tokio::test]
async fn clear_sends_delete_and_surfaces_errors() {
    let mock = MockHttpClient::new();
    mock.add_status("DELETE /api/history", 200, r#"{"message":"History cleared successfully"}"#);
    mock.add_status("DELETE /api/history", 503, "down");

    let service = HistoryService::new(api(&mock));
    service.clear().await.unwrap();

    match service.clear().await {
        Err(ApiError::Status { status, .. }) => assert_eq!(status, 503),
        other => panic!("expected a status error, got {other:?}"),
    }
    assert_eq!(mock.call_count(), 2);
}
