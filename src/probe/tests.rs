//! Probe tests against a local HTTP server serving the temp document root.

use super::*;
use std::path::PathBuf;
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use crate::error_handling::{ErrorType, ProcessingStats};

/// Serves files from a directory, like the web server in front of a document root.
struct ServeDir(PathBuf);

impl Respond for ServeDir {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let file = self.0.join(request.url.path().trim_start_matches('/'));
        match std::fs::read_to_string(file) {
            Ok(body) => ResponseTemplate::new(200).set_body_string(body),
            Err(_) => ResponseTemplate::new(404),
        }
    }
}

fn test_client() -> Arc<reqwest::Client> {
    Arc::new(
        reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("client"),
    )
}

fn prober(strict: bool) -> (HttpProber, Arc<ProcessingStats>) {
    let stats = Arc::new(ProcessingStats::new());
    let prober = HttpProber::new(test_client(), "mismatch.txt", strict, Arc::clone(&stats));
    (prober, stats)
}

fn host_of(server: &MockServer) -> String {
    server.address().to_string()
}

#[tokio::test]
async fn test_probe_success_removes_marker() {
    let root = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mismatch.txt"))
        .respond_with(ServeDir(root.path().to_path_buf()))
        .expect(1)
        .mount(&server)
        .await;

    let (prober, stats) = prober(false);
    assert!(prober.probe(&host_of(&server), Some(root.path())).await);
    assert!(!root.path().join("mismatch.txt").exists());
    assert_eq!(stats.total_errors(), 0);
}

#[tokio::test]
async fn test_probe_any_response_counts_as_reachable() {
    let root = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (prober, _) = prober(false);
    assert!(prober.probe(&host_of(&server), Some(root.path())).await);
    assert!(!root.path().join("mismatch.txt").exists());
}

#[tokio::test]
async fn test_probe_fetch_failure_removes_marker() {
    let root = tempfile::tempdir().unwrap();
    let (prober, stats) = prober(false);
    // Nothing listens on the discard port
    assert!(!prober.probe("127.0.0.1:9", Some(root.path())).await);
    assert!(!root.path().join("mismatch.txt").exists());
    assert_eq!(stats.get_error_count(ErrorType::ProbeFetchError), 1);
}

#[tokio::test]
async fn test_probe_without_document_root() {
    let (prober, stats) = prober(false);
    assert!(!prober.probe("d.example", None).await);
    assert_eq!(stats.get_error_count(ErrorType::ProbeMissingRoot), 1);
}

#[tokio::test]
async fn test_probe_nonexistent_or_file_root() {
    let dir = tempfile::tempdir().unwrap();
    let (prober, stats) = prober(false);

    let missing = dir.path().join("public_html");
    assert!(!prober.probe("d.example", Some(&missing)).await);

    let file = dir.path().join("not-a-dir");
    std::fs::write(&file, "x").unwrap();
    assert!(!prober.probe("d.example", Some(&file)).await);

    assert_eq!(stats.get_error_count(ErrorType::ProbeMissingRoot), 2);
    // No marker was ever created next to the file
    assert!(!dir.path().join("mismatch.txt").exists());
}

#[tokio::test]
async fn test_strict_probe_requires_marker_content() {
    let root = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("parked domain"))
        .mount(&server)
        .await;

    let (prober, stats) = prober(true);
    assert!(!prober.probe(&host_of(&server), Some(root.path())).await);
    assert_eq!(stats.get_error_count(ErrorType::ProbeMarkerNotServed), 1);
    assert!(!root.path().join("mismatch.txt").exists());
}

#[tokio::test]
async fn test_strict_probe_served_from_document_root() {
    let root = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ServeDir(root.path().to_path_buf()))
        .mount(&server)
        .await;

    let (prober, _) = prober(true);
    assert!(prober.probe(&host_of(&server), Some(root.path())).await);
    assert!(!root.path().join("mismatch.txt").exists());
}

#[tokio::test]
async fn test_probe_twice_leaves_nothing_behind() {
    let root = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ServeDir(root.path().to_path_buf()))
        .expect(2)
        .mount(&server)
        .await;

    let (prober, _) = prober(true);
    let host = host_of(&server);
    assert!(prober.probe(&host, Some(root.path())).await);
    assert!(prober.probe(&host, Some(root.path())).await);
    assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_marker_file_dropped_is_removed() {
    let root = tempfile::tempdir().unwrap();
    let marker = MarkerFile::create(root.path(), "mismatch.txt", "IP mismatch for x\n")
        .await
        .unwrap();
    let path = marker.path().unwrap().to_path_buf();
    assert!(path.exists());
    drop(marker);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_marker_remove_tolerates_missing_file() {
    let root = tempfile::tempdir().unwrap();
    let marker = MarkerFile::create(root.path(), "mismatch.txt", "x")
        .await
        .unwrap();
    std::fs::remove_file(root.path().join("mismatch.txt")).unwrap();
    assert!(marker.remove().await.is_ok());
}

#[test]
fn test_marker_content_names_domain() {
    let at = chrono::DateTime::parse_from_rfc3339("2026-10-16T08:00:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);
    let content = marker_content("b.example", at);
    assert!(content.starts_with("IP mismatch for b.example\n"));
    assert!(content.contains("2026-10-16T08:00:00+00:00"));
}

#[tokio::test]
async fn test_probe_leaves_existing_site_file_alone() {
    let root = tempfile::tempdir().unwrap();
    let existing = root.path().join("mismatch.txt");
    std::fs::write(&existing, "site owner's own content").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (prober, stats) = prober(false);
    assert!(!prober.probe(&host_of(&server), Some(root.path())).await);
    assert_eq!(
        std::fs::read_to_string(&existing).unwrap(),
        "site owner's own content"
    );
    assert_eq!(stats.get_error_count(ErrorType::ProbeWriteError), 1);
}

#[tokio::test]
async fn test_marker_create_refuses_existing_file() {
    let root = tempfile::tempdir().unwrap();
    let existing = root.path().join("mismatch.txt");
    std::fs::write(&existing, "keep me").unwrap();

    let err = MarkerFile::create(root.path(), "mismatch.txt", "IP mismatch for x\n")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ProbeError::WriteFailed { ref source, .. }
            if source.kind() == std::io::ErrorKind::AlreadyExists
    ));
    assert_eq!(std::fs::read_to_string(&existing).unwrap(), "keep me");
}
