use httpmock::prelude::*;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};
use visitor_counter::core::{DisplayOutcome, DisplayState};
use visitor_counter::{
    AnimationSettings, CounterError, HttpCountSource, RecordingDisplay, TerminalDisplay,
    VisitorDisplay,
};

fn quick_settings() -> AnimationSettings {
    AnimationSettings {
        start_from: 0,
        duration: Duration::from_millis(50),
        frame_interval: Duration::from_millis(5),
    }
}

async fn run_against(server: &MockServer, path: &str) -> (DisplayOutcome, RecordingDisplay) {
    let recorder = RecordingDisplay::new();
    let source = HttpCountSource::new(server.url(path), None).unwrap();
    let mut visitor_display = VisitorDisplay::with_settings(source, recorder.clone(), quick_settings());
    let outcome = visitor_display.run().await.unwrap();
    (outcome, recorder)
}

fn assert_error_state(recorder: &RecordingDisplay) {
    assert_eq!(
        recorder.states(),
        vec![DisplayState::Loading, DisplayState::Error]
    );
    assert!(recorder.counts().is_empty());
}

#[tokio::test]
async fn test_envelope_response_animates_to_count() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/prod/visitor-count")
            .header("Content-Type", "application/json")
            .body("{}");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "statusCode": 200,
                "body": "{\"count\":1337,\"timestamp\":1700000000000,\"action\":\"increment\"}"
            }));
    });

    let (outcome, recorder) = run_against(&server, "/prod/visitor-count").await;

    api_mock.assert();
    assert!(matches!(outcome, DisplayOutcome::Displayed { count: 1337, .. }));

    let counts = recorder.counts();
    assert_eq!(counts.last(), Some(&1337));
    for pair in counts.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
    assert_eq!(recorder.states()[0], DisplayState::Loading);
}

#[tokio::test]
async fn test_flat_response_animates_to_count() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/count");
        then.status(200).json_body(serde_json::json!({"count": 42}));
    });

    let (outcome, recorder) = run_against(&server, "/count").await;

    api_mock.assert();
    assert!(outcome.is_displayed());
    assert_eq!(recorder.last(), Some(DisplayState::Count(42.into())));
}

#[tokio::test]
async fn test_server_error_shows_error_without_retry() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/count");
        then.status(500)
            .json_body(serde_json::json!({"error": "Failed to increment visitor count"}));
    });

    let (outcome, recorder) = run_against(&server, "/count").await;

    api_mock.assert_hits(1);
    assert!(matches!(
        outcome,
        DisplayOutcome::Failed {
            error: CounterError::HttpStatusError { status: 500 }
        }
    ));
    assert_error_state(&recorder);
}

#[tokio::test]
async fn test_client_error_shows_error() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/count");
        then.status(405).json_body(serde_json::json!({"count": 10}));
    });

    let (outcome, recorder) = run_against(&server, "/count").await;

    api_mock.assert_hits(1);
    assert!(!outcome.is_displayed());
    assert_error_state(&recorder);
}

#[tokio::test]
async fn test_missing_count_field_shows_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/count");
        then.status(200)
            .json_body(serde_json::json!({"body": "{\"visits\": 3}"}));
    });

    let (outcome, recorder) = run_against(&server, "/count").await;

    assert!(matches!(
        outcome,
        DisplayOutcome::Failed {
            error: CounterError::MissingCountError { .. }
        }
    ));
    assert_error_state(&recorder);
}

#[tokio::test]
async fn test_non_json_body_shows_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/count");
        then.status(200).body("Internal server error");
    });

    let (outcome, recorder) = run_against(&server, "/count").await;

    assert!(!outcome.is_displayed());
    assert_error_state(&recorder);
}

#[tokio::test]
async fn test_timeout_shows_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/slow");
        then.status(200)
            .delay(Duration::from_secs(3))
            .json_body(serde_json::json!({"count": 1}));
    });

    let recorder = RecordingDisplay::new();
    let source = HttpCountSource::new(server.url("/slow"), Some(Duration::from_millis(200))).unwrap();
    let mut visitor_display = VisitorDisplay::with_settings(source, recorder.clone(), quick_settings());
    let outcome = visitor_display.run().await.unwrap();

    match outcome {
        DisplayOutcome::Failed {
            error: CounterError::ApiError(e),
        } => assert!(e.is_timeout()),
        other => panic!("expected timeout failure, got {:?}", other),
    }
    assert_error_state(&recorder);
}

#[tokio::test]
async fn test_terminal_output_for_success_and_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/ok");
        then.status(200).json_body(serde_json::json!({"count": 1234567}));
    });
    server.mock(|when, then| {
        when.method(POST).path("/broken");
        then.status(503);
    });

    let source = HttpCountSource::new(server.url("/ok"), None).unwrap();
    let display = TerminalDisplay::new(Vec::new(), "Visitors", false);
    let mut visitor_display = VisitorDisplay::with_settings(source, display, quick_settings());
    assert_ok!(visitor_display.run().await);
    let output = String::from_utf8(visitor_display.into_display().into_inner()).unwrap();
    assert!(output.starts_with("Visitors: Loading...\n"));
    assert!(output.ends_with("Visitors: 1,234,567\n"));
    assert!(!output.contains("Error"));

    let source = HttpCountSource::new(server.url("/broken"), None).unwrap();
    let display = TerminalDisplay::new(Vec::new(), "Visitors", false);
    let mut visitor_display = VisitorDisplay::with_settings(source, display, quick_settings());
    let outcome = assert_ok!(visitor_display.run().await);
    assert!(!outcome.is_displayed());
    let output = String::from_utf8(visitor_display.into_display().into_inner()).unwrap();
    assert_eq!(output, "Visitors: Loading...\nVisitors: Error\n");
}

#[tokio::test]
async fn test_unreachable_endpoint_is_api_error() {
    // Port 9 (discard) on localhost is normally closed.
    let source = HttpCountSource::new("http://127.0.0.1:9/count", Some(Duration::from_secs(2))).unwrap();
    let err = assert_err!(visitor_counter::core::CountSource::fetch_count(&source).await);
    assert!(matches!(err, CounterError::ApiError(_)));
}

struct ClosedPipe;

impl std::io::Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_broken_terminal_is_system_error_with_exit_code_two() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/count");
        then.status(200).json_body(serde_json::json!({"count": 3}));
    });

    let source = HttpCountSource::new(server.url("/count"), None).unwrap();
    let display = TerminalDisplay::new(ClosedPipe, "Visitors", false);
    let mut visitor_display = VisitorDisplay::with_settings(source, display, quick_settings());

    let err = assert_err!(visitor_display.run().await);

    // Loading could not be drawn, so the counter is never asked.
    api_mock.assert_hits(0);
    assert!(matches!(err, CounterError::IoError(_)));
    assert_eq!(err.exit_code(), 2);
}
