use std::time::Duration;

use teor_engine::{HttpClient, HttpError, HttpSettings};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_retry_settings() -> HttpSettings {
    HttpSettings {
        backoff_base: Duration::from_millis(1),
        ..HttpSettings::default()
    }
}

#[tokio::test]
async fn get_retries_transient_status_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(fast_retry_settings()).unwrap();
    let url = format!("{}/flaky", server.uri());

    let response = client.get(&url, &[]).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn get_stops_after_six_attempts_on_persistent_503() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503))
        .expect(6)
        .mount(&server)
        .await;

    let client = HttpClient::new(fast_retry_settings()).unwrap();
    let url = format!("{}/down", server.uri());

    // Retries exhausted: the final response comes back for soft handling.
    let response = client.get(&url, &[]).await.unwrap();
    assert_eq!(response.status().as_u16(), 503);
}

#[tokio::test]
async fn get_does_not_retry_plain_client_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(fast_retry_settings()).unwrap();
    let url = format!("{}/missing", server.uri());

    let response = client.get(&url, &[]).await.unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn get_ok_turns_error_status_into_hard_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = HttpClient::new(fast_retry_settings()).unwrap();
    let url = format!("{}/missing", server.uri());

    let err = client.get_ok(&url, &[]).await.unwrap_err();
    match err {
        HttpError::Status { status, .. } => assert_eq!(status, 404),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn timeout_exhaustion_becomes_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let settings = HttpSettings {
        request_timeout: Duration::from_millis(50),
        max_attempts: 2,
        backoff_base: Duration::from_millis(1),
        ..HttpSettings::default()
    };
    let client = HttpClient::new(settings).unwrap();
    let url = format!("{}/slow", server.uri());

    let err = client.get(&url, &[]).await.unwrap_err();
    match err {
        HttpError::Network { attempts, .. } => assert_eq!(attempts, 2),
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test]
async fn default_headers_declare_json_and_client_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/headers"))
        .and(wiremock::matchers::header("Accept", "application/json"))
        .and(wiremock::matchers::header_exists("User-Agent"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(HttpSettings::default()).unwrap();
    let url = format!("{}/headers", server.uri());
    client.get(&url, &[]).await.unwrap();
}
