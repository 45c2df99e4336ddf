use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use invoice_lookup::error::{ApiError, AppError};
use invoice_lookup::{AntiCaptchaClient, CaptchaSolver, Config};

fn client_for(server: &MockServer) -> AntiCaptchaClient {
    let config = Config {
        anticaptcha_api_key: "test-key".to_string(),
        anticaptcha_base_url: server.uri(),
        ocr_poll_interval: Duration::from_millis(10),
        ocr_poll_attempts: 3,
        http_timeout: Duration::from_secs(5),
        ..Config::default()
    };
    AntiCaptchaClient::new(&config).unwrap()
}

async fn mount_create_task(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/createTask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_ready_result_is_sanitized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/createTask"))
        .and(body_partial_json(json!({
            "clientKey": "test-key",
            "task": { "type": "ImageToTextTask" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errorId": 0,
            "taskId": 7
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/getTaskResult"))
        .and(body_partial_json(json!({ "taskId": 7 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errorId": 0,
            "status": "ready",
            "solution": { "text": " a7-k 9x " }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = client_for(&server).solve(b"png-bytes").await;
    assert_eq!(text.as_deref(), Some("A7K9X"));
}

#[tokio::test]
async fn test_missing_task_id_gives_no_result() {
    let server = MockServer::start().await;
    mount_create_task(&server, json!({ "errorId": 0 })).await;

    Mock::given(method("POST"))
        .and(path("/getTaskResult"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.create_task(b"png").await.unwrap_err();
    assert!(matches!(err, AppError::Api(ApiError::MissingTaskId { .. })));
    assert_eq!(client.solve(b"png").await, None);
}

#[tokio::test]
async fn test_error_id_gives_no_result() {
    let server = MockServer::start().await;
    mount_create_task(
        &server,
        json!({
            "errorId": 1,
            "errorCode": "ERROR_KEY_DOES_NOT_EXIST",
            "errorDescription": "Account authorization key not found in the system"
        }),
    )
    .await;

    let client = client_for(&server);
    let err = client.create_task(b"png").await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Api(ApiError::BadResponse { code: Some(1), .. })
    ));
    assert_eq!(client.solve(b"png").await, None);
}

#[tokio::test]
async fn test_poll_exhaustion_gives_no_result() {
    let server = MockServer::start().await;
    mount_create_task(&server, json!({ "errorId": 0, "taskId": 42 })).await;

    Mock::given(method("POST"))
        .and(path("/getTaskResult"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errorId": 0,
            "status": "processing"
        })))
        .expect(3)
        .mount(&server)
        .await;

    assert_eq!(client_for(&server).solve(b"png").await, None);
}

#[tokio::test]
async fn test_http_error_gives_no_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/createTask"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert_eq!(client_for(&server).solve(b"png").await, None);
}
