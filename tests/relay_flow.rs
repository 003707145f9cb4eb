//! End-to-end relay behavior against real downstream servers.

use std::time::{Duration, Instant};

use axum::http::StatusCode;
use serde_json::{json, Value};

mod common;

async fn get_json(url: String) -> (u16, Value) {
    let res = common::client().get(url).send().await.expect("Relay unreachable");
    let status = res.status().as_u16();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn test_start_relays_json_downstream() {
    let backend =
        common::start_mock_backend(StatusCode::OK, "application/json", r#"{"ok":true}"#).await;
    let target = backend.url("/echo");
    let (addr, shutdown) =
        common::spawn_relay(common::relay_config("svc-a", Some(target.clone()))).await;

    let (status, body) = get_json(format!("http://{}/api/start", addr)).await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "status": "success",
            "app": "svc-a",
            "target": target,
            "response_status": 200,
            "response_body": {"ok": true},
        })
    );
    assert_eq!(backend.request_count(), 1);

    shutdown.trigger();
}

#[tokio::test]
async fn test_start_relays_text_downstream() {
    let backend = common::start_mock_backend(StatusCode::OK, "text/plain", "plain pong").await;
    let (addr, shutdown) =
        common::spawn_relay(common::relay_config("svc-a", Some(backend.url("/")))).await;

    let (status, body) = get_json(format!("http://{}/api/start", addr)).await;

    assert_eq!(status, 200);
    assert_eq!(body["response_body"], "plain pong");

    shutdown.trigger();
}

#[tokio::test]
async fn test_downstream_error_status_is_still_success() {
    let backend = common::start_mock_backend(StatusCode::NOT_FOUND, "text/plain", "nope").await;
    let (addr, shutdown) =
        common::spawn_relay(common::relay_config("svc-a", Some(backend.url("/missing")))).await;

    let (status, body) = get_json(format!("http://{}/api/start", addr)).await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "success");
    assert_eq!(body["response_status"], 404);
    assert_eq!(body["response_body"], "nope");

    shutdown.trigger();
}

#[tokio::test]
async fn test_start_without_target_never_calls_out() {
    let (addr, shutdown) = common::spawn_relay(common::relay_config("svc-a", None)).await;

    let (status, body) = get_json(format!("http://{}/api/start", addr)).await;

    assert_eq!(status, 400);
    assert_eq!(body["app"], "svc-a");
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));

    shutdown.trigger();
}

#[tokio::test]
async fn test_connection_refused_is_500() {
    let target = format!("http://{}/api/receive", common::closed_addr().await);
    let (addr, shutdown) =
        common::spawn_relay(common::relay_config("svc-a", Some(target.clone()))).await;

    let (status, body) = get_json(format!("http://{}/api/start", addr)).await;

    assert_eq!(status, 500);
    assert_eq!(body["status"], "error");
    assert_eq!(body["app"], "svc-a");
    assert_eq!(body["target"], target);
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));

    shutdown.trigger();
}

#[tokio::test]
async fn test_unparseable_target_is_500_and_relay_stays_up() {
    for target in ["svc-b:8000/api/receive", "not a url"] {
        let (addr, shutdown) =
            common::spawn_relay(common::relay_config("svc-a", Some(target.to_string()))).await;

        let (status, body) = get_json(format!("http://{}/api/start", addr)).await;
        assert_eq!(status, 500, "target {target}");
        assert_eq!(body["status"], "error");
        assert_eq!(body["target"], target);
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));

        let (status, _) = get_json(format!("http://{}/health", addr)).await;
        assert_eq!(status, 200);

        shutdown.trigger();
    }
}

#[tokio::test]
async fn test_unresponsive_target_times_out() {
    let silent = common::start_silent_backend().await;
    let mut config = common::relay_config("svc-a", Some(format!("http://{}/", silent)));
    config.relay.timeout_secs = 1;
    let (addr, shutdown) = common::spawn_relay(config).await;

    let started = Instant::now();
    let (status, body) = get_json(format!("http://{}/api/start", addr)).await;

    assert_eq!(status, 500);
    assert_eq!(body["status"], "error");
    assert!(body["error"].as_str().unwrap().contains("timed out"));
    assert!(
        started.elapsed() < Duration::from_secs(3),
        "took {:?}",
        started.elapsed()
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_invalid_json_downstream_is_500() {
    let backend = common::start_mock_backend(StatusCode::OK, "application/json", "{broken").await;
    let (addr, shutdown) =
        common::spawn_relay(common::relay_config("svc-a", Some(backend.url("/")))).await;

    let (status, body) = get_json(format!("http://{}/api/start", addr)).await;

    assert_eq!(status, 500);
    assert_eq!(body["status"], "error");

    shutdown.trigger();
}

#[tokio::test]
async fn test_health_ignores_target_state() {
    let target = format!("http://{}/", common::closed_addr().await);
    let mut config = common::relay_config("svc-h", Some(target));
    config.service.port = 9100;
    let (addr, shutdown) = common::spawn_relay(config).await;

    let (status, body) = get_json(format!("http://{}/health", addr)).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({"status": "healthy", "app": "svc-h", "port": 9100}));

    shutdown.trigger();
}

#[tokio::test]
async fn test_receive_echoes_json_post() {
    let (addr, shutdown) = common::spawn_relay(common::relay_config("svc-b", None)).await;
    let payload = json!({"user": "alice", "amount": 12.5, "tags": ["x", "y"], "meta": null});

    let res = common::client()
        .post(format!("http://{}/api/receive", addr))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();

    assert_eq!(body["status"], "received");
    assert_eq!(body["method"], "POST");
    assert_eq!(body["data"], payload);

    shutdown.trigger();
}

#[tokio::test]
async fn test_relay_into_receive() {
    let (downstream, downstream_shutdown) =
        common::spawn_relay(common::relay_config("svc-b", None)).await;
    let target = format!("http://{}/api/receive?from=svc-a", downstream);
    let (upstream, upstream_shutdown) =
        common::spawn_relay(common::relay_config("svc-a", Some(target))).await;

    let (status, body) = get_json(format!("http://{}/api/start", upstream)).await;

    assert_eq!(status, 200);
    assert_eq!(body["response_body"]["status"], "received");
    assert_eq!(body["response_body"]["app"], "svc-b");
    assert_eq!(body["response_body"]["data"], json!({"from": "svc-a"}));

    upstream_shutdown.trigger();
    downstream_shutdown.trigger();
}
