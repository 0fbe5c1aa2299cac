mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use break_clock::{create_router, state::AlarmPreset};
use common::{harness, stored, Harness};

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn app(h: &Harness) -> Router {
    create_router(h.state.clone())
}

#[tokio::test]
async fn start_break_applies_and_reports_counters() {
    let h = harness(&[]);
    let app = app(&h);

    let (status, body) = send(&app, "POST", "/break/start").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "applied");
    assert_eq!(body["counters"]["break"]["active"], true);
    assert_eq!(body["counters"]["break"]["display"], "25:00");
    assert_eq!(body["counters"]["break"]["can_start"], false);
    assert_eq!(body["counters"]["break"]["can_pause"], true);
    assert_eq!(h.scheduler.live(), 1);
}

#[tokio::test]
async fn second_start_is_ignored_not_an_error() {
    let h = harness(&[]);
    let app = app(&h);

    send(&app, "POST", "/break/start").await;
    let (status, body) = send(&app, "POST", "/break/start").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ignored");
    assert_eq!(h.scheduler.scheduled().len(), 1);
}

#[tokio::test]
async fn lunch_start_pauses_break() {
    let h = harness(&[]);
    let app = app(&h);

    send(&app, "POST", "/break/start").await;
    let (_, body) = send(&app, "POST", "/lunch/start").await;

    assert_eq!(body["counters"]["break"]["active"], false);
    assert_eq!(body["counters"]["break"]["phase"], "idle");
    assert_eq!(body["counters"]["lunch"]["active"], true);
    assert_eq!(body["counters"]["lunch"]["remaining_seconds"], 3600);
}

#[tokio::test]
async fn pausing_idle_lunch_is_ignored() {
    let h = harness(&[]);
    let (status, body) = send(&app(&h), "POST", "/lunch/pause").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ignored");
}

#[tokio::test]
async fn reset_restores_and_persists_defaults() {
    let h = harness(&[("breakTime", "200"), ("lunchTime", "500")]);
    let app = app(&h);

    send(&app, "POST", "/break/start").await;
    let (_, body) = send(&app, "POST", "/reset").await;

    assert_eq!(body["status"], "applied");
    assert_eq!(body["counters"]["break"]["remaining_seconds"], 1500);
    assert_eq!(body["counters"]["lunch"]["remaining_seconds"], 3600);
    assert_eq!(stored(&h.store, "breakTime").as_deref(), Some("1500"));
    assert_eq!(stored(&h.store, "lunchTime").as_deref(), Some("3600"));
    assert_eq!(h.scheduler.live(), 0);
}

#[tokio::test]
async fn alarm_presets_arm_the_alarm() {
    let h = harness(&[]);
    let app = app(&h);

    for preset in AlarmPreset::ALL {
        let (status, body) = send(&app, "POST", &format!("/alarm/{}", preset.minutes())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["counters"]["alarm"]["active"], true);
        assert_eq!(body["counters"]["alarm"]["remaining_seconds"], preset.seconds());
        assert_eq!(body["counters"]["alarm"]["initial_seconds"], preset.seconds());
    }
    assert_eq!(h.scheduler.live(), 1);
}

#[tokio::test]
async fn unsupported_alarm_length_is_rejected() {
    let h = harness(&[]);
    let app = app(&h);

    let (status, body) = send(&app, "POST", "/alarm/7").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("7 minutes"));

    let (status, _) = send(&app, "POST", "/alarm/soon").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(h.scheduler.live(), 0);
}

#[tokio::test]
async fn status_reports_counters_and_last_action() {
    let h = harness(&[("lunchTime", "1200")]);
    let app = app(&h);

    let (_, body) = send(&app, "GET", "/status").await;
    assert_eq!(body["last_action"], Value::Null);
    assert_eq!(body["counters"]["lunch"]["display"], "20:00");
    assert_eq!(body["counters"]["alarm"]["phase"], "expired");

    send(&app, "POST", "/lunch/start").await;
    send(&app, "POST", "/break/pause").await;

    let (status, body) = send(&app, "GET", "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["last_action"], "lunch-start");
    assert_eq!(body["port"], 20554);
    assert!(body["last_action_time"].is_string());
}

#[tokio::test]
async fn ticks_show_up_in_status() {
    let h = harness(&[]);
    let app = app(&h);

    send(&app, "POST", "/break/start").await;
    let event = h.scheduler.last();
    h.state.on_tick(event).unwrap();
    h.state.on_tick(event).unwrap();

    let (_, body) = send(&app, "GET", "/status").await;
    assert_eq!(body["counters"]["break"]["remaining_seconds"], 1498);
    assert_eq!(body["counters"]["break"]["display"], "24:58");
    assert_eq!(stored(&h.store, "breakTime").as_deref(), Some("1498"));
}

#[tokio::test]
async fn health_is_always_ok() {
    let h = harness(&[]);
    let (status, body) = send(&app(&h), "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
