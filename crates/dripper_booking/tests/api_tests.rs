use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::Duration;
use dripper_booking::{routes, BookingSettings, BookingState};
use dripper_config::{AppConfig, ServiceConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app_with(config: AppConfig) -> Router {
    let state = Arc::new(BookingState::new(Arc::new(config)).expect("valid booking config"));
    routes(state)
}

fn app() -> Router {
    app_with(AppConfig::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn new_session(app: &Router) -> String {
    let (status, json) = send(app, Method::POST, "/booking/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    json["session_id"].as_str().unwrap().to_string()
}

fn tomorrow() -> String {
    (BookingSettings::default().today() + Duration::days(1))
        .format("%Y-%m-%d")
        .to_string()
}

#[tokio::test]
async fn lists_the_default_catalog() {
    let (status, json) = send(&app(), Method::GET, "/booking/services", None).await;
    assert_eq!(status, StatusCode::OK);

    let services = json["services"].as_array().unwrap();
    assert_eq!(services.len(), 3);
    assert_eq!(services[0]["name"], "Haircut & Style");
    assert_eq!(services[0]["price_label"], "$45");
    assert_eq!(services[1]["duration_minutes"], 120);
    assert_eq!(services[2]["price_cents"], 8500);
}

#[tokio::test]
async fn new_session_starts_on_service_step() {
    let app = app();
    let (status, json) = send(&app, Method::POST, "/booking/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["step"], "service");
    assert_eq!(json["subtitle"], "Select one or more services to continue");
    assert_eq!(json["can_go_back"], false);
    assert_eq!(json["steps"].as_array().unwrap().len(), 4);
    assert_eq!(json["steps"][0]["label"], "Select Service");
    assert_eq!(json["steps"][0]["is_current"], true);

    let id = json["session_id"].as_str().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/booking/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["session_id"], id);
}

#[tokio::test]
async fn unknown_session_is_404() {
    let (status, json) = send(
        &app(),
        Method::GET,
        "/booking/sessions/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], 404);
}

#[tokio::test]
async fn full_booking_flow() {
    let app = app();
    let id = new_session(&app).await;
    let base = format!("/booking/sessions/{id}");

    let (status, json) = send(&app, Method::POST, &format!("{base}/services"), Some(json!({"service_id": "1"}))).await;
    assert_eq!(status, StatusCode::OK);
    let (_, json2) = send(&app, Method::POST, &format!("{base}/services"), Some(json!({"service_id": "3"}))).await;
    assert_eq!(json["selected_services"].as_array().unwrap().len(), 1);
    assert_eq!(json2["total_price_cents"], 13000);
    assert_eq!(json2["total_duration_minutes"], 90);
    assert_eq!(json2["total_price_label"], "$130");
    assert_eq!(json2["service_names"], "Haircut & Style, Hair Treatment");

    let (status, json) = send(&app, Method::POST, &format!("{base}/continue"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["step"], "date");
    assert_eq!(json["can_go_back"], true);

    let (status, calendar) = send(&app, Method::GET, &format!("{base}/calendar"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(calendar["days"].as_array().unwrap().len(), 42);
    assert_eq!(calendar["weekdays"][0], "Sun");

    let date = tomorrow();
    let (status, json) = send(&app, Method::POST, &format!("{base}/date"), Some(json!({"date": date}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["step"], "time");
    assert_eq!(json["selected_date"], date);

    let (status, slots) = send(&app, Method::GET, &format!("{base}/slots"), None).await;
    assert_eq!(status, StatusCode::OK);
    let slots = slots["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 16);
    assert_eq!(slots[0]["label"], "9:00 AM");

    let (status, json) = send(&app, Method::POST, &format!("{base}/time"), Some(json!({"time": "14:30"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["step"], "payment");
    assert_eq!(json["selected_time"]["label"], "2:30 PM");

    let (status, json) = send(
        &app,
        Method::POST,
        &format!("{base}/payment"),
        Some(json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "cardNumber": "4242 4242 4242 4242",
            "expiryDate": "12/28",
            "cvv": "123"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["is_complete"], true);
    assert_eq!(json["subtitle"], "Booking Confirmation");
    assert_eq!(json["receipt"]["card_last4"], "4242");
    assert_eq!(json["receipt"]["amount_cents"], 13000);
    assert!(json["receipt"]["reference"].as_str().unwrap().starts_with("DS-"));
    assert!(!json.to_string().contains("4242 4242"));

    // Only reset is accepted now.
    let (status, _) = send(&app, Method::POST, &format!("{base}/back"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, json) = send(&app, Method::POST, &format!("{base}/reset"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["step"], "service");
    assert_eq!(json["is_complete"], false);
    assert_eq!(json["selected_services"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn validation_failures_are_422() {
    let app = app();
    let id = new_session(&app).await;
    let base = format!("/booking/sessions/{id}");

    let (status, _) = send(&app, Method::POST, &format!("{base}/continue"), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, json) = send(&app, Method::POST, &format!("{base}/services"), Some(json!({"service_id": "42"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["error"]["message"].as_str().unwrap().contains("Unknown service"));

    send(&app, Method::POST, &format!("{base}/services"), Some(json!({"service_id": "2"}))).await;
    send(&app, Method::POST, &format!("{base}/continue"), None).await;

    let yesterday = (BookingSettings::default().today() - Duration::days(1))
        .format("%Y-%m-%d")
        .to_string();
    let (status, _) = send(&app, Method::POST, &format!("{base}/date"), Some(json!({"date": yesterday}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, Method::POST, &format!("{base}/date"), Some(json!({"date": "next tuesday"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    send(&app, Method::POST, &format!("{base}/date"), Some(json!({"date": tomorrow()}))).await;
    let (status, _) = send(&app, Method::POST, &format!("{base}/time"), Some(json!({"time": "17:00"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    send(&app, Method::POST, &format!("{base}/time"), Some(json!({"time": "09:00"}))).await;
    let (status, json) = send(
        &app,
        Method::POST,
        &format!("{base}/payment"),
        Some(json!({"name": "Jane", "email": "jane", "card_number": "1", "expiry_date": "13/99", "cvv": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let message = json["error"]["message"].as_str().unwrap();
    assert!(message.contains("email"));
    assert!(message.contains("card_number"));
}

#[tokio::test]
async fn wrong_step_is_409() {
    let app = app();
    let id = new_session(&app).await;
    let (status, json) = send(
        &app,
        Method::POST,
        &format!("/booking/sessions/{id}/date"),
        Some(json!({"date": tomorrow()})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], 409);
}

#[tokio::test]
async fn back_clears_and_previous_keeps() {
    let app = app();
    let id = new_session(&app).await;
    let base = format!("/booking/sessions/{id}");
    send(&app, Method::POST, &format!("{base}/services"), Some(json!({"service_id": "1"}))).await;
    send(&app, Method::POST, &format!("{base}/continue"), None).await;
    send(&app, Method::POST, &format!("{base}/date"), Some(json!({"date": tomorrow()}))).await;

    let (_, json) = send(&app, Method::POST, &format!("{base}/previous"), None).await;
    assert_eq!(json["step"], "date");
    assert!(json["selected_date"].is_string());

    let (_, json) = send(&app, Method::POST, &format!("{base}/next"), None).await;
    assert_eq!(json["step"], "time");

    let (_, json) = send(&app, Method::POST, &format!("{base}/back"), None).await;
    assert_eq!(json["step"], "date");
    assert!(json["selected_date"].is_null());

    let (_, json) = send(&app, Method::POST, &format!("{base}/back"), None).await;
    assert_eq!(json["step"], "service");
    assert_eq!(json["selected_services"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn calendar_navigation_and_service_removal() {
    let app = app();
    let id = new_session(&app).await;
    let base = format!("/booking/sessions/{id}");
    send(&app, Method::POST, &format!("{base}/services"), Some(json!({"service_id": "1"}))).await;
    send(&app, Method::POST, &format!("{base}/services"), Some(json!({"service_id": "2"}))).await;

    let (status, json) = send(&app, Method::DELETE, &format!("{base}/services/1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["service_names"], "Hair Color");

    send(&app, Method::POST, &format!("{base}/continue"), None).await;
    let (_, current) = send(&app, Method::GET, &format!("{base}/calendar"), None).await;
    let (status, next) = send(&app, Method::POST, &format!("{base}/calendar/next"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(next["title"], current["title"]);
    let (_, back) = send(&app, Method::POST, &format!("{base}/calendar/previous"), None).await;
    assert_eq!(back["title"], current["title"]);
}

#[tokio::test]
async fn deleted_session_is_gone() {
    let app = app();
    let id = new_session(&app).await;
    let (status, _) = send(&app, Method::DELETE, &format!("/booking/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, &format!("/booking/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn disabled_booking_is_503() {
    let mut config = AppConfig::default();
    config.use_booking = false;
    let app = app_with(config);

    let (status, json) = send(&app, Method::GET, "/booking/services", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"]["code"], 503);
    let (status, _) = send(&app, Method::POST, "/booking/sessions", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn malformed_session_id_is_404() {
    let (status, json) = send(&app(), Method::GET, "/booking/sessions/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], 404);
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("not-a-uuid"));
}

#[tokio::test]
async fn missing_json_field_uses_error_body() {
    let app = app();
    let id = new_session(&app).await;
    let (status, json) = send(
        &app,
        Method::POST,
        &format!("/booking/sessions/{}/services", id),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["code"], 422);
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("service_id"));
}

#[tokio::test]
async fn unparseable_json_uses_error_body() {
    let app = app();
    let id = new_session(&app).await;
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/booking/sessions/{}/services", id))
        .header("content-type", "application/json")
        .body(Body::from("not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["error"]["code"], 422);
}

#[tokio::test]
async fn disabled_booking_is_503_before_input_checks() {
    let mut config = AppConfig::default();
    config.use_booking = false;
    let app = app_with(config);
    let id = "00000000-0000-0000-0000-000000000000";

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/booking/sessions/{}/services", id),
        Some(json!({ "service_id": "no-such-service" })),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/booking/sessions/{}/date", id),
        Some(json!({ "date": "not-a-date" })),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = send(&app, Method::GET, "/booking/sessions/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[test]
fn service_ids_with_path_characters_are_refused() {
    let mut config = AppConfig::default();
    config.booking.services = vec![ServiceConfig {
        id: "trim/../admin".to_string(),
        name: "Trim".to_string(),
        duration_minutes: 15,
        price_cents: 1000,
        description: String::new(),
    }];
    assert!(BookingState::new(Arc::new(config)).is_err());
}
