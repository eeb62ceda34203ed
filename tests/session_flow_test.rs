//! HTTP-сценарии сессии выбора: открытие, места, билеты, оформление.
//!
//! Run with: `cargo test --test session_flow_test`

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use eventify_storefront::{config::Config, router, AppState};

fn app() -> Router {
    router(AppState::new(Config::default()))
}

async fn call(app: &Router, method: Method, uri: &str, session: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(id) = session {
        req = req.header("x-session-id", id);
    }
    let req = match body {
        Some(b) => req
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

async fn event_id(app: &Router, title: &str) -> String {
    let (status, body) = call(app, Method::GET, "/api/events", None, None).await;
    assert_eq!(status, StatusCode::OK);
    body["events"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["title"] == title)
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Открывает сессию и возвращает (session_id, тело ответа).
async fn open(app: &Router, title: &str) -> (String, Value) {
    let id = event_id(app, title).await;
    let (status, body) = call(app, Method::POST, "/api/sessions", None, Some(json!({ "event_id": id }))).await;
    assert_eq!(status, StatusCode::CREATED);
    (body["session_id"].as_str().unwrap().to_string(), body)
}

fn category_id(view: &Value, name: &str) -> String {
    view["tickets"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["name"] == name)
        .unwrap()["category_id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn health_and_banner() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".into()));
}

#[tokio::test]
async fn seat_selection_respects_limit_and_bookings() {
    let app = app();
    // у турнира лимит 4 места, заняты A4, A5, B1, C2
    let (sid, view) = open(&app, "Basketball Tournament").await;
    assert_eq!(view["max_selectable_seats"], 4);

    let (status, _) = call(&app, Method::PATCH, "/api/session/seats/toggle", Some(&sid), Some(json!({ "seat": "A4" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    for seat in ["A1", "A2", "A3", "B2"] {
        let (status, body) = call(&app, Method::PATCH, "/api/session/seats/toggle", Some(&sid), Some(json!({ "seat": seat }))).await;
        assert_eq!(status, StatusCode::OK, "{seat}");
        assert_eq!(body["result"], "selected");
    }

    let (status, _) = call(&app, Method::PATCH, "/api/session/seats/toggle", Some(&sid), Some(json!({ "seat": "B3" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call(&app, Method::PATCH, "/api/session/seats/toggle", Some(&sid), Some(json!({ "seat": "A1" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "deselected");
    assert_eq!(body["session"]["selected_seats"], json!(["A2", "A3", "B2"]));

    // 25 мест: C6 не существует
    let (status, _) = call(&app, Method::PATCH, "/api/session/seats/toggle", Some(&sid), Some(json!({ "seat": "C6" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, grid) = call(&app, Method::GET, "/api/session/seats", Some(&sid), None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = grid["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].as_array().unwrap().len(), 5);
    assert_eq!(rows[0][3]["state"], "booked");
    assert_eq!(rows[0][1]["state"], "selected");
}

#[tokio::test]
async fn ticket_quantities_are_capacity_bounded() {
    let app = app();
    // Courtside: 500 доступно, 480 продано -> осталось 20
    let (sid, view) = open(&app, "Basketball Tournament").await;
    let courtside = category_id(&view, "Courtside");

    let (status, _) = call(&app, Method::PATCH, "/api/session/tickets", Some(&sid), Some(json!({ "category_id": courtside, "quantity": 21 }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call(&app, Method::PATCH, "/api/session/tickets", Some(&sid), Some(json!({ "category_id": courtside, "quantity": 2.5 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, Method::PATCH, "/api/session/tickets", Some(&sid), Some(json!({ "category_id": courtside, "quantity": -1 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for odd in [json!(null), json!(true), json!({})] {
        let (status, _) = call(&app, Method::PATCH, "/api/session/tickets", Some(&sid), Some(json!({ "category_id": courtside, "quantity": odd }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{odd}");
    }

    let (status, body) = call(&app, Method::PATCH, "/api/session/tickets", Some(&sid), Some(json!({ "category_id": courtside, "quantity": "20" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_items"], 20);
    assert_eq!(body["total_price"], "5000.00");

    let line = body["tickets"].as_array().unwrap().iter().find(|t| t["name"] == "Courtside").unwrap();
    assert_eq!(line["state"], "exhausted");
    assert_eq!(line["can_increment"], false);

    let (status, _) = call(&app, Method::PATCH, "/api/session/tickets/increment", Some(&sid), Some(json!({ "category_id": courtside }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call(&app, Method::PATCH, "/api/session/tickets/decrement", Some(&sid), Some(json!({ "category_id": courtside }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_items"], 19);

    let (status, _) = call(&app, Method::PATCH, "/api/session/tickets/increment", Some(&sid), Some(json!({ "category_id": uuid::Uuid::new_v4() }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reset_and_checkout_lifecycle() {
    let app = app();
    let (sid, view) = open(&app, "Summer Music Festival 2023").await;
    let vip = category_id(&view, "VIP");

    let (status, _) = call(&app, Method::POST, "/api/session/checkout", Some(&sid), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    call(&app, Method::PATCH, "/api/session/tickets/increment", Some(&sid), Some(json!({ "category_id": vip }))).await;
    let (_, body) = call(&app, Method::POST, "/api/session/reset", Some(&sid), None).await;
    assert_eq!(body["total_items"], 0);

    call(&app, Method::PATCH, "/api/session/tickets", Some(&sid), Some(json!({ "category_id": vip, "quantity": 2 }))).await;
    let (status, summary) = call(&app, Method::POST, "/api/session/checkout", Some(&sid), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total_items"], 2);
    assert_eq!(summary["total_price"], "399.98");
    assert_eq!(summary["lines"][0]["name"], "VIP");

    // после оформления сессии больше нет
    let (status, _) = call(&app, Method::GET, "/api/session", Some(&sid), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn session_header_is_required() {
    let app = app();
    let (status, _) = call(&app, Method::GET, "/api/session", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, Method::GET, "/api/session", Some("not-a-uuid"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (sid, _) = open(&app, "Charity 5K Run").await;
    let (status, _) = call(&app, Method::DELETE, "/api/session", Some(&sid), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&app, Method::DELETE, "/api/session", Some(&sid), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn event_without_seating_has_no_grid() {
    let app = app();
    let (sid, view) = open(&app, "Food & Wine Festival").await;
    assert!(view["max_selectable_seats"].is_null());

    let (status, _) = call(&app, Method::GET, "/api/session/seats", Some(&sid), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn opening_unknown_event_is_404() {
    let app = app();
    let (status, _) = call(&app, Method::POST, "/api/sessions", None, Some(json!({ "event_id": uuid::Uuid::new_v4() }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
