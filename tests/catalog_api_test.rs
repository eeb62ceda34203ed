//! HTTP-сценарии каталога, организаторских форм и дашборда.
//!
//! Run with: `cargo test --test catalog_api_test`

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use eventify_storefront::{config::Config, router, AppState};

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let req = Request::builder().method(method).uri(uri);
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
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn draft(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Open-air screening",
        "date": "2023-08-20",
        "start_time": "20:00:00",
        "end_time": "22:30:00",
        "location": "Rooftop",
        "city": "Austin",
        "organizer": "Film Club",
        "category": "Film & Media",
        "ticket_types": [
            { "name": "Blanket", "price": 12.0, "available": 80, "sold": 10 }
        ],
        "seating": { "total_seats": 30, "booked_seats": ["A1"], "max_selectable_seats": 2 }
    })
}

#[tokio::test]
async fn search_filters_and_sorts() {
    let app = router(AppState::new(Config::default()));

    let (status, body) = call(&app, Method::GET, "/api/events?query=festival&sort=price", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["events"][0]["title"], "Food & Wine Festival");

    let (_, body) = call(&app, Method::GET, "/api/events?category=Arts", None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["events"][0]["sales_status"], "Selling Fast");

    let (_, body) = call(&app, Method::GET, "/api/events?category=all&sort=popularity", None).await;
    assert_eq!(body["count"], 6);
    assert_eq!(body["events"][0]["title"], "Tech Conference 2023");
}

#[tokio::test]
async fn home_page_featured_and_upcoming_lists() {
    let app = router(AppState::new(Config::default()));

    let (status, body) = call(&app, Method::GET, "/api/events?featured=true", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert!(body["events"].as_array().unwrap().iter().all(|e| e["featured"] == true));

    let (_, body) = call(&app, Method::GET, "/api/events?sort=date&limit=3", None).await;
    assert_eq!(body["count"], 3);
    let titles: Vec<&str> = body["events"].as_array().unwrap().iter().map(|e| e["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Summer Music Festival 2023", "Food & Wine Festival", "Charity 5K Run"]);
}

#[tokio::test]
async fn detail_reports_availability_labels() {
    let app = router(AppState::new(Config::default()));
    let (_, list) = call(&app, Method::GET, "/api/events?query=basketball", None).await;
    let id = list["events"][0]["id"].as_str().unwrap().to_string();

    let (status, detail) = call(&app, Method::GET, &format!("/api/events/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["title"], "Basketball Tournament");
    let courtside = detail["tickets"].as_array().unwrap().iter().find(|t| t["name"] == "Courtside").unwrap();
    assert_eq!(courtside["availability"], json!({ "status": "available", "remaining": 20 }));

    let (status, _) = call(&app, Method::GET, &format!("/api/events/{}", uuid::Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn organizer_creates_and_edits_events() {
    let app = router(AppState::new(Config::default()));

    let (status, created) = call(&app, Method::POST, "/api/events", Some(draft("Movie Night"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["total_tickets"], 80);
    assert_eq!(created["sold_tickets"], 10);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = call(&app, Method::PUT, &format!("/api/events/{id}"), Some(draft("Movie Night II"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["created_at"], created["created_at"]);

    let (_, list) = call(&app, Method::GET, "/api/events?query=movie", None).await;
    assert_eq!(list["count"], 1);
    assert_eq!(list["events"][0]["title"], "Movie Night II");

    let mut bad = draft("Oversold");
    bad["ticket_types"][0]["sold"] = json!(81);
    let (status, _) = call(&app, Method::POST, "/api/events", Some(bad)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn ticket_totals_beyond_u32_are_rejected() {
    let app = router(AppState::new(Config::default()));

    let mut huge = draft("Stadium Tour");
    huge["ticket_types"] = json!([
        { "name": "Floor", "price": 90.0, "available": 4_000_000_000u64 },
        { "name": "Balcony", "price": 60.0, "available": 4_000_000_000u64 }
    ]);
    let (status, _) = call(&app, Method::POST, "/api/events", Some(huge)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, list) = call(&app, Method::GET, "/api/events?query=stadium", None).await;
    assert_eq!(list["count"], 0);
}

#[tokio::test]
async fn editing_can_be_disabled() {
    let mut config = Config::default();
    config.features.enable_event_editing = false;
    config.features.enable_dashboard = false;
    let app = router(AppState::new(config));

    let (status, _) = call(&app, Method::POST, "/api/events", Some(draft("Nope"))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = call(&app, Method::GET, "/api/dashboard", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_aggregates_static_series() {
    let app = router(AppState::new(Config::default()));
    let (status, body) = call(&app, Method::GET, "/api/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_events"], 6);
    assert_eq!(body["weekly_tickets_sold"], 1490);
    assert_eq!(body["monthly_revenue"].as_array().unwrap().len(), 12);
    assert_eq!(body["events"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn dashboard_event_table_searches_and_sorts() {
    let app = router(AppState::new(Config::default()));

    let (status, rows) = call(&app, Method::GET, "/api/dashboard/events", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows.as_array().unwrap().len(), 6);
    assert_eq!(rows[0]["title"], "Summer Music Festival 2023");

    let (_, rows) = call(&app, Method::GET, "/api/dashboard/events?query=park", None).await;
    let titles: Vec<&str> = rows.as_array().unwrap().iter().map(|r| r["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Summer Music Festival 2023", "Food & Wine Festival", "Charity 5K Run"]);

    let (_, rows) = call(&app, Method::GET, "/api/dashboard/events?sort=sold_tickets&direction=desc", None).await;
    assert_eq!(rows[0]["title"], "Basketball Tournament");
    assert_eq!(rows[0]["sold_tickets"], 10980);

    let (status, _) = call(&app, Method::GET, "/api/dashboard/events?sort=price", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn categories_list() {
    let app = router(AppState::new(Config::default()));
    let (_, body) = call(&app, Method::GET, "/api/categories", None).await;
    let categories = body.as_array().unwrap();
    assert_eq!(categories.len(), 13);
    assert_eq!(categories[0], "Music");
}
