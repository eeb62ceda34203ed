use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::catalog::{seed::CATEGORIES, EventFilter};
use crate::error::CatalogError;
use crate::models::{Availability, Event, EventDraft, SalesStatus};
use crate::AppState;

pub fn routes(editing: bool) -> Router<Arc<AppState>> {
    // создание и редактирование событий организатором, только в памяти
    let (list, item) = if editing {
        (get(search_events).post(create_event), get(get_event).put(update_event))
    } else {
        (get(search_events), get(get_event))
    };

    Router::new()
        .route("/events", list)
        .route("/events/{id}", item)
        .route("/events/{id}/related", get(related_events))
        .route("/categories", get(list_categories))
}

/* ---------- helpers ---------- */

fn event_not_found() -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, "Событие не найдено".to_string())
}

fn catalog_error(err: CatalogError) -> (StatusCode, String) {
    match err {
        CatalogError::EventNotFound(_) => event_not_found(),
        CatalogError::Invalid(_) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
    }
}

/* ---------- ответы ---------- */

#[derive(Debug, Serialize)]
pub struct EventSummary {
    pub id: Uuid,
    pub title: String,
    pub date: chrono::NaiveDate,
    pub start_time: chrono::NaiveTime,
    pub city: String,
    pub state: String,
    pub category: String,
    pub featured: bool,
    pub image: String,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sold_percentage: f64,
    pub sales_status: SalesStatus,
    pub tickets_left: u32,
}

impl From<&Event> for EventSummary {
    fn from(e: &Event) -> Self {
        EventSummary {
            id: e.id,
            title: e.title.clone(),
            date: e.date,
            start_time: e.start_time,
            city: e.city.clone(),
            state: e.state.clone(),
            category: e.category.clone(),
            featured: e.featured,
            image: e.image.clone(),
            min_price: e.min_price(),
            max_price: e.max_price(),
            sold_percentage: e.sold_percentage(),
            sales_status: e.sales_status(),
            tickets_left: e.total_tickets.saturating_sub(e.sold_tickets),
        }
    }
}

#[derive(Debug, Serialize)]
struct TicketAvailability {
    category_id: Uuid,
    name: String,
    price: f64,
    availability: Availability,
}

#[derive(Debug, Serialize)]
struct EventDetailResponse {
    #[serde(flatten)]
    event: Event,
    sold_percentage: f64,
    sales_status: SalesStatus,
    tickets: Vec<TicketAvailability>,
}

/* ---------- EVENTS ---------- */

// GET /api/events?query=&category=&sort=
async fn search_events(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<EventFilter>,
) -> impl IntoResponse {
    let found = state.catalog.search(&filter).await;
    let events: Vec<EventSummary> = found.iter().map(EventSummary::from).collect();

    tracing::debug!("search_events {:?}: {} found", filter, events.len());
    Json(json!({
        "events": events,
        "count": events.len()
    }))
}

// GET /api/events/{id}
async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let event = state.catalog.get(id).await.ok_or_else(event_not_found)?;
    let threshold = state.config.booking.low_stock_threshold;

    let tickets = event
        .ticket_types
        .iter()
        .map(|t| TicketAvailability {
            category_id: t.id,
            name: t.name.clone(),
            price: t.price,
            availability: t.availability(threshold),
        })
        .collect();

    Ok(Json(EventDetailResponse {
        sold_percentage: event.sold_percentage(),
        sales_status: event.sales_status(),
        tickets,
        event,
    }))
}

// GET /api/events/{id}/related
async fn related_events(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let event = state.catalog.get(id).await.ok_or_else(event_not_found)?;
    let related: Vec<EventSummary> = state
        .catalog
        .related(&event, 3)
        .await
        .iter()
        .map(EventSummary::from)
        .collect();
    Ok(Json(related))
}

// GET /api/categories
async fn list_categories() -> Json<Vec<&'static str>> {
    Json(CATEGORIES.to_vec())
}

// POST /api/events
async fn create_event(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<EventDraft>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let event = state.catalog.create(draft).await.map_err(|e| {
        tracing::warn!("create_event rejected: {}", e);
        catalog_error(e)
    })?;
    Ok((StatusCode::CREATED, Json(event)))
}

// PUT /api/events/{id}
async fn update_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(draft): Json<EventDraft>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let event = state.catalog.update(id, draft).await.map_err(|e| {
        tracing::warn!("update_event {} rejected: {}", id, e);
        catalog_error(e)
    })?;
    Ok((StatusCode::OK, Json(event)))
}
