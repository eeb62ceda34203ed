use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::SelectionError;
use crate::middleware::SessionKey;
use crate::models::SeatId;
use crate::services::sessions::Session;
use crate::services::ticket_quantity::parse_quantity;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sessions", post(open_session))
        .route("/session", get(current_session).delete(close_session))
        .route("/session/seats", get(seat_grid))
        .route("/session/seats/toggle", patch(toggle_seat))
        .route("/session/tickets", patch(set_quantity))
        .route("/session/tickets/increment", patch(increment_ticket))
        .route("/session/tickets/decrement", patch(decrement_ticket))
        .route("/session/reset", post(reset_session))
        .route("/session/checkout", post(checkout))
}

/* ---------- helpers ---------- */

fn session_not_found() -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, "Сессия не найдена или завершена".to_string())
}

// Отказы модели не фатальны: логируем на debug и возвращаем клиенту
fn rejected(op: &str, session: Uuid, err: SelectionError) -> (StatusCode, String) {
    tracing::debug!("{} rejected for session {}: {}", op, session, err);
    err.into()
}

/* ---------- SESSION LIFECYCLE ---------- */

// POST /api/sessions
#[derive(Debug, Deserialize)]
struct OpenSessionRequest {
    event_id: Uuid,
}

async fn open_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OpenSessionRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let event = state
        .catalog
        .get(req.event_id)
        .await
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Событие не найдено".to_string()))?;

    let session = Session::open(&event, state.config.booking.max_selectable_seats).map_err(|e| {
        tracing::error!("open_session: bad seating for event {}: {}", event.id, e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Некорректная схема зала".to_string())
    })?;

    let view = session.view(state.config.booking.low_stock_threshold);
    let id = state.sessions.insert(session).await;
    tracing::info!("Session {} opened for event {}", id, event.id);

    Ok((StatusCode::CREATED, Json(view)))
}

// GET /api/session
async fn current_session(
    State(state): State<Arc<AppState>>,
    SessionKey(id): SessionKey,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let threshold = state.config.booking.low_stock_threshold;
    let view = state
        .sessions
        .with(id, |s| s.view(threshold))
        .await
        .ok_or_else(session_not_found)?;
    Ok(Json(view))
}

// DELETE /api/session
async fn close_session(
    State(state): State<Arc<AppState>>,
    SessionKey(id): SessionKey,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if state.sessions.close(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found())
    }
}

// POST /api/session/reset
async fn reset_session(
    State(state): State<Arc<AppState>>,
    SessionKey(id): SessionKey,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let threshold = state.config.booking.low_stock_threshold;
    let view = state
        .sessions
        .with(id, |s| {
            s.reset();
            s.view(threshold)
        })
        .await
        .ok_or_else(session_not_found)?;
    Ok(Json(view))
}

// POST /api/session/checkout
async fn checkout(
    State(state): State<Arc<AppState>>,
    SessionKey(id): SessionKey,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let summary = state
        .sessions
        .checkout(id)
        .await
        .ok_or_else(session_not_found)?
        .map_err(|e| rejected("checkout", id, e))?;

    tracing::info!(
        "Checkout for event {}: {} tickets, {} seats, total {}",
        summary.event_id,
        summary.total_items,
        summary.seats.len(),
        summary.total_price
    );
    Ok(Json(summary))
}

/* ---------- SEATS ---------- */

// GET /api/session/seats
async fn seat_grid(
    State(state): State<Arc<AppState>>,
    SessionKey(id): SessionKey,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let rows = state
        .sessions
        .with(id, |s| s.seat_rows())
        .await
        .ok_or_else(session_not_found)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "У события нет схемы зала".to_string()))?;
    Ok(Json(json!({ "rows": rows })))
}

// PATCH /api/session/seats/toggle
#[derive(Debug, Deserialize)]
struct ToggleSeatRequest {
    seat: String,
}

async fn toggle_seat(
    State(state): State<Arc<AppState>>,
    SessionKey(id): SessionKey,
    Json(req): Json<ToggleSeatRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let seat: SeatId = req.seat.parse().map_err(|e| rejected("toggle_seat", id, e))?;
    let threshold = state.config.booking.low_stock_threshold;

    let (result, view) = state
        .sessions
        .with(id, |s| s.toggle_seat(seat).map(|t| (t, s.view(threshold))))
        .await
        .ok_or_else(session_not_found)?
        .map_err(|e| rejected("toggle_seat", id, e))?;

    Ok(Json(json!({ "seat": seat, "result": result, "session": view })))
}

/* ---------- TICKETS ---------- */

/// Количество из JSON-числа или из текстового поля формы.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuantityInput {
    Number(serde_json::Number),
    Text(String),
    // null, bool, массив, объект
    Other(serde_json::Value),
}

impl QuantityInput {
    fn to_i64(&self) -> Result<i64, SelectionError> {
        match self {
            QuantityInput::Number(n) => n.as_i64().ok_or(SelectionError::InvalidQuantity),
            QuantityInput::Text(s) => parse_quantity(s),
            QuantityInput::Other(_) => Err(SelectionError::InvalidQuantity),
        }
    }
}

// PATCH /api/session/tickets
#[derive(Debug, Deserialize)]
struct SetQuantityRequest {
    category_id: Uuid,
    quantity: QuantityInput,
}

async fn set_quantity(
    State(state): State<Arc<AppState>>,
    SessionKey(id): SessionKey,
    Json(req): Json<SetQuantityRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let quantity = req.quantity.to_i64().map_err(|e| rejected("set_quantity", id, e))?;
    let threshold = state.config.booking.low_stock_threshold;

    let view = state
        .sessions
        .with(id, |s| {
            s.tickets
                .set_quantity(req.category_id, quantity)
                .map(|_| s.view(threshold))
        })
        .await
        .ok_or_else(session_not_found)?
        .map_err(|e| rejected("set_quantity", id, e))?;

    Ok(Json(view))
}

#[derive(Debug, Deserialize)]
struct CategoryRequest {
    category_id: Uuid,
}

// PATCH /api/session/tickets/increment
async fn increment_ticket(
    State(state): State<Arc<AppState>>,
    SessionKey(id): SessionKey,
    Json(req): Json<CategoryRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let threshold = state.config.booking.low_stock_threshold;
    let view = state
        .sessions
        .with(id, |s| s.tickets.increment(req.category_id).map(|_| s.view(threshold)))
        .await
        .ok_or_else(session_not_found)?
        .map_err(|e| rejected("increment", id, e))?;
    Ok(Json(view))
}

// PATCH /api/session/tickets/decrement
async fn decrement_ticket(
    State(state): State<Arc<AppState>>,
    SessionKey(id): SessionKey,
    Json(req): Json<CategoryRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let threshold = state.config.booking.low_stock_threshold;
    let view = state
        .sessions
        .with(id, |s| s.tickets.decrement(req.category_id).map(|_| s.view(threshold)))
        .await
        .ok_or_else(session_not_found)?
        .map_err(|e| rejected("decrement", id, e))?;
    Ok(Json(view))
}
