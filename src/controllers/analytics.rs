//! analytics.rs
//!
//! Сводка продаж для дашборда организатора.
//!
//! Данные статические: мок-ряды продаж и выручки плюс текущий каталог событий.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{Datelike, Utc};
use std::sync::Arc;

use crate::services::dashboard::{self, EventTableQuery};
use crate::AppState;

/// Определяет маршруты, связанные с аналитикой.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/events", get(event_table))
}

/// GET /api/dashboard
///
/// Итоги по событиям, продажи за неделю, выручка месяца и рост к прошлому месяцу.
async fn get_dashboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let events = state.catalog.list().await;
    let summary = dashboard::summarize(&events, Utc::now().month0() as usize);

    tracing::info!(
        "Дашборд: {} событий, {} билетов за неделю, рост выручки {}%",
        summary.total_events,
        summary.weekly_tickets_sold,
        summary.revenue_growth_percent
    );

    Json(summary)
}

/// GET /api/dashboard/events?query=&sort=&direction=
///
/// Таблица управления событиями организатора.
async fn event_table(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EventTableQuery>,
) -> impl IntoResponse {
    let events = state.catalog.list().await;
    let rows = dashboard::event_table(&events, &query);

    tracing::debug!("event_table {:?}: {} rows", query, rows.len());
    Json(rows)
}
