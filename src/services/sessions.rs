//! sessions.rs
//!
//! Сессии покупки: открываются при заходе на страницу события, живут только в памяти
//! и удаляются при уходе со страницы, после оформления или по таймауту простоя.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{LayoutError, SelectionError};
use crate::models::{Availability, Event, SeatId, VenueLayout};
use crate::services::seat_inventory::{SeatSelection, SeatToggle, SeatView};
use crate::services::ticket_quantity::{CartLine, QuantityState, TicketQuantities};

pub struct Session {
    pub id: Uuid,
    pub event_id: Uuid,
    pub seats: Option<SeatSelection>,
    pub tickets: TicketQuantities,
    last_touched: Instant,
}

impl Session {
    /// Снимок занятых мест и остатков берется из события в момент открытия.
    pub fn open(event: &Event, default_max_seats: u32) -> Result<Self, LayoutError> {
        let seats = match &event.seating {
            Some(plan) => {
                let layout = VenueLayout::new(plan.total_seats)?;
                let max = plan.max_selectable_seats.unwrap_or(default_max_seats);
                Some(SeatSelection::new(layout, plan.booked_seats.iter().copied(), max as usize))
            }
            None => None,
        };

        Ok(Self {
            id: Uuid::new_v4(),
            event_id: event.id,
            seats,
            tickets: TicketQuantities::new(event.ticket_types.clone()),
            last_touched: Instant::now(),
        })
    }

    pub fn toggle_seat(&mut self, seat: SeatId) -> Result<SeatToggle, SelectionError> {
        match self.seats.as_mut() {
            Some(seats) => seats.toggle(seat),
            // у события без схемы зала мест нет
            None => Err(SelectionError::UnknownSeat(seat.to_string())),
        }
    }

    pub fn reset(&mut self) {
        if let Some(seats) = self.seats.as_mut() {
            seats.reset();
        }
        self.tickets.reset();
    }

    pub fn checkout(&self) -> Result<CheckoutSummary, SelectionError> {
        let seats: Vec<SeatId> = self
            .seats
            .as_ref()
            .map(|s| s.selected().copied().collect())
            .unwrap_or_default();
        let total_items = self.tickets.total_items();

        if total_items == 0 && seats.is_empty() {
            return Err(SelectionError::EmptySelection);
        }

        Ok(CheckoutSummary {
            session_id: self.id,
            event_id: self.event_id,
            seats,
            lines: self.tickets.lines(),
            total_items,
            total_price: format!("{:.2}", self.tickets.total_price()),
        })
    }

    pub fn view(&self, low_stock_threshold: u32) -> SessionView {
        let tickets = self
            .tickets
            .categories()
            .iter()
            .map(|c| TicketLineView {
                category_id: c.id,
                name: c.name.clone(),
                price: c.price,
                remaining: c.remaining(),
                quantity: self.tickets.quantity(c.id),
                state: self.tickets.state(c.id).unwrap_or(QuantityState::SoldOut),
                availability: c.availability(low_stock_threshold),
                can_increment: self.tickets.can_increment(c.id),
                can_decrement: self.tickets.can_decrement(c.id),
            })
            .collect();

        SessionView {
            session_id: self.id,
            event_id: self.event_id,
            tickets,
            total_items: self.tickets.total_items(),
            total_price: format!("{:.2}", self.tickets.total_price()),
            selected_seats: self
                .seats
                .as_ref()
                .map(|s| s.selected().copied().collect())
                .unwrap_or_default(),
            max_selectable_seats: self.seats.as_ref().map(SeatSelection::max_selectable),
        }
    }

    pub fn seat_rows(&self) -> Option<Vec<Vec<SeatView>>> {
        self.seats.as_ref().map(SeatSelection::seat_rows)
    }

    fn touch(&mut self) {
        self.last_touched = Instant::now();
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TicketLineView {
    pub category_id: Uuid,
    pub name: String,
    pub price: f64,
    pub remaining: u32,
    pub quantity: u32,
    pub state: QuantityState,
    pub availability: Availability,
    pub can_increment: bool,
    pub can_decrement: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub event_id: Uuid,
    pub tickets: Vec<TicketLineView>,
    pub total_items: u64,
    pub total_price: String,
    pub selected_seats: Vec<SeatId>,
    pub max_selectable_seats: Option<usize>,
}

/// Передается внешнему оформлению заказа; здесь ничего не сохраняется.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSummary {
    pub session_id: Uuid,
    pub event_id: Uuid,
    pub seats: Vec<SeatId>,
    pub lines: Vec<CartLine>,
    pub total_items: u64,
    pub total_price: String,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: Session) -> Uuid {
        let id = session.id;
        self.sessions.lock().await.insert(id, session);
        debug!("Session {} opened", id);
        id
    }

    /// Выполняет операцию над сессией под блокировкой; `None`, если сессии нет.
    pub async fn with<R>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id)?;
        session.touch();
        Some(f(session))
    }

    /// Оформление завершает сессию только при успехе.
    pub async fn checkout(&self, id: Uuid) -> Option<Result<CheckoutSummary, SelectionError>> {
        let mut sessions = self.sessions.lock().await;
        let result = sessions.get(&id)?.checkout();
        if result.is_ok() {
            sessions.remove(&id);
            info!("Session {} checked out", id);
        }
        Some(result)
    }

    pub async fn close(&self, id: Uuid) -> bool {
        let removed = self.sessions.lock().await.remove(&id).is_some();
        if removed {
            debug!("Session {} closed", id);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Удаляет сессии, простаивающие дольше `max_idle`. Возвращает число удаленных.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.last_touched.elapsed() <= max_idle);
        before - sessions.len()
    }
}
