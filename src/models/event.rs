use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::seat::{SeatId, VenueLayout};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub organizer: String,
    pub organizer_id: Uuid,
    pub image: String,
    pub featured: bool,
    pub category: String,
    pub ticket_types: Vec<TicketCategory>,
    pub total_tickets: u32,
    pub sold_tickets: u32,
    pub seating: Option<SeatingPlan>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Категория билетов события.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketCategory {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub available: u32,
    pub sold: u32,
    pub description: Option<String>,
}

impl TicketCategory {
    pub fn remaining(&self) -> u32 {
        self.available.saturating_sub(self.sold)
    }

    pub fn is_sold_out(&self) -> bool {
        self.remaining() == 0
    }

    pub fn availability(&self, low_stock_threshold: u32) -> Availability {
        match self.remaining() {
            0 => Availability::SoldOut,
            left if left < low_stock_threshold => Availability::Low { remaining: left },
            left => Availability::Available { remaining: left },
        }
    }
}

/// Схема рассадки: размер зала, уже занятые места и лимит выбора.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatingPlan {
    pub total_seats: u32,
    #[serde(default)]
    pub booked_seats: Vec<SeatId>,
    pub max_selectable_seats: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Availability {
    SoldOut,
    Low { remaining: u32 },
    Available { remaining: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SalesStatus {
    #[serde(rename = "Sold Out")]
    SoldOut,
    #[serde(rename = "Almost Sold Out")]
    AlmostSoldOut,
    #[serde(rename = "Selling Fast")]
    SellingFast,
    #[serde(rename = "On Sale")]
    OnSale,
    #[serde(rename = "Just Launched")]
    JustLaunched,
}

impl SalesStatus {
    pub fn from_percentage(sold_percent: f64) -> Self {
        if sold_percent >= 90.0 {
            SalesStatus::SoldOut
        } else if sold_percent >= 75.0 {
            SalesStatus::AlmostSoldOut
        } else if sold_percent >= 50.0 {
            SalesStatus::SellingFast
        } else if sold_percent >= 25.0 {
            SalesStatus::OnSale
        } else {
            SalesStatus::JustLaunched
        }
    }
}

impl Event {
    /// Процент проданных билетов, только для отображения.
    pub fn sold_percentage(&self) -> f64 {
        if self.total_tickets == 0 {
            return 0.0;
        }
        f64::from(self.sold_tickets) / f64::from(self.total_tickets) * 100.0
    }

    pub fn sales_status(&self) -> SalesStatus {
        SalesStatus::from_percentage(self.sold_percentage())
    }

    pub fn min_price(&self) -> Option<f64> {
        self.ticket_types.iter().map(|t| t.price).reduce(f64::min)
    }

    pub fn max_price(&self) -> Option<f64> {
        self.ticket_types.iter().map(|t| t.price).reduce(f64::max)
    }

    pub fn ticket_category(&self, id: Uuid) -> Option<&TicketCategory> {
        self.ticket_types.iter().find(|t| t.id == id)
    }
}

/* ---------- организаторские формы ---------- */

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_draft"))]
pub struct EventDraft {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    #[serde(default)]
    pub address: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[validate(length(min = 1, message = "organizer is required"))]
    pub organizer: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub featured: bool,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "at least one ticket type is required"), nested)]
    pub ticket_types: Vec<TicketCategoryDraft>,
    #[serde(default)]
    pub seating: Option<SeatingPlan>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_inventory"))]
pub struct TicketCategoryDraft {
    /// При редактировании сохраняем id существующей категории.
    pub id: Option<Uuid>,
    #[validate(length(min = 1, message = "ticket name is required"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "price must be non-negative"))]
    pub price: f64,
    pub available: u32,
    #[serde(default)]
    pub sold: u32,
    pub description: Option<String>,
}

fn validate_draft(draft: &EventDraft) -> Result<(), ValidationError> {
    if draft.end_time <= draft.start_time {
        return Err(ValidationError::new("end_before_start"));
    }
    // итоги события хранятся в u32
    let available: u64 = draft.ticket_types.iter().map(|t| u64::from(t.available)).sum();
    let sold: u64 = draft.ticket_types.iter().map(|t| u64::from(t.sold)).sum();
    if available > u64::from(u32::MAX) || sold > u64::from(u32::MAX) {
        return Err(ValidationError::new("ticket_totals_overflow"));
    }
    if let Some(plan) = &draft.seating {
        let layout = VenueLayout::new(plan.total_seats).map_err(|_| ValidationError::new("venue_too_large"))?;
        if !plan.booked_seats.iter().all(|s| layout.contains(s)) {
            return Err(ValidationError::new("booked_seat_outside_venue"));
        }
    }
    Ok(())
}

fn validate_inventory(ticket: &TicketCategoryDraft) -> Result<(), ValidationError> {
    if ticket.sold > ticket.available {
        return Err(ValidationError::new("sold_exceeds_available"));
    }
    if !ticket.price.is_finite() {
        return Err(ValidationError::new("price_not_finite"));
    }
    Ok(())
}

impl TicketCategoryDraft {
    pub fn into_category(self) -> TicketCategory {
        TicketCategory {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            name: self.name,
            price: self.price,
            available: self.available,
            sold: self.sold,
            description: self.description,
        }
    }
}

impl EventDraft {
    /// Собирает событие; итоговые счетчики считаются по категориям.
    pub fn into_event(self, id: Uuid, organizer_id: Uuid, created_at: DateTime<Utc>) -> Event {
        let ticket_types: Vec<TicketCategory> = self
            .ticket_types
            .into_iter()
            .map(TicketCategoryDraft::into_category)
            .collect();
        // validate_draft отсекает переполнение; без валидации значения насыщаются
        let total_tickets = ticket_types.iter().fold(0u32, |acc, t| acc.saturating_add(t.available));
        let sold_tickets = ticket_types.iter().fold(0u32, |acc, t| acc.saturating_add(t.sold));

        Event {
            id,
            title: self.title,
            description: self.description,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location,
            address: self.address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            organizer: self.organizer,
            organizer_id,
            image: self.image,
            featured: self.featured,
            category: self.category,
            ticket_types,
            total_tickets,
            sold_tickets,
            seating: self.seating,
            created_at,
            updated_at: Utc::now(),
        }
    }
}
