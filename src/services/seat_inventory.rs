//! seat_inventory.rs
//!
//! Выбор мест в зале одной сессией покупателя.
//!
//! Гарантии модели:
//! - выбранное место никогда не входит в число занятых;
//! - выбранных мест не больше `max_selectable`;
//! - уже выбранное место всегда можно снять, даже при исчерпанном лимите.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::error::SelectionError;
use crate::models::{SeatId, VenueLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatToggle {
    Selected,
    Deselected,
}

/// Состояние места для отрисовки сетки.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatState {
    Booked,
    Selected,
    Available,
    /// Свободно, но лимит выбора уже исчерпан.
    Blocked,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatView {
    pub seat: SeatId,
    pub state: SeatState,
}

#[derive(Debug, Clone)]
pub struct SeatSelection {
    layout: VenueLayout,
    booked: BTreeSet<SeatId>,
    selected: BTreeSet<SeatId>,
    max_selectable: usize,
}

impl SeatSelection {
    pub fn new(layout: VenueLayout, booked: impl IntoIterator<Item = SeatId>, max_selectable: usize) -> Self {
        Self {
            layout,
            booked: booked.into_iter().collect(),
            selected: BTreeSet::new(),
            max_selectable,
        }
    }

    pub fn layout(&self) -> &VenueLayout {
        &self.layout
    }

    pub fn max_selectable(&self) -> usize {
        self.max_selectable
    }

    pub fn is_booked(&self, seat: &SeatId) -> bool {
        self.booked.contains(seat)
    }

    pub fn is_selected(&self, seat: &SeatId) -> bool {
        self.selected.contains(seat)
    }

    pub fn can_select(&self, seat: &SeatId) -> bool {
        self.layout.contains(seat)
            && !self.is_booked(seat)
            && (self.is_selected(seat) || self.selected.len() < self.max_selectable)
    }

    pub fn toggle(&mut self, seat: SeatId) -> Result<SeatToggle, SelectionError> {
        if !self.layout.contains(&seat) {
            return Err(SelectionError::UnknownSeat(seat.to_string()));
        }
        if self.is_booked(&seat) {
            return Err(SelectionError::SeatUnavailable(seat.to_string()));
        }
        if self.selected.remove(&seat) {
            return Ok(SeatToggle::Deselected);
        }
        if !self.can_select(&seat) {
            return Err(SelectionError::CapacityExceeded {
                requested: 1,
                remaining: self.max_selectable.saturating_sub(self.selected.len()) as u64,
            });
        }

        self.selected.insert(seat);
        debug_assert!(self.selected.len() <= self.max_selectable);
        debug_assert!(self.selected.is_disjoint(&self.booked));
        Ok(SeatToggle::Selected)
    }

    pub fn reset(&mut self) {
        self.selected.clear();
    }

    /// Выбранные места по рядам и номерам.
    pub fn selected(&self) -> impl Iterator<Item = &SeatId> {
        self.selected.iter()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn state_of(&self, seat: &SeatId) -> SeatState {
        if self.is_booked(seat) {
            SeatState::Booked
        } else if self.is_selected(seat) {
            SeatState::Selected
        } else if self.can_select(seat) {
            SeatState::Available
        } else {
            SeatState::Blocked
        }
    }

    pub fn seat_rows(&self) -> Vec<Vec<SeatView>> {
        self.layout
            .rows()
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|seat| SeatView { seat, state: self.state_of(&seat) })
                    .collect()
            })
            .collect()
    }
}
