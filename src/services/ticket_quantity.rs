//! ticket_quantity.rs
//!
//! Количество билетов по категориям в рамках одной сессии покупки.
//! Итоги (число билетов, сумма) всегда пересчитываются из текущего состояния.

use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::SelectionError;
use crate::models::TicketCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityState {
    Empty,
    Partial,
    Exhausted,
    SoldOut,
}

/// Строка корзины для передачи в оформление заказа.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub category_id: Uuid,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub subtotal: f64,
}

/// Разбор количества из текстового поля: только целые числа >= 0.
pub fn parse_quantity(input: &str) -> Result<i64, SelectionError> {
    let value: i64 = input.trim().parse().map_err(|_| SelectionError::InvalidQuantity)?;
    if value < 0 {
        return Err(SelectionError::InvalidQuantity);
    }
    Ok(value)
}

#[derive(Debug, Clone)]
pub struct TicketQuantities {
    categories: Vec<TicketCategory>,
    requested: HashMap<Uuid, u32>,
}

impl TicketQuantities {
    /// Категории - снимок на момент открытия сессии.
    pub fn new(categories: Vec<TicketCategory>) -> Self {
        Self { categories, requested: HashMap::new() }
    }

    pub fn categories(&self) -> &[TicketCategory] {
        &self.categories
    }

    fn category(&self, id: Uuid) -> Result<&TicketCategory, SelectionError> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .ok_or(SelectionError::UnknownCategory(id))
    }

    pub fn quantity(&self, id: Uuid) -> u32 {
        self.requested.get(&id).copied().unwrap_or(0)
    }

    pub fn set_quantity(&mut self, id: Uuid, new_quantity: i64) -> Result<u32, SelectionError> {
        let remaining = self.category(id)?.remaining();

        if new_quantity < 0 {
            return Err(SelectionError::InvalidQuantity);
        }
        if new_quantity > i64::from(remaining) {
            return Err(SelectionError::CapacityExceeded {
                requested: new_quantity as u64,
                remaining: u64::from(remaining),
            });
        }

        // здесь 0 <= new_quantity <= remaining, значит влезает в u32
        let quantity = new_quantity as u32;
        if quantity == 0 {
            self.requested.remove(&id);
        } else {
            self.requested.insert(id, quantity);
        }
        Ok(quantity)
    }

    pub fn increment(&mut self, id: Uuid) -> Result<u32, SelectionError> {
        let next = i64::from(self.quantity(id)) + 1;
        self.set_quantity(id, next)
    }

    pub fn decrement(&mut self, id: Uuid) -> Result<u32, SelectionError> {
        let next = (i64::from(self.quantity(id)) - 1).max(0);
        self.set_quantity(id, next)
    }

    pub fn is_sold_out(&self, id: Uuid) -> bool {
        self.category(id).map(TicketCategory::is_sold_out).unwrap_or(true)
    }

    pub fn can_increment(&self, id: Uuid) -> bool {
        self.category(id)
            .map(|c| self.quantity(id) < c.remaining())
            .unwrap_or(false)
    }

    pub fn can_decrement(&self, id: Uuid) -> bool {
        self.quantity(id) > 0
    }

    pub fn state(&self, id: Uuid) -> Result<QuantityState, SelectionError> {
        let capacity = self.category(id)?.remaining();
        let qty = self.quantity(id);
        Ok(match (qty, capacity) {
            (_, 0) => QuantityState::SoldOut,
            (0, _) => QuantityState::Empty,
            (q, c) if q < c => QuantityState::Partial,
            _ => QuantityState::Exhausted,
        })
    }

    pub fn total_items(&self) -> u64 {
        self.requested.values().map(|&q| u64::from(q)).sum()
    }

    pub fn total_price(&self) -> f64 {
        self.categories
            .iter()
            .map(|c| c.price * f64::from(self.quantity(c.id)))
            .sum()
    }

    /// Непустые строки корзины в порядке категорий события.
    pub fn lines(&self) -> Vec<CartLine> {
        self.categories
            .iter()
            .filter_map(|c| {
                let quantity = self.quantity(c.id);
                (quantity > 0).then(|| CartLine {
                    category_id: c.id,
                    name: c.name.clone(),
                    unit_price: c.price,
                    quantity,
                    subtotal: c.price * f64::from(quantity),
                })
            })
            .collect()
    }

    pub fn reset(&mut self) {
        self.requested.clear();
    }
}
