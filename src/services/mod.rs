pub mod cleanup;
pub mod dashboard;
pub mod seat_inventory;
pub mod sessions;
pub mod ticket_quantity;
