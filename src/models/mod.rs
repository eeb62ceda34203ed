pub mod event;
pub mod seat;

pub use event::{Availability, Event, EventDraft, SalesStatus, SeatingPlan, TicketCategory, TicketCategoryDraft};
pub use seat::{SeatId, VenueLayout, ROW_SIZE};
