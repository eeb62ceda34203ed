use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

/// Отказ операции над выбором мест или количеством билетов.
///
/// Ни одна из ошибок не фатальна: состояние сессии остается прежним.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("quantity must be a non-negative integer")]
    InvalidQuantity,

    #[error("requested {requested} but only {remaining} left")]
    CapacityExceeded { requested: u64, remaining: u64 },

    #[error("seat {0} is already booked")]
    SeatUnavailable(String),

    #[error("seat {0} does not exist in this venue")]
    UnknownSeat(String),

    #[error("ticket category {0} not found")]
    UnknownCategory(Uuid),

    #[error("no tickets or seats selected")]
    EmptySelection,
}

impl SelectionError {
    pub fn status(&self) -> StatusCode {
        match self {
            SelectionError::InvalidQuantity | SelectionError::UnknownSeat(_) => StatusCode::BAD_REQUEST,
            SelectionError::UnknownCategory(_) => StatusCode::NOT_FOUND,
            SelectionError::CapacityExceeded { .. } | SelectionError::SeatUnavailable(_) => StatusCode::CONFLICT,
            SelectionError::EmptySelection => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

// Ответ для axum-хендлеров в формате (StatusCode, String)
impl From<SelectionError> for (StatusCode, String) {
    fn from(err: SelectionError) -> Self {
        (err.status(), err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("venue of {total_seats} seats needs {rows} rows, at most {max_rows} are supported")]
    TooManyRows { total_seats: u32, rows: u32, max_rows: u32 },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("event {0} not found")]
    EventNotFound(Uuid),

    #[error("invalid event draft: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}
