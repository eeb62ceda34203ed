use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{LayoutError, SelectionError};

/// Мест в одном ряду зала.
pub const ROW_SIZE: u32 = 10;

/// Ряды обозначаются буквами A..Z.
pub const MAX_ROWS: u32 = 26;

/// Идентификатор места: буква ряда + номер места с единицы ("A1", "C10").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeatId {
    row: u32,
    number: u32,
}

impl SeatId {
    /// `row` с нуля, `number` с единицы.
    pub fn new(row: u32, number: u32) -> Option<Self> {
        if row >= MAX_ROWS || number == 0 {
            return None;
        }
        Some(Self { row, number })
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn row_letter(&self) -> char {
        char::from(b'A' + self.row as u8)
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_letter(), self.number)
    }
}

impl FromStr for SeatId {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || SelectionError::UnknownSeat(s.to_string());

        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(unknown)?;
        if !letter.is_ascii_uppercase() {
            return Err(unknown());
        }

        let digits = chars.as_str();
        // "A01" и "A+1" не считаем валидными
        if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(unknown());
        }
        let number: u32 = digits.parse().map_err(|_| unknown())?;

        SeatId::new(letter as u32 - 'A' as u32, number).ok_or_else(unknown)
    }
}

impl TryFrom<String> for SeatId {
    type Error = SelectionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SeatId> for String {
    fn from(seat: SeatId) -> Self {
        seat.to_string()
    }
}

/// Схема зала, вычисляемая из общего числа мест.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VenueLayout {
    total_seats: u32,
}

impl VenueLayout {
    pub fn new(total_seats: u32) -> Result<Self, LayoutError> {
        let rows = total_seats.div_ceil(ROW_SIZE);
        if rows > MAX_ROWS {
            return Err(LayoutError::TooManyRows { total_seats, rows, max_rows: MAX_ROWS });
        }
        Ok(Self { total_seats })
    }

    pub fn total_seats(&self) -> u32 {
        self.total_seats
    }

    pub fn row_count(&self) -> u32 {
        self.total_seats.div_ceil(ROW_SIZE)
    }

    /// Длина ряда: последний может быть неполным.
    pub fn row_len(&self, row: u32) -> u32 {
        if row >= self.row_count() {
            return 0;
        }
        (self.total_seats - row * ROW_SIZE).min(ROW_SIZE)
    }

    pub fn contains(&self, seat: &SeatId) -> bool {
        let col = seat.number() - 1;
        col < ROW_SIZE && seat.row() * ROW_SIZE + col < self.total_seats
    }

    pub fn rows(&self) -> Vec<Vec<SeatId>> {
        (0..self.row_count())
            .map(|row| {
                (1..=self.row_len(row))
                    .filter_map(|number| SeatId::new(row, number))
                    .collect()
            })
            .collect()
    }
}
