use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::booking::BookingStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Room {room_id} is not available from {check_in} to {check_out}")]
    Unavailable {
        room_id: String,
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("Booking conflict on room {room_id}")]
    BookingConflict { room_id: String },

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Invalid party: {0}")]
    InvalidParty(String),

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn room_not_found(room_id: &str) -> Self {
        Self::NotFound {
            entity: "Room",
            field: "id",
            value: room_id.to_string(),
        }
    }

    pub fn booking_not_found(booking_id: &str) -> Self {
        Self::NotFound {
            entity: "Booking",
            field: "id",
            value: booking_id.to_string(),
        }
    }

    /// Whether the whole check-then-write sequence may succeed if re-run.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::BookingConflict { .. })
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<InfraError> for DomainError {
    fn from(e: InfraError) -> Self {
        DomainError::Storage(e.to_string())
    }
}
