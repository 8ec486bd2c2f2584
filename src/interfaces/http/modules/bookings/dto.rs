//! Booking DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::booking::lifecycle;
use crate::domain::{Booking, BookingStatus, ContactInfo, DateRange, PartySize};

/// Booking as returned by the API, with the statuses staff may move it to
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingDto {
    pub id: String,
    pub room_id: String,
    pub guest: ContactInfo,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub party: PartySize,
    pub total_price: Decimal,
    pub price_is_estimate: bool,
    pub currency: String,
    pub status: BookingStatus,
    pub available_actions: Vec<BookingStatus>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookingDto {
    pub fn from_booking(b: Booking, currency: &str) -> Self {
        Self {
            nights: b.range.night_count(),
            available_actions: lifecycle::available_actions(b.status),
            id: b.id,
            room_id: b.room_id,
            guest: b.guest,
            check_in: b.range.check_in,
            check_out: b.range.check_out,
            party: b.party,
            total_price: b.total_price,
            price_is_estimate: b.price_is_estimate,
            currency: currency.to_string(),
            status: b.status,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingListQuery {
    pub room_id: Option<String>,
    /// `Pending`, `Confirmed`, `Checked In`, `Checked Out` or `Cancelled`
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    #[validate(length(min = 1, max = 64))]
    pub room_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    /// A guest count, or `{"adults": 2, "kids": 1}` for per-head rooms
    pub party: PartySize,
    #[validate(nested)]
    pub guest: ContactInfo,
}

impl CreateBookingRequest {
    pub fn range(&self) -> DateRange {
        DateRange::new(self.check_in, self.check_out)
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TransitionRequest {
    pub status: BookingStatus,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ManualQuoteRequest {
    /// Final negotiated total
    pub amount: Decimal,
}
