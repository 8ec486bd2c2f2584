//! Room catalog DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    AvailabilityResult, DateRange, PartySize, Room, RoomCategory, UnavailableReason,
};

/// Room as shown in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoomDto {
    pub id: String,
    pub name: String,
    pub category: RoomCategory,
    pub description: String,
    pub amenities: Vec<String>,
    pub image_urls: Vec<String>,
    pub weekday_price: Decimal,
    /// Friday and Saturday nights; falls back to the weekday price
    pub weekend_price: Decimal,
    pub capacity: u32,
    /// Prices are per guest per night
    pub per_head: bool,
    /// Staff confirm the final price after booking
    pub manual_pricing: bool,
    pub currency: String,
}

impl RoomDto {
    pub fn from_room(room: Room, currency: &str) -> Self {
        Self {
            per_head: room.is_per_head(),
            weekend_price: room.weekend_price.unwrap_or(room.weekday_price),
            id: room.id,
            name: room.name,
            category: room.category,
            description: room.description,
            amenities: room.amenities,
            image_urls: room.image_urls,
            weekday_price: room.weekday_price,
            capacity: room.capacity,
            manual_pricing: room.manual_pricing,
            currency: currency.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RoomListQuery {
    /// `Room`, `Suite`, `Chalet` or `Resort`
    pub category: Option<String>,
    /// Case-insensitive match on name or description
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StayQuery {
    #[param(value_type = String, example = "2024-11-07")]
    pub check_in: NaiveDate,
    #[param(value_type = String, example = "2024-11-10")]
    pub check_out: NaiveDate,
}

impl StayQuery {
    pub fn range(&self) -> DateRange {
        DateRange::new(self.check_in, self.check_out)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityDto {
    pub room_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub available: bool,
    pub reason: Option<UnavailableReason>,
    pub conflicts: Vec<String>,
}

impl AvailabilityDto {
    pub fn new(room_id: &str, range: DateRange, result: AvailabilityResult) -> Self {
        Self {
            room_id: room_id.to_string(),
            check_in: range.check_in,
            check_out: range.check_out,
            nights: range.night_count(),
            available: result.available,
            reason: result.reason,
            conflicts: result.conflicts,
        }
    }
}

/// Price enquiry for a stay
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct QuoteRequest {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    /// A guest count, or `{"adults": 2, "kids": 1}` for per-head rooms
    pub party: PartySize,
}
