//! Room domain entity

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

/// Room category. Pricing rules dispatch on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum RoomCategory {
    #[serde(rename = "Room")]
    StandardRoom,
    Suite,
    Chalet,
    /// Priced per guest per night.
    #[serde(rename = "Resort")]
    ResortVilla,
}

impl RoomCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StandardRoom => "Room",
            Self::Suite => "Suite",
            Self::Chalet => "Chalet",
            Self::ResortVilla => "Resort",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Room" => Some(Self::StandardRoom),
            "Suite" => Some(Self::Suite),
            "Chalet" => Some(Self::Chalet),
            "Resort" => Some(Self::ResortVilla),
            _ => None,
        }
    }

    pub fn is_per_head(&self) -> bool {
        matches!(self, Self::ResortVilla)
    }
}

impl std::fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bookable unit from the catalog. Read-only to the booking engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub category: RoomCategory,
    pub description: String,
    pub amenities: Vec<String>,
    pub image_urls: Vec<String>,
    /// Nightly rate (per guest for per-head categories)
    pub weekday_price: Decimal,
    /// Friday/Saturday night rate; `None` means the weekday rate applies
    pub weekend_price: Option<Decimal>,
    /// Maximum occupancy
    pub capacity: u32,
    /// Final price is negotiated by staff; computed totals are estimates
    pub manual_pricing: bool,
}

impl Room {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: RoomCategory,
        weekday_price: Decimal,
        capacity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            description: String::new(),
            amenities: Vec::new(),
            image_urls: Vec::new(),
            weekday_price,
            weekend_price: None,
            capacity,
            manual_pricing: false,
        }
    }

    pub fn with_weekend_price(mut self, price: Decimal) -> Self {
        self.weekend_price = Some(price);
        self
    }

    pub fn with_manual_pricing(mut self) -> Self {
        self.manual_pricing = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_amenities<I, S>(mut self, amenities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.amenities = amenities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_images<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.image_urls = urls.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_per_head(&self) -> bool {
        self.category.is_per_head()
    }

    /// Rate charged for the night starting on `night`.
    ///
    /// Friday and Saturday nights use the weekend price when one is set.
    pub fn nightly_rate(&self, night: NaiveDate) -> Decimal {
        match self.weekend_price {
            Some(weekend) if is_weekend_night(night) => weekend,
            _ => self.weekday_price,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.id.trim().is_empty() {
            return Err(DomainError::Validation("room id must not be empty".into()));
        }
        if self.weekday_price < Decimal::ZERO {
            return Err(DomainError::Validation(format!(
                "room {}: weekday price must be >= 0",
                self.id
            )));
        }
        if let Some(weekend) = self.weekend_price {
            if weekend < Decimal::ZERO {
                return Err(DomainError::Validation(format!(
                    "room {}: weekend price must be >= 0",
                    self.id
                )));
            }
        }
        if self.capacity < 1 {
            return Err(DomainError::Validation(format!(
                "room {}: capacity must be at least 1",
                self.id
            )));
        }
        Ok(())
    }
}

/// A night is a weekend night when it starts on Friday or Saturday.
pub fn is_weekend_night(night: NaiveDate) -> bool {
    matches!(night.weekday(), Weekday::Fri | Weekday::Sat)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn suite() -> Room {
        Room::new("2", "Alpine Retreat Suite", RoomCategory::Suite, Decimal::from(100), 4)
            .with_weekend_price(Decimal::from(150))
    }

    #[test]
    fn weekend_nights_are_friday_and_saturday() {
        // 2024-11-07 is a Thursday
        assert!(!is_weekend_night(date(2024, 11, 7)));
        assert!(is_weekend_night(date(2024, 11, 8)));
        assert!(is_weekend_night(date(2024, 11, 9)));
        assert!(!is_weekend_night(date(2024, 11, 10)));
    }

    #[test]
    fn nightly_rate_uses_weekend_price_when_set() {
        let room = suite();
        assert_eq!(room.nightly_rate(date(2024, 11, 7)), Decimal::from(100));
        assert_eq!(room.nightly_rate(date(2024, 11, 8)), Decimal::from(150));
    }

    #[test]
    fn nightly_rate_falls_back_to_weekday_price() {
        let room = Room::new("3", "Garden", RoomCategory::StandardRoom, Decimal::from(80), 2);
        assert_eq!(room.nightly_rate(date(2024, 11, 9)), Decimal::from(80));
    }

    #[test]
    fn only_resort_is_per_head() {
        assert!(RoomCategory::ResortVilla.is_per_head());
        assert!(!RoomCategory::Suite.is_per_head());
        assert!(!RoomCategory::Chalet.is_per_head());
        assert!(!RoomCategory::StandardRoom.is_per_head());
    }

    #[test]
    fn category_wire_names() {
        assert_eq!(RoomCategory::StandardRoom.as_str(), "Room");
        assert_eq!(RoomCategory::parse("Resort"), Some(RoomCategory::ResortVilla));
        assert_eq!(RoomCategory::parse("Villa"), None);
        let json = serde_json::to_string(&RoomCategory::ResortVilla).unwrap();
        assert_eq!(json, "\"Resort\"");
    }

    #[test]
    fn validate_rejects_zero_capacity() {
        let mut room = suite();
        room.capacity = 0;
        assert!(matches!(room.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn validate_rejects_negative_prices() {
        let mut room = suite();
        room.weekday_price = Decimal::from(-1);
        assert!(room.validate().is_err());

        let room = suite().with_weekend_price(Decimal::from(-5));
        assert!(room.validate().is_err());
    }

    #[test]
    fn validate_accepts_free_room() {
        let room = Room::new("x", "Staff quarters", RoomCategory::StandardRoom, Decimal::ZERO, 1);
        assert!(room.validate().is_ok());
    }
}
