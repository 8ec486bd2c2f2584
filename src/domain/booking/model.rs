//! Booking domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::date_range::DateRange;
use crate::domain::room::Room;
use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum BookingStatus {
    /// Requested by the guest, awaiting staff approval
    Pending,
    /// Approved by staff
    Confirmed,
    #[serde(rename = "Checked In")]
    CheckedIn,
    #[serde(rename = "Checked Out")]
    CheckedOut,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::CheckedIn,
        Self::CheckedOut,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::CheckedIn => "Checked In",
            Self::CheckedOut => "Checked Out",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "Confirmed" => Some(Self::Confirmed),
            "Checked In" | "CheckedIn" => Some(Self::CheckedIn),
            "Checked Out" | "CheckedOut" => Some(Self::CheckedOut),
            "Cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// No transition leaves a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::CheckedOut | Self::Cancelled)
    }

    /// Whether a booking in this status occupies its nights.
    pub fn holds_inventory(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Party composition.
///
/// Serialized untagged: a bare number for a guest count, or
/// `{"adults": 2, "kids": 1}` for per-head pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PartySize {
    Guests(u32),
    PerHead {
        adults: u32,
        #[serde(default)]
        kids: u32,
    },
}

impl PartySize {
    pub fn total(&self) -> u32 {
        match *self {
            Self::Guests(n) => n,
            Self::PerHead { adults, kids } => adults.saturating_add(kids),
        }
    }

    /// Check the party against the room's occupancy rules.
    ///
    /// Per-head rooms are not capped by capacity.
    pub fn validate_for(&self, room: &Room) -> DomainResult<()> {
        let total = self.total();
        if total < 1 {
            return Err(DomainError::InvalidParty(
                "party must include at least one guest".into(),
            ));
        }
        if !room.is_per_head() && total > room.capacity {
            return Err(DomainError::InvalidParty(format!(
                "{} guests exceed the capacity of {} ({})",
                total, room.name, room.capacity
            )));
        }
        Ok(())
    }
}

/// Guest contact details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ContactInfo {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 3, max = 32))]
    pub phone: Option<String>,
}

impl ContactInfo {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn check(&self) -> DomainResult<()> {
        self.validate()
            .map_err(|e| DomainError::Validation(format!("contact: {}", e)))
    }
}

/// A stay request and its lifecycle state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Booking {
    /// Empty until the repository assigns one
    pub id: String,
    pub room_id: String,
    pub guest: ContactInfo,
    pub range: DateRange,
    pub party: PartySize,
    /// Price at booking time
    pub total_price: Decimal,
    /// The room is quote-only and `total_price` is an estimate
    pub price_is_estimate: bool,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn holds_inventory(&self) -> bool {
        self.status.holds_inventory()
    }

    /// Whether this booking blocks `range` on `room_id`.
    pub fn conflicts_with(&self, room_id: &str, range: &DateRange) -> bool {
        self.room_id == room_id && self.holds_inventory() && self.range.overlaps(range)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::room::RoomCategory;

    fn garden() -> Room {
        Room::new("3", "Garden Deluxe Room", RoomCategory::StandardRoom, Decimal::from(180), 2)
    }

    fn villa() -> Room {
        Room::new("4", "Royal Palms", RoomCategory::ResortVilla, Decimal::from(150), 8)
    }

    #[test]
    fn status_wire_names_roundtrip() {
        for status in BookingStatus::ALL {
            assert_eq!(BookingStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(BookingStatus::parse("Unknown"), None);
        assert_eq!(
            serde_json::to_string(&BookingStatus::CheckedIn).unwrap(),
            "\"Checked In\""
        );
    }

    #[test]
    fn terminal_statuses() {
        assert!(BookingStatus::CheckedOut.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(!BookingStatus::Pending.is_terminal());
        assert!(!BookingStatus::CheckedIn.is_terminal());
    }

    #[test]
    fn only_cancelled_releases_inventory() {
        assert!(!BookingStatus::Cancelled.holds_inventory());
        assert!(BookingStatus::CheckedOut.holds_inventory());
        assert!(BookingStatus::Pending.holds_inventory());
    }

    #[test]
    fn party_total() {
        assert_eq!(PartySize::Guests(3).total(), 3);
        assert_eq!(PartySize::PerHead { adults: 2, kids: 1 }.total(), 3);
    }

    #[test]
    fn party_deserializes_both_shapes() {
        let guests: PartySize = serde_json::from_str("2").unwrap();
        assert_eq!(guests, PartySize::Guests(2));

        let pax: PartySize = serde_json::from_str(r#"{"adults": 2, "kids": 1}"#).unwrap();
        assert_eq!(pax, PartySize::PerHead { adults: 2, kids: 1 });

        let adults_only: PartySize = serde_json::from_str(r#"{"adults": 4}"#).unwrap();
        assert_eq!(adults_only.total(), 4);
    }

    #[test]
    fn party_over_capacity_is_rejected() {
        let err = PartySize::Guests(3).validate_for(&garden()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidParty(_)));
        assert!(PartySize::Guests(2).validate_for(&garden()).is_ok());
    }

    #[test]
    fn empty_party_is_rejected() {
        assert!(PartySize::Guests(0).validate_for(&garden()).is_err());
        assert!(PartySize::PerHead { adults: 0, kids: 0 }
            .validate_for(&villa())
            .is_err());
    }

    #[test]
    fn per_head_party_is_not_capped_by_capacity() {
        let party = PartySize::PerHead { adults: 8, kids: 4 };
        assert!(party.validate_for(&villa()).is_ok());
    }

    #[test]
    fn contact_validation() {
        assert!(ContactInfo::new("Alice", "alice@example.com").check().is_ok());
        assert!(ContactInfo::new("", "alice@example.com").check().is_err());
        assert!(ContactInfo::new("Alice", "not-an-email").check().is_err());
        assert!(ContactInfo::new("Alice", "alice@example.com")
            .with_phone("+1")
            .check()
            .is_err());
    }
}
