//! Availability checker
//!
//! Decides whether a room is free for a candidate stay given the bookings
//! already on record. Pure: "today" is passed in by the caller.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::booking::{Booking, DateRange};
use crate::domain::room::Room;

/// Why a stay cannot be booked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum UnavailableReason {
    CheckInInPast,
    InvalidRange,
    Overlap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityResult {
    pub available: bool,
    pub reason: Option<UnavailableReason>,
    /// Ids of the bookings that block the stay
    pub conflicts: Vec<String>,
}

impl AvailabilityResult {
    fn available() -> Self {
        Self {
            available: true,
            reason: None,
            conflicts: Vec::new(),
        }
    }

    fn unavailable(reason: UnavailableReason, conflicts: Vec<String>) -> Self {
        Self {
            available: false,
            reason: Some(reason),
            conflicts,
        }
    }
}

/// Full availability decision with the reason and the blocking bookings.
///
/// Bookings for other rooms and cancelled bookings are ignored.
pub fn check(
    room: &Room,
    candidate: &DateRange,
    existing: &[Booking],
    today: NaiveDate,
) -> AvailabilityResult {
    if !candidate.is_valid() {
        return AvailabilityResult::unavailable(UnavailableReason::InvalidRange, Vec::new());
    }
    if candidate.check_in < today {
        return AvailabilityResult::unavailable(UnavailableReason::CheckInInPast, Vec::new());
    }

    let conflicts: Vec<String> = existing
        .iter()
        .filter(|b| b.conflicts_with(&room.id, candidate))
        .map(|b| b.id.clone())
        .collect();

    if conflicts.is_empty() {
        AvailabilityResult::available()
    } else {
        AvailabilityResult::unavailable(UnavailableReason::Overlap, conflicts)
    }
}

pub fn is_available(
    room: &Room,
    candidate: &DateRange,
    existing: &[Booking],
    today: NaiveDate,
) -> bool {
    check(room, candidate, existing, today).available
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::{BookingStatus, ContactInfo, PartySize};
    use crate::domain::room::RoomCategory;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn room() -> Room {
        Room::new("1", "Oceanview Paradise Chalet", RoomCategory::Chalet, Decimal::from(450), 2)
    }

    fn booking(id: &str, room_id: &str, range: DateRange, status: BookingStatus) -> Booking {
        let at = Utc.with_ymd_and_hms(2024, 10, 1, 12, 0, 0).unwrap();
        Booking {
            id: id.into(),
            room_id: room_id.into(),
            guest: ContactInfo::new("Bob", "bob@example.com"),
            range,
            party: PartySize::Guests(2),
            total_price: Decimal::from(900),
            price_is_estimate: false,
            status,
            created_at: at,
            updated_at: at,
        }
    }

    fn nov_1_to_5(status: BookingStatus) -> Vec<Booking> {
        vec![booking("b1", "1", DateRange::new(d(11, 1), d(11, 5)), status)]
    }

    #[test]
    fn overlapping_confirmed_booking_blocks() {
        let existing = nov_1_to_5(BookingStatus::Confirmed);
        let result = check(&room(), &DateRange::new(d(11, 4), d(11, 8)), &existing, d(10, 20));
        assert!(!result.available);
        assert_eq!(result.reason, Some(UnavailableReason::Overlap));
        assert_eq!(result.conflicts, vec!["b1".to_string()]);
    }

    #[test]
    fn cancelled_booking_does_not_block() {
        let existing = nov_1_to_5(BookingStatus::Cancelled);
        assert!(is_available(
            &room(),
            &DateRange::new(d(11, 4), d(11, 8)),
            &existing,
            d(10, 20)
        ));
    }

    #[test]
    fn pending_and_checked_out_bookings_block() {
        for status in [BookingStatus::Pending, BookingStatus::CheckedIn, BookingStatus::CheckedOut] {
            let existing = nov_1_to_5(status);
            assert!(!is_available(
                &room(),
                &DateRange::new(d(11, 2), d(11, 3)),
                &existing,
                d(10, 20)
            ));
        }
    }

    #[test]
    fn abutting_stays_are_available() {
        let existing = nov_1_to_5(BookingStatus::Confirmed);
        assert!(is_available(&room(), &DateRange::new(d(11, 5), d(11, 7)), &existing, d(10, 20)));
        assert!(is_available(&room(), &DateRange::new(d(10, 29), d(11, 1)), &existing, d(10, 20)));
    }

    #[test]
    fn other_rooms_are_ignored() {
        let existing = vec![booking(
            "b2",
            "2",
            DateRange::new(d(11, 1), d(11, 5)),
            BookingStatus::Confirmed,
        )];
        assert!(is_available(&room(), &DateRange::new(d(11, 2), d(11, 4)), &existing, d(10, 20)));
    }

    #[test]
    fn past_check_in_is_unavailable() {
        let result = check(&room(), &DateRange::new(d(10, 19), d(10, 22)), &[], d(10, 20));
        assert!(!result.available);
        assert_eq!(result.reason, Some(UnavailableReason::CheckInInPast));
    }

    #[test]
    fn check_in_today_is_allowed() {
        assert!(is_available(&room(), &DateRange::new(d(10, 20), d(10, 21)), &[], d(10, 20)));
    }

    #[test]
    fn empty_or_inverted_range_is_unavailable() {
        for range in [
            DateRange::new(d(11, 3), d(11, 3)),
            DateRange::new(d(11, 5), d(11, 3)),
        ] {
            let result = check(&room(), &range, &[], d(10, 20));
            assert_eq!(result.reason, Some(UnavailableReason::InvalidRange));
        }
    }

    #[test]
    fn reports_every_conflicting_booking() {
        let existing = vec![
            booking("a", "1", DateRange::new(d(11, 1), d(11, 3)), BookingStatus::Confirmed),
            booking("b", "1", DateRange::new(d(11, 3), d(11, 6)), BookingStatus::Pending),
            booking("c", "1", DateRange::new(d(11, 2), d(11, 4)), BookingStatus::Cancelled),
        ];
        let result = check(&room(), &DateRange::new(d(11, 2), d(11, 5)), &existing, d(10, 20));
        assert_eq!(result.conflicts, vec!["a".to_string(), "b".to_string()]);
    }
}
