//! Pricing calculator
//!
//! Nightly pricing with a Friday/Saturday weekend rate and per-head
//! multiplication for resort villas.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::booking::{DateRange, PartySize};
use crate::domain::room::{is_weekend_night, Room};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NightlyRate {
    pub date: NaiveDate,
    pub rate: Decimal,
    pub weekend: bool,
}

/// Itemised price for a stay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PriceQuote {
    pub room_id: String,
    pub nights: Vec<NightlyRate>,
    /// Sum of the nightly rates
    pub base_total: Decimal,
    /// Party size for per-head rooms, 1 otherwise
    pub party_multiplier: u32,
    pub total: Decimal,
    /// Staff must confirm the final price
    pub requires_manual_quote: bool,
}

/// Total price of a stay. Returns zero for an empty or inverted range.
///
/// Kids are charged the adult rate in per-head rooms.
pub fn compute_total(room: &Room, range: &DateRange, party: &PartySize) -> Decimal {
    let base: Decimal = range.nights().map(|night| room.nightly_rate(night)).sum();
    base * Decimal::from(multiplier(room, party))
}

pub fn quote(room: &Room, range: &DateRange, party: &PartySize) -> PriceQuote {
    let nights: Vec<NightlyRate> = range
        .nights()
        .map(|date| NightlyRate {
            date,
            rate: room.nightly_rate(date),
            weekend: is_weekend_night(date),
        })
        .collect();
    let base_total: Decimal = nights.iter().map(|n| n.rate).sum();
    let party_multiplier = multiplier(room, party);

    PriceQuote {
        room_id: room.id.clone(),
        nights,
        base_total,
        party_multiplier,
        total: base_total * Decimal::from(party_multiplier),
        requires_manual_quote: room.manual_pricing,
    }
}

fn multiplier(room: &Room, party: &PartySize) -> u32 {
    if room.is_per_head() {
        party.total()
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::room::RoomCategory;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn suite() -> Room {
        Room::new("2", "Alpine Retreat Suite", RoomCategory::Suite, Decimal::from(100), 4)
            .with_weekend_price(Decimal::from(150))
    }

    fn villa() -> Room {
        Room::new("4", "Royal Palms Resort Villa", RoomCategory::ResortVilla, Decimal::from(50), 8)
    }

    #[test]
    fn suite_thursday_to_sunday() {
        // Thu 100 + Fri 150 + Sat 150
        let range = DateRange::new(d(11, 7), d(11, 10));
        assert_eq!(
            compute_total(&suite(), &range, &PartySize::Guests(2)),
            Decimal::from(400)
        );
    }

    #[test]
    fn resort_is_priced_per_head() {
        let range = DateRange::new(d(11, 4), d(11, 6));
        let party = PartySize::PerHead { adults: 2, kids: 1 };
        assert_eq!(compute_total(&villa(), &range, &party), Decimal::from(300));
    }

    #[test]
    fn per_head_total_is_linear_in_party_size() {
        let range = DateRange::new(d(11, 7), d(11, 10));
        let one = compute_total(&villa(), &range, &PartySize::PerHead { adults: 1, kids: 0 });
        for n in 1..=6u32 {
            let party = PartySize::PerHead { adults: n, kids: 0 };
            assert_eq!(compute_total(&villa(), &range, &party), one * Decimal::from(n));
        }
    }

    #[test]
    fn party_size_ignored_for_non_per_head_rooms() {
        let range = DateRange::new(d(11, 4), d(11, 5));
        assert_eq!(
            compute_total(&suite(), &range, &PartySize::Guests(1)),
            compute_total(&suite(), &range, &PartySize::Guests(4))
        );
    }

    #[test]
    fn invalid_range_costs_nothing() {
        let same_day = DateRange::new(d(11, 7), d(11, 7));
        let inverted = DateRange::new(d(11, 9), d(11, 7));
        assert_eq!(compute_total(&suite(), &same_day, &PartySize::Guests(1)), Decimal::ZERO);
        assert_eq!(compute_total(&suite(), &inverted, &PartySize::Guests(1)), Decimal::ZERO);
    }

    #[test]
    fn weekend_falls_back_to_weekday_rate() {
        let room = Room::new("3", "Garden Deluxe Room", RoomCategory::StandardRoom, Decimal::from(180), 2);
        let range = DateRange::new(d(11, 8), d(11, 10));
        assert_eq!(compute_total(&room, &range, &PartySize::Guests(2)), Decimal::from(360));
    }

    #[test]
    fn quote_is_itemised_and_matches_total() {
        let range = DateRange::new(d(11, 7), d(11, 10));
        let q = quote(&suite(), &range, &PartySize::Guests(2));
        assert_eq!(q.nights.len(), 3);
        assert!(!q.nights[0].weekend);
        assert!(q.nights[1].weekend && q.nights[2].weekend);
        assert_eq!(q.base_total, Decimal::from(400));
        assert_eq!(q.party_multiplier, 1);
        assert_eq!(q.total, compute_total(&suite(), &range, &PartySize::Guests(2)));
        assert!(!q.requires_manual_quote);
    }

    #[test]
    fn quote_flags_manual_pricing() {
        let room = villa().with_manual_pricing();
        let q = quote(&room, &DateRange::new(d(11, 4), d(11, 5)), &PartySize::PerHead { adults: 3, kids: 0 });
        assert!(q.requires_manual_quote);
        assert_eq!(q.party_multiplier, 3);
        assert_eq!(q.total, Decimal::from(150));
    }
}
