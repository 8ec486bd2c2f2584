//! In-memory repositories for development and testing

use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    Booking, BookingRepository, BookingStatus, DomainError, DomainResult, RepositoryProvider,
    Room, RoomRepository,
};

/// In-memory room catalog
#[derive(Default)]
pub struct InMemoryRoomRepository {
    rooms: DashMap<String, Room>,
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Room>> {
        Ok(self.rooms.get(id).map(|r| r.value().clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Room>> {
        let mut rooms: Vec<Room> = self.rooms.iter().map(|e| e.value().clone()).collect();
        rooms.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(rooms)
    }

    async fn save(&self, mut room: Room) -> DomainResult<Room> {
        if room.id.is_empty() {
            room.id = Uuid::new_v4().to_string();
        }
        room.validate()?;
        self.rooms.insert(room.id.clone(), room.clone());
        Ok(room)
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.rooms.len() as u64)
    }
}

/// In-memory bookings, grouped by room.
///
/// Grouping lets `save` check for overlaps and insert under a single
/// DashMap entry lock, so two writers can never both claim the same nights.
#[derive(Default)]
pub struct InMemoryBookingRepository {
    by_room: DashMap<String, Vec<Booking>>,
    room_of: DashMap<String, String>,
}

impl InMemoryBookingRepository {
    fn room_for(&self, id: &str) -> DomainResult<String> {
        self.room_of
            .get(id)
            .map(|r| r.value().clone())
            .ok_or_else(|| DomainError::booking_not_found(id))
    }

    fn modify<F>(&self, id: &str, f: F) -> DomainResult<Booking>
    where
        F: FnOnce(&mut Booking) -> DomainResult<()>,
    {
        let room_id = self.room_for(id)?;
        let mut bookings = self
            .by_room
            .get_mut(&room_id)
            .ok_or_else(|| DomainError::booking_not_found(id))?;
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| DomainError::booking_not_found(id))?;
        f(booking)?;
        Ok(booking.clone())
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        let Some(room_id) = self.room_of.get(id).map(|r| r.value().clone()) else {
            return Ok(None);
        };
        Ok(self
            .by_room
            .get(&room_id)
            .and_then(|list| list.iter().find(|b| b.id == id).cloned()))
    }

    async fn find_for_room(&self, room_id: &str) -> DomainResult<Vec<Booking>> {
        let mut bookings = self
            .by_room
            .get(room_id)
            .map(|list| list.value().clone())
            .unwrap_or_default();
        bookings.sort_by_key(|b| b.range.check_in);
        Ok(bookings)
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .by_room
            .iter()
            .flat_map(|e| e.value().clone())
            .collect();
        bookings.sort_by_key(|b| Reverse(b.created_at));
        Ok(bookings)
    }

    async fn save(&self, mut booking: Booking) -> DomainResult<Booking> {
        if booking.id.is_empty() {
            booking.id = Uuid::new_v4().to_string();
        }

        let mut bookings = self.by_room.entry(booking.room_id.clone()).or_default();
        if booking.holds_inventory()
            && bookings
                .iter()
                .any(|b| b.conflicts_with(&booking.room_id, &booking.range))
        {
            debug!(room_id = %booking.room_id, range = %booking.range, "Overlap detected on save");
            return Err(DomainError::BookingConflict {
                room_id: booking.room_id,
            });
        }

        // Index the id before releasing the room entry so a concurrent
        // `find_by_id` never misses a stored booking.
        self.room_of.insert(booking.id.clone(), booking.room_id.clone());
        bookings.push(booking.clone());
        drop(bookings);
        Ok(booking)
    }

    async fn update_status(
        &self,
        id: &str,
        expected: BookingStatus,
        new: BookingStatus,
        at: DateTime<Utc>,
    ) -> DomainResult<Booking> {
        self.modify(id, |b| {
            if b.status != expected {
                return Err(DomainError::BookingConflict {
                    room_id: b.room_id.clone(),
                });
            }
            b.status = new;
            b.updated_at = at;
            Ok(())
        })
    }

    async fn update_price(
        &self,
        id: &str,
        total_price: Decimal,
        price_is_estimate: bool,
        at: DateTime<Utc>,
    ) -> DomainResult<Booking> {
        self.modify(id, |b| {
            b.total_price = total_price;
            b.price_is_estimate = price_is_estimate;
            b.updated_at = at;
            Ok(())
        })
    }
}

/// DashMap-backed [`RepositoryProvider`]
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    rooms: InMemoryRoomRepository,
    bookings: InMemoryBookingRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn rooms(&self) -> &dyn RoomRepository {
        &self.rooms
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContactInfo, DateRange, PartySize, RoomCategory};
    use chrono::{Duration, NaiveDate, TimeZone};

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 1, 8, 0, 0).unwrap()
    }

    fn booking(room_id: &str, range: DateRange, created_at: DateTime<Utc>) -> Booking {
        Booking {
            id: String::new(),
            room_id: room_id.into(),
            guest: ContactInfo::new("Carol", "carol@example.com"),
            range,
            party: PartySize::Guests(1),
            total_price: Decimal::from(180),
            price_is_estimate: false,
            status: BookingStatus::Pending,
            created_at,
            updated_at: created_at,
        }
    }

    #[tokio::test]
    async fn room_save_assigns_id_and_counts() {
        let repos = InMemoryRepositoryProvider::new();
        let room = Room::new("", "Garden", RoomCategory::StandardRoom, Decimal::from(180), 2);
        let saved = repos.rooms().save(room).await.unwrap();
        assert!(!saved.id.is_empty());
        assert_eq!(repos.rooms().count().await.unwrap(), 1);
        assert!(repos.rooms().find_by_id(&saved.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn room_save_rejects_invalid_room() {
        let repos = InMemoryRepositoryProvider::new();
        let room = Room::new("x", "Broken", RoomCategory::Suite, Decimal::from(100), 0);
        assert!(repos.rooms().save(room).await.is_err());
    }

    #[tokio::test]
    async fn save_rejects_overlap_on_same_room() {
        let repos = InMemoryRepositoryProvider::new();
        let first = repos
            .bookings()
            .save(booking("1", DateRange::new(d(11, 1), d(11, 5)), t0()))
            .await
            .unwrap();
        assert!(!first.id.is_empty());

        let err = repos
            .bookings()
            .save(booking("1", DateRange::new(d(11, 4), d(11, 8)), t0()))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::BookingConflict { room_id: "1".into() });

        // Other rooms and abutting stays are fine
        repos
            .bookings()
            .save(booking("2", DateRange::new(d(11, 4), d(11, 8)), t0()))
            .await
            .unwrap();
        repos
            .bookings()
            .save(booking("1", DateRange::new(d(11, 5), d(11, 8)), t0()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn cancelled_booking_frees_nights() {
        let repos = InMemoryRepositoryProvider::new();
        let first = repos
            .bookings()
            .save(booking("1", DateRange::new(d(11, 1), d(11, 5)), t0()))
            .await
            .unwrap();
        repos
            .bookings()
            .update_status(&first.id, BookingStatus::Pending, BookingStatus::Cancelled, t0())
            .await
            .unwrap();

        assert!(repos
            .bookings()
            .save(booking("1", DateRange::new(d(11, 2), d(11, 4)), t0()))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn update_status_is_compare_and_set() {
        let repos = InMemoryRepositoryProvider::new();
        let b = repos
            .bookings()
            .save(booking("1", DateRange::new(d(11, 1), d(11, 2)), t0()))
            .await
            .unwrap();
        let later = t0() + Duration::hours(1);

        let updated = repos
            .bookings()
            .update_status(&b.id, BookingStatus::Pending, BookingStatus::Confirmed, later)
            .await
            .unwrap();
        assert_eq!(updated.status, BookingStatus::Confirmed);
        assert_eq!(updated.updated_at, later);

        let stale = repos
            .bookings()
            .update_status(&b.id, BookingStatus::Pending, BookingStatus::Cancelled, later)
            .await
            .unwrap_err();
        assert!(matches!(stale, DomainError::BookingConflict { .. }));

        let missing = repos
            .bookings()
            .update_status("nope", BookingStatus::Pending, BookingStatus::Confirmed, later)
            .await
            .unwrap_err();
        assert!(matches!(missing, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn find_all_is_newest_first() {
        let repos = InMemoryRepositoryProvider::new();
        let old = repos
            .bookings()
            .save(booking("1", DateRange::new(d(11, 1), d(11, 2)), t0()))
            .await
            .unwrap();
        let new = repos
            .bookings()
            .save(booking("2", DateRange::new(d(11, 1), d(11, 2)), t0() + Duration::days(1)))
            .await
            .unwrap();

        let all = repos.bookings().find_all().await.unwrap();
        assert_eq!(all[0].id, new.id);
        assert_eq!(all[1].id, old.id);
        assert_eq!(repos.bookings().find_for_room("1").await.unwrap().len(), 1);
        assert!(repos.bookings().find_for_room("9").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_price_replaces_estimate() {
        let repos = InMemoryRepositoryProvider::new();
        let mut draft = booking("1", DateRange::new(d(11, 1), d(11, 2)), t0());
        draft.price_is_estimate = true;
        let b = repos.bookings().save(draft).await.unwrap();

        let updated = repos
            .bookings()
            .update_price(&b.id, Decimal::from(999), false, t0())
            .await
            .unwrap();
        assert_eq!(updated.total_price, Decimal::from(999));
        assert!(!updated.price_is_estimate);
        let stored = repos.bookings().find_by_id(&b.id).await.unwrap().unwrap();
        assert_eq!(stored.total_price, Decimal::from(999));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn listed_bookings_are_always_found_by_id() {
        let repos = std::sync::Arc::new(InMemoryRepositoryProvider::new());

        let writer = {
            let repos = repos.clone();
            tokio::spawn(async move {
                for i in 0..200 {
                    let check_in = d(11, 1) + Duration::days(i);
                    let range = DateRange::new(check_in, check_in + Duration::days(1));
                    repos.bookings().save(booking("1", range, t0())).await.unwrap();
                }
            })
        };

        while !writer.is_finished() {
            for listed in repos.bookings().find_for_room("1").await.unwrap() {
                assert!(
                    repos.bookings().find_by_id(&listed.id).await.unwrap().is_some(),
                    "booking {} listed but not found by id",
                    listed.id
                );
            }
            tokio::task::yield_now().await;
        }
        writer.await.unwrap();
        assert_eq!(repos.bookings().find_all().await.unwrap().len(), 200);
    }
}
