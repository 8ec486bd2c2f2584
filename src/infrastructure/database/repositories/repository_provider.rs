//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::booking::BookingRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::room::RoomRepository;

use super::booking_repository::SeaOrmBookingRepository;
use super::room_repository::SeaOrmRoomRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let room = repos.rooms().find_by_id("1").await?;
/// let stays = repos.bookings().find_for_room("1").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    rooms: SeaOrmRoomRepository,
    bookings: SeaOrmBookingRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            rooms: SeaOrmRoomRepository::new(db.clone()),
            bookings: SeaOrmBookingRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
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
    use crate::domain::{
        Booking, BookingStatus, ContactInfo, DateRange, DomainError, PartySize, Room,
        RoomCategory,
    };
    use crate::infrastructure::database::{init_database, DatabaseConfig};
    use crate::infrastructure::database::migrator::Migrator;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;
    use sea_orm_migration::MigratorTrait;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    async fn provider() -> SeaOrmRepositoryProvider {
        let db = init_database(&DatabaseConfig::in_memory_sqlite()).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let repos = SeaOrmRepositoryProvider::new(db);
        repos
            .rooms()
            .save(
                Room::new("4", "Royal Palms Resort Villa", RoomCategory::ResortVilla, Decimal::from(150), 8)
                    .with_weekend_price(Decimal::from(200))
                    .with_amenities(["Private pool", "Butler"])
                    .with_manual_pricing(),
            )
            .await
            .unwrap();
        repos
    }

    fn booking(range: DateRange) -> Booking {
        let at = Utc.with_ymd_and_hms(2024, 10, 1, 12, 0, 0).unwrap();
        Booking {
            id: String::new(),
            room_id: "4".into(),
            guest: ContactInfo::new("Dana", "dana@example.com").with_phone("+15550100"),
            range,
            party: PartySize::PerHead { adults: 2, kids: 1 },
            total_price: Decimal::new(90050, 2),
            price_is_estimate: true,
            status: BookingStatus::Pending,
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn room_roundtrips_through_sqlite() {
        let repos = provider().await;
        let room = repos.rooms().find_by_id("4").await.unwrap().unwrap();
        assert_eq!(room.category, RoomCategory::ResortVilla);
        assert_eq!(room.weekend_price, Some(Decimal::from(200)));
        assert_eq!(room.amenities, vec!["Private pool", "Butler"]);
        assert!(room.manual_pricing);
        assert_eq!(repos.rooms().count().await.unwrap(), 1);
        assert!(repos.rooms().find_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn booking_save_and_reload() {
        let repos = provider().await;
        let saved = repos
            .bookings()
            .save(booking(DateRange::new(d(11, 1), d(11, 5))))
            .await
            .unwrap();
        let loaded = repos.bookings().find_by_id(&saved.id).await.unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.total_price, Decimal::new(90050, 2));
        assert_eq!(loaded.party, PartySize::PerHead { adults: 2, kids: 1 });
    }

    #[tokio::test]
    async fn save_rejects_overlap_in_transaction() {
        let repos = provider().await;
        repos
            .bookings()
            .save(booking(DateRange::new(d(11, 1), d(11, 5))))
            .await
            .unwrap();

        let err = repos
            .bookings()
            .save(booking(DateRange::new(d(11, 4), d(11, 8))))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::BookingConflict { .. }));

        repos
            .bookings()
            .save(booking(DateRange::new(d(11, 5), d(11, 8))))
            .await
            .unwrap();
        assert_eq!(repos.bookings().find_for_room("4").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn status_update_is_compare_and_set() {
        let repos = provider().await;
        let b = repos
            .bookings()
            .save(booking(DateRange::new(d(11, 1), d(11, 5))))
            .await
            .unwrap();
        let later = b.created_at + Duration::hours(2);

        let confirmed = repos
            .bookings()
            .update_status(&b.id, BookingStatus::Pending, BookingStatus::Confirmed, later)
            .await
            .unwrap();
        assert_eq!(confirmed.status, BookingStatus::Confirmed);
        assert_eq!(confirmed.updated_at, later);

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
    async fn cancelled_rows_do_not_block_save() {
        let repos = provider().await;
        let b = repos
            .bookings()
            .save(booking(DateRange::new(d(11, 1), d(11, 5))))
            .await
            .unwrap();
        repos
            .bookings()
            .update_status(&b.id, BookingStatus::Pending, BookingStatus::Cancelled, b.created_at)
            .await
            .unwrap();

        assert!(repos
            .bookings()
            .save(booking(DateRange::new(d(11, 2), d(11, 3))))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn price_update_clears_estimate() {
        let repos = provider().await;
        let b = repos
            .bookings()
            .save(booking(DateRange::new(d(11, 1), d(11, 5))))
            .await
            .unwrap();
        let updated = repos
            .bookings()
            .update_price(&b.id, Decimal::from(1200), false, b.created_at)
            .await
            .unwrap();
        assert_eq!(updated.total_price, Decimal::from(1200));
        assert!(!updated.price_is_estimate);
    }
}
