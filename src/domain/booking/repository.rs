//! Booking repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::model::{Booking, BookingStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Find booking by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>>;

    /// All bookings for a room, any status, ordered by check-in
    async fn find_for_room(&self, room_id: &str) -> DomainResult<Vec<Booking>>;

    /// All bookings, newest first
    async fn find_all(&self) -> DomainResult<Vec<Booking>>;

    /// Insert a new booking and return it with its assigned id.
    ///
    /// Fails with `BookingConflict` when an inventory-holding booking on the
    /// same room overlaps the new range. The check and the insert are atomic.
    async fn save(&self, booking: Booking) -> DomainResult<Booking>;

    /// Compare-and-set the status, stamping `updated_at` with `at`.
    ///
    /// Fails with `BookingConflict` when the stored status is no longer
    /// `expected`, and `NotFound` when the booking does not exist.
    async fn update_status(
        &self,
        id: &str,
        expected: BookingStatus,
        new: BookingStatus,
        at: DateTime<Utc>,
    ) -> DomainResult<Booking>;

    /// Replace the stored price and estimate flag, stamping `updated_at`
    async fn update_price(
        &self,
        id: &str,
        total_price: Decimal,
        price_is_estimate: bool,
        at: DateTime<Utc>,
    ) -> DomainResult<Booking>;
}
