//! Booking business logic service
//!
//! Orchestrates the pure availability, pricing and lifecycle rules against
//! the repositories. Booking creation holds the room's lock across
//! read, check and write, and the repository re-checks overlap on save, so
//! concurrent requests for the same nights yield a single booking.

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use utoipa::ToSchema;

use super::room_locks::RoomLocks;
use crate::application::events::{
    BookingCreatedEvent, BookingStatusChangedEvent, Event, SharedEventBus,
};
use crate::application::ports::BookingNotifier;
use crate::domain::booking::lifecycle;
use crate::domain::services::{availability, pricing};
use crate::domain::{
    AvailabilityResult, Booking, BookingStatus, ContactInfo, DateRange, DomainError,
    DomainResult, NotificationKind, PartySize, PriceQuote, RepositoryProvider, Room,
    RoomCategory, UnavailableReason,
};
use crate::shared::retry::{retry_with_backoff, RetryConfig};
use crate::shared::time::Clock;

/// Optional filters for listing bookings
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub room_id: Option<String>,
    pub status: Option<BookingStatus>,
}

/// Optional filters for browsing the catalog
#[derive(Debug, Clone, Default)]
pub struct RoomFilter {
    pub category: Option<RoomCategory>,
    /// Case-insensitive match on name or description
    pub search: Option<String>,
}

impl RoomFilter {
    fn matches(&self, room: &Room) -> bool {
        if let Some(category) = self.category {
            if room.category != category {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => {
                let q = q.to_lowercase();
                room.name.to_lowercase().contains(&q)
                    || room.description.to_lowercase().contains(&q)
            }
            _ => true,
        }
    }
}

/// Dashboard figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingStats {
    pub total: u64,
    pub pending: u64,
    pub by_status: BTreeMap<String, u64>,
    /// Sum of totals for confirmed, checked-in and checked-out bookings
    pub revenue: Decimal,
    pub currency: String,
}

/// Service for booking operations
pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    notifier: Arc<dyn BookingNotifier>,
    clock: Arc<dyn Clock>,
    events: SharedEventBus,
    locks: RoomLocks,
    conflict_retry: RetryConfig,
    currency: String,
    max_nights: u32,
}

impl BookingService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        notifier: Arc<dyn BookingNotifier>,
        clock: Arc<dyn Clock>,
        events: SharedEventBus,
    ) -> Self {
        Self {
            repos,
            notifier,
            clock,
            events,
            locks: RoomLocks::new(),
            conflict_retry: RetryConfig::for_booking_conflicts(
                2,
                std::time::Duration::from_millis(50),
            ),
            currency: "USD".to_string(),
            max_nights: 365,
        }
    }

    pub fn with_conflict_retry(mut self, retry: RetryConfig) -> Self {
        self.conflict_retry = retry;
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Cap the stay length accepted by `quote` and `create_booking`.
    pub fn with_max_nights(mut self, max_nights: u32) -> Self {
        self.max_nights = max_nights;
        self
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn repositories(&self) -> &Arc<dyn RepositoryProvider> {
        &self.repos
    }

    // ── Catalog ────────────────────────────────────────────────

    pub async fn list_rooms(&self, filter: &RoomFilter) -> DomainResult<Vec<Room>> {
        let rooms = self.repos.rooms().find_all().await?;
        Ok(rooms.into_iter().filter(|r| filter.matches(r)).collect())
    }

    pub async fn get_room(&self, room_id: &str) -> DomainResult<Room> {
        self.repos
            .rooms()
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| DomainError::room_not_found(room_id))
    }

    // ── Availability and pricing ───────────────────────────────

    pub async fn check_availability(
        &self,
        room_id: &str,
        range: DateRange,
    ) -> DomainResult<AvailabilityResult> {
        let room = self.get_room(room_id).await?;
        let existing = self.repos.bookings().find_for_room(room_id).await?;
        Ok(availability::check(
            &room,
            &range,
            &existing,
            self.clock.today(),
        ))
    }

    pub async fn quote(
        &self,
        room_id: &str,
        range: DateRange,
        party: PartySize,
    ) -> DomainResult<PriceQuote> {
        let room = self.get_room(room_id).await?;
        range.validate_order()?;
        range.validate_length(self.max_nights)?;
        party.validate_for(&room)?;
        Ok(pricing::quote(&room, &range, &party))
    }

    // ── Bookings ───────────────────────────────────────────────

    /// Create a PENDING booking if the room is free for `range`.
    ///
    /// A write conflict re-runs the whole check-then-write sequence; when it
    /// persists past the retry cap the stay is reported as `Unavailable`.
    pub async fn create_booking(
        &self,
        room_id: &str,
        range: DateRange,
        party: PartySize,
        guest: ContactInfo,
    ) -> DomainResult<Booking> {
        let room = self.get_room(room_id).await?;
        range.validate(self.clock.today())?;
        range.validate_length(self.max_nights)?;
        party.validate_for(&room)?;
        guest.check()?;

        let result = retry_with_backoff(
            self.conflict_retry.clone(),
            || self.try_create(&room, range, party, guest.clone()),
            DomainError::is_retryable,
            "create_booking",
        )
        .await;

        let booking = match result {
            Ok(booking) => booking,
            Err(DomainError::BookingConflict { .. }) => {
                return Err(DomainError::Unavailable {
                    room_id: room.id.clone(),
                    check_in: range.check_in,
                    check_out: range.check_out,
                });
            }
            Err(e) => return Err(e),
        };

        metrics::counter!("bookings_created_total").increment(1);
        info!(
            booking_id = %booking.id,
            room_id = %booking.room_id,
            range = %booking.range,
            total = %booking.total_price,
            estimate = booking.price_is_estimate,
            "Booking created"
        );
        self.events.publish(Event::BookingCreated(BookingCreatedEvent {
            booking_id: booking.id.clone(),
            room_id: booking.room_id.clone(),
            check_in: booking.range.check_in,
            check_out: booking.range.check_out,
            total_price: booking.total_price,
            timestamp: booking.created_at,
        }));

        Ok(booking)
    }

    async fn try_create(
        &self,
        room: &Room,
        range: DateRange,
        party: PartySize,
        guest: ContactInfo,
    ) -> DomainResult<Booking> {
        let _guard = self.locks.acquire(&room.id).await;

        let existing = self.repos.bookings().find_for_room(&room.id).await?;
        let check = availability::check(room, &range, &existing, self.clock.today());
        if !check.available {
            debug!(room_id = %room.id, range = %range, reason = ?check.reason, "Stay unavailable");
            return Err(match check.reason {
                Some(UnavailableReason::CheckInInPast) | Some(UnavailableReason::InvalidRange) => {
                    DomainError::InvalidDateRange(format!("{} cannot be booked", range))
                }
                _ => DomainError::Unavailable {
                    room_id: room.id.clone(),
                    check_in: range.check_in,
                    check_out: range.check_out,
                },
            });
        }

        let draft = lifecycle::create(room, range, party, guest, self.clock.now())?;
        match self.repos.bookings().save(draft).await {
            Err(e @ DomainError::BookingConflict { .. }) => {
                metrics::counter!("booking_conflicts_total").increment(1);
                warn!(room_id = %room.id, range = %range, "Booking write conflict");
                Err(e)
            }
            other => other,
        }
    }

    /// Move a booking to `target`, persisting with compare-and-set and
    /// dispatching the guest notification the transition carries.
    pub async fn transition_booking(
        &self,
        booking_id: &str,
        target: BookingStatus,
    ) -> DomainResult<Booking> {
        let current = self.get_booking(booking_id).await?;

        let (next, rule) = match lifecycle::transition(&current, target, self.clock.now()) {
            Ok(ok) => ok,
            Err(e) => {
                warn!(booking_id, from = %current.status, to = %target, "Rejected transition");
                return Err(e);
            }
        };

        let saved = self
            .repos
            .bookings()
            .update_status(booking_id, current.status, target, next.updated_at)
            .await
            .inspect_err(|e| {
                if matches!(e, DomainError::BookingConflict { .. }) {
                    metrics::counter!("booking_conflicts_total").increment(1);
                    warn!(booking_id, to = %target, "Concurrent status change");
                }
            })?;

        metrics::counter!("booking_transitions_total", "to" => target.as_str()).increment(1);
        info!(
            booking_id,
            from = %current.status,
            to = %target,
            trigger = ?rule.trigger,
            "Booking status changed"
        );
        self.events
            .publish(Event::BookingStatusChanged(BookingStatusChangedEvent {
                booking_id: saved.id.clone(),
                room_id: saved.room_id.clone(),
                from: current.status,
                to: target,
                trigger: rule.trigger,
                timestamp: saved.updated_at,
            }));

        if let Some(kind) = rule.notification {
            self.dispatch_notification(saved.clone(), kind);
        }

        Ok(saved)
    }

    /// Deliver a notification on a detached task. Failures are logged and
    /// counted, never returned.
    fn dispatch_notification(&self, booking: Booking, kind: NotificationKind) {
        let repos = self.repos.clone();
        let notifier = self.notifier.clone();

        tokio::spawn(async move {
            let room = match repos.rooms().find_by_id(&booking.room_id).await {
                Ok(Some(room)) => room,
                Ok(None) => {
                    warn!(booking_id = %booking.id, room_id = %booking.room_id, "Room missing, notification skipped");
                    return;
                }
                Err(e) => {
                    warn!(booking_id = %booking.id, error = %e, "Room lookup failed, notification skipped");
                    return;
                }
            };

            if let Err(e) = notifier.notify(&booking, &room, kind).await {
                metrics::counter!("booking_notifications_failed_total").increment(1);
                warn!(booking_id = %booking.id, ?kind, error = %e, "Guest notification failed");
            }
        });
    }

    /// Set the negotiated price on a quote-only booking.
    pub async fn apply_manual_quote(
        &self,
        booking_id: &str,
        amount: Decimal,
    ) -> DomainResult<Booking> {
        let current = self.get_booking(booking_id).await?;
        let quoted = lifecycle::apply_manual_quote(&current, amount, self.clock.now())?;

        let saved = self
            .repos
            .bookings()
            .update_price(
                booking_id,
                quoted.total_price,
                quoted.price_is_estimate,
                quoted.updated_at,
            )
            .await?;

        info!(booking_id, amount = %amount, "Manual quote applied");
        Ok(saved)
    }

    pub async fn get_booking(&self, booking_id: &str) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::booking_not_found(booking_id))
    }

    /// Bookings matching `filter`, newest first.
    pub async fn list_bookings(&self, filter: &BookingFilter) -> DomainResult<Vec<Booking>> {
        let mut bookings = match &filter.room_id {
            Some(room_id) => self.repos.bookings().find_for_room(room_id).await?,
            None => self.repos.bookings().find_all().await?,
        };
        if let Some(status) = filter.status {
            bookings.retain(|b| b.status == status);
        }
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    pub async fn stats(&self) -> DomainResult<BookingStats> {
        let bookings = self.repos.bookings().find_all().await?;

        let mut by_status: BTreeMap<String, u64> = BookingStatus::ALL
            .iter()
            .map(|s| (s.as_str().to_string(), 0))
            .collect();
        let mut revenue = Decimal::ZERO;

        for b in &bookings {
            *by_status.entry(b.status.as_str().to_string()).or_default() += 1;
            if matches!(
                b.status,
                BookingStatus::Confirmed | BookingStatus::CheckedIn | BookingStatus::CheckedOut
            ) {
                revenue += b.total_price;
            }
        }

        Ok(BookingStats {
            total: bookings.len() as u64,
            pending: by_status
                .get(BookingStatus::Pending.as_str())
                .copied()
                .unwrap_or(0),
            by_status,
            revenue,
            currency: self.currency.clone(),
        })
    }
}
