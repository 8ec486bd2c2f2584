//! Outbound port for guest notifications
//!
//! The booking service hands every notification-bearing transition to a
//! [`BookingNotifier`]. Delivery runs on a detached task and a failure is
//! logged, never surfaced to the caller.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Booking, NotificationKind, Room};

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

#[async_trait]
pub trait BookingNotifier: Send + Sync {
    async fn notify(
        &self,
        booking: &Booking,
        room: &Room,
        kind: NotificationKind,
    ) -> Result<(), NotificationError>;
}

/// Notifier that drops every message. Used when no delivery channel is wired.
pub struct NoopNotifier;

#[async_trait]
impl BookingNotifier for NoopNotifier {
    async fn notify(
        &self,
        _booking: &Booking,
        _room: &Room,
        _kind: NotificationKind,
    ) -> Result<(), NotificationError> {
        Ok(())
    }
}
