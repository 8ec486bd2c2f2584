//! Guest notifications over the event bus
//!
//! Renders the guest-facing message and publishes it as a
//! `GuestNotification` event. A mail or SMS relay subscribes to the bus and
//! performs the delivery.

use async_trait::async_trait;
use tracing::debug;

use crate::application::events::{Event, GuestNotificationEvent, SharedEventBus};
use crate::application::ports::{BookingNotifier, NotificationError};
use crate::domain::{Booking, NotificationKind, Room};

pub struct EventBusNotifier {
    events: SharedEventBus,
    currency: String,
}

impl EventBusNotifier {
    pub fn new(events: SharedEventBus, currency: impl Into<String>) -> Self {
        Self {
            events,
            currency: currency.into(),
        }
    }
}

#[async_trait]
impl BookingNotifier for EventBusNotifier {
    async fn notify(
        &self,
        booking: &Booking,
        room: &Room,
        kind: NotificationKind,
    ) -> Result<(), NotificationError> {
        if booking.guest.email.is_empty() {
            return Err(NotificationError::Delivery(format!(
                "booking {} has no guest email",
                booking.id
            )));
        }

        let message = kind.render(booking, room, &self.currency);
        debug!(booking_id = %booking.id, ?kind, "Publishing guest notification");
        self.events
            .publish(Event::GuestNotification(GuestNotificationEvent {
                booking_id: booking.id.clone(),
                kind,
                recipient: booking.guest.email.clone(),
                subject: message.subject,
                body: message.body,
            }));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::EventBus;
    use crate::domain::{BookingStatus, ContactInfo, DateRange, PartySize, RoomCategory};
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn fixtures() -> (Booking, Room) {
        let room = Room::new("3", "Garden Deluxe Room", RoomCategory::StandardRoom, Decimal::from(180), 2);
        let now = Utc::now();
        let booking = Booking {
            id: "bk-9".into(),
            room_id: "3".into(),
            guest: ContactInfo::new("Erin", "erin@example.com"),
            range: DateRange::new(
                NaiveDate::from_ymd_opt(2024, 11, 4).unwrap(),
                NaiveDate::from_ymd_opt(2024, 11, 5).unwrap(),
            ),
            party: PartySize::Guests(1),
            total_price: Decimal::from(180),
            price_is_estimate: false,
            status: BookingStatus::Confirmed,
            created_at: now,
            updated_at: now,
        };
        (booking, room)
    }

    #[tokio::test]
    async fn publishes_rendered_message() {
        let bus = Arc::new(EventBus::new());
        let mut sub = bus.subscribe();
        let notifier = EventBusNotifier::new(bus.clone(), "EUR");
        let (booking, room) = fixtures();

        notifier
            .notify(&booking, &room, NotificationKind::Confirmed)
            .await
            .unwrap();

        match sub.recv().await.unwrap().event {
            Event::GuestNotification(n) => {
                assert_eq!(n.recipient, "erin@example.com");
                assert_eq!(n.kind, NotificationKind::Confirmed);
                assert!(n.body.contains("180 EUR"));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_email_is_a_delivery_error() {
        let notifier = EventBusNotifier::new(Arc::new(EventBus::new()), "USD");
        let (mut booking, room) = fixtures();
        booking.guest.email.clear();
        assert!(notifier
            .notify(&booking, &room, NotificationKind::Cancelled)
            .await
            .is_err());
    }
}
