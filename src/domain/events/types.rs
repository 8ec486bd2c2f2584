//! Booking events
//!
//! Facts published on the event bus after a booking is persisted.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::booking::{BookingStatus, NotificationKind, Trigger};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    BookingCreated(BookingCreatedEvent),
    BookingStatusChanged(BookingStatusChangedEvent),
    GuestNotification(GuestNotificationEvent),
}

impl Event {
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::BookingCreated(_) => "booking_created",
            Event::BookingStatusChanged(_) => "booking_status_changed",
            Event::GuestNotification(_) => "guest_notification",
        }
    }

    pub fn room_id(&self) -> Option<&str> {
        match self {
            Event::BookingCreated(e) => Some(&e.room_id),
            Event::BookingStatusChanged(e) => Some(&e.room_id),
            Event::GuestNotification(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreatedEvent {
    pub booking_id: String,
    pub room_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: Decimal,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingStatusChangedEvent {
    pub booking_id: String,
    pub room_id: String,
    pub from: BookingStatus,
    pub to: BookingStatus,
    pub trigger: Trigger,
    pub timestamp: DateTime<Utc>,
}

/// Guest-facing message ready for delivery by a mail or SMS relay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestNotificationEvent {
    pub booking_id: String,
    pub kind: NotificationKind,
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Wrapper for sending events with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: Event,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_serializes_with_type_tag() {
        let event = Event::BookingStatusChanged(BookingStatusChangedEvent {
            booking_id: "b1".into(),
            room_id: "1".into(),
            from: BookingStatus::Pending,
            to: BookingStatus::Confirmed,
            trigger: Trigger::StaffApproval,
            timestamp: Utc::now(),
        });
        assert_eq!(event.room_id(), Some("1"));

        let json = serde_json::to_value(EventMessage::new(event)).unwrap();
        assert_eq!(json["type"], "BookingStatusChanged");
        assert_eq!(json["data"]["to"], "Confirmed");
        assert_eq!(json["data"]["trigger"], "StaffApproval");
        assert!(json["id"].is_string());
    }
}
