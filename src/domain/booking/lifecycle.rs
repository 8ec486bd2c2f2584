//! Booking lifecycle state machine
//!
//! Every legal status change is a row in [`TRANSITIONS`]; anything not in
//! the table is rejected with [`DomainError::InvalidTransition`]. All
//! functions here are pure: they return an updated copy and leave
//! persistence to the caller.
//!
//! ```text
//! Pending ──confirm──▶ Confirmed ──check in──▶ Checked In ──check out──▶ Checked Out
//!    │                     │
//!    └──────cancel─────────┴──────▶ Cancelled
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::date_range::DateRange;
use super::model::{Booking, BookingStatus, ContactInfo, PartySize};
use crate::domain::room::Room;
use crate::domain::services::pricing;
use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

/// What causes a transition. Carried on the status-changed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    StaffApproval,
    Cancellation,
    CheckIn,
    CheckOut,
}

/// Guest notification attached to a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum NotificationKind {
    Confirmed,
    Cancelled,
}

/// Rendered guest message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestMessage {
    pub subject: String,
    pub body: String,
}

impl NotificationKind {
    pub fn render(&self, booking: &Booking, room: &Room, currency: &str) -> GuestMessage {
        let stay = format!(
            "{} from {} to {} ({} night{})",
            room.name,
            booking.range.check_in,
            booking.range.check_out,
            booking.range.night_count(),
            if booking.range.night_count() == 1 { "" } else { "s" }
        );
        match self {
            Self::Confirmed => {
                let price_note = if booking.price_is_estimate {
                    " Our team will contact you with the final quote."
                } else {
                    ""
                };
                GuestMessage {
                    subject: format!("Your stay at {} is confirmed", room.name),
                    body: format!(
                        "Hi {}, your booking {} for {} is confirmed. Total: {} {}.{}",
                        booking.guest.name,
                        booking.id,
                        stay,
                        booking.total_price.round_dp(2),
                        currency,
                        price_note
                    ),
                }
            }
            Self::Cancelled => GuestMessage {
                subject: format!("Your booking at {} was cancelled", room.name),
                body: format!(
                    "Hi {}, your booking {} for {} has been cancelled.",
                    booking.guest.name, booking.id, stay
                ),
            },
        }
    }
}

/// One row of the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: BookingStatus,
    pub to: BookingStatus,
    pub trigger: Trigger,
    pub notification: Option<NotificationKind>,
}

pub const TRANSITIONS: [Transition; 5] = [
    Transition {
        from: BookingStatus::Pending,
        to: BookingStatus::Confirmed,
        trigger: Trigger::StaffApproval,
        notification: Some(NotificationKind::Confirmed),
    },
    Transition {
        from: BookingStatus::Pending,
        to: BookingStatus::Cancelled,
        trigger: Trigger::Cancellation,
        notification: Some(NotificationKind::Cancelled),
    },
    Transition {
        from: BookingStatus::Confirmed,
        to: BookingStatus::CheckedIn,
        trigger: Trigger::CheckIn,
        notification: None,
    },
    Transition {
        from: BookingStatus::Confirmed,
        to: BookingStatus::Cancelled,
        trigger: Trigger::Cancellation,
        notification: Some(NotificationKind::Cancelled),
    },
    Transition {
        from: BookingStatus::CheckedIn,
        to: BookingStatus::CheckedOut,
        trigger: Trigger::CheckOut,
        notification: None,
    },
];

pub fn find_transition(from: BookingStatus, to: BookingStatus) -> Option<&'static Transition> {
    TRANSITIONS.iter().find(|t| t.from == from && t.to == to)
}

/// Statuses reachable from `status` in one step.
pub fn available_actions(status: BookingStatus) -> Vec<BookingStatus> {
    TRANSITIONS
        .iter()
        .filter(|t| t.from == status)
        .map(|t| t.to)
        .collect()
}

/// Validate `booking.status -> target` and return the updated booking with
/// the matching table row.
///
/// Check-in is allowed before the booked check-in date; staff tooling may
/// warn about it.
pub fn transition(
    booking: &Booking,
    target: BookingStatus,
    now: DateTime<Utc>,
) -> DomainResult<(Booking, &'static Transition)> {
    let rule = find_transition(booking.status, target).ok_or(DomainError::InvalidTransition {
        from: booking.status,
        to: target,
    })?;

    let mut updated = booking.clone();
    updated.status = target;
    updated.updated_at = now;
    Ok((updated, rule))
}

/// Build a new PENDING booking priced by the pricing calculator.
///
/// Availability must already have been checked by the caller; only the
/// range ordering, party and contact details are validated here. The id is
/// left empty for the repository to assign.
pub fn create(
    room: &Room,
    range: DateRange,
    party: PartySize,
    guest: ContactInfo,
    now: DateTime<Utc>,
) -> DomainResult<Booking> {
    range.validate_order()?;
    party.validate_for(room)?;
    guest.check()?;

    Ok(Booking {
        id: String::new(),
        room_id: room.id.clone(),
        guest,
        range,
        party,
        total_price: pricing::compute_total(room, &range, &party),
        price_is_estimate: room.manual_pricing,
        status: BookingStatus::Pending,
        created_at: now,
        updated_at: now,
    })
}

/// Replace the estimate on a quote-only booking with the negotiated price.
pub fn apply_manual_quote(
    booking: &Booking,
    amount: Decimal,
    now: DateTime<Utc>,
) -> DomainResult<Booking> {
    if !booking.price_is_estimate {
        return Err(DomainError::Validation(format!(
            "booking {} is not awaiting a manual quote",
            booking.id
        )));
    }
    if !matches!(
        booking.status,
        BookingStatus::Pending | BookingStatus::Confirmed
    ) {
        return Err(DomainError::Validation(format!(
            "cannot quote a booking in status {}",
            booking.status
        )));
    }
    if amount < Decimal::ZERO {
        return Err(DomainError::Validation("quoted amount must be >= 0".into()));
    }

    let mut updated = booking.clone();
    updated.total_price = amount;
    updated.price_is_estimate = false;
    updated.updated_at = now;
    Ok(updated)
}

// ── Tests ──────────────────────────────────────────────────────
