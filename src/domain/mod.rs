//! Domain layer: room catalog, bookings and the pure booking rules.

pub mod booking;
pub mod events;
pub mod repositories;
pub mod room;
pub mod services;

pub use booking::{
    Booking, BookingRepository, BookingStatus, ContactInfo, DateRange, NotificationKind,
    PartySize,
};
pub use repositories::{DomainResult, RepositoryProvider};
pub use room::{Room, RoomCategory, RoomRepository};
pub use services::{AvailabilityResult, NightlyRate, PriceQuote, UnavailableReason};

pub use crate::shared::errors::DomainError;
