//! Booking aggregate
//!
//! Stay interval, booking entity, lifecycle state machine and the
//! repository interface.

pub mod date_range;
pub mod lifecycle;
pub mod model;
pub mod repository;

pub use date_range::DateRange;
pub use lifecycle::{GuestMessage, NotificationKind, Transition, Trigger, TRANSITIONS};
pub use model::{Booking, BookingStatus, ContactInfo, PartySize};
pub use repository::BookingRepository;
