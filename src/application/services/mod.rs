//! Application services

mod booking;
mod room_locks;

pub use booking::{BookingFilter, BookingService, BookingStats, RoomFilter};
pub use room_locks::RoomLocks;
