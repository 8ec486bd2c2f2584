//! Database entities module

pub mod booking;
pub mod room;

pub use booking::Entity as Booking;
pub use room::Entity as Room;
