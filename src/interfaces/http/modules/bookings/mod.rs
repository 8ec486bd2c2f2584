//! Booking creation, lifecycle and dashboard endpoints

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
