//! Domain services
//!
//! Pure business rules that span the room and booking aggregates.

pub mod availability;
pub mod pricing;

pub use availability::{AvailabilityResult, UnavailableReason};
pub use pricing::{NightlyRate, PriceQuote};
