//! Application ports (hexagonal architecture boundaries)

pub mod notifier;

pub use notifier::{BookingNotifier, NoopNotifier, NotificationError};
