pub mod events;
pub mod ports;
pub mod services;

// Re-export key types for convenience
pub use events::{create_event_bus, Event, EventBus, EventSubscriber, SharedEventBus};
pub use ports::{BookingNotifier, NoopNotifier, NotificationError};
pub use services::{BookingFilter, BookingService, BookingStats, RoomFilter};
