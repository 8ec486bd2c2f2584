//! # Resort Booking Engine
//!
//! Room availability, weekday/weekend and per-head pricing, and the
//! booking lifecycle for a small resort.
//!
//! ## Architecture
//!
//! - **domain**: rooms, bookings, and the pure availability, pricing and
//!   lifecycle rules
//! - **application**: the booking service, event bus and notifier port
//! - **infrastructure**: in-memory and SQLite storage, notifier, seeding
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: runtime wiring, tracing and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};

pub use application::{
    create_event_bus, BookingFilter, BookingNotifier, BookingService, BookingStats, Event,
    EventBus, RoomFilter, SharedEventBus,
};
pub use domain::{
    AvailabilityResult, Booking, BookingStatus, ContactInfo, DateRange, DomainError,
    DomainResult, PartySize, PriceQuote, Room, RoomCategory,
};
pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};
pub use interfaces::create_api_router;
