//! Room aggregate
//!
//! Catalog entity, category variants and the repository interface.

pub mod model;
pub mod repository;

pub use model::{is_weekend_night, Room, RoomCategory};
pub use repository::RoomRepository;
