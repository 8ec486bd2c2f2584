//! Room repository interface

use async_trait::async_trait;

use super::model::Room;
use crate::domain::DomainResult;

/// Read access to the room catalog, plus the writes the catalog seeder needs.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Room>>;

    async fn find_all(&self) -> DomainResult<Vec<Room>>;

    /// Insert or replace a room. Assigns an id when `room.id` is empty.
    async fn save(&self, room: Room) -> DomainResult<Room>;

    async fn count(&self) -> DomainResult<u64>;
}
