//! SeaORM implementation of RoomRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use tracing::debug;
use uuid::Uuid;

use super::{db_err, from_cents, to_cents};
use crate::domain::room::{Room, RoomCategory, RoomRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::room;
use crate::shared::errors::InfraError;

pub struct SeaOrmRoomRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: room::Model) -> DomainResult<Room> {
    let category = RoomCategory::parse(&m.category).ok_or_else(|| {
        DomainError::Storage(format!("room {}: unknown category {}", m.id, m.category))
    })?;
    let amenities: Vec<String> =
        serde_json::from_str(&m.amenities).map_err(InfraError::Serialization)?;
    let image_urls: Vec<String> =
        serde_json::from_str(&m.image_urls).map_err(InfraError::Serialization)?;

    Ok(Room {
        id: m.id,
        name: m.name,
        category,
        description: m.description,
        amenities,
        image_urls,
        weekday_price: from_cents(m.weekday_price_cents),
        weekend_price: m.weekend_price_cents.map(from_cents),
        capacity: m.capacity.max(0) as u32,
        manual_pricing: m.manual_pricing,
    })
}

fn domain_to_active(r: &Room) -> DomainResult<room::ActiveModel> {
    Ok(room::ActiveModel {
        id: Set(r.id.clone()),
        name: Set(r.name.clone()),
        category: Set(r.category.as_str().to_string()),
        description: Set(r.description.clone()),
        amenities: Set(serde_json::to_string(&r.amenities).map_err(InfraError::Serialization)?),
        image_urls: Set(serde_json::to_string(&r.image_urls).map_err(InfraError::Serialization)?),
        weekday_price_cents: Set(to_cents(r.weekday_price)?),
        weekend_price_cents: Set(r.weekend_price.map(to_cents).transpose()?),
        capacity: Set(i32::try_from(r.capacity).unwrap_or(i32::MAX)),
        manual_pricing: Set(r.manual_pricing),
        created_at: Set(Utc::now()),
    })
}

// ── RoomRepository impl ─────────────────────────────────────────

#[async_trait]
impl RoomRepository for SeaOrmRoomRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Room>> {
        let model = room::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Room>> {
        let models = room::Entity::find()
            .order_by_asc(room::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn save(&self, mut r: Room) -> DomainResult<Room> {
        if r.id.is_empty() {
            r.id = Uuid::new_v4().to_string();
        }
        r.validate()?;
        debug!(room_id = %r.id, "Saving room");

        let existing = room::Entity::find_by_id(r.id.clone())
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let mut model = domain_to_active(&r)?;
        match existing {
            Some(current) => {
                model.created_at = Set(current.created_at);
                model.update(&self.db).await.map_err(db_err)?;
            }
            None => {
                model.insert(&self.db).await.map_err(db_err)?;
            }
        }
        Ok(r)
    }

    async fn count(&self) -> DomainResult<u64> {
        room::Entity::find().count(&self.db).await.map_err(db_err)
    }
}
