//! Room entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    /// Room, Suite, Chalet, Resort
    pub category: String,

    pub description: String,

    /// JSON array of strings
    pub amenities: String,

    /// JSON array of strings
    pub image_urls: String,

    pub weekday_price_cents: i64,

    #[sea_orm(nullable)]
    pub weekend_price_cents: Option<i64>,

    pub capacity: i32,

    pub manual_pricing: bool,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
