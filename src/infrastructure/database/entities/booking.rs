//! Booking entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub room_id: String,

    pub guest_name: String,
    pub guest_email: String,

    #[sea_orm(nullable)]
    pub guest_phone: Option<String>,

    pub check_in: Date,
    pub check_out: Date,

    /// Party stored as adults/kids; `per_head` keeps the request shape
    pub per_head: bool,
    pub adults: i32,
    pub kids: i32,

    pub total_price_cents: i64,
    pub price_is_estimate: bool,

    /// Pending, Confirmed, Checked In, Checked Out, Cancelled
    pub status: String,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id"
    )]
    Room,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
