//! SeaORM implementation of BookingRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use super::{db_err, from_cents, to_cents};
use crate::domain::booking::{Booking, BookingRepository, BookingStatus, ContactInfo, PartySize};
use crate::domain::{DateRange, DomainError, DomainResult};
use crate::infrastructure::database::entities::booking;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> DomainResult<Booking> {
    let status = BookingStatus::parse(&m.status).ok_or_else(|| {
        DomainError::Storage(format!("booking {}: unknown status {}", m.id, m.status))
    })?;
    let adults = m.adults.max(0) as u32;
    let kids = m.kids.max(0) as u32;
    let party = if m.per_head {
        PartySize::PerHead { adults, kids }
    } else {
        PartySize::Guests(adults + kids)
    };

    Ok(Booking {
        id: m.id,
        room_id: m.room_id,
        guest: ContactInfo {
            name: m.guest_name,
            email: m.guest_email,
            phone: m.guest_phone,
        },
        range: DateRange::new(m.check_in, m.check_out),
        party,
        total_price: from_cents(m.total_price_cents),
        price_is_estimate: m.price_is_estimate,
        status,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn domain_to_active(b: &Booking) -> DomainResult<booking::ActiveModel> {
    let (per_head, adults, kids) = match b.party {
        PartySize::Guests(n) => (false, n, 0),
        PartySize::PerHead { adults, kids } => (true, adults, kids),
    };
    let to_i32 = |n: u32| {
        i32::try_from(n).map_err(|_| DomainError::InvalidParty(format!("{} guests", n)))
    };

    Ok(booking::ActiveModel {
        id: Set(b.id.clone()),
        room_id: Set(b.room_id.clone()),
        guest_name: Set(b.guest.name.clone()),
        guest_email: Set(b.guest.email.clone()),
        guest_phone: Set(b.guest.phone.clone()),
        check_in: Set(b.range.check_in),
        check_out: Set(b.range.check_out),
        per_head: Set(per_head),
        adults: Set(to_i32(adults)?),
        kids: Set(to_i32(kids)?),
        total_price_cents: Set(to_cents(b.total_price)?),
        price_is_estimate: Set(b.price_is_estimate),
        status: Set(b.status.as_str().to_string()),
        created_at: Set(b.created_at),
        updated_at: Set(b.updated_at),
    })
}

impl SeaOrmBookingRepository {
    async fn require(&self, id: &str) -> DomainResult<Booking> {
        let model = booking::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::booking_not_found(id))?;
        model_to_domain(model)
    }
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_for_room(&self, room_id: &str) -> DomainResult<Vec<Booking>> {
        debug!(room_id, "Loading bookings for room");
        let models = booking::Entity::find()
            .filter(booking::Column::RoomId.eq(room_id))
            .order_by_asc(booking::Column::CheckIn)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .order_by_desc(booking::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn save(&self, mut b: Booking) -> DomainResult<Booking> {
        if b.id.is_empty() {
            b.id = Uuid::new_v4().to_string();
        }
        debug!(booking_id = %b.id, room_id = %b.room_id, range = %b.range, "Saving booking");

        let txn = self.db.begin().await.map_err(db_err)?;

        if b.holds_inventory() {
            let overlapping = booking::Entity::find()
                .filter(booking::Column::RoomId.eq(b.room_id.as_str()))
                .filter(booking::Column::Status.ne(BookingStatus::Cancelled.as_str()))
                .filter(booking::Column::CheckIn.lt(b.range.check_out))
                .filter(booking::Column::CheckOut.gt(b.range.check_in))
                .count(&txn)
                .await
                .map_err(db_err)?;

            if overlapping > 0 {
                txn.rollback().await.map_err(db_err)?;
                return Err(DomainError::BookingConflict {
                    room_id: b.room_id,
                });
            }
        }

        domain_to_active(&b)?.insert(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;
        Ok(b)
    }

    async fn update_status(
        &self,
        id: &str,
        expected: BookingStatus,
        new: BookingStatus,
        at: DateTime<Utc>,
    ) -> DomainResult<Booking> {
        let result = booking::Entity::update_many()
            .col_expr(booking::Column::Status, Expr::value(new.as_str()))
            .col_expr(booking::Column::UpdatedAt, Expr::value(at))
            .filter(booking::Column::Id.eq(id))
            .filter(booking::Column::Status.eq(expected.as_str()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            let current = self.require(id).await?;
            return Err(DomainError::BookingConflict {
                room_id: current.room_id,
            });
        }

        self.require(id).await
    }

    async fn update_price(
        &self,
        id: &str,
        total_price: Decimal,
        price_is_estimate: bool,
        at: DateTime<Utc>,
    ) -> DomainResult<Booking> {
        let existing = booking::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::booking_not_found(id))?;

        let mut active: booking::ActiveModel = existing.into();
        active.total_price_cents = Set(to_cents(total_price)?);
        active.price_is_estimate = Set(price_is_estimate);
        active.updated_at = Set(at);
        let updated = active.update(&self.db).await.map_err(db_err)?;
        model_to_domain(updated)
    }
}
