//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod booking_repository;
pub mod repository_provider;
pub mod room_repository;

pub use booking_repository::SeaOrmBookingRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use room_repository::SeaOrmRoomRepository;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::DomainError;
use crate::shared::errors::InfraError;

fn db_err(e: sea_orm::DbErr) -> DomainError {
    InfraError::Database(e).into()
}

/// Amounts are stored as integer minor units.
fn to_cents(amount: Decimal) -> Result<i64, DomainError> {
    (amount * Decimal::ONE_HUNDRED)
        .round()
        .to_i64()
        .ok_or_else(|| DomainError::Validation(format!("amount {} out of range", amount)))
}

fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn cents_conversion() {
        assert_eq!(to_cents(Decimal::from(450)).unwrap(), 45_000);
        assert_eq!(to_cents(Decimal::from_str("19.995").unwrap()).unwrap(), 2_000);
        assert_eq!(from_cents(45_000), Decimal::from(450));
        assert_eq!(from_cents(1_999).to_string(), "19.99");
    }
}
