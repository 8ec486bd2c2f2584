//! Half-open stay interval

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

/// Stay interval `[check_in, check_out)`. The check-out date is not an
/// occupied night.
///
/// Construction does not validate; call [`DateRange::validate`] or
/// [`DateRange::is_valid`] where an invalid range must be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct DateRange {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl DateRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            check_in,
            check_out,
        }
    }

    /// `check_in < check_out`; a zero-night stay is invalid.
    pub fn is_valid(&self) -> bool {
        self.check_in < self.check_out
    }

    /// Number of billed nights, 0 for an invalid range.
    pub fn night_count(&self) -> i64 {
        if self.is_valid() {
            (self.check_out - self.check_in).num_days()
        } else {
            0
        }
    }

    /// Start dates of every night in the stay.
    pub fn nights(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.check_out;
        self.check_in.iter_days().take_while(move |d| *d < end)
    }

    /// Half-open overlap: the two stays share at least one night.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.check_in < other.check_out && self.check_out > other.check_in
    }

    /// Reject inverted or empty ranges, and check-ins before `today`.
    pub fn validate(&self, today: NaiveDate) -> DomainResult<()> {
        self.validate_order()?;
        if self.check_in < today {
            return Err(DomainError::InvalidDateRange(format!(
                "check-in {} is in the past (today is {})",
                self.check_in, today
            )));
        }
        Ok(())
    }

    /// Reject stays longer than `max_nights`.
    pub fn validate_length(&self, max_nights: u32) -> DomainResult<()> {
        let nights = self.night_count();
        if nights > i64::from(max_nights) {
            return Err(DomainError::InvalidDateRange(format!(
                "stay of {} nights exceeds the {} night limit",
                nights, max_nights
            )));
        }
        Ok(())
    }

    /// Reject inverted or empty ranges only.
    pub fn validate_order(&self) -> DomainResult<()> {
        if !self.is_valid() {
            return Err(DomainError::InvalidDateRange(format!(
                "check-in {} must be before check-out {}",
                self.check_in, self.check_out
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.check_in, self.check_out)
    }
}
