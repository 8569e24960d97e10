//! Calendar period resolution.
//!
//! A period tag plus a reference instant maps to a half-open `[start, end)`
//! range on the UTC calendar. Every range starts at midnight on the first day
//! of the bucket that contains the reference instant.

use crate::errors::ServiceError;
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

/// Symbolic bucket size used to derive a date range.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum PeriodType {
    Day,
    Month,
    Quarter,
    Year,
}

impl PeriodType {
    /// Parses an upper-case tag, rejecting anything else with `InvalidPeriodTag`.
    pub fn parse(tag: &str) -> Result<Self, ServiceError> {
        PeriodType::from_str(tag).map_err(|_| ServiceError::InvalidPeriodTag(tag.to_string()))
    }
}

/// Half-open UTC range: includes `start`, excludes `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PeriodRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl PeriodRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// First month of the calendar quarter containing `month` (1-based).
pub fn quarter_start_month(month: u32) -> u32 {
    month - ((month - 1) % 3)
}

/// Resolves `period` around `reference`.
///
/// Fails with `InvalidInput` only when the end of the range would fall outside
/// the representable calendar.
pub fn resolve(period: PeriodType, reference: DateTime<Utc>) -> Result<PeriodRange, ServiceError> {
    let date = reference.date_naive();

    let start = match period {
        PeriodType::Day => Some(date),
        PeriodType::Month => date.with_day(1),
        PeriodType::Quarter => {
            NaiveDate::from_ymd_opt(date.year(), quarter_start_month(date.month()), 1)
        }
        PeriodType::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1),
    }
    .ok_or_else(|| out_of_range(period, reference))?;

    let end = match period {
        PeriodType::Day => start.checked_add_days(Days::new(1)),
        PeriodType::Month => start.checked_add_months(Months::new(1)),
        PeriodType::Quarter => start.checked_add_months(Months::new(3)),
        PeriodType::Year => start.checked_add_months(Months::new(12)),
    }
    .ok_or_else(|| out_of_range(period, reference))?;

    Ok(PeriodRange::new(midnight(start), midnight(end)))
}

/// Parses `tag` and resolves it around `reference`.
pub fn resolve_tag(tag: &str, reference: DateTime<Utc>) -> Result<PeriodRange, ServiceError> {
    resolve(PeriodType::parse(tag)?, reference)
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn out_of_range(period: PeriodType, reference: DateTime<Utc>) -> ServiceError {
    ServiceError::InvalidInput(format!(
        "{} period around {} is outside the supported calendar range",
        period,
        reference.to_rfc3339()
    ))
}
