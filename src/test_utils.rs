//! Shared test utilities for the schedule engine.
//!
//! Provides terse constructors for dates, parameters and installments so
//! tests read like the scenarios they describe.

use crate::models::{Installment, Periodicity, ScheduleParameters};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Builds a date, panicking on invalid input (tests only).
#[allow(clippy::unwrap_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Creates parameters whose contract starts on the first due date.
///
/// # Defaults
/// * `contract_start_date`: same as `first_due_date`
#[allow(clippy::unwrap_used)]
pub fn params(
    target_balance: Decimal,
    first_due_date: NaiveDate,
    count: u32,
    periodicity: Periodicity,
) -> ScheduleParameters {
    ScheduleParameters::new(
        target_balance,
        first_due_date,
        count,
        periodicity,
        first_due_date,
    )
    .unwrap()
}

/// Pending auto installment.
pub const fn auto_at(sequence: u32, due_date: NaiveDate, amount: Decimal) -> Installment {
    Installment::auto(sequence, due_date, amount)
}

/// Pending manual installment.
pub const fn manual_at(sequence: u32, due_date: NaiveDate, amount: Decimal) -> Installment {
    Installment::manual(sequence, due_date, amount)
}

/// Amounts of a schedule in sequence order.
pub fn amounts(schedule: &[Installment]) -> Vec<Decimal> {
    let mut ordered: Vec<&Installment> = schedule.iter().collect();
    ordered.sort_by_key(|i| i.sequence);
    ordered.into_iter().map(|i| i.amount).collect()
}

/// Due dates of a schedule in sequence order.
pub fn due_dates(schedule: &[Installment]) -> Vec<NaiveDate> {
    let mut ordered: Vec<&Installment> = schedule.iter().collect();
    ordered.sort_by_key(|i| i.sequence);
    ordered.into_iter().map(|i| i.due_date).collect()
}
