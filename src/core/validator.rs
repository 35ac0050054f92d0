//! Schedule-level invariant checks.
//!
//! Validation is advisory: it never mutates the schedule and always returns
//! the complete list of findings so the caller can decide whether to accept
//! the proposed schedule.

use crate::{
    core::money,
    models::{Installment, ScheduleParameters},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// A single irregularity detected in a schedule or an editor request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// Two or more installments share a due date.
    DuplicateDueDate {
        /// The shared date
        date: NaiveDate,
    },
    /// Installment #1 is due before the contract starts.
    FirstDateBeforeContractStart {
        /// Due date of installment #1
        first_due_date: NaiveDate,
        /// Contract start date
        contract_start_date: NaiveDate,
    },
    /// A pending installment's amount is zero or negative.
    NonPositiveAmount {
        /// Offending installment
        sequence: u32,
        /// Whether the amount was set by a user
        manual: bool,
    },
    /// Pending installments do not add up to the target balance.
    BalanceMismatch {
        /// Target balance
        expected: Decimal,
        /// Sum of pending installment amounts
        actual: Decimal,
    },
    /// Manual amounts alone exceed the target balance.
    ManualExceedsBalance {
        /// Sum of pending manual amounts
        manual: Decimal,
        /// Target balance
        target: Decimal,
    },
    /// An edit referenced a sequence number not in the schedule.
    UnknownInstallment {
        /// Requested sequence number
        sequence: u32,
    },
    /// An edit targeted a paid or cancelled installment.
    FrozenInstallment {
        /// Requested sequence number
        sequence: u32,
    },
}

impl Finding {
    /// Whether a caller should refuse to persist a schedule carrying this finding.
    ///
    /// Non-positive manual amounts were typed in by a user and are left to the
    /// caller's judgement; everything else indicates an inconsistent schedule
    /// or a rejected edit.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        !matches!(self, Self::NonPositiveAmount { manual: true, .. })
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateDueDate { date } => {
                write!(f, "more than one installment is due on {date}")
            }
            Self::FirstDateBeforeContractStart {
                first_due_date,
                contract_start_date,
            } => write!(
                f,
                "first installment ({first_due_date}) is due before the contract start ({contract_start_date})"
            ),
            Self::NonPositiveAmount { sequence, manual } => {
                let kind = if *manual { "manual" } else { "automatic" };
                write!(f, "{kind} installment #{sequence} has a non-positive amount")
            }
            Self::BalanceMismatch { expected, actual } => write!(
                f,
                "installments total {actual:.2} but the balance to schedule is {expected:.2}"
            ),
            Self::ManualExceedsBalance { manual, target } => write!(
                f,
                "manual installments total {manual:.2}, more than the balance of {target:.2}"
            ),
            Self::UnknownInstallment { sequence } => {
                write!(f, "installment #{sequence} does not exist")
            }
            Self::FrozenInstallment { sequence } => {
                write!(f, "installment #{sequence} is paid or cancelled and cannot be edited")
            }
        }
    }
}

/// Checks a schedule against its parameters and returns every finding.
#[must_use]
pub fn validate(schedule: &[Installment], params: &ScheduleParameters) -> Vec<Finding> {
    let mut findings = duplicate_due_dates(schedule);

    if let Some(finding) = first_date_before_start(schedule, params.contract_start_date) {
        findings.push(finding);
    }

    findings.extend(non_positive_amounts(schedule));
    findings.extend(balance_findings(schedule, params.target_balance));

    findings
}

/// One finding per date shared by two or more installments, in date order.
#[must_use]
pub fn duplicate_due_dates(schedule: &[Installment]) -> Vec<Finding> {
    let mut per_date: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for installment in schedule {
        *per_date.entry(installment.due_date).or_default() += 1;
    }

    per_date
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(date, _)| Finding::DuplicateDueDate { date })
        .collect()
}

/// Flags installment #1 (lowest sequence number) when it precedes the contract start.
#[must_use]
pub fn first_date_before_start(
    schedule: &[Installment],
    contract_start_date: NaiveDate,
) -> Option<Finding> {
    schedule
        .iter()
        .min_by_key(|i| i.sequence)
        .filter(|first| first.due_date < contract_start_date)
        .map(|first| Finding::FirstDateBeforeContractStart {
            first_due_date: first.due_date,
            contract_start_date,
        })
}

/// Flags pending installments whose amount is zero or negative.
#[must_use]
pub fn non_positive_amounts(schedule: &[Installment]) -> Vec<Finding> {
    let mut flagged: Vec<&Installment> = schedule
        .iter()
        .filter(|i| i.is_pending() && i.amount <= Decimal::ZERO)
        .collect();
    flagged.sort_by_key(|i| i.sequence);

    flagged
        .into_iter()
        .map(|i| Finding::NonPositiveAmount {
            sequence: i.sequence,
            manual: i.is_manual(),
        })
        .collect()
}

/// Compares pending totals with the target balance.
///
/// Reports manual overcommitment first, then any mismatch larger than one
/// minor currency unit.
#[must_use]
pub fn balance_findings(schedule: &[Installment], target_balance: Decimal) -> Vec<Finding> {
    let mut findings = Vec::new();

    let manual: Decimal = schedule
        .iter()
        .filter(|i| i.is_pending() && i.is_manual())
        .map(|i| i.amount)
        .sum();
    if manual > target_balance {
        findings.push(Finding::ManualExceedsBalance {
            manual,
            target: target_balance,
        });
    }

    let actual: Decimal = schedule
        .iter()
        .filter(|i| i.is_pending())
        .map(|i| i.amount)
        .sum();
    if !money::within_minor_unit(target_balance, actual) {
        findings.push(Finding::BalanceMismatch {
            expected: target_balance,
            actual,
        });
    }

    findings
}
