//! Schedule data model shared by the engine, the plan loader, and callers.

use crate::errors::{Error, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Upper bound on the number of installments a single generation may request.
pub const MAX_INSTALLMENTS: u32 = 120;

/// Whether an installment's date and amount are system-computed or user-set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Computed by the generator; replaced on regeneration and redistribution.
    Auto,
    /// Explicitly set by a user; survives regeneration untouched.
    Manual,
}

/// Payment lifecycle, owned by the external payment service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Not yet settled; the only status the engine edits.
    #[default]
    Pending,
    /// Settled.
    Paid,
    /// Voided.
    Cancelled,
}

/// Spacing between consecutive auto installments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Periodicity {
    /// Same day-of-month each month, clamped to month end.
    Monthly,
    /// Every 14 days.
    Biweekly,
    /// Every 7 days.
    Weekly,
}

impl Periodicity {
    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Biweekly => "biweekly",
            Self::Weekly => "weekly",
        }
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Periodicity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" | "mensal" => Ok(Self::Monthly),
            "biweekly" | "quinzenal" => Ok(Self::Biweekly),
            "weekly" | "semanal" => Ok(Self::Weekly),
            _ => Err(Error::UnknownPeriodicity {
                value: s.to_string(),
            }),
        }
    }
}

/// One scheduled payment within a contract's balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based position in due-date order
    pub sequence: u32,
    /// Calendar due date
    pub due_date: NaiveDate,
    /// Amount in currency units, 2 decimal places at the boundary
    pub amount: Decimal,
    /// Auto or manual
    pub origin: Origin,
    /// Lifecycle status; only `Pending` installments are edited
    #[serde(default)]
    pub status: PaymentStatus,
}

impl Installment {
    /// Creates a pending auto installment.
    #[must_use]
    pub const fn auto(sequence: u32, due_date: NaiveDate, amount: Decimal) -> Self {
        Self {
            sequence,
            due_date,
            amount,
            origin: Origin::Auto,
            status: PaymentStatus::Pending,
        }
    }

    /// Creates a pending manual installment.
    #[must_use]
    pub const fn manual(sequence: u32, due_date: NaiveDate, amount: Decimal) -> Self {
        Self {
            sequence,
            due_date,
            amount,
            origin: Origin::Manual,
            status: PaymentStatus::Pending,
        }
    }

    /// Returns a copy with the given payment status.
    #[must_use]
    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }

    /// Not yet paid or cancelled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == PaymentStatus::Pending
    }

    /// Paid or cancelled; the engine treats these as read-only inputs.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        !self.is_pending()
    }

    /// Set by a user rather than computed.
    #[must_use]
    pub fn is_manual(&self) -> bool {
        self.origin == Origin::Manual
    }

    /// Pending and auto: eligible for regeneration and redistribution.
    #[must_use]
    pub fn is_adjustable(&self) -> bool {
        self.is_pending() && self.origin == Origin::Auto
    }
}

/// Caller-supplied inputs for one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleParameters {
    /// Total to divide across pending installments (contract value minus down payment)
    pub target_balance: Decimal,
    /// Due date of installment #1
    pub first_due_date: NaiveDate,
    /// Desired number of installments
    pub count: u32,
    /// Spacing between auto installments
    pub periodicity: Periodicity,
    /// Lower bound for the first due date
    pub contract_start_date: NaiveDate,
}

impl ScheduleParameters {
    /// Builds parameters, rejecting counts above [`MAX_INSTALLMENTS`].
    ///
    /// A count of zero is accepted: generation treats it as a no-op and the
    /// validator reports the unallocated balance.
    pub fn new(
        target_balance: Decimal,
        first_due_date: NaiveDate,
        count: u32,
        periodicity: Periodicity,
        contract_start_date: NaiveDate,
    ) -> Result<Self> {
        if count > MAX_INSTALLMENTS {
            return Err(Error::InstallmentCountOutOfRange {
                count,
                max: MAX_INSTALLMENTS,
            });
        }

        Ok(Self {
            target_balance: crate::core::money::round_currency(target_balance),
            first_due_date,
            count,
            periodicity,
            contract_start_date,
        })
    }

    /// Builds parameters from a contract value and down payment.
    ///
    /// The down payment is subtracted here so the engine only ever sees the
    /// balance left to schedule.
    pub fn from_contract(
        contract_value: Decimal,
        down_payment: Decimal,
        first_due_date: NaiveDate,
        count: u32,
        periodicity: Periodicity,
        contract_start_date: NaiveDate,
    ) -> Result<Self> {
        if contract_value < Decimal::ZERO {
            return Err(Error::InvalidAmount {
                amount: contract_value,
            });
        }
        if down_payment < Decimal::ZERO || down_payment > contract_value {
            return Err(Error::InvalidAmount {
                amount: down_payment,
            });
        }

        Self::new(
            contract_value - down_payment,
            first_due_date,
            count,
            periodicity,
            contract_start_date,
        )
    }
}
