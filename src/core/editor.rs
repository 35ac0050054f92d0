//! Schedule editing façade.
//!
//! Every operation takes the current schedule by reference and returns an
//! [`EditOutcome`] holding the proposed next schedule plus validation
//! findings. Nothing here performs I/O or keeps state between calls; the
//! caller decides whether to persist the proposal or discard it.

use crate::{
    core::{
        generator::{self, renumber},
        money, reconciler,
        validator::{self, Finding},
    },
    models::{Installment, Origin, ScheduleParameters},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Result of an editor operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// Proposed schedule, renumbered in due-date order
    pub schedule: Vec<Installment>,
    /// Findings for the proposed schedule (and for a rejected request, if any)
    pub findings: Vec<Finding>,
}

impl EditOutcome {
    /// True when the schedule carries no findings at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// True when at least one finding should stop the caller from persisting.
    #[must_use]
    pub fn has_blocking_findings(&self) -> bool {
        self.findings.iter().any(Finding::is_blocking)
    }
}

/// Orchestrates schedule mutations against a fixed set of parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEditor {
    params: ScheduleParameters,
}

impl ScheduleEditor {
    /// Creates an editor over the given parameters.
    #[must_use]
    pub const fn new(params: ScheduleParameters) -> Self {
        Self { params }
    }

    /// Parameters every operation validates against.
    #[must_use]
    pub const fn parameters(&self) -> &ScheduleParameters {
        &self.params
    }

    /// Returns an editor over different parameters (e.g. a new count).
    #[must_use]
    pub fn with_parameters(self, params: ScheduleParameters) -> Self {
        Self { params }
    }

    /// Full generate, reconcile and validate cycle.
    #[must_use]
    pub fn regenerate(&self, current: &[Installment]) -> EditOutcome {
        debug!(
            installments = current.len(),
            count = self.params.count,
            "Regenerating schedule"
        );
        self.finish(generator::generate(&self.params, current))
    }

    /// Pins an installment to a new due date, keeping its amount.
    ///
    /// Amounts are not reconciled; the schedule is re-sorted and renumbered.
    #[must_use]
    pub fn set_manual_date(
        &self,
        current: &[Installment],
        sequence: u32,
        new_date: NaiveDate,
    ) -> EditOutcome {
        self.edit_pending(current, sequence, |installment| {
            installment.due_date = new_date;
            installment.origin = Origin::Manual;
        })
    }

    /// Pins an installment to a new amount.
    ///
    /// Other installments are left alone; call [`Self::redistribute`] to
    /// spread the remaining balance over the auto installments.
    #[must_use]
    pub fn set_manual_amount(
        &self,
        current: &[Installment],
        sequence: u32,
        new_amount: Decimal,
    ) -> EditOutcome {
        let amount = money::round_currency(new_amount);
        self.edit_pending(current, sequence, |installment| {
            installment.amount = amount;
            installment.origin = Origin::Manual;
        })
    }

    /// Unpins an installment so the next redistribution or regeneration may change it.
    #[must_use]
    pub fn release_manual(&self, current: &[Installment], sequence: u32) -> EditOutcome {
        self.edit_pending(current, sequence, |installment| {
            installment.origin = Origin::Auto;
        })
    }

    /// Re-runs reconciliation over the current manual/auto split.
    ///
    /// Dates and origins are untouched.
    #[must_use]
    pub fn redistribute(&self, current: &[Installment]) -> EditOutcome {
        let ordered = in_sequence_order(current);
        self.finish(reconciler::reconcile(&ordered, self.params.target_balance))
    }

    /// Appends a manual installment and renumbers.
    #[must_use]
    pub fn add_installment(
        &self,
        current: &[Installment],
        due_date: NaiveDate,
        amount: Decimal,
    ) -> EditOutcome {
        let mut schedule = in_sequence_order(current);
        let next_sequence = schedule.last().map_or(1, |i| i.sequence + 1);
        schedule.push(Installment::manual(
            next_sequence,
            due_date,
            money::round_currency(amount),
        ));

        debug!(%due_date, %amount, "Added manual installment");
        self.finish(schedule)
    }

    /// Deletes a pending installment and renumbers the rest.
    #[must_use]
    pub fn remove_installment(&self, current: &[Installment], sequence: u32) -> EditOutcome {
        let mut schedule = in_sequence_order(current);
        let Some(idx) = schedule.iter().position(|i| i.sequence == sequence) else {
            return self.rejected(current, Finding::UnknownInstallment { sequence });
        };
        if schedule[idx].is_frozen() {
            return self.rejected(current, Finding::FrozenInstallment { sequence });
        }

        let removed = schedule.remove(idx);
        debug!(sequence, amount = %removed.amount, "Removed installment");
        self.finish(schedule)
    }

    /// Applies `change` to the pending installment with `sequence`.
    fn edit_pending<F>(&self, current: &[Installment], sequence: u32, change: F) -> EditOutcome
    where
        F: FnOnce(&mut Installment),
    {
        let mut schedule = in_sequence_order(current);
        let Some(target) = schedule.iter_mut().find(|i| i.sequence == sequence) else {
            return self.rejected(current, Finding::UnknownInstallment { sequence });
        };
        if target.is_frozen() {
            return self.rejected(current, Finding::FrozenInstallment { sequence });
        }

        change(target);
        debug!(
            sequence,
            due_date = %target.due_date,
            amount = %target.amount,
            origin = ?target.origin,
            "Edited installment"
        );
        self.finish(schedule)
    }

    fn finish(&self, schedule: Vec<Installment>) -> EditOutcome {
        let schedule = renumber(schedule);
        let findings = validator::validate(&schedule, &self.params);
        if !findings.is_empty() {
            warn!(count = findings.len(), "Schedule has findings");
        }
        EditOutcome { schedule, findings }
    }

    fn rejected(&self, current: &[Installment], reason: Finding) -> EditOutcome {
        warn!(%reason, "Edit rejected");
        let schedule = current.to_vec();
        let mut findings = vec![reason];
        findings.extend(validator::validate(&schedule, &self.params));
        EditOutcome { schedule, findings }
    }
}

fn in_sequence_order(schedule: &[Installment]) -> Vec<Installment> {
    let mut ordered = schedule.to_vec();
    ordered.sort_by_key(|i| i.sequence);
    ordered
}
