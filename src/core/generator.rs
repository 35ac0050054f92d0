//! Schedule generation.
//!
//! Builds a fresh schedule from [`ScheduleParameters`] while keeping every
//! manual pin verbatim. Pins take up slots of the requested count; auto
//! installments fill the remaining slots and are spaced among themselves, so
//! a pin never consumes a periodicity step.

use crate::{
    core::{dates, reconciler},
    models::{Installment, ScheduleParameters},
};
use rust_decimal::Decimal;
use tracing::debug;

/// Generates a reconciled, renumbered schedule.
///
/// Every pending manual pin is kept and occupies one of the `params.count`
/// slots; the free slots get new auto installments dated from
/// `params.first_due_date`. Existing auto installments are discarded. When
/// pins outnumber `count`, all of them are kept and no auto installment is
/// created. Paid or cancelled installments are carried through untouched.
///
/// The number of auto slots depends only on `count` and the number of pins,
/// never on where the pins sit, so regenerating a generated schedule with the
/// same parameters reproduces it.
///
/// A zero count or a non-positive target balance leaves `existing`
/// unchanged.
#[must_use]
pub fn generate(params: &ScheduleParameters, existing: &[Installment]) -> Vec<Installment> {
    if params.count < 1 || params.target_balance <= Decimal::ZERO {
        debug!(
            count = params.count,
            target_balance = %params.target_balance,
            "Nothing to distribute; returning schedule unchanged"
        );
        return existing.to_vec();
    }

    let mut ordered: Vec<&Installment> = existing.iter().collect();
    ordered.sort_by_key(|i| i.sequence);

    let mut schedule: Vec<Installment> = ordered
        .iter()
        .filter(|i| i.is_frozen())
        .map(|&i| i.clone())
        .collect();
    let pins: Vec<Installment> = ordered
        .iter()
        .filter(|i| i.is_pending() && i.is_manual())
        .map(|&i| i.clone())
        .collect();

    let pin_count = u32::try_from(pins.len()).unwrap_or(u32::MAX);
    let auto_slots = params.count.saturating_sub(pin_count);

    schedule.extend(pins);
    schedule.extend((0..auto_slots).map(|auto_index| {
        let due_date = dates::advance(params.first_due_date, auto_index, params.periodicity);
        Installment::auto(pin_count + auto_index + 1, due_date, Decimal::ZERO)
    }));

    debug!(
        count = params.count,
        auto_installments = auto_slots,
        manual_pins = pin_count,
        periodicity = %params.periodicity,
        "Generated schedule skeleton"
    );

    renumber(reconciler::reconcile(&schedule, params.target_balance))
}

/// Sorts by due date and assigns contiguous sequence numbers from 1.
///
/// The sort is stable, so installments sharing a due date keep their
/// relative order from the input.
#[must_use]
pub fn renumber(mut schedule: Vec<Installment>) -> Vec<Installment> {
    schedule.sort_by_key(|i| i.due_date);
    for (installment, sequence) in schedule.iter_mut().zip(1u32..) {
        installment.sequence = sequence;
    }
    schedule
}
