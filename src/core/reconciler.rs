//! Balance reconciliation.
//!
//! Recomputes the amounts of pending auto installments so the pending total
//! reproduces the target balance exactly. Every auto installment receives the
//! same floored share except the last one in due-date order, which absorbs
//! the rounding remainder. Manual and frozen installments are never touched.

use crate::{core::money, models::Installment};
use rust_decimal::Decimal;
use tracing::debug;

/// Returns a copy of `schedule` with auto amounts recomputed against `target_balance`.
///
/// When there are no pending auto installments the schedule comes back
/// unchanged; any residual mismatch is left for the validator to report.
/// A negative remainder (manual amounts above the target) produces negative
/// auto amounts rather than being clamped.
#[must_use]
pub fn reconcile(schedule: &[Installment], target_balance: Decimal) -> Vec<Installment> {
    let mut reconciled = schedule.to_vec();

    let manual_total: Decimal = reconciled
        .iter()
        .filter(|i| i.is_pending() && i.is_manual())
        .map(|i| i.amount)
        .sum();
    let auto_remainder = money::round_currency(target_balance - manual_total);

    let auto_indices: Vec<usize> = reconciled
        .iter()
        .enumerate()
        .filter(|(_, i)| i.is_adjustable())
        .map(|(idx, _)| idx)
        .collect();

    // Ties on the due date go to the later position in the input.
    let Some(&last_auto) = auto_indices
        .iter()
        .max_by_key(|&&idx| (reconciled[idx].due_date, idx))
    else {
        debug!(
            %manual_total,
            %target_balance,
            "No auto installments to reconcile; schedule left unchanged"
        );
        return reconciled;
    };

    let auto_count = Decimal::from(auto_indices.len());
    let base_share = money::floor_currency(auto_remainder / auto_count);
    let last_share = auto_remainder - base_share * (auto_count - Decimal::ONE);

    debug!(
        %manual_total,
        %auto_remainder,
        auto_count = auto_indices.len(),
        %base_share,
        %last_share,
        "Reconciling auto installments"
    );

    for idx in auto_indices {
        reconciled[idx].amount = if idx == last_auto {
            last_share
        } else {
            base_share
        };
    }

    reconciled
}
