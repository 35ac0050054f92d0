//! Plain-text rendering of a schedule and its findings.
//!
//! Useful for logging or printing an [`EditOutcome`] from the command line.
//! Presentation for end users (currency symbols, localization) stays with
//! the caller.

use crate::{
    core::editor::EditOutcome,
    errors::Result,
    models::{Origin, PaymentStatus, ScheduleParameters},
};
use rust_decimal::Decimal;
use std::fmt::Write;

/// Formats an edit outcome into a human-readable table.
pub fn format_schedule_summary(
    outcome: &EditOutcome,
    params: &ScheduleParameters,
) -> Result<String> {
    let total: Decimal = outcome
        .schedule
        .iter()
        .filter(|i| i.is_pending())
        .map(|i| i.amount)
        .sum();

    let mut summary = format!(
        "Installment schedule - {} x {} from {} - balance {:.2}\n",
        params.count, params.periodicity, params.first_due_date, params.target_balance
    );

    for installment in &outcome.schedule {
        let origin = match installment.origin {
            Origin::Auto => "auto",
            Origin::Manual => "manual",
        };
        let status = match installment.status {
            PaymentStatus::Pending => "",
            PaymentStatus::Paid => " (paid)",
            PaymentStatus::Cancelled => " (cancelled)",
        };

        writeln!(
            &mut summary,
            "  #{:<3} {}  {:>12.2}  {origin}{status}",
            installment.sequence, installment.due_date, installment.amount
        )?;
    }

    writeln!(&mut summary, "  Pending total: {total:.2}")?;

    if outcome.findings.is_empty() {
        summary.push_str("  No findings\n");
    } else {
        writeln!(&mut summary, "  Findings ({}):", outcome.findings.len())?;
        for finding in &outcome.findings {
            writeln!(&mut summary, "    - {finding}")?;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::editor::ScheduleEditor,
        models::Periodicity,
        test_utils::{date, params},
    };
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary_lists_installments_and_total() {
        let p = params(dec!(100.00), date(2024, 1, 31), 3, Periodicity::Monthly);
        let outcome = ScheduleEditor::new(p.clone()).regenerate(&[]);
        let summary = format_schedule_summary(&outcome, &p).unwrap();

        assert!(summary.starts_with("Installment schedule - 3 x monthly from 2024-01-31"));
        assert!(summary.contains("2024-02-29"));
        assert!(summary.contains("33.34  auto"));
        assert!(summary.contains("Pending total: 100.00"));
        assert!(summary.contains("No findings"));
    }

    #[test]
    fn test_summary_lists_findings() {
        let p = params(dec!(100.00), date(2024, 1, 31), 0, Periodicity::Monthly);
        let outcome = ScheduleEditor::new(p.clone()).regenerate(&[]);
        let summary = format_schedule_summary(&outcome, &p).unwrap();

        assert!(summary.contains("Findings (1):"));
        assert!(summary.contains("installments total 0.00 but the balance to schedule is 100.00"));
    }
}
