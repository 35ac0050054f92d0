//! Plan file loading.
//!
//! A plan file describes one contract and the schedule to generate for it,
//! plus optional manual pins applied after generation:
//!
//! ```toml
//! [contract]
//! value = "12000.00"
//! down_payment = "2000.00"
//! start_date = "2024-01-15"
//!
//! [schedule]
//! first_due_date = "2024-01-31"
//! count = 12
//! periodicity = "monthly"
//!
//! [[pins]]
//! sequence = 3
//! amount = "1500.00"
//! due_date = "2024-04-05"
//! ```

use crate::{
    core::{EditOutcome, Finding, ScheduleEditor},
    errors::{Error, Result},
    models::{Periodicity, ScheduleParameters},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Configuration structure representing an entire plan file
#[derive(Debug, Deserialize)]
pub struct Plan {
    /// Contract figures
    pub contract: ContractConfig,
    /// Generation settings
    pub schedule: ScheduleConfig,
    /// Manual overrides, applied in file order after generation
    #[serde(default)]
    pub pins: Vec<PinConfig>,
}

/// Contract section of a plan file
#[derive(Debug, Deserialize, Clone)]
pub struct ContractConfig {
    /// Total contract value
    pub value: Decimal,
    /// Down payment already collected, subtracted before scheduling
    #[serde(default)]
    pub down_payment: Decimal,
    /// Contract start; the first due date must not precede it
    pub start_date: NaiveDate,
}

/// Schedule section of a plan file
#[derive(Debug, Deserialize, Clone)]
pub struct ScheduleConfig {
    /// Due date of installment #1
    pub first_due_date: NaiveDate,
    /// Number of installments
    pub count: u32,
    /// "monthly", "biweekly" or "weekly"
    pub periodicity: String,
}

/// A manual override for one installment
#[derive(Debug, Deserialize, Clone)]
pub struct PinConfig {
    /// Sequence number in the schedule as it stands when the pin is applied
    pub sequence: u32,
    /// Fixed amount, if any
    pub amount: Option<Decimal>,
    /// Fixed due date, if any
    pub due_date: Option<NaiveDate>,
}

impl Plan {
    /// Builds validated schedule parameters from the plan.
    ///
    /// # Errors
    /// Returns an error if the periodicity is unknown, the count exceeds the
    /// installment limit, or the contract figures are negative or inconsistent.
    pub fn parameters(&self) -> Result<ScheduleParameters> {
        let periodicity: Periodicity = self.schedule.periodicity.parse()?;

        ScheduleParameters::from_contract(
            self.contract.value,
            self.contract.down_payment,
            self.schedule.first_due_date,
            self.schedule.count,
            periodicity,
            self.contract.start_date,
        )
    }

    /// Generates the schedule, applies the pins, and redistributes the remainder.
    ///
    /// Returns the parameters used together with the final outcome. Pins that
    /// could not be applied are reported ahead of the final validation findings.
    pub fn build_schedule(&self) -> Result<(ScheduleParameters, EditOutcome)> {
        let params = self.parameters()?;
        let editor = ScheduleEditor::new(params.clone());

        let mut outcome = editor.regenerate(&[]);
        info!(
            installments = outcome.schedule.len(),
            target_balance = %params.target_balance,
            "Generated schedule from plan"
        );

        if self.pins.is_empty() {
            return Ok((params, outcome));
        }

        let mut rejected = Vec::new();
        for pin in &self.pins {
            debug!(sequence = pin.sequence, "Applying pin");
            if let Some(amount) = pin.amount {
                outcome = editor.set_manual_amount(&outcome.schedule, pin.sequence, amount);
                rejected.extend(rejections(&outcome));
            }
            if let Some(due_date) = pin.due_date {
                outcome = editor.set_manual_date(&outcome.schedule, pin.sequence, due_date);
                rejected.extend(rejections(&outcome));
            }
        }

        let mut outcome = editor.redistribute(&outcome.schedule);
        rejected.append(&mut outcome.findings);
        outcome.findings = rejected;
        Ok((params, outcome))
    }
}

/// Findings that mean a pin could not be applied at all.
fn rejections(outcome: &EditOutcome) -> impl Iterator<Item = Finding> + '_ {
    outcome.findings.iter().cloned().filter(|f| {
        matches!(
            f,
            Finding::UnknownInstallment { .. } | Finding::FrozenInstallment { .. }
        )
    })
}

/// Loads a plan from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<Plan> {
    let path_ref = path.as_ref();
    debug!("Attempting to load plan from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref)?;

    parse_plan(&contents)
}

/// Parses a plan from TOML text
pub fn parse_plan(contents: &str) -> Result<Plan> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse plan: {e}"),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::date;
    use rust_decimal_macros::dec;

    const PLAN: &str = r#"
        [contract]
        value = "12000.00"
        down_payment = "2000.00"
        start_date = "2024-01-15"

        [schedule]
        first_due_date = "2024-01-31"
        count = 4
        periodicity = "monthly"
    "#;

    #[test]
    fn test_parse_plan() {
        let plan = parse_plan(PLAN).unwrap();
        assert_eq!(plan.contract.value, dec!(12000.00));
        assert_eq!(plan.contract.down_payment, dec!(2000.00));
        assert_eq!(plan.schedule.first_due_date, date(2024, 1, 31));
        assert!(plan.pins.is_empty());

        let params = plan.parameters().unwrap();
        assert_eq!(params.target_balance, dec!(10000.00));
        assert_eq!(params.periodicity, Periodicity::Monthly);
        assert_eq!(params.contract_start_date, date(2024, 1, 15));
    }

    #[test]
    fn test_unknown_periodicity_fails_fast() {
        let plan = parse_plan(&PLAN.replace("\"monthly\"", "\"yearly\"")).unwrap();
        assert!(matches!(
            plan.parameters(),
            Err(Error::UnknownPeriodicity { .. })
        ));
    }

    #[test]
    fn test_missing_field_is_config_error() {
        let result = parse_plan("[contract]\nvalue = \"10\"\n");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_plan_file_is_io_error() {
        let result = load_plan("does/not/exist/plan.toml");
        assert!(matches!(result, Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound));
    }

    #[test]
    fn test_build_schedule_applies_pins_and_redistributes() {
        let toml_str = format!(
            "{PLAN}\n[[pins]]\nsequence = 2\namount = \"4000.00\"\ndue_date = \"2024-02-20\"\n"
        );
        let plan = parse_plan(&toml_str).unwrap();
        let (params, outcome) = plan.build_schedule().unwrap();

        assert_eq!(params.target_balance, dec!(10000.00));
        assert!(outcome.is_clean(), "{:?}", outcome.findings);

        let pin = &outcome.schedule[1];
        assert!(pin.is_manual());
        assert_eq!(pin.due_date, date(2024, 2, 20));
        assert_eq!(pin.amount, dec!(4000.00));
        assert_eq!(
            outcome
                .schedule
                .iter()
                .filter(|i| !i.is_manual())
                .map(|i| i.amount)
                .collect::<Vec<_>>(),
            vec![dec!(2000.00), dec!(2000.00), dec!(2000.00)]
        );
    }

    #[test]
    fn test_pin_on_missing_installment_is_reported() {
        let toml_str = format!("{PLAN}\n[[pins]]\nsequence = 9\namount = \"1.00\"\n");
        let plan = parse_plan(&toml_str).unwrap();
        let (_, outcome) = plan.build_schedule().unwrap();

        assert_eq!(
            outcome.findings,
            vec![Finding::UnknownInstallment { sequence: 9 }]
        );
        assert!(outcome.schedule.iter().all(|i| !i.is_manual()));
    }
}
