//! Calendar arithmetic for installment due dates.
//!
//! Monthly steps keep the day-of-month of the base date and clamp to the last
//! day of shorter months. Every call works from the original base date, so a
//! Jan 31 base yields Feb 28/29 and then Mar 31, never Mar 28.

use crate::models::Periodicity;
use chrono::{Days, Months, NaiveDate};

/// Advances `base` by `periods` steps of the given periodicity.
///
/// Dates past the end of chrono's supported range saturate to
/// [`NaiveDate::MAX`].
#[must_use]
pub fn advance(base: NaiveDate, periods: u32, periodicity: Periodicity) -> NaiveDate {
    let stepped = match periodicity {
        Periodicity::Monthly => base.checked_add_months(Months::new(periods)),
        Periodicity::Biweekly => base.checked_add_days(Days::new(14 * u64::from(periods))),
        Periodicity::Weekly => base.checked_add_days(Days::new(7 * u64::from(periods))),
    };

    stepped.unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_month_end_rollover_is_not_compounded() {
        let base = date(2023, 1, 31);
        assert_eq!(advance(base, 0, Periodicity::Monthly), date(2023, 1, 31));
        assert_eq!(advance(base, 1, Periodicity::Monthly), date(2023, 2, 28));
        assert_eq!(advance(base, 2, Periodicity::Monthly), date(2023, 3, 31));
        assert_eq!(advance(base, 3, Periodicity::Monthly), date(2023, 4, 30));
    }

    #[test]
    fn test_leap_year_february() {
        assert_eq!(
            advance(date(2024, 1, 31), 1, Periodicity::Monthly),
            date(2024, 2, 29)
        );
        assert_eq!(
            advance(date(2023, 2, 28), 12, Periodicity::Monthly),
            date(2024, 2, 28)
        );
    }

    #[test]
    fn test_monthly_crosses_year_boundary() {
        assert_eq!(
            advance(date(2024, 11, 30), 3, Periodicity::Monthly),
            date(2025, 2, 28)
        );
    }

    #[test]
    fn test_weekly_and_biweekly_steps() {
        let base = date(2024, 2, 26);
        assert_eq!(advance(base, 1, Periodicity::Weekly), date(2024, 3, 4));
        assert_eq!(advance(base, 2, Periodicity::Biweekly), date(2024, 3, 25));
        assert_eq!(advance(base, 0, Periodicity::Biweekly), base);
    }

    #[test]
    fn test_overflow_saturates() {
        assert_eq!(
            advance(NaiveDate::MAX, 1, Periodicity::Monthly),
            NaiveDate::MAX
        );
    }
}
