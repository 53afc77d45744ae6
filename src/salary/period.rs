use chrono::{Datelike, NaiveDate};

use crate::error::SalaryError;

/// One calendar month. Months are 1-based (January = 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayPeriod {
    month: u32,
    year: i32,
    first_day: NaiveDate,
    last_day: NaiveDate,
}

pub fn validate_year(year: i32) -> Result<(), SalaryError> {
    if (1000..=9999).contains(&year) {
        Ok(())
    } else {
        Err(SalaryError::validation(format!(
            "year must be a 4-digit year, got {year}"
        )))
    }
}

/// Inclusive first and last day of `year`.
pub fn year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate), SalaryError> {
    let first = PayPeriod::new(1, year)?;
    let last = PayPeriod::new(12, year)?;
    Ok((first.first_day, last.last_day))
}

/// Inclusive date bounds for an optional month/year filter. A month without a
/// year is rejected.
pub fn filter_bounds(
    month: Option<u32>,
    year: Option<i32>,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>), SalaryError> {
    match (month, year) {
        (Some(month), Some(year)) => {
            let period = PayPeriod::new(month, year)?;
            Ok((Some(period.first_day), Some(period.last_day)))
        }
        (None, Some(year)) => {
            let (from, to) = year_bounds(year)?;
            Ok((Some(from), Some(to)))
        }
        (Some(_), None) => Err(SalaryError::validation("month filter requires a year")),
        (None, None) => Ok((None, None)),
    }
}

impl PayPeriod {
    pub fn new(month: u32, year: i32) -> Result<Self, SalaryError> {
        validate_year(year)?;
        if !(1..=12).contains(&month) {
            return Err(SalaryError::validation(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }

        let first_day = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| SalaryError::validation(format!("invalid period {month}/{year}")))?;
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let last_day = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| SalaryError::validation(format!("invalid period {month}/{year}")))?;

        Ok(Self {
            month,
            year,
            first_day,
            last_day,
        })
    }

    /// January through December of `year`, in order.
    pub fn months_of(year: i32) -> Result<Vec<PayPeriod>, SalaryError> {
        (1..=12).map(|month| PayPeriod::new(month, year)).collect()
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive_calendar_month() {
        let march = PayPeriod::new(3, 2026).unwrap();
        assert_eq!(march.first_day(), NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(march.last_day(), NaiveDate::from_ymd_opt(2026, 3, 31).unwrap());
        assert!(march.contains(NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()));
        assert!(!march.contains(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()));
    }

    #[test]
    fn february_follows_leap_years() {
        let leap = PayPeriod::new(2, 2028).unwrap();
        assert_eq!(leap.last_day(), NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());

        let common = PayPeriod::new(2, 2026).unwrap();
        assert_eq!(common.last_day(), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
    }

    #[test]
    fn december_ends_on_new_years_eve() {
        let december = PayPeriod::new(12, 2026).unwrap();
        assert_eq!(december.last_day(), NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
    }

    #[test]
    fn rejects_out_of_range_month_and_year() {
        assert!(matches!(PayPeriod::new(0, 2026), Err(SalaryError::Validation(_))));
        assert!(matches!(PayPeriod::new(13, 2026), Err(SalaryError::Validation(_))));
        assert!(matches!(PayPeriod::new(1, 26), Err(SalaryError::Validation(_))));
        assert!(matches!(PayPeriod::new(1, 10000), Err(SalaryError::Validation(_))));
    }

    #[test]
    fn months_of_year_are_ordered() {
        let months = PayPeriod::months_of(2026).unwrap();
        assert_eq!(months.len(), 12);
        assert!(months.iter().enumerate().all(|(i, p)| p.month() == i as u32 + 1));
    }

    #[test]
    fn year_bounds_cover_whole_year() {
        let (from, to) = year_bounds(2026).unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(to, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
    }

    #[test]
    fn filter_bounds_handle_partial_filters() {
        let day = |m, d| NaiveDate::from_ymd_opt(2026, m, d);
        assert_eq!(filter_bounds(None, None).unwrap(), (None, None));
        assert_eq!(filter_bounds(Some(2), Some(2026)).unwrap(), (day(2, 1), day(2, 28)));
        assert_eq!(filter_bounds(None, Some(2026)).unwrap(), (day(1, 1), day(12, 31)));
        assert!(matches!(filter_bounds(Some(2), None), Err(SalaryError::Validation(_))));
    }
}
