use rust_decimal::Decimal;

use crate::error::SalaryError;

/// Money columns are `DECIMAL(15, 2)`.
pub const MONEY_SCALE: u32 = 2;

/// Percentages are stored as `DECIMAL(7, 6)` fractions.
pub const PERCENTAGE_SCALE: u32 = 6;

/// Largest value a `DECIMAL(15, 2)` column holds: 9,999,999,999,999.99
pub fn max_money() -> Decimal {
    Decimal::new(999_999_999_999_999, MONEY_SCALE)
}

/// Accepts a non-negative amount that the money columns store exactly.
pub fn validate_money(field: &str, value: Decimal) -> Result<Decimal, SalaryError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(SalaryError::validation(format!("{field} must not be negative")));
    }
    if value.normalize().scale() > MONEY_SCALE {
        return Err(SalaryError::validation(format!(
            "{field} must have at most {MONEY_SCALE} decimal places"
        )));
    }
    if value > max_money() {
        return Err(SalaryError::validation(format!(
            "{field} must not exceed {}",
            max_money()
        )));
    }
    Ok(value)
}
