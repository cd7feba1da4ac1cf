use rust_decimal::Decimal;

use crate::constants::MAX_MONEY_AMOUNT;
use crate::errors::ValidationError;

/// Rejects amounts whose magnitude exceeds [`MAX_MONEY_AMOUNT`].
pub fn ensure_within_limit(field: &str, amount: Decimal) -> Result<(), ValidationError> {
    if amount.abs() > MAX_MONEY_AMOUNT {
        return Err(ValidationError::InvalidInput(format!(
            "{field} cannot exceed {MAX_MONEY_AMOUNT} in magnitude"
        )));
    }
    Ok(())
}

/// Adds two stored amounts, failing instead of overflowing.
pub fn checked_money_add(a: Decimal, b: Decimal) -> Result<Decimal, ValidationError> {
    a.checked_add(b).ok_or_else(out_of_range)
}

/// Subtracts two stored amounts, failing instead of overflowing.
pub fn checked_money_sub(a: Decimal, b: Decimal) -> Result<Decimal, ValidationError> {
    a.checked_sub(b).ok_or_else(out_of_range)
}

/// Sums amounts for display, clamping at the representable range.
pub fn saturating_total<I: IntoIterator<Item = Decimal>>(amounts: I) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount))
}

/// `part / whole * 100` rounded to `dp` places.
///
/// Zero when `whole` is zero; clamped to `Decimal::MAX` when the ratio is not
/// representable.
pub fn percentage(part: Decimal, whole: Decimal, dp: u32) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .map(|ratio| ratio.saturating_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
        .round_dp(dp)
}

fn out_of_range() -> ValidationError {
    ValidationError::InvalidInput("Amount is outside the supported range".to_string())
}
