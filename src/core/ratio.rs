use rust_decimal::Decimal;

/// Sum that clamps at `Decimal::MAX`/`Decimal::MIN` instead of panicking.
pub fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

/// Divide `numerator` by `denominator`, yielding `None` when the ratio is
/// not computable.
///
/// A zero denominator is the only expected source of `None`; an overflowing
/// quotient is treated the same way rather than panicking.
pub fn checked_ratio(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        return None;
    }
    numerator.checked_div(denominator)
}
