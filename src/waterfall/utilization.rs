use crate::core::ratio::checked_ratio;
use crate::core::tranche::TrancheInput;
use rust_decimal::Decimal;

/// Supply available to a tranche before its own borrowing:
/// `jr_net_supply[i] + borrow[i]`.
pub fn available_supply(jr_net_supply: &[Decimal], tranches: &[TrancheInput]) -> Vec<Decimal> {
    jr_net_supply
        .iter()
        .zip(tranches)
        .map(|(net, t)| net.saturating_add(t.borrow_assets))
        .collect()
}

/// Direct lenders' share of what is deployed at or below each tranche:
/// `supply_assets[i] / available_supply[i]`.
///
/// Pending interest is not part of the numerator; it already reaches the
/// denominator through junior supply when it is included there.
pub fn supply_utilization(
    tranches: &[TrancheInput],
    available_supply: &[Decimal],
) -> Vec<Option<Decimal>> {
    tranches
        .iter()
        .zip(available_supply)
        .map(|(t, available)| checked_ratio(t.supply_assets, *available))
        .collect()
}

/// Fraction of junior supply locked up by borrowing or by senior
/// bottlenecks: `(jr_supply[i] - free_supply[i]) / jr_supply[i]`.
pub fn borrow_utilization(jr_supply: &[Decimal], free_supply: &[Decimal]) -> Vec<Option<Decimal>> {
    jr_supply
        .iter()
        .zip(free_supply)
        .map(|(supply, free)| checked_ratio(supply.saturating_sub(*free), *supply))
        .collect()
}
