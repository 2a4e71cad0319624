use crate::core::tranche::TrancheInput;
use log::warn;
use rust_decimal::Decimal;

/// Junior supply: this tranche's supply plus that of every more junior tranche.
///
/// `jr_supply[i] = Σ_{j=i..n-1} supply[j]`, with pending interest folded in
/// when `include_pending_interest` is set.
pub fn jr_supply(tranches: &[TrancheInput], include_pending_interest: bool) -> Vec<Decimal> {
    junior_cumulative(tranches, |t| t.supply(include_pending_interest))
}

/// Junior borrow: `jr_borrow[i] = Σ_{j=i..n-1} borrow[j]`.
pub fn jr_borrow(tranches: &[TrancheInput]) -> Vec<Decimal> {
    junior_cumulative(tranches, |t| t.borrow_assets)
}

/// Junior net supply, floored at zero.
pub fn jr_net_supply(jr_supply: &[Decimal], jr_borrow: &[Decimal]) -> Vec<Decimal> {
    jr_supply
        .iter()
        .zip(jr_borrow)
        .map(|(supply, borrow)| supply.saturating_sub(*borrow).max(Decimal::ZERO))
        .collect()
}

/// Single right-to-left running sum. Clamps at the `Decimal` range instead of
/// overflowing.
fn junior_cumulative<F>(tranches: &[TrancheInput], value: F) -> Vec<Decimal>
where
    F: Fn(&TrancheInput) -> Decimal,
{
    let mut out = vec![Decimal::ZERO; tranches.len()];
    let mut running = Decimal::ZERO;
    for (i, tranche) in tranches.iter().enumerate().rev() {
        running = match running.checked_add(value(tranche)) {
            Some(sum) => sum,
            None => {
                warn!("junior aggregate overflowed at tranche {}, clamping", i);
                running.saturating_add(value(tranche))
            }
        };
        out[i] = running;
    }
    out
}
