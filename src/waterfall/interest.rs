use crate::core::ratio::checked_ratio;
use crate::core::tranche::TrancheInput;
use crate::waterfall::cascade::{run_cascade, CascadeLevel, CascadeStep};
use rust_decimal::Decimal;

/// Cascade one year of locally generated interest (`borrow * borrow_rate`)
/// from senior to junior, weighted by supply utilization.
///
/// Each tranche's lenders keep the share of the pooled interest they funded;
/// the remainder, funded by more junior capital, moves one level down.
pub fn allocate_interest(
    tranches: &[TrancheInput],
    supply_utilization: &[Option<Decimal>],
) -> Vec<CascadeStep> {
    allocate_generated(
        &tranches.iter().map(TrancheInput::annual_interest).collect::<Vec<_>>(),
        supply_utilization,
    )
}

/// Cascade arbitrary per-tranche interest amounts.
pub fn allocate_generated(
    generated: &[Decimal],
    supply_utilization: &[Option<Decimal>],
) -> Vec<CascadeStep> {
    let levels: Vec<CascadeLevel> = generated
        .iter()
        .zip(supply_utilization)
        .map(|(local, utilization)| CascadeLevel {
            local: *local,
            utilization: *utilization,
            capacity: None,
        })
        .collect();
    run_cascade(&levels)
}

/// Realized lender yield per tranche:
/// `allocated[i] / (supply_assets[i] + pending_interest[i])`.
pub fn supply_rates(
    tranches: &[TrancheInput],
    supply_utilization: &[Option<Decimal>],
) -> Vec<Option<Decimal>> {
    allocate_interest(tranches, supply_utilization)
        .iter()
        .zip(tranches)
        .map(|(step, t)| checked_ratio(step.retained, t.supply(true)))
        .collect()
}
