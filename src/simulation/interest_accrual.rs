//! Interest accrual over an explicit time horizon.
//!
//! Runs the same senior-to-junior cascade as the supply-rate calculation,
//! but on absolute interest amounts for the chosen period.

use crate::core::format::{format_number, format_percent};
use crate::core::period::TimePeriod;
use crate::core::ratio::{checked_ratio, saturating_sum};
use crate::core::tranche::TrancheData;
use crate::waterfall::interest::allocate_generated;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Interest flow at one tranche. `index` refers to the position in the
/// [`TrancheData`] snapshot the simulation ran on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestAccrualResult {
    pub index: usize,
    pub lltv: Decimal,
    /// Paid by this tranche's borrowers over the period.
    pub interest_generated: Decimal,
    /// Kept by this tranche's lenders.
    pub interest_received: Decimal,
    /// Passed on to the next junior tranche.
    pub interest_cascaded: Decimal,
    /// `interest_received - interest_generated`.
    pub net_position: Decimal,
    /// Annualized lender yield, `None` when the tranche has no supply.
    pub implied_supply_rate: Option<Decimal>,
}

/// Result of [`simulate_interest_accrual`].
///
/// Refers to the [`TrancheData`] snapshot the simulation ran on:
/// `tranches[i]` describes `snapshot[i]`. The snapshot is not copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestSimulationResult {
    pub time_period: TimePeriod,
    pub time_in_years: Decimal,
    pub tranches: Vec<InterestAccrualResult>,
    pub total_interest_generated: Decimal,
    pub total_interest_received: Decimal,
}

impl InterestSimulationResult {
    /// Interest lost or created by the cascade; zero up to rounding.
    pub fn conservation_gap(&self) -> Decimal {
        self.total_interest_generated
            .saturating_sub(self.total_interest_received)
    }
}

impl std::fmt::Display for InterestSimulationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Interest Accrual ({}) ===", self.time_period.label())?;
        writeln!(f, "Generated: {}", format_number(Some(self.total_interest_generated), 2))?;
        writeln!(f, "Received:  {}", format_number(Some(self.total_interest_received), 2))?;

        writeln!(f, "\nPer-Tranche Flow:")?;
        for t in &self.tranches {
            writeln!(
                f,
                "  [{}] {}%  generated {:>12}  received {:>12}  cascaded {:>12}  net {:>12}  yield {:>8}",
                t.index,
                t.lltv,
                format_number(Some(t.interest_generated), 2),
                format_number(Some(t.interest_received), 2),
                format_number(Some(t.interest_cascaded), 2),
                format_number(Some(t.net_position), 2),
                format_percent(t.implied_supply_rate, 2)
            )?;
        }
        Ok(())
    }
}

/// Simulate interest accrual over `period` for a computed tranche snapshot.
///
/// Each tranche generates `borrow * borrow_rate * years`; the cascade then
/// distributes the pooled amount by supply utilization, the most junior
/// tranche keeping whatever reaches it.
pub fn simulate_interest_accrual(
    tranches: &[TrancheData],
    period: TimePeriod,
) -> InterestSimulationResult {
    let years = period.years();
    let generated: Vec<Decimal> = tranches
        .iter()
        .map(|t| t.borrow_assets().saturating_mul(t.borrow_rate()).saturating_mul(years))
        .collect();
    let utilization: Vec<Option<Decimal>> =
        tranches.iter().map(|t| t.supply_utilization).collect();

    let steps = allocate_generated(&generated, &utilization);

    let results: Vec<InterestAccrualResult> = tranches
        .iter()
        .zip(&steps)
        .enumerate()
        .map(|(i, (t, step))| InterestAccrualResult {
            index: i,
            lltv: t.lltv(),
            interest_generated: step.local,
            interest_received: step.retained,
            interest_cascaded: step.cascaded_out,
            net_position: step.retained.saturating_sub(step.local),
            implied_supply_rate: checked_ratio(step.retained, t.supply_assets())
                .and_then(|per_period| checked_ratio(per_period, years)),
        })
        .collect();

    let total_interest_generated = saturating_sum(generated.iter().copied());
    let total_interest_received = saturating_sum(results.iter().map(|r| r.interest_received));

    debug!(
        "interest over {}: generated {}, received {}",
        period, total_interest_generated, total_interest_received
    );

    InterestSimulationResult {
        time_period: period,
        time_in_years: years,
        tranches: results,
        total_interest_generated,
        total_interest_received,
    }
}
