//! Bad-debt absorption across the tranche stack.
//!
//! Losses cascade senior to junior with the same utilization weights as
//! interest, but a tranche can never absorb more than its own supply; the
//! excess moves on to the next junior tranche.

use crate::core::format::{format_number, format_percent};
use crate::core::ratio::saturating_sum;
use crate::core::tranche::TrancheData;
use crate::waterfall::cascade::{effective_utilization, run_cascade, CascadeLevel};
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A realized loss occurring at one tranche.
///
/// `tranche_index` is signed so that any integer a caller supplies is
/// accepted; indices outside the market are ignored by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadDebtEvent {
    pub tranche_index: i64,
    pub amount: Decimal,
}

impl BadDebtEvent {
    pub fn new(tranche_index: i64, amount: Decimal) -> Self {
        Self {
            tranche_index,
            amount,
        }
    }
}

/// The two accepted shapes of a bad-debt simulation request.
///
/// Both normalize to an event list before the cascade runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BadDebtRequest {
    Events(Vec<BadDebtEvent>),
    /// Single `(tranche_index, amount)` pair, kept for older callers.
    LegacySingle { tranche_index: i64, amount: Decimal },
}

impl BadDebtRequest {
    pub fn into_events(self) -> Vec<BadDebtEvent> {
        match self {
            BadDebtRequest::Events(events) => events,
            BadDebtRequest::LegacySingle {
                tranche_index,
                amount,
            } => vec![BadDebtEvent::new(tranche_index, amount)],
        }
    }
}

impl From<Vec<BadDebtEvent>> for BadDebtRequest {
    fn from(events: Vec<BadDebtEvent>) -> Self {
        BadDebtRequest::Events(events)
    }
}

impl From<&[BadDebtEvent]> for BadDebtRequest {
    fn from(events: &[BadDebtEvent]) -> Self {
        BadDebtRequest::Events(events.to_vec())
    }
}

impl From<BadDebtEvent> for BadDebtRequest {
    fn from(event: BadDebtEvent) -> Self {
        BadDebtRequest::Events(vec![event])
    }
}

impl From<(i64, Decimal)> for BadDebtRequest {
    fn from((tranche_index, amount): (i64, Decimal)) -> Self {
        BadDebtRequest::LegacySingle {
            tranche_index,
            amount,
        }
    }
}

/// Loss absorption at one tranche. `index` is a position in the
/// [`TrancheData`] snapshot passed to [`simulate_bad_debt`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadDebtTrancheResult {
    pub index: usize,
    pub lltv: Decimal,
    pub original_supply: Decimal,
    /// Utilization actually applied (1 for the most junior tranche).
    pub supply_utilization: Decimal,
    pub bad_debt_cascaded_in: Decimal,
    pub bad_debt_local: Decimal,
    pub bad_debt_absorbed: Decimal,
    pub bad_debt_cascaded_out: Decimal,
    pub remaining_supply: Decimal,
    pub wiped_out: bool,
}

/// Result of [`simulate_bad_debt`].
///
/// Computed from, and only meaningful together with, the [`TrancheData`]
/// snapshot it was given: `tranches[i]` describes `snapshot[i]`. The
/// snapshot itself is not copied into the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadDebtSimulationResult {
    /// The normalized request.
    pub bad_debt_events: Vec<BadDebtEvent>,
    /// Sum of all events that target an existing tranche.
    pub total_bad_debt: Decimal,
    pub tranches: Vec<BadDebtTrancheResult>,
    pub total_absorbed: Decimal,
    /// Loss left over once even the most junior supply is exhausted.
    pub unabsorbed_bad_debt: Decimal,
}

impl BadDebtSimulationResult {
    pub fn wiped_out(&self) -> impl Iterator<Item = &BadDebtTrancheResult> {
        self.tranches.iter().filter(|t| t.wiped_out)
    }
}

impl std::fmt::Display for BadDebtSimulationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Bad Debt Simulation ===")?;
        writeln!(f, "Total Bad Debt: {}", format_number(Some(self.total_bad_debt), 2))?;
        writeln!(f, "Absorbed:       {}", format_number(Some(self.total_absorbed), 2))?;
        writeln!(f, "Unabsorbed:     {}", format_number(Some(self.unabsorbed_bad_debt), 2))?;

        writeln!(f, "\nEvents:")?;
        for event in &self.bad_debt_events {
            writeln!(
                f,
                "  {} at tranche {}",
                format_number(Some(event.amount), 2),
                event.tranche_index
            )?;
        }

        writeln!(f, "\nPer-Tranche Absorption:")?;
        for t in &self.tranches {
            writeln!(
                f,
                "  [{}] {}%  util {:>7}  in {:>12}  local {:>12}  absorbed {:>12}  out {:>12}  remaining {:>12}{}",
                t.index,
                t.lltv,
                format_percent(Some(t.supply_utilization), 1),
                format_number(Some(t.bad_debt_cascaded_in), 2),
                format_number(Some(t.bad_debt_local), 2),
                format_number(Some(t.bad_debt_absorbed), 2),
                format_number(Some(t.bad_debt_cascaded_out), 2),
                format_number(Some(t.remaining_supply), 2),
                if t.wiped_out { "  WIPED OUT" } else { "" }
            )?;
        }
        Ok(())
    }
}

/// Per-tranche sum of the events; negative indices and indices past the end
/// are dropped.
fn local_bad_debt(events: &[BadDebtEvent], len: usize) -> Vec<Decimal> {
    let mut local = vec![Decimal::ZERO; len];
    for event in events {
        let slot = usize::try_from(event.tranche_index)
            .ok()
            .and_then(|index| local.get_mut(index));
        match slot {
            Some(slot) => *slot = slot.saturating_add(event.amount),
            None => warn!(
                "ignoring bad debt of {} at tranche {}: only {} tranches",
                event.amount, event.tranche_index, len
            ),
        }
    }
    local
}

/// Simulate how bad debt is absorbed by lender capital.
///
/// Accepts either an event list or the legacy `(tranche_index, amount)`
/// pair; both produce identical results for the same loss.
///
/// # Examples
///
/// ```
/// use tranche_waterfall::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let market = vec![
///     TrancheInput::new(0, dec!(75)).with_supply(dec!(100)).with_borrow(dec!(100)),
///     TrancheInput::new(1, dec!(95)).with_supply(dec!(100)),
/// ];
/// let data = WaterfallEngine::compute_all_tranches(&market, false);
///
/// let legacy = simulate_bad_debt(&data, (0, dec!(100)));
/// let events = simulate_bad_debt(&data, vec![BadDebtEvent::new(0, dec!(100))]);
/// assert_eq!(legacy, events);
/// assert_eq!(legacy.tranches[0].bad_debt_absorbed, dec!(50));
/// assert_eq!(legacy.tranches[1].bad_debt_absorbed, dec!(50));
/// ```
pub fn simulate_bad_debt(
    tranches: &[TrancheData],
    request: impl Into<BadDebtRequest>,
) -> BadDebtSimulationResult {
    let events = request.into().into_events();
    let len = tranches.len();
    let local = local_bad_debt(&events, len);

    let levels: Vec<CascadeLevel> = tranches
        .iter()
        .zip(&local)
        .map(|(t, amount)| CascadeLevel {
            local: *amount,
            utilization: t.supply_utilization,
            capacity: Some(t.supply_assets()),
        })
        .collect();
    let steps = run_cascade(&levels);

    let results: Vec<BadDebtTrancheResult> = tranches
        .iter()
        .zip(&steps)
        .enumerate()
        .map(|(i, (t, step))| {
            let original_supply = t.supply_assets();
            let remaining_supply = original_supply.saturating_sub(step.retained);
            BadDebtTrancheResult {
                index: i,
                lltv: t.lltv(),
                original_supply,
                supply_utilization: effective_utilization(i, len, t.supply_utilization),
                bad_debt_cascaded_in: step.cascaded_in,
                bad_debt_local: step.local,
                bad_debt_absorbed: step.retained,
                bad_debt_cascaded_out: step.cascaded_out,
                remaining_supply,
                wiped_out: remaining_supply.is_zero() && step.retained > Decimal::ZERO,
            }
        })
        .collect();

    let total_bad_debt = saturating_sum(local.iter().copied());
    let total_absorbed = saturating_sum(results.iter().map(|r| r.bad_debt_absorbed));
    let unabsorbed_bad_debt = total_bad_debt.saturating_sub(total_absorbed);

    debug!(
        "bad debt {}: absorbed {}, unabsorbed {}",
        total_bad_debt, total_absorbed, unabsorbed_bad_debt
    );

    BadDebtSimulationResult {
        bad_debt_events: events,
        total_bad_debt,
        tranches: results,
        total_absorbed,
        unabsorbed_bad_debt,
    }
}
