use crate::core::period::TimePeriod;
use crate::core::tranche::{TrancheData, TrancheInput};
use crate::simulation::bad_debt::{simulate_bad_debt, BadDebtRequest, BadDebtSimulationResult};
use crate::simulation::interest_accrual::{simulate_interest_accrual, InterestSimulationResult};
use crate::waterfall::aggregate::{jr_borrow, jr_net_supply, jr_supply};
use crate::waterfall::free_supply::resolve_free_supply;
use crate::waterfall::interest::supply_rates;
use crate::waterfall::utilization::{available_supply, borrow_utilization, supply_utilization};
use log::debug;

/// The waterfall accounting engine.
///
/// Stateless: every call recomputes the full pipeline from its inputs, so
/// identical inputs always give identical outputs. Memoization, if wanted,
/// belongs to the caller.
pub struct WaterfallEngine;

impl WaterfallEngine {
    /// Compute every derived value for an ordered tranche sequence
    /// (index 0 = most senior).
    ///
    /// # Algorithm
    ///
    /// 1. Junior supply and borrow as suffix sums (junior to senior).
    /// 2. Junior net supply, floored at zero.
    /// 3. Free supply as a senior-to-junior running minimum, with the
    ///    binding tranches it uncovers.
    /// 4. Available supply and both utilization ratios.
    /// 5. Supply rates from the senior-to-junior interest cascade.
    ///
    /// # Examples
    ///
    /// ```
    /// use tranche_waterfall::prelude::*;
    /// use rust_decimal_macros::dec;
    ///
    /// let market = vec![
    ///     TrancheInput::new(0, dec!(75)).with_supply(dec!(100)).with_borrow(dec!(100))
    ///         .with_borrow_rate(dec!(0.10)),
    ///     TrancheInput::new(1, dec!(95)).with_supply(dec!(100)),
    /// ];
    /// let data = WaterfallEngine::compute_all_tranches(&market, true);
    ///
    /// assert_eq!(data[0].supply_utilization, Some(dec!(0.5)));
    /// assert_eq!(data[0].supply_rate, Some(dec!(0.05)));
    /// assert_eq!(data[1].supply_rate, Some(dec!(0.05)));
    /// ```
    pub fn compute_all_tranches(
        tranches: &[TrancheInput],
        include_pending_interest: bool,
    ) -> Vec<TrancheData> {
        let jr_supply = jr_supply(tranches, include_pending_interest);
        let jr_borrow = jr_borrow(tranches);
        let jr_net_supply = jr_net_supply(&jr_supply, &jr_borrow);
        let free = resolve_free_supply(&jr_net_supply);
        let available_supply = available_supply(&jr_net_supply, tranches);
        let supply_utilization = supply_utilization(tranches, &available_supply);
        let borrow_utilization = borrow_utilization(&jr_supply, &free.free_supply);
        let supply_rates = supply_rates(tranches, &supply_utilization);

        debug!(
            "computed {} tranches (pending interest {}), binding: {:?}",
            tranches.len(),
            if include_pending_interest { "included" } else { "excluded" },
            free.binding
        );

        tranches
            .iter()
            .enumerate()
            .map(|(i, input)| TrancheData {
                input: input.clone(),
                jr_supply: jr_supply[i],
                jr_borrow: jr_borrow[i],
                jr_net_supply: jr_net_supply[i],
                free_supply: free.free_supply[i],
                available_supply: available_supply[i],
                is_binding_constraint: free.is_binding(i),
                supply_utilization: supply_utilization[i],
                borrow_utilization: borrow_utilization[i],
                supply_rate: supply_rates[i],
            })
            .collect()
    }

    /// Simulate interest accrual over `period`. See
    /// [`simulate_interest_accrual`].
    pub fn simulate_interest_accrual(
        tranches: &[TrancheData],
        period: TimePeriod,
    ) -> InterestSimulationResult {
        simulate_interest_accrual(tranches, period)
    }

    /// Simulate bad-debt absorption. Accepts an event list or the legacy
    /// `(tranche_index, amount)` pair. See [`simulate_bad_debt`].
    pub fn simulate_bad_debt(
        tranches: &[TrancheData],
        request: impl Into<BadDebtRequest>,
    ) -> BadDebtSimulationResult {
        simulate_bad_debt(tranches, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waterfall::fixtures::{doc_example, pending_example, tranche, two_tranche_half_utilized};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_doc_example_end_to_end() {
        let data = WaterfallEngine::compute_all_tranches(&doc_example(), false);
        assert_eq!(data.len(), 5);

        let free: Vec<_> = data.iter().map(|t| t.free_supply).collect();
        assert_eq!(free, vec![dec!(200), dec!(100), dec!(100), dec!(100), dec!(100)]);

        let binding: Vec<_> = data.iter().map(|t| t.is_binding_constraint).collect();
        assert_eq!(binding, vec![false, true, false, false, false]);

        assert!(data
            .iter()
            .all(|t| t.supply_rate.map_or(false, |r| r > Decimal::ZERO)));
    }

    #[test]
    fn test_preserves_input() {
        let market = pending_example();
        let data = WaterfallEngine::compute_all_tranches(&market, true);
        for (input, derived) in market.iter().zip(&data) {
            assert_eq!(&derived.input, input);
        }
        assert_eq!(data[0].lltv(), dec!(75));
        assert_eq!(data[0].supply_assets(), dec!(1000));
    }

    #[test]
    fn test_two_tranche_cascade() {
        let data = WaterfallEngine::compute_all_tranches(&two_tranche_half_utilized(), false);
        assert_eq!(data[0].supply_utilization, Some(dec!(0.5)));
        assert_eq!(data[1].supply_utilization, Some(Decimal::ONE));
        assert_eq!(data[0].supply_rate, Some(dec!(0.05)));
        assert_eq!(data[1].supply_rate, Some(dec!(0.05)));
    }

    #[test]
    fn test_borrow_exceeds_supply_marks_senior_binding() {
        let market = vec![
            tranche(0, dec!(75), dec!(100), dec!(500), dec!(0), dec!(0.03)),
            tranche(1, dec!(95), dec!(200), dec!(100), dec!(0), dec!(0.10)),
        ];
        let data = WaterfallEngine::compute_all_tranches(&market, true);
        assert_eq!(data[0].jr_net_supply, Decimal::ZERO);
        assert_eq!(data[1].free_supply, Decimal::ZERO);
        assert!(data[0].is_binding_constraint);
        assert!(data[1].is_constrained());
    }

    #[test]
    fn test_scenario_a() {
        let market = vec![
            tranche(0, dec!(75), dec!(200), dec!(100), dec!(0), dec!(0.03)),
            tranche(1, dec!(80), dec!(200), dec!(250), dec!(0), dec!(0.05)),
        ];
        let data = WaterfallEngine::compute_all_tranches(&market, true);
        assert_eq!(data[0].jr_borrow, dec!(350));
        assert_eq!(data[1].jr_borrow, dec!(250));
        assert_eq!(data[0].jr_supply, dec!(400));
        assert_eq!(data[1].jr_supply, dec!(200));
        assert_eq!(data[0].jr_net_supply, dec!(50));
        assert_eq!(data[1].jr_net_supply, Decimal::ZERO);
        assert_eq!(data[0].free_supply, dec!(50));
        assert_eq!(data[1].free_supply, Decimal::ZERO);
        assert!(data.iter().all(|t| !t.is_binding_constraint));
    }

    #[test]
    fn test_negative_supply_tranche() {
        let market = vec![
            tranche(0, dec!(75), dec!(-100), dec!(0), dec!(0), dec!(0)),
            tranche(1, dec!(95), dec!(300), dec!(100), dec!(0), dec!(0.10)),
        ];
        let data = WaterfallEngine::compute_all_tranches(&market, true);

        let jr_supply: Vec<_> = data.iter().map(|t| t.jr_supply).collect();
        assert_eq!(jr_supply, vec![dec!(200), dec!(300)]);
        let jr_net: Vec<_> = data.iter().map(|t| t.jr_net_supply).collect();
        assert_eq!(jr_net, vec![dec!(100), dec!(200)]);
        let free: Vec<_> = data.iter().map(|t| t.free_supply).collect();
        assert_eq!(free, vec![dec!(100), dec!(100)]);
        assert!(data[0].is_binding_constraint);
        assert!(data[1].is_constrained());

        assert_eq!(data[0].supply_utilization, Some(dec!(-1)));
        assert_eq!(data[1].supply_utilization, Some(Decimal::ONE));
        assert_eq!(data[0].supply_rate, Some(Decimal::ZERO));
        assert_eq!(data[1].supply_rate, Some(dec!(10) / dec!(300)));
    }

    #[test]
    fn test_junior_heavy_borrow() {
        let market = vec![
            tranche(0, dec!(75), dec!(100), dec!(50), dec!(0), dec!(0.10)),
            tranche(1, dec!(95), dec!(0), dec!(100), dec!(0), dec!(0)),
        ];
        let data = WaterfallEngine::compute_all_tranches(&market, true);
        let jr_borrow: Vec<_> = data.iter().map(|t| t.jr_borrow).collect();
        assert_eq!(jr_borrow, vec![dec!(150), dec!(100)]);
        assert!(data.iter().all(|t| t.jr_net_supply.is_zero()));
        assert!(data.iter().all(|t| t.free_supply.is_zero()));
        assert!(data.iter().all(|t| !t.is_binding_constraint));

        assert_eq!(data[0].supply_utilization, Some(dec!(2)));
        assert_eq!(data[0].borrow_utilization, Some(Decimal::ONE));
        assert_eq!(data[1].borrow_utilization, None);
        assert_eq!(data[0].supply_rate, Some(dec!(0.1)));
        assert_eq!(data[1].supply_rate, None);
    }

    #[test]
    fn test_huge_supply_saturates() {
        let huge = Decimal::from_i128_with_scale(50_000_000_000_000_000_000_000_000_000, 0);
        let market = vec![
            TrancheInput::new(0, dec!(75)).with_supply(huge),
            TrancheInput::new(1, dec!(95)).with_supply(huge),
        ];
        let data = WaterfallEngine::compute_all_tranches(&market, true);
        assert_eq!(data[0].jr_supply, Decimal::MAX);
        assert_eq!(data[1].jr_supply, huge);
        assert_eq!(data[0].free_supply, Decimal::MAX);
        assert!(data.iter().all(|t| !t.is_binding_constraint));
        assert_eq!(data[1].supply_utilization, Some(Decimal::ONE));

        let interest = WaterfallEngine::simulate_interest_accrual(&data, TimePeriod::OneYear);
        assert_eq!(interest.total_interest_generated, Decimal::ZERO);
        let losses = WaterfallEngine::simulate_bad_debt(&data, (1, huge));
        assert_eq!(losses.tranches[1].bad_debt_absorbed, huge);
    }

    #[test]
    fn test_empty_market() {
        assert!(WaterfallEngine::compute_all_tranches(&[], true).is_empty());
    }

    #[test]
    fn test_zero_market_is_all_undefined() {
        let market = vec![TrancheInput::new(0, dec!(75)), TrancheInput::new(1, dec!(95))];
        let data = WaterfallEngine::compute_all_tranches(&market, true);
        for t in &data {
            assert_eq!(t.supply_utilization, None);
            assert_eq!(t.borrow_utilization, None);
            assert_eq!(t.supply_rate, None);
        }
    }

    #[test]
    fn test_idempotent() {
        let market = pending_example();
        let first = WaterfallEngine::compute_all_tranches(&market, true);
        let second = WaterfallEngine::compute_all_tranches(&market, true);
        assert_eq!(first, second);
    }
}
