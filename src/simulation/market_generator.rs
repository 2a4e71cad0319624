//! Random tranche markets for stress testing the waterfall.

use crate::core::tranche::{TrancheId, TrancheInput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

/// Configuration for generating a random tranche market.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// Number of tranches.
    pub tranche_count: usize,
    /// LLTV of the most senior tranche, in percent.
    pub first_lltv: Decimal,
    /// LLTV increment from one tranche to the next.
    pub lltv_step: Decimal,
    /// Supply range per tranche.
    pub min_supply: f64,
    pub max_supply: f64,
    /// Borrow as a fraction of the tranche's own supply. Values above 1
    /// let a tranche borrow junior liquidity.
    pub max_borrow_ratio: f64,
    /// Pending interest as a fraction of supply.
    pub max_pending_ratio: f64,
    /// Borrow rate of the most senior tranche; rates rise towards the
    /// junior end by up to `rate_step` per tranche.
    pub base_rate: f64,
    pub rate_step: f64,
    /// Fixed seed for reproducible markets.
    pub seed: Option<u64>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            tranche_count: 5,
            first_lltv: Decimal::from(75),
            lltv_step: Decimal::from(5),
            min_supply: 100.0,
            max_supply: 5_000.0,
            max_borrow_ratio: 1.5,
            max_pending_ratio: 0.02,
            base_rate: 0.01,
            rate_step: 0.03,
            seed: None,
        }
    }
}

/// Generate a random market, ordered senior to junior.
pub fn generate_random_market(config: &MarketConfig) -> Vec<TrancheInput> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut rate = config.base_rate;
    let mut lltv = config.first_lltv;
    let mut market = Vec::with_capacity(config.tranche_count);

    for i in 0..config.tranche_count {
        let supply = sample(&mut rng, config.min_supply, config.max_supply);
        let borrow = supply * sample(&mut rng, 0.0, config.max_borrow_ratio);
        let pending = supply * sample(&mut rng, 0.0, config.max_pending_ratio);

        market.push(
            TrancheInput::new(i as TrancheId, lltv)
                .with_supply(to_decimal(supply, 2))
                .with_borrow(to_decimal(borrow, 2))
                .with_pending_interest(to_decimal(pending, 2))
                .with_borrow_rate(to_decimal(rate, 4)),
        );

        lltv += config.lltv_step;
        rate += sample(&mut rng, 0.0, config.rate_step);
    }

    market
}

fn sample(rng: &mut StdRng, low: f64, high: f64) -> f64 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}

fn to_decimal(value: f64, dp: u32) -> Decimal {
    Decimal::from_f64_retain(value)
        .unwrap_or(Decimal::ZERO)
        .round_dp(dp)
}
