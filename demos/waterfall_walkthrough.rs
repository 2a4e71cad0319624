//! Walk through the waterfall on the five-tranche reference market.
//!
//! Shows junior aggregates, the free-supply bottleneck at tranche 1,
//! realized supply rates, a month of interest flow and the loan mix.

use rust_decimal_macros::dec;
use tranche_waterfall::prelude::*;

fn main() {
    println!("╔═══════════════════════════════════════════════╗");
    println!("║  tranche-waterfall: Five-Tranche Walkthrough  ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    let market = vec![
        TrancheInput::new(0, dec!(75)).with_supply(dec!(200)).with_borrow(dec!(100)).with_borrow_rate(dec!(0.03)),
        TrancheInput::new(1, dec!(80)).with_supply(dec!(200)).with_borrow(dec!(250)).with_borrow_rate(dec!(0.04)),
        TrancheInput::new(2, dec!(85)).with_supply(dec!(200)).with_borrow(dec!(200)).with_borrow_rate(dec!(0.05)),
        TrancheInput::new(3, dec!(90)).with_supply(dec!(200)).with_borrow(dec!(150)).with_borrow_rate(dec!(0.07)),
        TrancheInput::new(4, dec!(95)).with_supply(dec!(200)).with_borrow(dec!(100)).with_borrow_rate(dec!(0.10)),
    ];

    // --- Step 1: Derived state ---
    println!("━━━ Step 1: Derived State ━━━\n");
    let data = WaterfallEngine::compute_all_tranches(&market, true);
    println!("{}", TrancheTable(&data));

    for (i, t) in data.iter().enumerate() {
        if t.is_constrained() {
            println!(
                "Tranche {} could reach {} of junior liquidity but only sees {}",
                i, t.jr_net_supply, t.free_supply
            );
        }
    }
    println!();

    // --- Step 2: Interest flow ---
    println!("━━━ Step 2: One Month of Interest ━━━\n");
    let interest = WaterfallEngine::simulate_interest_accrual(&data, TimePeriod::OneMonth);
    println!("{}", interest);

    // --- Step 3: Who funds whom ---
    println!("━━━ Step 3: Dynamic Loan Mix ━━━\n");
    let matrix = compute_funding_matrix(&market, true);
    println!("{}", matrix);
}
