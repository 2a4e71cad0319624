//! Bad debt absorbed by lender capital, senior to junior.
//!
//! A loss at the senior end is shared by the tranches whose capital is
//! deployed there; a loss too large for the whole market is left over.

use rust_decimal_macros::dec;
use tranche_waterfall::prelude::*;

fn main() {
    println!("╔═════════════════════════════════════════╗");
    println!("║  tranche-waterfall: Bad Debt Cascade    ║");
    println!("╚═════════════════════════════════════════╝\n");

    let market = vec![
        TrancheInput::new(0, dec!(77)).with_supply(dec!(1000)).with_borrow(dec!(800)),
        TrancheInput::new(1, dec!(86)).with_supply(dec!(500)).with_borrow(dec!(400)),
        TrancheInput::new(2, dec!(94)).with_supply(dec!(250)).with_borrow(dec!(150)),
    ];
    let data = WaterfallEngine::compute_all_tranches(&market, true);
    println!("{}", TrancheTable(&data));

    // --- Scenario 1: A single loss, legacy form ---
    println!("━━━ Scenario 1: 300 Lost at the Senior Tranche ━━━\n");
    let result = WaterfallEngine::simulate_bad_debt(&data, (0, dec!(300)));
    println!("{}", result);

    // --- Scenario 2: Several losses at once ---
    println!("━━━ Scenario 2: Losses Across Tranches ━━━\n");
    let result = WaterfallEngine::simulate_bad_debt(
        &data,
        vec![
            BadDebtEvent::new(0, dec!(400)),
            BadDebtEvent::new(1, dec!(300)),
            BadDebtEvent::new(2, dec!(100)),
        ],
    );
    println!("{}", result);

    // --- Scenario 3: More than the market can absorb ---
    println!("━━━ Scenario 3: Exhausting Every Tranche ━━━\n");
    let result = WaterfallEngine::simulate_bad_debt(&data, vec![BadDebtEvent::new(1, dec!(5000))]);
    println!("{}", result);
    let wiped: Vec<usize> = result.wiped_out().map(|t| t.index).collect();
    println!("Wiped out tranches: {:?}", wiped);
}
