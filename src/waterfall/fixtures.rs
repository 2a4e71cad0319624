use crate::core::tranche::TrancheInput;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub(crate) fn tranche(
    id: u32,
    lltv: Decimal,
    supply: Decimal,
    borrow: Decimal,
    pending: Decimal,
    rate: Decimal,
) -> TrancheInput {
    TrancheInput::new(id, lltv)
        .with_supply(supply)
        .with_borrow(borrow)
        .with_pending_interest(pending)
        .with_borrow_rate(rate)
}

/// Five tranches of 200 supply each, from the protocol math walkthrough.
pub(crate) fn doc_example() -> Vec<TrancheInput> {
    vec![
        tranche(0, dec!(75), dec!(200), dec!(100), dec!(0), dec!(0.03)),
        tranche(1, dec!(80), dec!(200), dec!(250), dec!(0), dec!(0.04)),
        tranche(2, dec!(85), dec!(200), dec!(200), dec!(0), dec!(0.05)),
        tranche(3, dec!(90), dec!(200), dec!(150), dec!(0), dec!(0.07)),
        tranche(4, dec!(95), dec!(200), dec!(100), dec!(0), dec!(0.10)),
    ]
}

/// Five tranches carrying pending interest.
pub(crate) fn pending_example() -> Vec<TrancheInput> {
    vec![
        tranche(0, dec!(75), dec!(1000), dec!(500), dec!(20), dec!(0.03)),
        tranche(1, dec!(80), dec!(1200), dec!(600), dec!(25), dec!(0.04)),
        tranche(2, dec!(85), dec!(1500), dec!(800), dec!(30), dec!(0.05)),
        tranche(3, dec!(90), dec!(1800), dec!(600), dec!(40), dec!(0.07)),
        tranche(4, dec!(95), dec!(2000), dec!(400), dec!(50), dec!(0.10)),
    ]
}

/// Senior tranche lent out at 50% supply utilization over an idle junior.
pub(crate) fn two_tranche_half_utilized() -> Vec<TrancheInput> {
    vec![
        tranche(0, dec!(75), dec!(100), dec!(100), dec!(0), dec!(0.10)),
        tranche(1, dec!(95), dec!(100), dec!(0), dec!(0), dec!(0.10)),
    ]
}
