use crate::core::format::{format_number, format_percent};
use crate::core::tranche::TrancheData;
use std::fmt;

/// Tabular report over a computed tranche snapshot.
///
/// ```
/// use tranche_waterfall::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let market = vec![TrancheInput::new(0, dec!(75)).with_supply(dec!(1000))];
/// let data = WaterfallEngine::compute_all_tranches(&market, true);
/// let report = TrancheTable(&data).to_string();
/// assert!(report.contains("1,000.00"));
/// ```
pub struct TrancheTable<'a>(pub &'a [TrancheData]);

impl fmt::Display for TrancheTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Tranche Waterfall ===")?;
        writeln!(
            f,
            "{:>4} {:>7} {:>14} {:>14} {:>14} {:>14} {:>9} {:>9} {:>9}  {}",
            "#", "LLTV", "Supply", "Borrow", "Jr Net", "Free", "Sup Util", "Bor Util", "Rate", "Binding"
        )?;
        for (i, t) in self.0.iter().enumerate() {
            writeln!(
                f,
                "{:>4} {:>7} {:>14} {:>14} {:>14} {:>14} {:>9} {:>9} {:>9}  {}",
                i,
                format!("{}%", t.lltv()),
                format_number(Some(t.supply_assets()), 2),
                format_number(Some(t.borrow_assets()), 2),
                format_number(Some(t.jr_net_supply), 2),
                format_number(Some(t.free_supply), 2),
                format_percent(t.supply_utilization, 1),
                format_percent(t.borrow_utilization, 1),
                format_percent(t.supply_rate, 2),
                if t.is_binding_constraint { "yes" } else { "" }
            )?;
        }
        Ok(())
    }
}
