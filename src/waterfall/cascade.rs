//! Senior-to-junior cascade shared by interest and bad-debt allocation.
//!
//! Each level retains a utilization-weighted share of what reaches it
//! (optionally capped by its capacity) and passes the rest to the next,
//! more junior, level. The most junior level retains everything it can.

use log::trace;
use rust_decimal::Decimal;

/// Input for one tranche of a cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeLevel {
    /// Amount originating at this tranche.
    pub local: Decimal,
    /// Supply utilization of the tranche, `None` when undefined.
    pub utilization: Option<Decimal>,
    /// Upper bound on what the tranche can retain.
    pub capacity: Option<Decimal>,
}

/// What happened at one tranche of a cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeStep {
    pub cascaded_in: Decimal,
    pub local: Decimal,
    /// Effective utilization applied at this level.
    pub utilization: Decimal,
    pub retained: Decimal,
    pub cascaded_out: Decimal,
}

impl CascadeStep {
    /// Everything that reached this level.
    pub fn total(&self) -> Decimal {
        self.cascaded_in.saturating_add(self.local)
    }
}

/// Utilization a cascade applies at `index` of a sequence of `len` tranches.
///
/// The most junior tranche keeps everything that reaches it; an undefined
/// utilization elsewhere also counts as full retention.
pub fn effective_utilization(index: usize, len: usize, utilization: Option<Decimal>) -> Decimal {
    if index + 1 == len {
        Decimal::ONE
    } else {
        utilization.unwrap_or(Decimal::ONE)
    }
}

/// Run a cascade from the most senior level (index 0) to the most junior.
///
/// `cascaded_out` is always `total - retained`, so a binding capacity pushes
/// the excess downstream and `Σ retained + last.cascaded_out == Σ local`.
/// Arithmetic saturates at the `Decimal` range; the identity only holds
/// while no amount is clamped.
pub fn run_cascade(levels: &[CascadeLevel]) -> Vec<CascadeStep> {
    let len = levels.len();
    let mut steps = Vec::with_capacity(len);
    let mut carried = Decimal::ZERO;

    for (i, level) in levels.iter().enumerate() {
        let total = carried.saturating_add(level.local);
        let utilization = effective_utilization(i, len, level.utilization);
        let share = total.saturating_mul(utilization);
        let retained = match level.capacity {
            Some(capacity) => share.min(capacity),
            None => share,
        };
        let cascaded_out = total.saturating_sub(retained);

        trace!(
            "cascade level {}: in={} local={} util={} retained={} out={}",
            i,
            carried,
            level.local,
            utilization,
            retained,
            cascaded_out
        );

        steps.push(CascadeStep {
            cascaded_in: carried,
            local: level.local,
            utilization,
            retained,
            cascaded_out,
        });
        carried = cascaded_out;
    }

    steps
}
