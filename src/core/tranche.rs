use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stable identifier of a tranche.
///
/// Used to correlate edits coming from the outside; the waterfall math
/// only ever looks at positions in the ordered sequence.
pub type TrancheId = u32;

/// One risk slice of a tranched lending market, as supplied by the caller.
///
/// Sequences of tranches are ordered by seniority: index 0 is the most
/// senior tranche (lowest LLTV), the last index is the most junior.
///
/// # Examples
///
/// ```
/// use tranche_waterfall::core::tranche::TrancheInput;
/// use rust_decimal_macros::dec;
///
/// let senior = TrancheInput::new(0, dec!(75))
///     .with_supply(dec!(200))
///     .with_borrow(dec!(100))
///     .with_borrow_rate(dec!(0.03));
///
/// assert_eq!(senior.annual_interest(), dec!(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrancheInput {
    pub id: TrancheId,
    /// Loan-to-value threshold, in percent.
    pub lltv: Decimal,
    pub supply_assets: Decimal,
    pub borrow_assets: Decimal,
    /// Interest accrued for this tranche's lenders but not yet distributed.
    #[serde(default)]
    pub pending_interest: Decimal,
    /// Annual borrow rate as a fraction (0.05 = 5%).
    pub borrow_rate: Decimal,
}

impl TrancheInput {
    /// Create an empty tranche at the given LLTV.
    pub fn new(id: TrancheId, lltv: Decimal) -> Self {
        Self {
            id,
            lltv,
            supply_assets: Decimal::ZERO,
            borrow_assets: Decimal::ZERO,
            pending_interest: Decimal::ZERO,
            borrow_rate: Decimal::ZERO,
        }
    }

    pub fn with_supply(mut self, supply_assets: Decimal) -> Self {
        self.supply_assets = supply_assets;
        self
    }

    pub fn with_borrow(mut self, borrow_assets: Decimal) -> Self {
        self.borrow_assets = borrow_assets;
        self
    }

    pub fn with_pending_interest(mut self, pending_interest: Decimal) -> Self {
        self.pending_interest = pending_interest;
        self
    }

    pub fn with_borrow_rate(mut self, borrow_rate: Decimal) -> Self {
        self.borrow_rate = borrow_rate;
        self
    }

    /// Supply balance, optionally including pending interest.
    pub fn supply(&self, include_pending_interest: bool) -> Decimal {
        if include_pending_interest {
            self.supply_assets.saturating_add(self.pending_interest)
        } else {
            self.supply_assets
        }
    }

    /// Interest generated by this tranche's borrowers over one year.
    pub fn annual_interest(&self) -> Decimal {
        self.borrow_assets.saturating_mul(self.borrow_rate)
    }
}

/// Derived per-tranche record produced by the waterfall.
///
/// Extends the originating [`TrancheInput`] (flattened on the wire) with
/// the aggregates, the free-supply resolution and the utilization ratios.
/// Ratios are `None` where their denominator is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrancheData {
    #[serde(flatten)]
    pub input: TrancheInput,
    /// Supply of this tranche and every more junior tranche.
    pub jr_supply: Decimal,
    /// Borrow of this tranche and every more junior tranche.
    pub jr_borrow: Decimal,
    /// `max(0, jr_supply - jr_borrow)`.
    pub jr_net_supply: Decimal,
    /// Junior net supply reachable once senior bottlenecks are applied.
    pub free_supply: Decimal,
    /// Supply available before this tranche's own borrowing.
    pub available_supply: Decimal,
    pub is_binding_constraint: bool,
    pub supply_utilization: Option<Decimal>,
    pub borrow_utilization: Option<Decimal>,
    pub supply_rate: Option<Decimal>,
}

impl TrancheData {
    pub fn id(&self) -> TrancheId {
        self.input.id
    }

    pub fn lltv(&self) -> Decimal {
        self.input.lltv
    }

    pub fn supply_assets(&self) -> Decimal {
        self.input.supply_assets
    }

    pub fn borrow_assets(&self) -> Decimal {
        self.input.borrow_assets
    }

    pub fn borrow_rate(&self) -> Decimal {
        self.input.borrow_rate
    }

    /// Whether a senior bottleneck keeps this tranche from reaching its own
    /// junior net supply.
    pub fn is_constrained(&self) -> bool {
        self.jr_net_supply > self.free_supply
    }
}
