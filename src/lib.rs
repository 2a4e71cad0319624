//! # tranche-waterfall
//!
//! Accounting engine for tranched lending markets.
//!
//! A market is an ordered sequence of tranches, most senior first. Junior
//! lenders back every more senior tranche, so liquidity, interest and losses
//! all move along the seniority order. This crate computes the derived
//! per-tranche state and simulates interest and bad-debt flows on top of it.
//!
//! ## Architecture
//!
//! - **core** — Tranche records, time periods, validation, number formatting
//! - **waterfall** — Junior aggregates, free supply, utilization, the shared
//!   senior-to-junior cascade, funding matrix and the [`WaterfallEngine`]
//! - **simulation** — Interest accrual, bad-debt absorption, random markets
//!
//! [`WaterfallEngine`]: waterfall::engine::WaterfallEngine

pub mod core;
pub mod simulation;
pub mod waterfall;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::period::TimePeriod;
    pub use crate::core::tranche::{TrancheData, TrancheId, TrancheInput};
    pub use crate::core::validation::{validate_tranches, ValidationError};
    pub use crate::simulation::bad_debt::{
        simulate_bad_debt, BadDebtEvent, BadDebtRequest, BadDebtSimulationResult,
        BadDebtTrancheResult,
    };
    pub use crate::simulation::interest_accrual::{
        simulate_interest_accrual, InterestAccrualResult, InterestSimulationResult,
    };
    pub use crate::waterfall::engine::WaterfallEngine;
    pub use crate::waterfall::funding_matrix::{compute_funding_matrix, FundingMatrix};
    pub use crate::waterfall::table::TrancheTable;
}
