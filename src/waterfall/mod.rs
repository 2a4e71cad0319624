//! The waterfall accounting engine.
//!
//! Aggregates are built junior to senior (suffix sums); cascades run senior
//! to junior. [`engine::WaterfallEngine`] composes the passes.

pub mod aggregate;
pub mod cascade;
pub mod engine;
pub mod free_supply;
pub mod funding_matrix;
pub mod interest;
pub mod table;
pub mod utilization;

#[cfg(test)]
pub(crate) mod fixtures;
