//! Simulations run on top of a computed tranche snapshot.
//!
//! - **interest_accrual** — absolute interest flow over a time period
//! - **bad_debt** — loss absorption with per-tranche supply caps
//! - **market_generator** — random tranche markets for testing and benchmarks

pub mod bad_debt;
pub mod interest_accrual;
pub mod market_generator;
