//! Foundational types shared by the waterfall and the simulators.

pub mod format;
pub mod period;
pub mod ratio;
pub mod tranche;
pub mod validation;
