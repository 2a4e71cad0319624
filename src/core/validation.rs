//! Opt-in input checks that sit above the waterfall.
//!
//! The engine itself computes over whatever numbers it receives. Callers
//! that want to reject economically meaningless markets run these checks
//! first and decide what to do with the violations.

use crate::core::tranche::{TrancheId, TrancheInput};
use rust_decimal::Decimal;
use thiserror::Error;

/// A single reason a tranche sequence is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("market has no tranches")]
    Empty,
    #[error("tranche {id} (index {index}) has negative {field}: {value}")]
    Negative {
        index: usize,
        id: TrancheId,
        field: &'static str,
        value: Decimal,
    },
    #[error("tranche {id} (index {index}) has LLTV {lltv}, not above the previous {previous}")]
    Unordered {
        index: usize,
        id: TrancheId,
        lltv: Decimal,
        previous: Decimal,
    },
}

/// Return the first violation found, if any.
pub fn validate_tranches(tranches: &[TrancheInput]) -> Result<(), ValidationError> {
    match validate_collecting(tranches).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Return every violation, in sequence order.
pub fn validate_collecting(tranches: &[TrancheInput]) -> Vec<ValidationError> {
    if tranches.is_empty() {
        return vec![ValidationError::Empty];
    }

    let mut errors = Vec::new();
    for (index, t) in tranches.iter().enumerate() {
        let fields = [
            ("supplyAssets", t.supply_assets),
            ("borrowAssets", t.borrow_assets),
            ("pendingInterest", t.pending_interest),
            ("borrowRate", t.borrow_rate),
        ];
        for (field, value) in fields {
            if value < Decimal::ZERO {
                errors.push(ValidationError::Negative {
                    index,
                    id: t.id,
                    field,
                    value,
                });
            }
        }

        if index > 0 {
            let previous = tranches[index - 1].lltv;
            if t.lltv <= previous {
                errors.push(ValidationError::Unordered {
                    index,
                    id: t.id,
                    lltv: t.lltv,
                    previous,
                });
            }
        }
    }
    errors
}
