//! Dynamic loan mix: which lender tranche funds which borrower tranche.
//!
//! A lender's supply cascades from its own tranche towards the senior end.
//! At every borrower tranche it funds a share of the borrow proportional to
//! its share of that tranche's available supply; what is left moves on.

use crate::core::format::{format_number, format_percent};
use crate::core::ratio::{checked_ratio, saturating_sum};
use crate::core::tranche::TrancheInput;
use crate::waterfall::aggregate::{jr_borrow, jr_net_supply, jr_supply};
use crate::waterfall::utilization::available_supply;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One non-zero lender/borrower pair of a [`FundingMatrix`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingMatrixEntry {
    pub lender_index: usize,
    pub borrower_index: usize,
    pub amount: Decimal,
    pub percent_of_lender_supply: Decimal,
    /// Zero when the borrower tranche has no borrow.
    pub percent_of_borrower_borrow: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingMatrix {
    /// `matrix[borrower][lender]`: fraction of the lender's supply funding
    /// that borrower tranche.
    pub matrix: Vec<Vec<Decimal>>,
    pub entries: Vec<FundingMatrixEntry>,
    pub total_funded: Decimal,
    /// Per lender, the fraction of its supply that is lent out anywhere.
    pub capital_allocated: Vec<Decimal>,
}

impl FundingMatrix {
    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// Fraction of `lender`'s supply funding `borrower`, zero outside the
    /// matrix.
    pub fn share(&self, borrower: usize, lender: usize) -> Decimal {
        self.matrix
            .get(borrower)
            .and_then(|row| row.get(lender))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

/// A lender can only fund its own tranche or a more senior one.
pub fn is_valid_funding_relationship(lender_index: usize, borrower_index: usize) -> bool {
    borrower_index <= lender_index
}

/// Compute the funding matrix for an ordered tranche sequence.
pub fn compute_funding_matrix(
    tranches: &[TrancheInput],
    include_pending_interest: bool,
) -> FundingMatrix {
    let n = tranches.len();
    let jr_supply = jr_supply(tranches, include_pending_interest);
    let jr_borrow = jr_borrow(tranches);
    let jr_net_supply = jr_net_supply(&jr_supply, &jr_borrow);
    let available = available_supply(&jr_net_supply, tranches);

    let mut matrix = vec![vec![Decimal::ZERO; n]; n];
    let mut capital_allocated = vec![Decimal::ZERO; n];

    for (lender, lender_tranche) in tranches.iter().enumerate() {
        let lender_supply = lender_tranche.supply(include_pending_interest);
        if lender_supply.is_zero() {
            continue;
        }

        let mut cascading = lender_supply;
        for borrower in (0..=lender).rev() {
            if cascading <= Decimal::ZERO {
                break;
            }
            let borrow = tranches[borrower].borrow_assets;
            if available[borrower] <= Decimal::ZERO || borrow <= Decimal::ZERO {
                continue;
            }
            let Some(share_of_available) = checked_ratio(cascading, available[borrower]) else {
                continue;
            };
            let allocated = share_of_available.saturating_mul(borrow);
            let percent_of_lender = checked_ratio(allocated, lender_supply).unwrap_or(Decimal::ZERO);

            matrix[borrower][lender] = percent_of_lender;
            capital_allocated[lender] = capital_allocated[lender].saturating_add(percent_of_lender);
            cascading = cascading.saturating_sub(allocated);
        }
    }

    let mut entries = Vec::new();
    for (lender, lender_tranche) in tranches.iter().enumerate() {
        let lender_supply = lender_tranche.supply(include_pending_interest);
        for (borrower, borrower_tranche) in tranches.iter().enumerate() {
            let percent_of_lender = matrix[borrower][lender];
            if percent_of_lender <= Decimal::ZERO {
                continue;
            }
            let amount = percent_of_lender.saturating_mul(lender_supply);
            entries.push(FundingMatrixEntry {
                lender_index: lender,
                borrower_index: borrower,
                amount,
                percent_of_lender_supply: percent_of_lender,
                percent_of_borrower_borrow: checked_ratio(amount, borrower_tranche.borrow_assets)
                    .unwrap_or(Decimal::ZERO),
            });
        }
    }
    let total_funded = saturating_sum(entries.iter().map(|e| e.amount));

    debug!(
        "funding matrix: {} tranches, {} entries, total funded {}",
        n,
        entries.len(),
        total_funded
    );

    FundingMatrix {
        matrix,
        entries,
        total_funded,
        capital_allocated,
    }
}

impl std::fmt::Display for FundingMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Dynamic Loan Mix ===")?;
        writeln!(f, "Total Funded: {}", format_number(Some(self.total_funded), 2))?;

        write!(f, "\n{:>10}", "borrower")?;
        for lender in 0..self.len() {
            write!(f, "{:>10}", format!("L{}", lender))?;
        }
        writeln!(f)?;
        for (borrower, row) in self.matrix.iter().enumerate() {
            write!(f, "{:>10}", format!("T{}", borrower))?;
            for (lender, share) in row.iter().enumerate() {
                if is_valid_funding_relationship(lender, borrower) {
                    write!(f, "{:>10}", format_percent(Some(*share), 2))?;
                } else {
                    write!(f, "{:>10}", "")?;
                }
            }
            writeln!(f)?;
        }

        write!(f, "{:>10}", "allocated")?;
        for allocated in &self.capital_allocated {
            write!(f, "{:>10}", format_percent(Some(*allocated), 2))?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waterfall::fixtures::doc_example;
    use rust_decimal_macros::dec;

    fn close(a: Decimal, b: Decimal) -> bool {
        (a - b).abs() < dec!(0.0001)
    }

    #[test]
    fn test_junior_lender_allocations() {
        let result = compute_funding_matrix(&doc_example(), false);
        assert!(close(result.share(4, 4), dec!(0.5)));
        assert!(close(result.share(3, 4), dec!(0.25)));
        assert!(close(result.share(2, 4), dec!(0.142857)));
        assert!(close(result.share(1, 4), dec!(0.076531)));
        assert!(close(result.share(0, 4), dec!(0.010204)));
    }

    #[test]
    fn test_capital_allocated() {
        let result = compute_funding_matrix(&doc_example(), false);
        let expected = [
            dec!(0.333333),
            dec!(0.809524),
            dec!(0.918367),
            dec!(0.959184),
            dec!(0.979592),
        ];
        for (actual, expected) in result.capital_allocated.iter().zip(expected) {
            assert!(close(*actual, expected), "{} != {}", actual, expected);
        }
    }

    #[test]
    fn test_senior_lenders_never_fund_junior_borrowers() {
        let result = compute_funding_matrix(&doc_example(), false);
        for borrower in 0..result.len() {
            for lender in 0..result.len() {
                if !is_valid_funding_relationship(lender, borrower) {
                    assert_eq!(result.matrix[borrower][lender], Decimal::ZERO);
                }
            }
        }
        assert!(result
            .entries
            .iter()
            .all(|e| e.borrower_index <= e.lender_index));
    }

    #[test]
    fn test_entries_match_matrix() {
        let market = doc_example();
        let result = compute_funding_matrix(&market, false);
        let total: Decimal = result.entries.iter().map(|e| e.amount).sum();
        assert_eq!(total, result.total_funded);
        for entry in &result.entries {
            let expected = result.share(entry.borrower_index, entry.lender_index) * dec!(200);
            assert_eq!(entry.amount, expected);
        }
    }

    #[test]
    fn test_zero_borrow_funds_nothing() {
        let market = vec![
            TrancheInput::new(0, dec!(75)).with_supply(dec!(100)),
            TrancheInput::new(1, dec!(95)).with_supply(dec!(100)),
        ];
        let result = compute_funding_matrix(&market, false);
        assert_eq!(result.capital_allocated, vec![Decimal::ZERO, Decimal::ZERO]);
        assert!(result.entries.is_empty());
        assert_eq!(result.total_funded, Decimal::ZERO);
    }

    #[test]
    fn test_negative_lender_funds_nothing() {
        let market = vec![
            TrancheInput::new(0, dec!(75))
                .with_supply(dec!(100))
                .with_borrow(dec!(50)),
            TrancheInput::new(1, dec!(95)).with_supply(dec!(-50)),
        ];
        let result = compute_funding_matrix(&market, false);
        assert_eq!(result.capital_allocated[1], Decimal::ZERO);
        assert_eq!(result.share(0, 1), Decimal::ZERO);
        assert!(result.entries.iter().all(|e| e.lender_index != 1));
    }

    #[test]
    fn test_relationship_validity() {
        assert!(is_valid_funding_relationship(3, 3));
        assert!(is_valid_funding_relationship(3, 0));
        assert!(!is_valid_funding_relationship(0, 1));
    }

    #[test]
    fn test_display() {
        let output = compute_funding_matrix(&doc_example(), false).to_string();
        assert!(output.starts_with("=== Dynamic Loan Mix ==="));
        assert!(output.contains("50.00%"));
    }
}
