use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Outcome of the connected-liquidity resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSupply {
    /// Running minimum of junior net supply, senior to junior.
    pub free_supply: Vec<Decimal>,
    /// Indices of the tranches whose net supply caps a more junior tranche.
    pub binding: BTreeSet<usize>,
}

impl FreeSupply {
    pub fn is_binding(&self, index: usize) -> bool {
        self.binding.contains(&index)
    }
}

/// Resolve free supply and the binding constraints from junior net supply.
///
/// A tranche can reach junior liquidity only through every tranche senior
/// to it, so `free_supply[i] = min(jr_net_supply[0..=i])`.
///
/// # Algorithm
///
/// Sweep senior to junior keeping the running minimum and the index that
/// first reached it. Only a strictly smaller value moves the minimum, so on
/// ties the more senior tranche keeps holding it. Whenever a tranche's own
/// net supply exceeds its free supply, the current holder is binding.
pub fn resolve_free_supply(jr_net_supply: &[Decimal]) -> FreeSupply {
    let mut free_supply = Vec::with_capacity(jr_net_supply.len());
    let mut binding = BTreeSet::new();
    let mut holder: Option<(Decimal, usize)> = None;

    for (i, &net) in jr_net_supply.iter().enumerate() {
        let (min, k) = match holder {
            Some((min, k)) if net >= min => (min, k),
            _ => (net, i),
        };
        holder = Some((min, k));
        free_supply.push(min);

        if net > min {
            binding.insert(k);
        }
    }

    FreeSupply {
        free_supply,
        binding,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn binding(indices: &[usize]) -> BTreeSet<usize> {
        indices.iter().copied().collect()
    }

    #[test]
    fn test_doc_example() {
        let result =
            resolve_free_supply(&[dec!(200), dec!(100), dec!(150), dec!(150), dec!(100)]);
        assert_eq!(
            result.free_supply,
            vec![dec!(200), dec!(100), dec!(100), dec!(100), dec!(100)]
        );
        assert_eq!(result.binding, binding(&[1]));
    }

    #[test]
    fn test_mid_tranche_bottleneck() {
        let result =
            resolve_free_supply(&[dec!(3000), dec!(2500), dec!(1000), dec!(2000), dec!(2500)]);
        assert_eq!(result.free_supply[2], dec!(1000));
        assert_eq!(result.free_supply[4], dec!(1000));
        assert_eq!(result.binding, binding(&[2]));
    }

    #[test]
    fn test_senior_bottleneck() {
        let result =
            resolve_free_supply(&[dec!(500), dec!(2000), dec!(3000), dec!(4000), dec!(5000)]);
        assert!(result.free_supply.iter().all(|f| *f == dec!(500)));
        assert_eq!(result.binding, binding(&[0]));
    }

    #[test]
    fn test_non_increasing_has_no_binding() {
        let net = [dec!(400), dec!(300), dec!(300), dec!(100)];
        let result = resolve_free_supply(&net);
        assert_eq!(result.free_supply, net.to_vec());
        assert!(result.binding.is_empty());
    }

    #[test]
    fn test_scenario_a_junior_already_minimal() {
        let result = resolve_free_supply(&[dec!(50), Decimal::ZERO]);
        assert_eq!(result.free_supply, vec![dec!(50), Decimal::ZERO]);
        assert!(result.binding.is_empty());
    }

    #[test]
    fn test_tie_keeps_first_holder() {
        // Index 1 ties the minimum but never takes it over.
        let result = resolve_free_supply(&[dec!(100), dec!(100), dec!(200)]);
        assert_eq!(result.free_supply, vec![dec!(100), dec!(100), dec!(100)]);
        assert_eq!(result.binding, binding(&[0]));
        assert!(!result.is_binding(1));
    }

    #[test]
    fn test_multiple_binding_ranges() {
        let result =
            resolve_free_supply(&[dec!(100), dec!(50), dec!(80), dec!(30), dec!(60)]);
        assert_eq!(
            result.free_supply,
            vec![dec!(100), dec!(50), dec!(50), dec!(30), dec!(30)]
        );
        assert_eq!(result.binding, binding(&[1, 3]));
    }

    #[test]
    fn test_empty() {
        let result = resolve_free_supply(&[]);
        assert!(result.free_supply.is_empty());
        assert!(result.binding.is_empty());
    }
}
