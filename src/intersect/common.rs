//! Intersection of sample key sets across datasets.

use crate::data::SampleKey;
use crate::error::{IntersectError, Result};
use std::collections::BTreeSet;

/// Keys present in every one of `sets`.
///
/// The result does not depend on the order of `sets`. An empty result is
/// valid; passing no sets at all is an error.
pub fn common_samples<'a, I>(sets: I) -> Result<BTreeSet<SampleKey>>
where
    I: IntoIterator<Item = &'a BTreeSet<SampleKey>>,
{
    let sets: Vec<&BTreeSet<SampleKey>> = sets.into_iter().collect();

    let smallest = sets
        .iter()
        .min_by_key(|set| set.len())
        .ok_or_else(|| IntersectError::EmptyData("No datasets to intersect".to_string()))?;

    Ok(smallest
        .iter()
        .filter(|key| sets.iter().all(|set| set.contains(*key)))
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(values: &[&str]) -> BTreeSet<SampleKey> {
        values.iter().map(|v| SampleKey::new(*v)).collect()
    }

    #[test]
    fn test_three_way_intersection() {
        let k1 = keys(&["S-1"]);
        let k2 = keys(&["S-1", "S-3"]);
        let k3 = keys(&["S-1", "S-2"]);

        let common = common_samples([&k1, &k2, &k3]).unwrap();
        assert_eq!(common, keys(&["S-1"]));
    }

    #[test]
    fn test_order_independent() {
        let k1 = keys(&["a", "b", "c", "d"]);
        let k2 = keys(&["b", "c", "d", "e"]);
        let k3 = keys(&["c", "d", "x"]);

        let expected = keys(&["c", "d"]);
        assert_eq!(common_samples([&k1, &k2, &k3]).unwrap(), expected);
        assert_eq!(common_samples([&k3, &k1, &k2]).unwrap(), expected);
        assert_eq!(common_samples([&k2, &k3, &k1]).unwrap(), expected);
    }

    #[test]
    fn test_matches_pairwise_fold() {
        let k1 = keys(&["a", "b", "c", "q"]);
        let k2 = keys(&["b", "c", "q", "z"]);
        let k3 = keys(&["q", "c", "y"]);

        let folded: BTreeSet<SampleKey> = k1
            .intersection(&k2)
            .cloned()
            .collect::<BTreeSet<_>>()
            .intersection(&k3)
            .cloned()
            .collect();
        assert_eq!(common_samples([&k1, &k2, &k3]).unwrap(), folded);
    }

    #[test]
    fn test_single_set_is_itself() {
        let k1 = keys(&["a", "b"]);
        assert_eq!(common_samples([&k1]).unwrap(), k1);
    }

    #[test]
    fn test_disjoint_sets_give_empty() {
        let k1 = keys(&["a"]);
        let k2 = keys(&["b"]);
        assert!(common_samples([&k1, &k2]).unwrap().is_empty());
    }

    #[test]
    fn test_empty_set_empties_result() {
        let k1 = keys(&["a", "b"]);
        let k2 = BTreeSet::new();
        assert!(common_samples([&k1, &k2]).unwrap().is_empty());
    }

    #[test]
    fn test_no_sets_is_error() {
        let none: Vec<&BTreeSet<SampleKey>> = Vec::new();
        assert!(matches!(
            common_samples(none),
            Err(IntersectError::EmptyData(_))
        ));
    }
}
