//! Sample overlap profiling across datasets.

use crate::data::{DatasetTable, KeyPolicy, SampleKey};
use crate::error::Result;
use crate::intersect::{common_samples, sample_keys};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Sample composition of a single dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetOverlap {
    /// Dataset name.
    pub name: String,
    /// Number of sample columns.
    pub n_columns: usize,
    /// Number of distinct canonical keys.
    pub n_samples: usize,
    /// Keys backed by more than one column.
    pub n_replicated: usize,
    /// Keys found in no other dataset.
    pub n_exclusive: usize,
    /// Columns that would survive intersection.
    pub n_common_columns: usize,
}

/// Shared keys between two datasets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairwiseOverlap {
    pub left: String,
    pub right: String,
    /// Keys present in both.
    pub n_shared: usize,
    /// Shared keys over the union of both key sets.
    pub jaccard: f64,
}

/// How sample keys overlap across a group of datasets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlapProfile {
    pub datasets: Vec<DatasetOverlap>,
    /// One entry per unordered pair, in input order.
    pub pairwise: Vec<PairwiseOverlap>,
    /// Keys present in every dataset.
    pub n_common: usize,
    /// Keys present in any dataset.
    pub n_union: usize,
}

/// Profile the key overlap of named datasets without modifying them.
pub fn profile_overlap<'a, I>(datasets: I, policy: &KeyPolicy) -> Result<OverlapProfile>
where
    I: IntoIterator<Item = (&'a str, &'a DatasetTable)>,
{
    let mut names = Vec::new();
    let mut key_counts: Vec<BTreeMap<SampleKey, usize>> = Vec::new();
    for (name, table) in datasets {
        let mut counts = BTreeMap::new();
        for key in sample_keys(table, policy)? {
            *counts.entry(key).or_insert(0) += 1;
        }
        names.push(name.to_string());
        key_counts.push(counts);
    }

    let key_sets: Vec<BTreeSet<SampleKey>> = key_counts
        .iter()
        .map(|counts| counts.keys().cloned().collect())
        .collect();
    let common = common_samples(&key_sets)?;
    let union: BTreeSet<&SampleKey> = key_sets.iter().flatten().collect();

    let datasets = names
        .iter()
        .zip(&key_counts)
        .enumerate()
        .map(|(i, (name, counts))| {
            let n_exclusive = counts
                .keys()
                .filter(|key| {
                    key_sets
                        .iter()
                        .enumerate()
                        .all(|(j, other)| j == i || !other.contains(*key))
                })
                .count();
            DatasetOverlap {
                name: name.clone(),
                n_columns: counts.values().sum(),
                n_samples: counts.len(),
                n_replicated: counts.values().filter(|&&n| n > 1).count(),
                n_exclusive,
                n_common_columns: counts
                    .iter()
                    .filter(|(key, _)| common.contains(*key))
                    .map(|(_, n)| n)
                    .sum(),
            }
        })
        .collect();

    let mut pairwise = Vec::new();
    for i in 0..key_sets.len() {
        for j in (i + 1)..key_sets.len() {
            let n_shared = key_sets[i].intersection(&key_sets[j]).count();
            let n_either = key_sets[i].union(&key_sets[j]).count();
            pairwise.push(PairwiseOverlap {
                left: names[i].clone(),
                right: names[j].clone(),
                n_shared,
                jaccard: if n_either == 0 {
                    0.0
                } else {
                    n_shared as f64 / n_either as f64
                },
            });
        }
    }

    Ok(OverlapProfile {
        datasets,
        pairwise,
        n_common: common.len(),
        n_union: union.len(),
    })
}

impl std::fmt::Display for OverlapProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Overlap Profile")?;
        writeln!(f, "  Common samples: {}", self.n_common)?;
        writeln!(f, "  Union samples:  {}", self.n_union)?;
        for d in &self.datasets {
            writeln!(f, "  {}:", d.name)?;
            writeln!(f, "    Columns:        {}", d.n_columns)?;
            writeln!(f, "    Samples:        {}", d.n_samples)?;
            writeln!(f, "    Replicated:     {}", d.n_replicated)?;
            writeln!(f, "    Exclusive:      {}", d.n_exclusive)?;
            writeln!(f, "    Common columns: {}", d.n_common_columns)?;
        }
        for p in &self.pairwise {
            writeln!(
                f,
                "  {} & {}: {} shared (Jaccard {:.3})",
                p.left, p.right, p.n_shared, p.jaccard
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_labels(labels: &[&str]) -> DatasetTable {
        let labels: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
        let row = vec!["1".to_string(); labels.len()];
        DatasetTable::new("id", vec!["f".to_string()], labels, vec![row]).unwrap()
    }

    #[test]
    fn test_profile_three_datasets() {
        let d1 = table_with_labels(&["S-1-A", "S-1-B", "S-2-A"]);
        let d2 = table_with_labels(&["S-1-C", "S-3-A"]);
        let d3 = table_with_labels(&["S-1-D", "S-2-B"]);
        let policy = KeyPolicy::with_segments(2);

        let profile =
            profile_overlap([("expr", &d1), ("meth", &d2), ("mirna", &d3)], &policy).unwrap();

        assert_eq!(profile.n_common, 1);
        assert_eq!(profile.n_union, 3);

        let expr = &profile.datasets[0];
        assert_eq!(expr.name, "expr");
        assert_eq!(expr.n_columns, 3);
        assert_eq!(expr.n_samples, 2);
        assert_eq!(expr.n_replicated, 1);
        assert_eq!(expr.n_exclusive, 0);
        assert_eq!(expr.n_common_columns, 2);

        let meth = &profile.datasets[1];
        assert_eq!(meth.n_exclusive, 1);
        assert_eq!(meth.n_common_columns, 1);

        assert_eq!(profile.pairwise.len(), 3);
        let expr_mirna = &profile.pairwise[1];
        assert_eq!(expr_mirna.left, "expr");
        assert_eq!(expr_mirna.right, "mirna");
        assert_eq!(expr_mirna.n_shared, 2);
        assert!((expr_mirna.jaccard - 1.0).abs() < 1e-12);

        let meth_mirna = &profile.pairwise[2];
        assert_eq!(meth_mirna.n_shared, 1);
        assert!((meth_mirna.jaccard - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_profile_empty_tables() {
        let d1 = table_with_labels(&[]);
        let d2 = table_with_labels(&[]);
        let profile = profile_overlap([("a", &d1), ("b", &d2)], &KeyPolicy::default()).unwrap();
        assert_eq!(profile.n_common, 0);
        assert_eq!(profile.pairwise[0].jaccard, 0.0);
    }

    #[test]
    fn test_profile_display() {
        let d1 = table_with_labels(&["A-1-1"]);
        let profile = profile_overlap([("solo", &d1)], &KeyPolicy::default()).unwrap();
        let text = profile.to_string();
        assert!(text.contains("Common samples: 1"));
        assert!(text.contains("solo:"));
    }
}
