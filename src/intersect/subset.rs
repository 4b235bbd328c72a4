//! Column filtering to the common sample set.

use crate::data::{DatasetTable, KeyPolicy, SampleKey};
use crate::error::Result;
use std::collections::BTreeSet;

use super::keys::sample_keys;

/// A subsetted table with statistics about what was removed.
#[derive(Debug, Clone)]
pub struct SubsetResult {
    /// Table restricted to the retained columns.
    pub table: DatasetTable,
    /// Original indices of the retained columns, ascending.
    pub retained: Vec<usize>,
    /// Number of columns before subsetting.
    pub n_before: usize,
    /// Number of columns after subsetting.
    pub n_after: usize,
    /// Number of columns removed.
    pub n_removed: usize,
}

impl std::fmt::Display for SubsetResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Subset Result")?;
        writeln!(f, "  Before:    {} columns", self.n_before)?;
        writeln!(f, "  After:     {} columns", self.n_after)?;
        writeln!(f, "  Removed:   {} columns", self.n_removed)?;
        Ok(())
    }
}

/// Keep the columns whose canonical key is in `common`.
///
/// Column order is preserved and rows are untouched.
pub fn subset_to_common(
    table: &DatasetTable,
    common: &BTreeSet<SampleKey>,
    policy: &KeyPolicy,
) -> Result<SubsetResult> {
    let retained: Vec<usize> = sample_keys(table, policy)?
        .iter()
        .enumerate()
        .filter(|(_, key)| common.contains(*key))
        .map(|(i, _)| i)
        .collect();

    let subset = table.subset_samples(&retained)?;
    let n_before = table.n_samples();
    let n_after = subset.n_samples();

    Ok(SubsetResult {
        table: subset,
        retained,
        n_before,
        n_after,
        n_removed: n_before - n_after,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_labels(labels: &[&str]) -> DatasetTable {
        let labels: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
        let rows = vec![
            (0..labels.len()).map(|i| format!("r0c{i}")).collect(),
            (0..labels.len()).map(|i| format!("r1c{i}")).collect(),
        ];
        DatasetTable::new(
            "id",
            vec!["f0".to_string(), "f1".to_string()],
            labels,
            rows,
        )
        .unwrap()
    }

    fn keys(values: &[&str]) -> BTreeSet<SampleKey> {
        values.iter().map(|v| SampleKey::new(*v)).collect()
    }

    #[test]
    fn test_keeps_all_replicates_of_common_keys() {
        let table = table_with_labels(&["S-1-A", "S-1-B", "S-2-A"]);
        let policy = KeyPolicy::with_segments(2);
        let result = subset_to_common(&table, &keys(&["S-1"]), &policy).unwrap();

        assert_eq!(result.table.sample_labels(), &["S-1-A", "S-1-B"]);
        assert_eq!(result.retained, vec![0, 1]);
        assert_eq!(result.n_before, 3);
        assert_eq!(result.n_after, 2);
        assert_eq!(result.n_removed, 1);
        assert_eq!(result.table.get(1, 1), Some("r1c1"));
    }

    #[test]
    fn test_preserves_column_order() {
        let table = table_with_labels(&["Z-9-a", "A-1-a", "M-5-a", "A-1-b"]);
        let policy = KeyPolicy::with_segments(2);
        let result = subset_to_common(&table, &keys(&["A-1", "Z-9"]), &policy).unwrap();

        assert_eq!(result.table.sample_labels(), &["Z-9-a", "A-1-a", "A-1-b"]);
        assert_eq!(result.table.row(0).unwrap(), &["r0c0", "r0c1", "r0c3"]);
    }

    #[test]
    fn test_sound_and_complete() {
        let table = table_with_labels(&["A-1-a", "B-2-a", "C-3-a", "B-2-b", "D-4-a"]);
        let policy = KeyPolicy::with_segments(2);
        let common = keys(&["B-2", "D-4", "E-5"]);
        let result = subset_to_common(&table, &common, &policy).unwrap();

        for label in result.table.sample_labels() {
            assert!(common.contains(&policy.key_for(label).unwrap()));
        }
        let expected: Vec<&String> = table
            .sample_labels()
            .iter()
            .filter(|l| common.contains(&policy.key_for(l).unwrap()))
            .collect();
        assert_eq!(result.table.sample_labels().len(), expected.len());
    }

    #[test]
    fn test_empty_common_set() {
        let table = table_with_labels(&["A-1-a", "B-2-a"]);
        let result = subset_to_common(&table, &BTreeSet::new(), &KeyPolicy::default()).unwrap();

        assert_eq!(result.n_after, 0);
        assert_eq!(result.table.n_features(), 2);
        assert!(result.retained.is_empty());
    }
}
