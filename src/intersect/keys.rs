//! Per-dataset canonical sample keys.

use crate::data::{DatasetTable, KeyPolicy, SampleKey};
use crate::error::Result;
use std::collections::BTreeSet;

/// Canonical key of every column, in column order.
pub fn sample_keys(table: &DatasetTable, policy: &KeyPolicy) -> Result<Vec<SampleKey>> {
    table
        .sample_labels()
        .iter()
        .map(|label| policy.key_for(label))
        .collect()
}

/// Set of canonical keys present in a dataset's columns.
pub fn sample_key_set(table: &DatasetTable, policy: &KeyPolicy) -> Result<BTreeSet<SampleKey>> {
    Ok(sample_keys(table, policy)?.into_iter().collect())
}
