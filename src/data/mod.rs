//! Data structures for multi-omics sample intersection.

mod dataset;
mod sample_key;

pub use dataset::DatasetTable;
pub use sample_key::{KeyPolicy, SampleKey, ShortLabelPolicy};
