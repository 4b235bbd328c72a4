//! Multi-omics Sample Intersection Library
//!
//! This library finds the biological samples shared by several omics tables
//! (gene expression, methylation, miRNA expression, ...) and subsets each
//! table to those samples.
//!
//! # Overview
//!
//! Column labels such as `TCGA-A1-A0SB-01` are reduced to a canonical sample
//! key (`TCGA-A1-A0SB`) by a [`KeyPolicy`](data::KeyPolicy). The keys present
//! in every table form the common sample set; each table then keeps only the
//! columns whose key is in that set.
//!
//! - **data**: Core data structures (DatasetTable, SampleKey, KeyPolicy)
//! - **intersect**: Key sets, intersection and column subsetting
//! - **output**: Output layout and writers
//! - **profile**: Overlap profiling across datasets
//! - **pipeline**: Pipeline composition and execution
//!
//! # Example
//!
//! ```no_run
//! use omics_intersect::prelude::*;
//!
//! let summary = Pipeline::new()
//!     .name("brca")
//!     .dataset("expr", "data/expr.tsv")
//!     .dataset("meth", "data/meth.tsv")
//!     .dataset("mirna", "data/mirna.tsv")
//!     .output_dir("results")
//!     .run()
//!     .unwrap();
//!
//! println!("{} shared samples", summary.n_common);
//! ```

pub mod data;
pub mod error;
pub mod intersect;
pub mod output;
pub mod pipeline;
pub mod profile;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::data::{DatasetTable, KeyPolicy, SampleKey, ShortLabelPolicy};
    pub use crate::error::{IntersectError, Result};
    pub use crate::intersect::{
        common_samples, sample_key_set, sample_keys, subset_to_common, SubsetResult,
    };
    pub use crate::output::{ensure_dir, write_sample_ids, OutputLayout};
    pub use crate::pipeline::{
        DatasetSpec, DatasetSummary, LoadedDataset, Pipeline, RunConfig, RunSummary,
    };
    pub use crate::profile::{profile_overlap, DatasetOverlap, OverlapProfile, PairwiseOverlap};
}
