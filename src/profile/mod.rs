//! Read-only profiling of how samples overlap across datasets.

mod overlap;

pub use overlap::{profile_overlap, DatasetOverlap, OverlapProfile, PairwiseOverlap};
