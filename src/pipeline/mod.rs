//! Pipeline composition and execution for sample intersection runs.

mod runner;

pub use runner::{
    DatasetSpec, DatasetSummary, LoadedDataset, Pipeline, RunConfig, RunSummary,
};
