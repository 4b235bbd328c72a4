//! Pipeline runner: load, intersect, subset, write.

use crate::data::{DatasetTable, KeyPolicy};
use crate::error::{IntersectError, Result};
use crate::intersect::{common_samples, sample_key_set, subset_to_common};
use crate::output::{ensure_dir, write_sample_ids, OutputLayout};
use crate::profile::{profile_overlap, OverlapProfile};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

/// A named input table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSpec {
    /// Dataset name; also names the `<name>_subset.tsv` output.
    pub name: String,
    /// Path of the TSV file.
    pub path: PathBuf,
}

/// Run configuration for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Name of the run.
    pub name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Directory that relative dataset and output paths are resolved against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
    /// Datasets to intersect, in processing order.
    pub datasets: Vec<DatasetSpec>,
    /// Output locations.
    #[serde(default)]
    pub output: OutputLayout,
    /// How column labels map to sample keys.
    #[serde(default)]
    pub key_policy: KeyPolicy,
}

impl RunConfig {
    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(IntersectError::from)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(IntersectError::from)
    }

    /// Load from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// The TCGA breast cancer layout: UCSC Xena HiSeqV2 expression,
    /// HumanMethylation450 and miRNA_HiSeq_gene matrices.
    pub fn tcga_brca() -> Self {
        Pipeline::new()
            .name("tcga-brca")
            .dataset(
                "expr",
                "data/expression/TCGA.BRCA.sampleMap_HiSeqV2/HiSeqV2",
            )
            .dataset(
                "meth",
                "data/methylation/TCGA.BRCA.sampleMap_HumanMethylation450/HumanMethylation450",
            )
            .dataset(
                "mirna",
                "data/mirna/TCGA.BRCA.sampleMap_miRNA_HiSeq_gene/miRNA_HiSeq_gene",
            )
            .to_config(Some(
                "Samples shared by TCGA-BRCA expression, methylation and miRNA tables",
            ))
    }

    /// Check dataset names and key policy.
    pub fn validate(&self) -> Result<()> {
        validate_names(self.datasets.iter().map(|spec| spec.name.as_str()))?;
        self.key_policy.validate()
    }
}

/// Dataset names must be present, unique and usable as file name stems.
fn validate_names<'a, I>(names: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for name in names {
        if name.is_empty() {
            return Err(IntersectError::InvalidParameter(
                "Dataset name must not be empty".to_string(),
            ));
        }
        if name.chars().any(std::path::is_separator) {
            return Err(IntersectError::InvalidParameter(format!(
                "Dataset name '{}' must not contain a path separator",
                name
            )));
        }
        if !seen.insert(name) {
            return Err(IntersectError::InvalidParameter(format!(
                "Duplicate dataset name '{}'",
                name
            )));
        }
    }

    if seen.is_empty() {
        return Err(IntersectError::InvalidParameter(
            "At least one dataset is required".to_string(),
        ));
    }
    Ok(())
}

/// A dataset loaded into memory.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub name: String,
    pub path: PathBuf,
    pub table: DatasetTable,
}

/// Per-dataset outcome of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub name: String,
    /// Resolved input path.
    pub path: PathBuf,
    pub n_features: usize,
    /// Sample columns before subsetting.
    pub n_columns: usize,
    /// Distinct sample keys before subsetting.
    pub n_samples: usize,
    /// Sample columns after subsetting.
    pub n_retained: usize,
    /// Path of the subsetted table.
    pub output: PathBuf,
}

/// Outcome of a complete run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub name: String,
    /// Number of sample keys shared by all datasets.
    pub n_common: usize,
    /// Path of the common sample ID list.
    pub ids_path: PathBuf,
    pub datasets: Vec<DatasetSummary>,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Run '{}'", self.name)?;
        writeln!(f, "  Common samples: {}", self.n_common)?;
        writeln!(f, "  Sample IDs:     {}", self.ids_path.display())?;
        for d in &self.datasets {
            writeln!(
                f,
                "  {}: {} features, {} columns ({} samples) -> {} columns",
                d.name, d.n_features, d.n_columns, d.n_samples, d.n_retained
            )?;
            writeln!(f, "    {}", d.output.display())?;
        }
        Ok(())
    }
}

/// Builder for constructing and running an intersection.
#[derive(Debug, Clone)]
pub struct Pipeline {
    name: String,
    base_dir: Option<PathBuf>,
    datasets: Vec<DatasetSpec>,
    output: OutputLayout,
    key_policy: KeyPolicy,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Create a pipeline with no datasets and default output and key policy.
    pub fn new() -> Self {
        Self {
            name: "unnamed".to_string(),
            base_dir: None,
            datasets: Vec::new(),
            output: OutputLayout::default(),
            key_policy: KeyPolicy::default(),
        }
    }

    /// Create from a config.
    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            name: config.name.clone(),
            base_dir: config.base_dir.clone(),
            datasets: config.datasets.clone(),
            output: config.output.clone(),
            key_policy: config.key_policy.clone(),
        }
    }

    /// Convert to a serializable config.
    pub fn to_config(&self, description: Option<&str>) -> RunConfig {
        RunConfig {
            name: self.name.clone(),
            description: description.map(str::to_string),
            base_dir: self.base_dir.clone(),
            datasets: self.datasets.clone(),
            output: self.output.clone(),
            key_policy: self.key_policy.clone(),
        }
    }

    /// Set the run name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Add a dataset. Datasets are processed in the order added.
    pub fn dataset(mut self, name: &str, path: impl Into<PathBuf>) -> Self {
        self.datasets.push(DatasetSpec {
            name: name.to_string(),
            path: path.into(),
        });
        self
    }

    /// Resolve relative paths against `dir`.
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Write results under `dir` with the default file names.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output.dir = dir.into();
        self
    }

    /// Replace the whole output layout.
    pub fn output_layout(mut self, layout: OutputLayout) -> Self {
        self.output = layout;
        self
    }

    /// Replace the key policy.
    pub fn key_policy(mut self, policy: KeyPolicy) -> Self {
        self.key_policy = policy;
        self
    }

    /// Keep `segments` leading label segments as the sample key.
    pub fn key_segments(mut self, segments: usize) -> Self {
        self.key_policy.segments = segments;
        self
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Output layout with its root resolved against the base directory.
    pub fn resolved_output(&self) -> OutputLayout {
        OutputLayout {
            dir: self.resolve(&self.output.dir),
            ..self.output.clone()
        }
    }

    /// Load every dataset. Fails on the first unreadable or malformed file.
    pub fn load(&self) -> Result<Vec<LoadedDataset>> {
        self.to_config(None).validate()?;

        self.datasets
            .iter()
            .map(|spec| {
                let path = self.resolve(&spec.path);
                log::info!("Loading {} from {}", spec.name, path.display());
                let table = DatasetTable::from_tsv(&path)?;
                Ok(LoadedDataset {
                    name: spec.name.clone(),
                    path,
                    table,
                })
            })
            .collect()
    }

    /// Load all datasets, then intersect, subset and write.
    ///
    /// Nothing is written unless every dataset loads.
    pub fn run(&self) -> Result<RunSummary> {
        let datasets = self.load()?;
        self.run_loaded(&datasets)
    }

    /// Intersect, subset and write already-loaded datasets.
    ///
    /// Dataset names are checked before anything is written.
    pub fn run_loaded(&self, datasets: &[LoadedDataset]) -> Result<RunSummary> {
        validate_names(datasets.iter().map(|d| d.name.as_str()))?;
        self.key_policy.validate()?;

        let mut key_sets = Vec::with_capacity(datasets.len());
        for dataset in datasets {
            let keys = sample_key_set(&dataset.table, &self.key_policy)?;
            log::info!("{}: {} samples", dataset.name, keys.len());
            key_sets.push(keys);
        }
        let common: BTreeSet<_> = common_samples(&key_sets)?;
        log::info!("{} samples shared by all datasets", common.len());

        let layout = self.resolved_output();
        ensure_dir(&layout.dir)?;
        let ids_path = layout.ids_path();
        write_sample_ids(&ids_path, &common)?;
        log::info!("Common sample IDs written to {}", ids_path.display());

        let mut subsets = Vec::with_capacity(datasets.len());
        for dataset in datasets {
            let subset = subset_to_common(&dataset.table, &common, &self.key_policy)?;
            log::info!(
                "{}: {} samples after subsetting",
                dataset.name,
                subset.n_after
            );
            log::debug!("{}: {}", dataset.name, subset);
            subsets.push(subset);
        }

        ensure_dir(layout.subset_dir_path())?;
        let mut summaries = Vec::with_capacity(datasets.len());
        for ((dataset, subset), keys) in datasets.iter().zip(&subsets).zip(&key_sets) {
            let output = layout.subset_path(&dataset.name);
            subset.table.to_tsv(&output)?;
            log::info!("{} subset saved to {}", dataset.name, output.display());

            summaries.push(DatasetSummary {
                name: dataset.name.clone(),
                path: dataset.path.clone(),
                n_features: dataset.table.n_features(),
                n_columns: subset.n_before,
                n_samples: keys.len(),
                n_retained: subset.n_after,
                output,
            });
        }

        Ok(RunSummary {
            name: self.name.clone(),
            n_common: common.len(),
            ids_path,
            datasets: summaries,
        })
    }

    /// Load all datasets and report their overlap without writing anything.
    pub fn profile(&self) -> Result<OverlapProfile> {
        let datasets = self.load()?;
        profile_overlap(
            datasets.iter().map(|d| (d.name.as_str(), &d.table)),
            &self.key_policy,
        )
    }
}
