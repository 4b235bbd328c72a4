//! Output layout and writers for the common ID list.

use crate::data::SampleKey;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Where a run places its results.
///
/// ```text
/// <dir>/<ids_file>
/// <dir>/<subset_dir>/<dataset>_subset.tsv
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputLayout {
    /// Root output directory.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    /// File name of the common sample ID list.
    #[serde(default = "default_ids_file")]
    pub ids_file: String,
    /// Sub-directory holding the subsetted tables.
    #[serde(default = "default_subset_dir")]
    pub subset_dir: String,
}

fn default_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_ids_file() -> String {
    "common_sample_ids.txt".to_string()
}

fn default_subset_dir() -> String {
    "subsetted".to_string()
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            ids_file: default_ids_file(),
            subset_dir: default_subset_dir(),
        }
    }
}

impl OutputLayout {
    /// Same layout rooted at `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    /// Path of the common sample ID list.
    pub fn ids_path(&self) -> PathBuf {
        self.dir.join(&self.ids_file)
    }

    /// Directory holding the subsetted tables.
    pub fn subset_dir_path(&self) -> PathBuf {
        self.dir.join(&self.subset_dir)
    }

    /// Path of the subsetted table for `dataset`.
    pub fn subset_path(&self, dataset: &str) -> PathBuf {
        self.subset_dir_path().join(format!("{}_subset.tsv", dataset))
    }
}

/// Create `path` and any missing parents. Existing directories are fine.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Write `keys` one per line in ascending order, replacing any existing file.
///
/// An empty set produces an empty file.
pub fn write_sample_ids<P: AsRef<Path>>(path: P, keys: &BTreeSet<SampleKey>) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for key in keys {
        writeln!(writer, "{}", key)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let layout = OutputLayout::in_dir("out");
        assert_eq!(layout.ids_path(), Path::new("out/common_sample_ids.txt"));
        assert_eq!(layout.subset_dir_path(), Path::new("out/subsetted"));
        assert_eq!(
            layout.subset_path("mirna"),
            Path::new("out/subsetted/mirna_subset.tsv")
        );
    }

    #[test]
    fn test_write_sorted_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.txt");
        let keys: BTreeSet<SampleKey> = ["TCGA-B6-A0RE", "TCGA-A1-A0SB", "TCGA-A2-A04P"]
            .iter()
            .map(|k| SampleKey::new(*k))
            .collect();

        write_sample_ids(&path, &keys).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "TCGA-A1-A0SB\nTCGA-A2-A04P\nTCGA-B6-A0RE\n");
    }

    #[test]
    fn test_write_empty_ids_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.txt");
        write_sample_ids(&path, &BTreeSet::new()).unwrap();
        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_rewrite_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.txt");
        let long: BTreeSet<SampleKey> = ["a", "b", "c"].iter().map(|k| SampleKey::new(*k)).collect();
        let short: BTreeSet<SampleKey> = ["z"].iter().map(|k| SampleKey::new(*k)).collect();

        write_sample_ids(&path, &long).unwrap();
        write_sample_ids(&path, &short).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "z\n");
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("results").join("subsetted");
        ensure_dir(&nested).unwrap();
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
