//! Labelled feature × sample tables loaded from tab-delimited files.

use crate::error::{IntersectError, Result};
use std::fs::File;
use std::io::{Read, Write};
use std::iter;
use std::path::Path;

/// One omics dataset: rows are features, columns are samples.
///
/// Cell values are kept as the text found in the input file. Nothing in the
/// intersection workflow needs them as numbers, and keeping the text means a
/// retained column is written back exactly as it was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetTable {
    /// Header of the row-label column (often `sample` or empty).
    index_name: String,
    /// Feature identifiers (row labels).
    feature_ids: Vec<String>,
    /// Raw sample labels (column labels), in file order.
    sample_labels: Vec<String>,
    /// Cells, one `Vec` per feature, each with one entry per sample.
    rows: Vec<Vec<String>>,
}

impl DatasetTable {
    /// Create a table from its parts.
    pub fn new(
        index_name: impl Into<String>,
        feature_ids: Vec<String>,
        sample_labels: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<Self> {
        if rows.len() != feature_ids.len() {
            return Err(IntersectError::DimensionMismatch {
                expected: feature_ids.len(),
                actual: rows.len(),
            });
        }
        if let Some(row) = rows.iter().find(|row| row.len() != sample_labels.len()) {
            return Err(IntersectError::DimensionMismatch {
                expected: sample_labels.len(),
                actual: row.len(),
            });
        }
        Ok(Self {
            index_name: index_name.into(),
            feature_ids,
            sample_labels,
            rows,
        })
    }

    /// Load a table from a TSV file.
    ///
    /// Expected format:
    /// - First row: header; the first cell names the row-label column, the
    ///   rest are sample labels
    /// - Subsequent rows: feature ID followed by one value per sample
    ///
    /// Rows with a different number of fields than the header are rejected.
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let table = Self::from_reader(file)?;
        log::debug!(
            "Read {} features x {} samples from {}",
            table.n_features(),
            table.n_samples(),
            path.display()
        );
        Ok(table)
    }

    /// Parse a table from any reader producing TSV text.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let header = reader.headers()?.clone();
        if header.is_empty() {
            return Err(IntersectError::EmptyData("Empty TSV file".to_string()));
        }
        let index_name = header[0].to_string();
        let sample_labels: Vec<String> = header.iter().skip(1).map(str::to_string).collect();

        let mut feature_ids = Vec::new();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut fields = record.iter();
            // Non-empty: flexible(false) guarantees header length.
            let feature_id = fields.next().unwrap_or_default().to_string();
            feature_ids.push(feature_id);
            rows.push(fields.map(str::to_string).collect());
        }

        Self::new(index_name, feature_ids, sample_labels, rows)
    }

    /// Write the table to a TSV file, replacing any existing file.
    pub fn to_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.to_writer(file)
    }

    /// Write the table as TSV, row-label column first.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        writer.write_record(
            iter::once(self.index_name.as_str()).chain(self.sample_labels.iter().map(String::as_str)),
        )?;
        for (feature_id, row) in self.feature_ids.iter().zip(&self.rows) {
            writer.write_record(
                iter::once(feature_id.as_str()).chain(row.iter().map(String::as_str)),
            )?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Keep only the samples at `indices`, in the order given.
    pub fn subset_samples(&self, indices: &[usize]) -> Result<Self> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.n_samples()) {
            return Err(IntersectError::InvalidParameter(format!(
                "Sample index {} out of bounds",
                bad
            )));
        }

        let sample_labels = indices
            .iter()
            .map(|&i| self.sample_labels[i].clone())
            .collect();
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Self::new(
            self.index_name.clone(),
            self.feature_ids.clone(),
            sample_labels,
            rows,
        )
    }

    /// Cell text at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// All cells of one feature.
    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Number of features (rows).
    #[inline]
    pub fn n_features(&self) -> usize {
        self.feature_ids.len()
    }

    /// Number of sample columns.
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.sample_labels.len()
    }

    /// Header of the row-label column.
    #[inline]
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Feature identifiers.
    #[inline]
    pub fn feature_ids(&self) -> &[String] {
        &self.feature_ids
    }

    /// Raw sample labels.
    #[inline]
    pub fn sample_labels(&self) -> &[String] {
        &self.sample_labels
    }
}
