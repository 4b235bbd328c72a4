//! Canonical sample keys derived from raw column labels.

use crate::error::{IntersectError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a biological sample, shared across datasets.
///
/// Several raw column labels (replicates, portions, plates) may map to the
/// same key. Keys order lexicographically by their bytes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleKey(String);

impl SampleKey {
    /// Wrap an already-canonical key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SampleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SampleKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// What to do with labels that have fewer segments than the policy requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortLabelPolicy {
    /// Use the whole label as the key.
    #[default]
    Keep,
    /// Fail with [`IntersectError::MalformedLabel`].
    Reject,
}

/// Rule for turning a column label into a [`SampleKey`].
///
/// The key is the first `segments` tokens of the label, split on and
/// rejoined with `delimiter`. With the defaults, `TCGA-A1-A0SB-01` maps to
/// `TCGA-A1-A0SB`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPolicy {
    /// Number of leading segments that identify the sample.
    #[serde(default = "default_segments")]
    pub segments: usize,
    /// Segment delimiter.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Handling of labels with fewer than `segments` segments.
    #[serde(default)]
    pub short_labels: ShortLabelPolicy,
}

fn default_segments() -> usize {
    3
}

fn default_delimiter() -> char {
    '-'
}

impl Default for KeyPolicy {
    fn default() -> Self {
        Self {
            segments: default_segments(),
            delimiter: default_delimiter(),
            short_labels: ShortLabelPolicy::default(),
        }
    }
}

impl KeyPolicy {
    /// Policy keeping the first `segments` hyphen-delimited segments.
    pub fn with_segments(segments: usize) -> Self {
        Self {
            segments,
            ..Self::default()
        }
    }

    /// Set the short-label handling.
    pub fn short_labels(mut self, policy: ShortLabelPolicy) -> Self {
        self.short_labels = policy;
        self
    }

    /// Check that the policy can produce keys.
    pub fn validate(&self) -> Result<()> {
        if self.segments == 0 {
            return Err(IntersectError::InvalidParameter(
                "Key policy must keep at least one segment".to_string(),
            ));
        }
        Ok(())
    }

    /// Derive the canonical key for a column label.
    ///
    /// The policy is assumed valid; call [`KeyPolicy::validate`] once before
    /// deriving keys in bulk.
    pub fn key_for(&self, label: &str) -> Result<SampleKey> {
        let delimiter_len = self.delimiter.len_utf8();
        let mut found = 0;
        let mut end = 0;
        for token in label.splitn(self.segments + 1, self.delimiter).take(self.segments) {
            if found > 0 {
                end += delimiter_len;
            }
            end += token.len();
            found += 1;
        }

        if found < self.segments && self.short_labels == ShortLabelPolicy::Reject {
            return Err(IntersectError::MalformedLabel {
                label: label.to_string(),
                found,
                required: self.segments,
            });
        }

        Ok(SampleKey::new(&label[..end]))
    }
}
