//! Sample intersection primitives: key extraction, set intersection, subsetting.

mod common;
mod keys;
mod subset;

pub use common::common_samples;
pub use keys::{sample_key_set, sample_keys};
pub use subset::{subset_to_common, SubsetResult};
