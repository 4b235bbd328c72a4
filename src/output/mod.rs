//! Writing intersection results to disk.

mod writer;

pub use writer::{ensure_dir, write_sample_ids, OutputLayout};
