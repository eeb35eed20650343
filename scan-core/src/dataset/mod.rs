//! Sample dataset
//!
//! Labeled training samples stored as JSONL, one record per line. The
//! generator produces the synthetic dataset the trainer consumes; records
//! embed the feature layout version so a stale dataset fails loudly instead
//! of training against the wrong columns.

pub mod generate;
pub mod io;
pub mod record;


pub use generate::{generate, summarize, DatasetSummary, GeneratorParams};
pub use io::{read_jsonl, write_jsonl, DatasetError};
pub use record::SampleRecord;
