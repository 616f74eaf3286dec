// Deduplication core
pub mod dedup;
pub mod record;
pub mod errors;

// CLI, I/O and logging glue
pub mod cli;
pub mod utils;

pub mod constants;

// Re-export main types for convenience
pub use dedup::{deduplicate, ChangeLogEntry, ConflictType, DedupConfig, DedupOutcome, DedupStats, Deduplicator};
pub use errors::LeadError;
pub use record::LeadRecord;
