pub mod config;
pub mod change_log;
pub mod index;
pub mod processor;


pub use config::DedupConfig;
pub use change_log::{ChangeLogEntry, ConflictType, FieldChange};
pub use processor::Deduplicator;

use serde::{Deserialize, Serialize};

use crate::errors::LeadResult;
use crate::record::LeadRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupStats {
    pub total_records: usize,
    pub unique_records: usize,
    pub duplicates_removed: usize,
    /// Every time a record replaced an older one, logged or not.
    pub overwrites: usize,
    pub unchanged_overwrites: usize,
    /// Records that lost to a newer record already in the index.
    pub records_discarded: usize,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone)]
pub struct DedupOutcome {
    pub records: Vec<LeadRecord>,
    pub change_log: Vec<ChangeLogEntry>,
    pub stats: DedupStats,
}

impl DedupOutcome {
    pub fn into_parts(self) -> (Vec<LeadRecord>, Vec<ChangeLogEntry>) {
        (self.records, self.change_log)
    }
}

/// Deduplicates with the default configuration.
pub fn deduplicate(records: Vec<LeadRecord>) -> LeadResult<(Vec<LeadRecord>, Vec<ChangeLogEntry>)> {
    Deduplicator::default().run(records).map(DedupOutcome::into_parts)
}
