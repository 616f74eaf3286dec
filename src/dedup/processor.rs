use std::time::Instant;
use tracing::{debug, info};

use crate::dedup::change_log::{ChangeLogEntry, ConflictType};
use crate::dedup::index::{IdentityIndex, TrackedLead};
use crate::dedup::{DedupConfig, DedupOutcome, DedupStats};
use crate::errors::LeadResult;
use crate::record::{IdentityKey, LeadRecord};

pub struct Deduplicator {
    config: DedupConfig,
}

impl Deduplicator {
    pub fn new(config: DedupConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DedupConfig {
        &self.config
    }

    /// Runs one forward pass over `records` in input order.
    ///
    /// The first missing field or malformed `entryDate` aborts the pass; nothing
    /// is returned for the records already processed.
    pub fn run(&self, records: Vec<LeadRecord>) -> LeadResult<DedupOutcome> {
        let start_time = Instant::now();
        let mut stats = DedupStats {
            total_records: records.len(),
            ..DedupStats::default()
        };
        let mut index = IdentityIndex::with_capacity(records.len());
        let mut change_log = Vec::new();

        for (position, record) in records.into_iter().enumerate() {
            let lead = track(position, record)?;

            let Some(candidate) = index.find_candidate(&lead.id_key, &lead.email_key) else {
                index.insert(lead);
                continue;
            };

            let Some(existing) = index.get(candidate.slot) else {
                continue;
            };

            if !lead.supersedes(existing) {
                debug!(
                    "Discarding record {}: {} '{}' is held by a newer record",
                    position,
                    candidate.conflict_type,
                    key_of(&lead, candidate.conflict_type)
                );
                stats.records_discarded += 1;
                continue;
            }

            let Some(existing) = index.evict(candidate.slot) else {
                continue;
            };
            debug!(
                "Record {} supersedes record {} on {}",
                position, existing.position, candidate.conflict_type
            );
            stats.overwrites += 1;

            let entry = ChangeLogEntry::new(candidate.conflict_type, existing.record, lead.record.clone());
            if entry.is_unchanged() {
                stats.unchanged_overwrites += 1;
            }
            if !entry.is_unchanged() || self.config.log_unchanged_overwrites {
                change_log.push(entry);
            }
            index.insert(lead);
        }

        let records = index.into_survivors();
        stats.unique_records = records.len();
        stats.duplicates_removed = stats.total_records.saturating_sub(stats.unique_records);
        stats.processing_time_ms = start_time.elapsed().as_millis() as u64;

        info!(
            "Deduplicated {} records into {} ({} overwrites, {} discarded)",
            stats.total_records, stats.unique_records, stats.overwrites, stats.records_discarded
        );

        Ok(DedupOutcome {
            records,
            change_log,
            stats,
        })
    }
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new(DedupConfig::default())
    }
}

fn track(position: usize, record: LeadRecord) -> LeadResult<TrackedLead> {
    let entry_date = record.entry_date(position)?;
    let id_key = record.id_key(position)?;
    let email_key = record.email_key(position)?;

    Ok(TrackedLead {
        record,
        position,
        entry_date,
        id_key,
        email_key,
    })
}

fn key_of(lead: &TrackedLead, conflict_type: ConflictType) -> &IdentityKey {
    match conflict_type {
        ConflictType::Id => &lead.id_key,
        ConflictType::Email => &lead.email_key,
    }
}
