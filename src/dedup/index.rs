use chrono::NaiveDateTime;
use indexmap::IndexMap;

use crate::dedup::change_log::ConflictType;
use crate::record::{IdentityKey, LeadRecord};

/// A record that has been validated and placed in the arena.
#[derive(Debug, Clone)]
pub struct TrackedLead {
    pub record: LeadRecord,
    pub position: usize,
    pub entry_date: NaiveDateTime,
    pub id_key: IdentityKey,
    pub email_key: IdentityKey,
}

impl TrackedLead {
    /// Later timestamp wins; on an exact tie the later input position wins.
    pub fn supersedes(&self, existing: &TrackedLead) -> bool {
        self.entry_date > existing.entry_date
            || (self.entry_date == existing.entry_date && self.position > existing.position)
    }
}

/// The record a newcomer must be compared against, and which key matched it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub slot: usize,
    pub conflict_type: ConflictType,
}

/// Two insertion-ordered key maps over one arena of tracked leads.
///
/// A slot stays `Some` while at least one map still points at it. Assigning to a
/// key that is already present keeps that key's position in the map; removing a
/// key shifts everything after it forward. The `_id` map's order is the output
/// order.
#[derive(Debug, Default)]
pub struct IdentityIndex {
    arena: Vec<Option<TrackedLead>>,
    by_id: IndexMap<IdentityKey, usize>,
    by_email: IndexMap<IdentityKey, usize>,
}

impl IdentityIndex {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Vec::with_capacity(capacity),
            by_id: IndexMap::with_capacity(capacity),
            by_email: IndexMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, slot: usize) -> Option<&TrackedLead> {
        self.arena.get(slot).and_then(Option::as_ref)
    }

    /// Picks the comparison candidate for a record with the given keys.
    ///
    /// When both keys hit different records, the newer of the two is chosen, with
    /// ties going to the `_id` match.
    pub fn find_candidate(&self, id_key: &IdentityKey, email_key: &IdentityKey) -> Option<Candidate> {
        let by_id = self.by_id.get(id_key).copied().filter(|&slot| self.get(slot).is_some());
        let by_email = self.by_email.get(email_key).copied().filter(|&slot| self.get(slot).is_some());

        match (by_id, by_email) {
            (Some(id_slot), Some(email_slot)) if id_slot == email_slot => Some(Candidate {
                slot: id_slot,
                conflict_type: ConflictType::Id,
            }),
            (Some(id_slot), Some(email_slot)) => {
                let id_date = self.get(id_slot).map(|lead| lead.entry_date);
                let email_date = self.get(email_slot).map(|lead| lead.entry_date);
                if id_date >= email_date {
                    Some(Candidate { slot: id_slot, conflict_type: ConflictType::Id })
                } else {
                    Some(Candidate { slot: email_slot, conflict_type: ConflictType::Email })
                }
            }
            (Some(slot), None) => Some(Candidate { slot, conflict_type: ConflictType::Id }),
            (None, Some(slot)) => Some(Candidate { slot, conflict_type: ConflictType::Email }),
            (None, None) => None,
        }
    }

    /// Adds a lead to the arena and points both of its keys at it.
    pub fn insert(&mut self, lead: TrackedLead) -> usize {
        let slot = self.arena.len();
        self.by_id.insert(lead.id_key.clone(), slot);
        self.by_email.insert(lead.email_key.clone(), slot);
        self.arena.push(Some(lead));
        slot
    }

    /// Drops the lead's keys where they still point at it and takes it out of the arena.
    ///
    /// A key that was already reassigned to another record is left alone.
    pub fn evict(&mut self, slot: usize) -> Option<TrackedLead> {
        let lead = self.arena.get_mut(slot)?.take()?;

        if self.by_id.get(&lead.id_key) == Some(&slot) {
            self.by_id.shift_remove(&lead.id_key);
        }
        if self.by_email.get(&lead.email_key) == Some(&slot) {
            self.by_email.shift_remove(&lead.email_key);
        }

        Some(lead)
    }

    /// Surviving records in `_id` map order.
    pub fn into_survivors(mut self) -> Vec<LeadRecord> {
        let slots: Vec<usize> = self.by_id.values().copied().collect();
        slots
            .into_iter()
            .filter_map(|slot| self.arena.get_mut(slot).and_then(Option::take))
            .map(|lead| lead.record)
            .collect()
    }
}
