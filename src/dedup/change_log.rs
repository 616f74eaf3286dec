use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::constants::{EMAIL_FIELD, ID_FIELD};
use crate::record::LeadRecord;

/// Which identity key matched the superseded record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConflictType {
    #[serde(rename = "_id")]
    Id,
    #[serde(rename = "email")]
    Email,
}

impl ConflictType {
    pub fn field(&self) -> &'static str {
        match self {
            ConflictType::Id => ID_FIELD,
            ConflictType::Email => EMAIL_FIELD,
        }
    }
}

impl fmt::Display for ConflictType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub from: Value,
    pub to: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    pub conflict_type: ConflictType,
    pub source_record: LeadRecord,
    pub output_record: LeadRecord,
    pub changes: IndexMap<String, FieldChange>,
}

impl ChangeLogEntry {
    pub fn new(conflict_type: ConflictType, source_record: LeadRecord, output_record: LeadRecord) -> Self {
        let changes = diff_records(&source_record, &output_record);
        Self {
            conflict_type,
            source_record,
            output_record,
            changes,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Fields of `new` whose value differs from `old`, in `new`'s field order.
///
/// A field missing from `old` always counts as changed and reports `from: null`.
/// Fields only present on `old` are not reported.
pub fn diff_records(old: &LeadRecord, new: &LeadRecord) -> IndexMap<String, FieldChange> {
    new.fields()
        .iter()
        .filter_map(|(field, to)| match old.get(field) {
            Some(from) if from == to => None,
            from => Some((
                field.clone(),
                FieldChange {
                    from: from.cloned().unwrap_or(Value::Null),
                    to: to.clone(),
                },
            )),
        })
        .collect()
}
