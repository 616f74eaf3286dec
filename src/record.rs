use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::constants::{EMAIL_FIELD, ENTRY_DATE_FIELD, ENTRY_DATE_FORMAT, ID_FIELD};
use crate::errors::{LeadError, LeadResult};

/// A single lead as read from the input. Field order is preserved on output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct LeadRecord {
    fields: Map<String, Value>,
}

impl LeadRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn id_key(&self, position: usize) -> LeadResult<IdentityKey> {
        self.identity(ID_FIELD, position)
    }

    pub fn email_key(&self, position: usize) -> LeadResult<IdentityKey> {
        self.identity(EMAIL_FIELD, position)
    }

    pub fn entry_date(&self, position: usize) -> LeadResult<NaiveDateTime> {
        let value = self.fields.get(ENTRY_DATE_FIELD).ok_or(LeadError::MissingField {
            position,
            field: ENTRY_DATE_FIELD,
        })?;

        match value {
            Value::String(raw) => parse_entry_date(raw).ok_or_else(|| LeadError::MalformedTimestamp {
                position,
                value: raw.clone(),
            }),
            other => Err(LeadError::MalformedTimestamp {
                position,
                value: other.to_string(),
            }),
        }
    }

    fn identity(&self, field: &'static str, position: usize) -> LeadResult<IdentityKey> {
        self.fields
            .get(field)
            .map(IdentityKey::from_value)
            .ok_or(LeadError::MissingField { position, field })
    }
}

impl From<Map<String, Value>> for LeadRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

impl TryFrom<Value> for LeadRecord {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}

/// Hashable form of an `_id` or `email` value.
///
/// Strings key by their contents. Anything else keys by its JSON text, tagged
/// separately so `"1"` and `1` never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    Text(String),
    Json(String),
}

impl IdentityKey {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => IdentityKey::Text(s.clone()),
            other => IdentityKey::Json(other.to_string()),
        }
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityKey::Text(s) => write!(f, "{}", s),
            IdentityKey::Json(s) => write!(f, "{}", s),
        }
    }
}

/// Strict parse of the `entryDate` layout.
///
/// chrono accepts surrounding whitespace, signed years, unpadded fields and leap
/// seconds, so the parsed value must format back to exactly `raw`.
pub fn parse_entry_date(raw: &str) -> Option<NaiveDateTime> {
    let parsed = NaiveDateTime::parse_from_str(raw, ENTRY_DATE_FORMAT).ok()?;
    if parsed.nanosecond() != 0 || parsed.format(ENTRY_DATE_FORMAT).to_string() != raw {
        return None;
    }
    Some(parsed)
}
