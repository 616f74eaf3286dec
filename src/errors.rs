use thiserror::Error;

/// Fatal input problems. Any of these aborts the whole batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LeadError {
    #[error("record {position} is missing required field '{field}'")]
    MissingField { position: usize, field: &'static str },

    #[error("record {position} has malformed entryDate '{value}'")]
    MalformedTimestamp { position: usize, value: String },
}

pub type LeadResult<T> = std::result::Result<T, LeadError>;
