pub const ID_FIELD: &str = "_id";
pub const EMAIL_FIELD: &str = "email";
pub const ENTRY_DATE_FIELD: &str = "entryDate";

/// `entryDate` layout; the offset is a literal, only UTC stamps are accepted.
pub const ENTRY_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S+00:00";

pub const DEFAULT_JSON_INDENT: usize = 4;
pub const MAX_JSON_INDENT: usize = 16;

pub const DEFAULT_VERBOSITY: &str = "normal";
pub const VERBOSITY_LEVELS: &[&str] = &["silent", "normal", "verbose"];

pub const LOG_TARGET_CRATE: &str = "lead_sift";
