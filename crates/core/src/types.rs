/// Row identifiers are opaque strings assigned by the data collaborator.
pub type RowId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
