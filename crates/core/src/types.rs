/// Profile identifiers are UUIDs assigned by the persistence service.
pub type ProfileId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
