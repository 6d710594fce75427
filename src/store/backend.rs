use crate::error::Result;

/// Abstract interface for raw key-value storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while [`super::collection::Collection`] handles the "what"
/// (records, validation, notification).
///
/// Each collection persists its full snapshot as one JSON document
/// under a stable key; the schema version marker lives under its own
/// key beside the data.
pub trait StorageBackend {
    /// Read the payload stored under `key`.
    /// Returns `Ok(None)` if nothing has been stored yet.
    /// Returns `Err` only on actual I/O errors (permissions, disk failure).
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write a payload under `key`.
    /// MUST be atomic (e.g. write to tmp then rename) so a crash never
    /// leaves a half-written snapshot behind.
    fn write(&self, key: &str, payload: &str) -> Result<()>;

    /// Remove the payload stored under `key`. Removing an absent key is
    /// not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
