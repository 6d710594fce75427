//! Schema versioning for the persisted snapshots.
//!
//! A version marker is stored beside the collection documents. On open,
//! a stored version older than [`CURRENT_SCHEMA_VERSION`] runs the
//! migration chain before any query is served. The only migration
//! currently defined is 0 -> 1, a no-op: version 0 stores carried the
//! same document shape and merely lacked the marker.

use tracing::info;

use super::backend::StorageBackend;
use crate::error::{Result, TaskError};

/// Key the version marker is stored under.
pub const SCHEMA_VERSION_KEY: &str = "schema-version";

/// Version written by the running code.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Reads the stored schema version. Absent marker means version 0
/// (pre-versioning store) when data exists, or a fresh store otherwise.
pub fn stored_version<B: StorageBackend>(backend: &B) -> Result<u32> {
    match backend.read(SCHEMA_VERSION_KEY)? {
        Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
            TaskError::Validation(format!("stored schema version is not a number: '{}'", raw))
        }),
        None => Ok(0),
    }
}

/// Brings the stored data up to [`CURRENT_SCHEMA_VERSION`], one step at
/// a time, then writes the marker.
pub fn migrate<B: StorageBackend>(backend: &B) -> Result<()> {
    let mut version = stored_version(backend)?;

    if version > CURRENT_SCHEMA_VERSION {
        return Err(TaskError::Validation(format!(
            "store was written by a newer schema (found {}, expected at most {})",
            version, CURRENT_SCHEMA_VERSION
        )));
    }

    while version < CURRENT_SCHEMA_VERSION {
        match version {
            // 0 -> 1: marker introduced, document shape unchanged.
            0 => {}
            _ => unreachable!("no migration defined from version {}", version),
        }
        version += 1;
        info!(version, "migrated store schema");
    }

    backend.write(SCHEMA_VERSION_KEY, &CURRENT_SCHEMA_VERSION.to_string())?;
    Ok(())
}
