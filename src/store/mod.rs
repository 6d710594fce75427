//! # Storage Layer
//!
//! This module defines how records are held and persisted. The
//! [`StorageBackend`] trait abstracts the raw key-value medium;
//! [`Collection`] layers record semantics on top of it.
//!
//! ## Snapshot model
//!
//! Each collection keeps its authoritative records in memory and
//! persists the full set as one JSON document per mutation, under a
//! stable key (`todos`, `folders`). A schema version marker is stored
//! beside the data; see [`schema`].
//!
//! ## Mutation protocol
//!
//! 1. Validate (nothing is committed on a validation failure).
//! 2. Commit to the in-memory set.
//! 3. Persist the snapshot.
//! 4. Notify subscribers synchronously, in registration order.
//!
//! A failed persist does not roll back step 2: the live session stays
//! authoritative and the error propagates as
//! [`TaskError::Persistence`](crate::error::TaskError::Persistence).
//! Mutations that match no record skip steps 2-4 entirely.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one JSON file per key, atomic writes.
//! - [`mem_backend::MemBackend`]: for testing logic without I/O, with a
//!   write-error switch to exercise the persistence-failure policy.

pub mod backend;
pub mod collection;
pub mod fs_backend;
pub mod mem_backend;
pub mod schema;

pub use backend::StorageBackend;
pub use collection::{ChangeEvent, ChangeKind, Collection, FindOptions, Record, SubscriptionId};
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;

/// Key the todo collection snapshot is stored under.
pub const TODOS_KEY: &str = "todos";
/// Key the folder collection snapshot is stored under.
pub const FOLDERS_KEY: &str = "folders";
