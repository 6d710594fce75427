//! # taskdeck
//!
//! An in-memory reactive record store for a task manager: todos grouped
//! into a folder hierarchy, with declarative filtering, derived
//! statistics, and windowed list rendering for large collections.
//!
//! The crate is the application core only. UI concerns (rendering,
//! routing, styling) live outside and call in through
//! [`api::TodoApi`], re-rendering when a change notification fires.
//!
//! ## Architecture
//!
//! - [`model`]: the [`Todo`](model::Todo) and [`Folder`](model::Folder)
//!   records and their typed patches.
//! - [`store`]: collections over a pluggable storage backend, with the
//!   persist-then-notify mutation protocol.
//! - [`query`]: declarative filters, search, and sorting.
//! - [`stats`]: derived counts, recomputed from the full set.
//! - [`hierarchy`]: folder tree traversal for cycle checks and
//!   cascading deletes.
//! - [`window`]: visible-slice computation for long lists.
//! - [`commands`] + [`api`]: the operation contract the UI calls.
//!
//! Everything is single-threaded and synchronous: a mutation persists,
//! notifies, and returns before the caller proceeds.
//!
//! ## Example
//!
//! ```
//! use taskdeck::api::TodoApi;
//! use taskdeck::model::TodoDraft;
//! use taskdeck::store::MemBackend;
//!
//! let mut api = TodoApi::open(MemBackend::new()).unwrap();
//! let id = api.create_todo(TodoDraft::new("Write the report")).unwrap();
//! api.toggle_todo(id).unwrap();
//! assert_eq!(api.stats().completed, 1);
//! ```

pub mod api;
pub mod commands;
pub mod error;
pub mod hierarchy;
pub mod model;
pub mod query;
pub mod stats;
pub mod store;
pub mod tags;
pub mod window;

pub use api::TodoApi;
pub use error::{Result, TaskError};
pub use model::{Folder, FolderPatch, Priority, Todo, TodoDraft, TodoPatch, ROOT_FOLDER_ID};
pub use query::{sort_todos, Filter, SortDirection, SortField, StatusFilter};
pub use stats::TodoStats;
pub use store::{ChangeEvent, ChangeKind, FsBackend, MemBackend, StorageBackend, SubscriptionId};
pub use window::{compute as compute_window, Window, WindowConfig};
