//! Bulk todo operations. Each runs as a single mutation: one snapshot
//! write, one notification, regardless of how many records it touches.

use crate::error::Result;
use crate::model::Todo;
use crate::store::{Collection, StorageBackend};

/// Deletes every completed todo, returning the count removed.
pub fn clear_completed<B: StorageBackend>(todos: &mut Collection<Todo, B>) -> Result<usize> {
    todos.remove_many(|t| t.completed)
}

/// Deletes every todo, returning the count removed.
pub fn clear_all<B: StorageBackend>(todos: &mut Collection<Todo, B>) -> Result<usize> {
    todos.remove_many(|_| true)
}

/// Marks every active todo completed. Already-completed todos are left
/// untouched so their `updated_at` does not churn.
pub fn mark_all_completed<B: StorageBackend>(todos: &mut Collection<Todo, B>) -> Result<usize> {
    todos.update_many(
        |t| !t.completed,
        |t| {
            t.completed = true;
            Ok(())
        },
    )
}

/// Marks every completed todo active again.
pub fn mark_all_active<B: StorageBackend>(todos: &mut Collection<Todo, B>) -> Result<usize> {
    todos.update_many(
        |t| t.completed,
        |t| {
            t.completed = false;
            Ok(())
        },
    )
}
