use uuid::Uuid;

use crate::error::Result;
use crate::model::Todo;
use crate::store::{Collection, StorageBackend};

/// Flips the completion flag of the todo with the given id. Returns the
/// number of records changed (0 when the id matches nothing).
pub fn run<B: StorageBackend>(todos: &mut Collection<Todo, B>, id: Uuid) -> Result<usize> {
    todos.update_one(
        |t| t.id == id,
        |t| {
            t.completed = !t.completed;
            Ok(())
        },
    )
}
