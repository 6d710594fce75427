use uuid::Uuid;

use crate::error::{Result, TaskError};
use crate::model::{Folder, Todo, TodoPatch};
use crate::store::{Collection, StorageBackend};

/// Applies a patch to the todo with the given id. Returns the number of
/// records changed (0 when the id matches nothing, which is not an
/// error). Re-filing into a folder requires that folder to exist.
pub fn run<B: StorageBackend>(
    todos: &mut Collection<Todo, B>,
    folders: &Collection<Folder, B>,
    id: Uuid,
    patch: &TodoPatch,
) -> Result<usize> {
    if let Some(Some(folder_id)) = patch.folder_id {
        if folders.get(&folder_id).is_none() {
            return Err(TaskError::NotFound(folder_id));
        }
    }
    todos.update_one(|t| t.id == id, |t| t.apply(patch))
}
