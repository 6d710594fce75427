use uuid::Uuid;

use crate::error::{Result, TaskError};
use crate::model::{Folder, Todo, TodoDraft};
use crate::store::{Collection, StorageBackend};

/// Creates a todo from a draft. The target folder, when given, must
/// exist.
pub fn run<B: StorageBackend>(
    todos: &mut Collection<Todo, B>,
    folders: &Collection<Folder, B>,
    draft: TodoDraft,
) -> Result<Uuid> {
    if let Some(folder_id) = draft.folder_id {
        if folders.get(&folder_id).is_none() {
            return Err(TaskError::NotFound(folder_id));
        }
    }
    let todo = Todo::from_draft(draft)?;
    todos.insert(todo)
}
