use uuid::Uuid;

use crate::error::Result;
use crate::model::Todo;
use crate::store::{Collection, StorageBackend};

/// Deletes the todo with the given id. Returns the count removed
/// (0 or 1).
pub fn run<B: StorageBackend>(todos: &mut Collection<Todo, B>, id: Uuid) -> Result<usize> {
    todos.remove_one(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TodoDraft;
    use crate::store::MemBackend;
    use std::rc::Rc;

    #[test]
    fn test_delete_removes_record() {
        let mut todos: Collection<Todo, MemBackend> =
            Collection::open(Rc::new(MemBackend::new()), "todos").unwrap();
        let id = todos
            .insert(Todo::from_draft(TodoDraft::new("Doomed")).unwrap())
            .unwrap();

        assert_eq!(run(&mut todos, id).unwrap(), 1);
        assert!(todos.get(&id).is_none());
        // Second delete finds nothing.
        assert_eq!(run(&mut todos, id).unwrap(), 0);
    }
}
