//! Folder hierarchy operations: create, rename/recolor, move with cycle
//! prevention, and cascading delete.
//!
//! The move cycle check runs BEFORE any pointer mutation; mutating first
//! and checking after would corrupt the tree. Cascading delete removes
//! todos before folders so no todo ever references a folder that no
//! longer exists, even transiently.

use std::collections::HashSet;

use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, TaskError};
use crate::hierarchy::FolderTree;
use crate::model::{Folder, FolderPatch, Todo, ROOT_FOLDER_ID};
use crate::store::{Collection, StorageBackend};

/// What a cascading folder delete removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeOutcome {
    pub folders_removed: usize,
    pub todos_removed: usize,
}

/// Creates a folder under `parent_id` (the root when `None`).
pub fn create<B: StorageBackend>(
    folders: &mut Collection<Folder, B>,
    name: impl Into<String>,
    parent_id: Option<Uuid>,
    color: Option<String>,
) -> Result<Uuid> {
    let parent = parent_id.unwrap_or(ROOT_FOLDER_ID);
    if folders.get(&parent).is_none() {
        return Err(TaskError::NotFound(parent));
    }
    folders.insert(Folder::new(name, parent, color)?)
}

/// Partial update of a folder's display attributes. The root's name and
/// color may be changed like any other folder's; its id and parent
/// cannot, because the patch type has no such fields.
pub fn rename<B: StorageBackend>(
    folders: &mut Collection<Folder, B>,
    id: Uuid,
    patch: &FolderPatch,
) -> Result<usize> {
    folders.update_one(|f| f.id == id, |f| f.apply(patch))
}

/// Reparents a folder. Rejected with [`TaskError::Cycle`] when the
/// folder is the root, the target is the folder itself, or the target
/// lies in the folder's own subtree. Moving a folder to the parent it
/// already has is a no-op.
pub fn move_folder<B: StorageBackend>(
    folders: &mut Collection<Folder, B>,
    id: Uuid,
    new_parent: Uuid,
) -> Result<()> {
    if id == ROOT_FOLDER_ID || new_parent == id {
        return Err(TaskError::Cycle {
            folder: id,
            target: new_parent,
        });
    }

    let folder = folders.get(&id).ok_or(TaskError::NotFound(id))?;
    if folders.get(&new_parent).is_none() {
        return Err(TaskError::NotFound(new_parent));
    }

    let tree = FolderTree::build(&folders.all());
    if tree.is_descendant(id, new_parent) {
        return Err(TaskError::Cycle {
            folder: id,
            target: new_parent,
        });
    }

    if folder.parent_id == Some(new_parent) {
        return Ok(());
    }

    folders.update_one(
        |f| f.id == id,
        |f| {
            f.parent_id = Some(new_parent);
            Ok(())
        },
    )?;
    Ok(())
}

/// Deletes a folder together with its descendant closure and every todo
/// filed in any of those folders. The root cannot be deleted.
pub fn delete<B: StorageBackend>(
    todos: &mut Collection<Todo, B>,
    folders: &mut Collection<Folder, B>,
    id: Uuid,
) -> Result<CascadeOutcome> {
    if id == ROOT_FOLDER_ID {
        return Err(TaskError::Validation(
            "the root folder cannot be deleted".into(),
        ));
    }
    if folders.get(&id).is_none() {
        return Err(TaskError::NotFound(id));
    }

    let tree = FolderTree::build(&folders.all());
    let mut doomed: HashSet<Uuid> = tree.descendant_ids(id).into_iter().collect();
    doomed.insert(id);

    // Todos first: the tree must never transiently contain a todo whose
    // folder is already gone.
    let todos_removed = todos.remove_many(|t| t.folder_id.is_some_and(|f| doomed.contains(&f)))?;
    let folders_removed = folders.remove_many(|f| doomed.contains(&f.id))?;

    debug!(folder = %id, folders_removed, todos_removed, "cascading folder delete");
    Ok(CascadeOutcome {
        folders_removed,
        todos_removed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TodoDraft;
    use crate::store::MemBackend;
    use std::rc::Rc;

    fn make_collections() -> (Collection<Todo, MemBackend>, Collection<Folder, MemBackend>) {
        let backend = Rc::new(MemBackend::new());
        let todos = Collection::open(backend.clone(), "todos").unwrap();
        let mut folders = Collection::open(backend, "folders").unwrap();
        folders.insert(Folder::root()).unwrap();
        (todos, folders)
    }

    fn file_todo(
        todos: &mut Collection<Todo, MemBackend>,
        title: &str,
        folder: Uuid,
    ) -> Uuid {
        let mut draft = TodoDraft::new(title);
        draft.folder_id = Some(folder);
        todos.insert(Todo::from_draft(draft).unwrap()).unwrap()
    }

    #[test]
    fn test_create_under_root_by_default() {
        let (_, mut folders) = make_collections();
        let id = create(&mut folders, "Inbox", None, None).unwrap();
        assert_eq!(folders.get(&id).unwrap().parent_id, Some(ROOT_FOLDER_ID));
    }

    #[test]
    fn test_create_under_missing_parent_fails() {
        let (_, mut folders) = make_collections();
        let err = create(&mut folders, "Nowhere", Some(Uuid::new_v4()), None).unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));
    }

    #[test]
    fn test_rename_and_recolor() {
        let (_, mut folders) = make_collections();
        let id = create(&mut folders, "Old", None, Some("#123456".into())).unwrap();

        let changed = rename(
            &mut folders,
            id,
            &FolderPatch {
                name: Some("New".into()),
                color: Some(None),
            },
        )
        .unwrap();

        assert_eq!(changed, 1);
        let folder = folders.get(&id).unwrap();
        assert_eq!(folder.name, "New");
        assert!(folder.color.is_none());
    }

    #[test]
    fn test_root_display_attributes_are_mutable() {
        let (_, mut folders) = make_collections();
        let changed = rename(
            &mut folders,
            ROOT_FOLDER_ID,
            &FolderPatch {
                name: Some("Everything".into()),
                color: None,
            },
        )
        .unwrap();
        assert_eq!(changed, 1);
        assert_eq!(folders.get(&ROOT_FOLDER_ID).unwrap().name, "Everything");
    }

    #[test]
    fn test_move_updates_parent() {
        let (_, mut folders) = make_collections();
        let a = create(&mut folders, "A", None, None).unwrap();
        let b = create(&mut folders, "B", None, None).unwrap();

        move_folder(&mut folders, b, a).unwrap();
        assert_eq!(folders.get(&b).unwrap().parent_id, Some(a));
    }

    #[test]
    fn test_move_root_is_a_cycle_error() {
        let (_, mut folders) = make_collections();
        let a = create(&mut folders, "A", None, None).unwrap();
        let err = move_folder(&mut folders, ROOT_FOLDER_ID, a).unwrap_err();
        assert!(matches!(err, TaskError::Cycle { .. }));
    }

    #[test]
    fn test_move_into_self_is_a_cycle_error() {
        let (_, mut folders) = make_collections();
        let a = create(&mut folders, "A", None, None).unwrap();
        let err = move_folder(&mut folders, a, a).unwrap_err();
        assert!(matches!(err, TaskError::Cycle { .. }));
    }

    #[test]
    fn test_move_into_descendant_is_a_cycle_error() {
        let (_, mut folders) = make_collections();
        // root -> a -> b
        let a = create(&mut folders, "A", None, None).unwrap();
        let b = create(&mut folders, "B", Some(a), None).unwrap();

        let tree = FolderTree::build(&folders.all());
        assert!(tree.is_descendant(a, b));

        let err = move_folder(&mut folders, a, b).unwrap_err();
        assert!(matches!(err, TaskError::Cycle { .. }));
        // Pointer untouched.
        assert_eq!(folders.get(&a).unwrap().parent_id, Some(ROOT_FOLDER_ID));
    }

    #[test]
    fn test_move_to_missing_target_fails() {
        let (_, mut folders) = make_collections();
        let a = create(&mut folders, "A", None, None).unwrap();
        let err = move_folder(&mut folders, a, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));
    }

    #[test]
    fn test_delete_root_is_rejected() {
        let (mut todos, mut folders) = make_collections();
        assert!(delete(&mut todos, &mut folders, ROOT_FOLDER_ID).is_err());
        assert!(folders.get(&ROOT_FOLDER_ID).is_some());
    }

    #[test]
    fn test_cascading_delete_removes_subtree_and_todos() {
        let (mut todos, mut folders) = make_collections();
        // root -> a -> b, root -> keep
        let a = create(&mut folders, "A", None, None).unwrap();
        let b = create(&mut folders, "B", Some(a), None).unwrap();
        let keep = create(&mut folders, "Keep", None, None).unwrap();

        file_todo(&mut todos, "In A", a);
        file_todo(&mut todos, "In B", b);
        let kept_todo = file_todo(&mut todos, "In Keep", keep);
        let unfiled = todos
            .insert(Todo::from_draft(TodoDraft::new("Unfiled")).unwrap())
            .unwrap();

        let outcome = delete(&mut todos, &mut folders, a).unwrap();
        assert_eq!(outcome.folders_removed, 2);
        assert_eq!(outcome.todos_removed, 2);

        assert!(folders.get(&a).is_none());
        assert!(folders.get(&b).is_none());
        assert!(folders.get(&keep).is_some());
        assert!(todos.get(&kept_todo).is_some());
        assert!(todos.get(&unfiled).is_some());
        assert!(todos.find(|t| t.folder_id == Some(a), Default::default()).is_empty());
        assert!(todos.find(|t| t.folder_id == Some(b), Default::default()).is_empty());
    }
}
