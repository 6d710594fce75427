//! # Folder Tree Helpers
//!
//! Folders carry plain parent pointers; ancestry questions (cycle
//! checks before a move, descendant closures before a cascading
//! delete) need the inverse relation. [`FolderTree`] is that inverse: a
//! `parent -> children` index built from the current folder set and
//! discarded after use. It is never cached across mutations.

use std::collections::HashMap;

use uuid::Uuid;

use crate::model::Folder;

/// Parent-to-children index over a folder snapshot.
pub struct FolderTree {
    children: HashMap<Uuid, Vec<Uuid>>,
}

impl FolderTree {
    pub fn build(folders: &[Folder]) -> Self {
        let mut children: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for folder in folders {
            if let Some(parent_id) = folder.parent_id {
                children.entry(parent_id).or_default().push(folder.id);
            }
        }
        Self { children }
    }

    pub fn children_of(&self, id: Uuid) -> &[Uuid] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The full descendant closure of `id`, excluding `id` itself.
    pub fn descendant_ids(&self, id: Uuid) -> Vec<Uuid> {
        let mut result = Vec::new();
        let mut stack: Vec<Uuid> = self.children_of(id).to_vec();
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend_from_slice(self.children_of(current));
        }
        result
    }

    /// Whether `candidate` is in the descendant closure of `ancestor`.
    /// A folder is not its own descendant.
    pub fn is_descendant(&self, ancestor: Uuid, candidate: Uuid) -> bool {
        let mut stack: Vec<Uuid> = self.children_of(ancestor).to_vec();
        while let Some(current) = stack.pop() {
            if current == candidate {
                return true;
            }
            stack.extend_from_slice(self.children_of(current));
        }
        false
    }
}
