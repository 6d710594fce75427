//! # API Facade
//!
//! The single entry point the UI collaborator calls. The facade owns
//! the two collections, bootstraps the root folder, and dispatches to
//! the command layer; business logic lives in `commands/*.rs`, not
//! here.
//!
//! The facade returns data structures, never formatted output, and is
//! generic over [`StorageBackend`] so tests run against
//! [`MemBackend`](crate::store::MemBackend) while production uses
//! [`FsBackend`](crate::store::FsBackend) (or whatever medium stands in
//! for the browser's local storage).
//!
//! Derived views are recomputed on demand from current store contents:
//! nothing here caches a filtered list, a stat, or a window across
//! mutations.

use std::collections::HashMap;
use std::rc::Rc;

use chrono::Local;
use uuid::Uuid;

use crate::commands;
use crate::error::Result;
use crate::hierarchy::FolderTree;
use crate::model::{Folder, FolderPatch, Priority, Todo, TodoDraft, TodoPatch, ROOT_FOLDER_ID};
use crate::query::Filter;
use crate::stats::{self, TodoStats};
use crate::store::{
    schema, ChangeEvent, Collection, FindOptions, StorageBackend, SubscriptionId, FOLDERS_KEY,
    TODOS_KEY,
};

pub use crate::commands::CascadeOutcome;

/// The main facade over the todo and folder stores.
///
/// Exactly one instance per backend for the lifetime of the process;
/// every read and write goes through it.
pub struct TodoApi<B: StorageBackend> {
    todos: Collection<Todo, B>,
    folders: Collection<Folder, B>,
}

impl<B: StorageBackend> TodoApi<B> {
    /// Opens the store: runs pending schema migrations, loads both
    /// collections, and creates the root folder if this is a fresh
    /// store.
    pub fn open(backend: B) -> Result<Self> {
        Self::open_shared(Rc::new(backend))
    }

    /// [`Self::open`] over an already-shared backend, so tests can keep
    /// a handle to it.
    pub fn open_shared(backend: Rc<B>) -> Result<Self> {
        schema::migrate(backend.as_ref())?;
        let todos = Collection::open(backend.clone(), TODOS_KEY)?;
        let mut folders = Collection::open(backend, FOLDERS_KEY)?;
        if folders.get(&ROOT_FOLDER_ID).is_none() {
            folders.insert(Folder::root())?;
        }
        Ok(Self { todos, folders })
    }

    // --- Todo CRUD ---

    pub fn create_todo(&mut self, draft: TodoDraft) -> Result<Uuid> {
        commands::create::run(&mut self.todos, &self.folders, draft)
    }

    pub fn update_todo(&mut self, id: Uuid, patch: &TodoPatch) -> Result<usize> {
        commands::update::run(&mut self.todos, &self.folders, id, patch)
    }

    pub fn toggle_todo(&mut self, id: Uuid) -> Result<usize> {
        commands::toggle::run(&mut self.todos, id)
    }

    pub fn delete_todo(&mut self, id: Uuid) -> Result<usize> {
        commands::delete::run(&mut self.todos, id)
    }

    pub fn todo(&self, id: Uuid) -> Option<Todo> {
        self.todos.get(&id)
    }

    /// Every todo, in insertion order.
    pub fn todos(&self) -> Vec<Todo> {
        self.todos.all()
    }

    // --- Queries ---

    pub fn filter_todos(&self, filter: &Filter) -> Vec<Todo> {
        self.todos.find(|t| filter.matches(t), FindOptions::default())
    }

    /// Filtered read with pagination over the matching sequence.
    pub fn find_todos(&self, filter: &Filter, options: FindOptions) -> Vec<Todo> {
        self.todos.find(|t| filter.matches(t), options)
    }

    /// Free-text search across title, description, and tags.
    pub fn search_todos(&self, term: &str) -> Vec<Todo> {
        self.filter_todos(&Filter::search_term(term))
    }

    // --- Aggregates ---

    pub fn stats(&self) -> TodoStats {
        TodoStats::compute(&self.todos.all(), Local::now())
    }

    pub fn tag_stats(&self) -> HashMap<String, usize> {
        stats::tag_counts(&self.todos.all())
    }

    pub fn priority_stats(&self) -> HashMap<Priority, usize> {
        stats::priority_counts(&self.todos.all())
    }

    // --- Bulk ---

    pub fn clear_completed(&mut self) -> Result<usize> {
        commands::bulk::clear_completed(&mut self.todos)
    }

    pub fn clear_all(&mut self) -> Result<usize> {
        commands::bulk::clear_all(&mut self.todos)
    }

    pub fn mark_all_completed(&mut self) -> Result<usize> {
        commands::bulk::mark_all_completed(&mut self.todos)
    }

    pub fn mark_all_active(&mut self) -> Result<usize> {
        commands::bulk::mark_all_active(&mut self.todos)
    }

    // --- Folders ---

    pub fn create_folder(
        &mut self,
        name: impl Into<String>,
        parent_id: Option<Uuid>,
        color: Option<String>,
    ) -> Result<Uuid> {
        commands::folders::create(&mut self.folders, name, parent_id, color)
    }

    pub fn rename_folder(&mut self, id: Uuid, patch: &FolderPatch) -> Result<usize> {
        commands::folders::rename(&mut self.folders, id, patch)
    }

    pub fn move_folder(&mut self, id: Uuid, new_parent: Uuid) -> Result<()> {
        commands::folders::move_folder(&mut self.folders, id, new_parent)
    }

    pub fn delete_folder(&mut self, id: Uuid) -> Result<CascadeOutcome> {
        commands::folders::delete(&mut self.todos, &mut self.folders, id)
    }

    pub fn folder(&self, id: Uuid) -> Option<Folder> {
        self.folders.get(&id)
    }

    /// Every folder, root included, in insertion order.
    pub fn folders(&self) -> Vec<Folder> {
        self.folders.all()
    }

    /// The descendant closure of a folder, excluding the folder itself.
    pub fn descendant_ids(&self, id: Uuid) -> Vec<Uuid> {
        FolderTree::build(&self.folders.all()).descendant_ids(id)
    }

    pub fn is_descendant(&self, ancestor: Uuid, candidate: Uuid) -> bool {
        FolderTree::build(&self.folders.all()).is_descendant(ancestor, candidate)
    }

    // --- Subscriptions ---

    /// Notified synchronously after every effective todo mutation.
    pub fn subscribe_todos(
        &mut self,
        callback: impl FnMut(&ChangeEvent) + 'static,
    ) -> SubscriptionId {
        self.todos.subscribe(callback)
    }

    pub fn unsubscribe_todos(&mut self, id: SubscriptionId) -> bool {
        self.todos.unsubscribe(id)
    }

    /// Notified synchronously after every effective folder mutation.
    pub fn subscribe_folders(
        &mut self,
        callback: impl FnMut(&ChangeEvent) + 'static,
    ) -> SubscriptionId {
        self.folders.subscribe(callback)
    }

    pub fn unsubscribe_folders(&mut self, id: SubscriptionId) -> bool {
        self.folders.unsubscribe(id)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::store::MemBackend;

    /// An in-memory api pre-seeded with records, for tests.
    pub struct ApiFixture {
        pub api: TodoApi<MemBackend>,
    }

    impl Default for ApiFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ApiFixture {
        pub fn new() -> Self {
            Self {
                api: TodoApi::open(MemBackend::new()).unwrap(),
            }
        }

        pub fn with_todos(mut self, count: usize) -> Self {
            for i in 0..count {
                self.api
                    .create_todo(TodoDraft::new(format!("Test todo {}", i + 1)))
                    .unwrap();
            }
            self
        }

        pub fn with_completed_todo(mut self, title: &str) -> Self {
            let id = self.api.create_todo(TodoDraft::new(title)).unwrap();
            self.api.toggle_todo(id).unwrap();
            self
        }

        pub fn with_tagged_todo(mut self, title: &str, tags: &[&str]) -> Self {
            let mut draft = TodoDraft::new(title);
            draft.tags = tags.iter().map(|t| t.to_string()).collect();
            self.api.create_todo(draft).unwrap();
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::ApiFixture;
    use super::*;
    use crate::query::StatusFilter;
    use crate::store::MemBackend;
    use std::cell::RefCell;

    #[test]
    fn test_open_creates_root_folder() {
        let api = TodoApi::open(MemBackend::new()).unwrap();
        let root = api.folder(ROOT_FOLDER_ID).unwrap();
        assert!(root.is_root());
        assert_eq!(api.folders().len(), 1);
    }

    #[test]
    fn test_reopen_does_not_duplicate_root() {
        let backend = Rc::new(MemBackend::new());
        {
            let _ = TodoApi::open_shared(backend.clone()).unwrap();
        }
        let api = TodoApi::open_shared(backend).unwrap();
        assert_eq!(api.folders().len(), 1);
    }

    #[test]
    fn test_state_survives_reopen() {
        let backend = Rc::new(MemBackend::new());
        let id = {
            let mut api = TodoApi::open_shared(backend.clone()).unwrap();
            api.create_todo(TodoDraft::new("Durable")).unwrap()
        };

        let api = TodoApi::open_shared(backend).unwrap();
        assert_eq!(api.todo(id).unwrap().title, "Durable");
    }

    #[test]
    fn test_created_todo_is_findable() {
        let mut api = TodoApi::open(MemBackend::new()).unwrap();
        let mut draft = TodoDraft::new("Find me");
        draft.tags = vec!["work".into()];
        let id = api.create_todo(draft).unwrap();

        let found = api.todo(id).unwrap();
        assert_eq!(found.title, "Find me");
        assert_eq!(found.tags, vec!["work"]);
        assert!(found.updated_at >= found.created_at);
    }

    #[test]
    fn test_status_filters_partition_the_set() {
        let fixture = ApiFixture::new()
            .with_todos(3)
            .with_completed_todo("Done one")
            .with_completed_todo("Done two");
        let api = fixture.api;

        let active = api.filter_todos(&Filter {
            status: StatusFilter::Active,
            ..Filter::default()
        });
        let completed = api.filter_todos(&Filter {
            status: StatusFilter::Completed,
            ..Filter::default()
        });

        assert_eq!(active.len() + completed.len(), api.todos().len());
        assert!(active.iter().all(|t| !t.completed));
        assert!(completed.iter().all(|t| t.completed));
    }

    #[test]
    fn test_search_todos() {
        let fixture = ApiFixture::new()
            .with_tagged_todo("Pay rent", &["home"])
            .with_tagged_todo("Team standup", &["work"]);
        let api = fixture.api;

        assert_eq!(api.search_todos("RENT").len(), 1);
        assert_eq!(api.search_todos("work").len(), 1);
        assert!(api.search_todos("nothing").is_empty());
    }

    #[test]
    fn test_stats_and_tag_stats() {
        let fixture = ApiFixture::new()
            .with_tagged_todo("A", &["work"])
            .with_tagged_todo("B", &["work"])
            .with_tagged_todo("C", &["home"])
            .with_completed_todo("Done");
        let api = fixture.api;

        let stats = api.stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.active, 3);
        assert_eq!(stats.completion_rate, 25.0);
        assert_eq!(stats.today_added, 4);

        let tags = api.tag_stats();
        assert_eq!(tags["work"], 2);
        assert_eq!(tags["home"], 1);
    }

    #[test]
    fn test_subscription_fires_on_facade_mutations() {
        let mut api = TodoApi::open(MemBackend::new()).unwrap();
        let events = Rc::new(RefCell::new(Vec::new()));
        let events_inner = events.clone();
        api.subscribe_todos(move |e| events_inner.borrow_mut().push(*e));

        let id = api.create_todo(TodoDraft::new("Watch me")).unwrap();
        api.toggle_todo(id).unwrap();
        api.delete_todo(id).unwrap();

        let kinds: Vec<_> = events.borrow().iter().map(|e| e.kind).collect();
        use crate::store::ChangeKind::*;
        assert_eq!(kinds, vec![Inserted, Updated, Removed]);
    }

    #[test]
    fn test_folder_cascade_through_facade() {
        let mut api = TodoApi::open(MemBackend::new()).unwrap();
        let a = api.create_folder("A", None, None).unwrap();
        let b = api.create_folder("B", Some(a), None).unwrap();

        let mut draft = TodoDraft::new("Filed deep");
        draft.folder_id = Some(b);
        api.create_todo(draft).unwrap();

        assert!(api.is_descendant(a, b));
        assert_eq!(api.descendant_ids(a), vec![b]);

        let outcome = api.delete_folder(a).unwrap();
        assert_eq!(outcome.folders_removed, 2);
        assert_eq!(outcome.todos_removed, 1);
        assert!(api.todos().is_empty());
    }

    #[test]
    fn test_fixture_builders() {
        let fixture = ApiFixture::default()
            .with_todos(2)
            .with_completed_todo("Done")
            .with_tagged_todo("Tagged", &["work"]);
        let api = fixture.api;

        assert_eq!(api.todos().len(), 4);
        assert_eq!(api.stats().completed, 1);
        assert_eq!(api.tag_stats()["work"], 1);
    }
}
