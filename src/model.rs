//! # Domain Model: Todos, Folders, and Patches
//!
//! This module defines the two record types the store manages, [`Todo`]
//! and [`Folder`], plus the typed partial-update structs applied by the
//! update operations.
//!
//! ## Field constraints
//!
//! - `title`: 2–100 characters after trimming (stored trimmed).
//! - `description`: optional, at most 500 characters.
//! - `tags`: validated and deduplicated by [`crate::tags::normalize_tags`].
//! - `created_at` is immutable after creation; `updated_at` is refreshed
//!   on every mutation, so `updated_at >= created_at` always holds.
//!
//! ## The root folder
//!
//! Folders form a single-rooted tree. The root has a fixed id
//! ([`ROOT_FOLDER_ID`]) and is the only folder with no parent. It is
//! created once when a store is opened and can never be deleted or
//! moved; its display name and color may be changed.
//!
//! ## Patches
//!
//! Update payloads are explicit structs with every field independently
//! optional. Optional *record* fields (`description`, `due_date`,
//! `folder_id`) use a nested `Option` so a patch can distinguish "leave
//! alone" (`None`) from "clear" (`Some(None)`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, TaskError};
use crate::tags::normalize_tags;

/// Minimum todo title length, in characters, after trimming.
pub const MIN_TITLE_LEN: usize = 2;
/// Maximum todo title length, in characters, after trimming.
pub const MAX_TITLE_LEN: usize = 100;
/// Maximum description length, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// The fixed id of the distinguished root folder.
pub const ROOT_FOLDER_ID: Uuid = Uuid::nil();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl Priority {
    /// Fixed ordering used by priority sort: high > medium > low.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a todo. Everything except the title is optional.
#[derive(Debug, Clone, Default)]
pub struct TodoDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub tags: Vec<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub folder_id: Option<Uuid>,
}

impl TodoDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

impl Todo {
    /// Builds a validated todo from a draft, assigning id and timestamps.
    pub fn from_draft(draft: TodoDraft) -> Result<Self> {
        let now = Utc::now();
        let todo = Self {
            id: Uuid::new_v4(),
            title: draft.title.trim().to_string(),
            description: draft.description,
            completed: false,
            priority: draft.priority,
            tags: normalize_tags(draft.tags)?,
            due_date: draft.due_date,
            folder_id: draft.folder_id,
            created_at: now,
            updated_at: now,
        };
        todo.validate()?;
        Ok(todo)
    }

    pub fn validate(&self) -> Result<()> {
        let title_len = self.title.trim().chars().count();
        if title_len < MIN_TITLE_LEN || title_len > MAX_TITLE_LEN {
            return Err(TaskError::Validation(format!(
                "title must be {}-{} characters after trimming, got {}",
                MIN_TITLE_LEN, MAX_TITLE_LEN, title_len
            )));
        }

        if let Some(desc) = &self.description {
            let len = desc.chars().count();
            if len > MAX_DESCRIPTION_LEN {
                return Err(TaskError::Validation(format!(
                    "description is {} characters long (maximum is {})",
                    len, MAX_DESCRIPTION_LEN
                )));
            }
        }

        for tag in &self.tags {
            crate::tags::validate_tag_name(tag)?;
        }

        Ok(())
    }

    /// Applies a patch field-by-field. Tag sets are re-normalized; the
    /// caller is responsible for re-validating the merged record.
    pub fn apply(&mut self, patch: &TodoPatch) -> Result<()> {
        if let Some(title) = &patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(tags) = &patch.tags {
            self.tags = normalize_tags(tags)?;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(folder_id) = patch.folder_id {
            self.folder_id = folder_id;
        }
        Ok(())
    }
}

impl crate::store::Record for Todo {
    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<()> {
        Todo::validate(self)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Partial update for a todo. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    pub title: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub tags: Option<Vec<String>>,
    /// `Some(None)` clears the due date.
    pub due_date: Option<Option<DateTime<Utc>>>,
    /// `Some(None)` moves the todo back to the root ("unfiled").
    pub folder_id: Option<Option<Uuid>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// `None` exactly for the root folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Builds a validated folder under the given parent.
    pub fn new(name: impl Into<String>, parent_id: Uuid, color: Option<String>) -> Result<Self> {
        let now = Utc::now();
        let folder = Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
            color,
            parent_id: Some(parent_id),
            created_at: now,
            updated_at: now,
        };
        folder.validate()?;
        Ok(folder)
    }

    /// The permanent root folder, created once at store initialization.
    pub fn root() -> Self {
        let now = Utc::now();
        Self {
            id: ROOT_FOLDER_ID,
            name: String::new(),
            color: None,
            parent_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT_FOLDER_ID
    }

    pub fn validate(&self) -> Result<()> {
        match (self.is_root(), self.parent_id) {
            (true, Some(_)) => {
                return Err(TaskError::Validation(
                    "the root folder cannot have a parent".into(),
                ))
            }
            (false, None) => {
                return Err(TaskError::Validation(
                    "only the root folder may have no parent".into(),
                ))
            }
            _ => {}
        }

        if !self.is_root() && self.name.trim().is_empty() {
            return Err(TaskError::Validation("folder name cannot be empty".into()));
        }

        Ok(())
    }

    pub fn apply(&mut self, patch: &FolderPatch) -> Result<()> {
        if let Some(name) = &patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(color) = &patch.color {
            self.color = color.clone();
        }
        Ok(())
    }
}

impl crate::store::Record for Folder {
    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<()> {
        Folder::validate(self)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Partial update for a folder's display attributes. The id and parent
/// are never patched; moves go through the hierarchy operations.
#[derive(Debug, Clone, Default)]
pub struct FolderPatch {
    pub name: Option<String>,
    /// `Some(None)` clears the color.
    pub color: Option<Option<String>>,
}
