//! # Query Engine
//!
//! Declarative filtering and sorting over the todo set. A [`Filter`] is
//! a conjunction: a todo matches only if it satisfies every specified
//! dimension. Within the tag dimension, matching is any-of (the todo's
//! tag set intersects the filter's). Evaluation is pure and recomputed
//! from scratch on every call; at the expected scale (thousands of
//! records) no incremental index is worth maintaining.

use chrono::{DateTime, Utc};

use crate::model::{Priority, Todo};

/// Completion-status dimension of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

/// Conjunction of predicates over the todo set. Unset dimensions match
/// everything.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pub status: StatusFilter,
    /// Exact priority match.
    pub priority: Option<Priority>,
    /// Matches todos whose tag set intersects this set (any-of).
    pub tags: Vec<String>,
    /// Case-insensitive substring match over title, description, and
    /// each tag; a todo matches if ANY of those fields contains the term.
    pub search: Option<String>,
    /// Inclusive range over `created_at`.
    pub created_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl Filter {
    /// A filter matching only todos carrying the search term.
    pub fn search_term(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        match self.status {
            StatusFilter::All => {}
            StatusFilter::Active => {
                if todo.completed {
                    return false;
                }
            }
            StatusFilter::Completed => {
                if !todo.completed {
                    return false;
                }
            }
        }

        if let Some(priority) = self.priority {
            if todo.priority != priority {
                return false;
            }
        }

        if !self.tags.is_empty() && !self.tags.iter().any(|t| todo.tags.contains(t)) {
            return false;
        }

        if let Some(term) = &self.search {
            if !search_matches(todo, term) {
                return false;
            }
        }

        if let Some((start, end)) = self.created_range {
            if todo.created_at < start || todo.created_at > end {
                return false;
            }
        }

        true
    }
}

fn search_matches(todo: &Todo, term: &str) -> bool {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    if todo.title.to_lowercase().contains(&needle) {
        return true;
    }
    if let Some(desc) = &todo.description {
        if desc.to_lowercase().contains(&needle) {
            return true;
        }
    }
    todo.tags.iter().any(|t| t.to_lowercase().contains(&needle))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    /// Case-insensitive lexicographic.
    Title,
    /// high > medium > low.
    Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sorts in place. The sort is stable: todos with equal keys keep their
/// relative input order.
pub fn sort_todos(todos: &mut [Todo], field: SortField, direction: SortDirection) {
    todos.sort_by(|a, b| {
        let ordering = match field {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortField::Priority => a.priority.rank().cmp(&b.priority.rank()),
        };
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}
