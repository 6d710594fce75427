//! # Statistics Aggregator
//!
//! Derived counts over the full, unfiltered todo set. Nothing here is
//! persisted; consumers recompute after every change notification.
//!
//! The evaluation instant is an explicit parameter so day-boundary
//! semantics (`today_added`, `overdue`) are deterministic under test.
//! `today_added` uses the local calendar day, not a rolling 24h window;
//! a todo is overdue when it is incomplete and its due day is strictly
//! before the evaluation day.

use std::collections::HashMap;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::model::{Priority, Todo};

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
    /// Percentage 0-100 with one-decimal precision; exactly 0 when the
    /// set is empty.
    pub completion_rate: f64,
    /// Todos created during the local calendar day of the evaluation
    /// instant.
    pub today_added: usize,
    /// Incomplete todos whose due day is before the evaluation day.
    pub overdue_count: usize,
}

impl TodoStats {
    pub fn compute(todos: &[Todo], now: DateTime<Local>) -> Self {
        let total = todos.len();
        let completed = todos.iter().filter(|t| t.completed).count();
        let active = total - completed;

        let completion_rate = if total == 0 {
            0.0
        } else {
            round1(completed as f64 / total as f64 * 100.0)
        };

        let today = now.date_naive();
        let today_added = todos
            .iter()
            .filter(|t| t.created_at.with_timezone(&now.timezone()).date_naive() == today)
            .count();

        let overdue_count = todos
            .iter()
            .filter(|t| !t.completed)
            .filter(|t| match t.due_date {
                Some(due) => due.with_timezone(&now.timezone()).date_naive() < today,
                None => false,
            })
            .count();

        Self {
            total,
            completed,
            active,
            completion_rate,
            today_added,
            overdue_count,
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Occurrences of each tag across all todos, independent of any active
/// filter. Todos without tags contribute nothing.
pub fn tag_counts(todos: &[Todo]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for todo in todos {
        for tag in &todo.tags {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// Todo count per priority level, across all todos.
pub fn priority_counts(todos: &[Todo]) -> HashMap<Priority, usize> {
    let mut counts = HashMap::new();
    for todo in todos {
        *counts.entry(todo.priority).or_insert(0) += 1;
    }
    counts
}
