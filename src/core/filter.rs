use chrono::NaiveDate;
use std::cmp::Reverse;

use super::task::{Category, Task};

/// Named views over the task list. All derivations are pure: callers supply
/// `today` and get back fresh vectors, the list itself is never touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter {
    All,
    Today,
    Upcoming,
    Completed,
    Priority,
}

impl TaskFilter {
    pub fn apply(&self, tasks: &[Task], today: NaiveDate) -> Vec<Task> {
        match self {
            Self::All => tasks.to_vec(),
            Self::Today => tasks
                .iter()
                .filter(|t| t.due_date == today && !t.status.is_completed())
                .cloned()
                .collect(),
            Self::Upcoming => {
                let week_end = today + chrono::Duration::days(7);
                tasks
                    .iter()
                    .filter(|t| {
                        t.due_date > today && t.due_date <= week_end && !t.status.is_completed()
                    })
                    .cloned()
                    .collect()
            }
            Self::Completed => tasks
                .iter()
                .filter(|t| t.status.is_completed())
                .cloned()
                .collect(),
            Self::Priority => {
                let mut pending: Vec<Task> = tasks
                    .iter()
                    .filter(|t| !t.status.is_completed())
                    .cloned()
                    .collect();
                // stable sort keeps original order within a priority
                pending.sort_by_key(|t| Reverse(t.priority));
                pending
            }
        }
    }
}

/// Category selector: a concrete category, or passthrough for "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        match self {
            Self::All => tasks.to_vec(),
            Self::Only(category) => tasks
                .iter()
                .filter(|t| t.category == *category)
                .cloned()
                .collect(),
        }
    }
}
