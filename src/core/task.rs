use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::recurrence::Recurrence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }
}

/// Ordered so that `High > Medium > Low`, letting priority views sort with
/// `Reverse(priority)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Brand,
    Personal,
    Gym,
    Content,
    Uncategorized,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Personal => "personal",
            Self::Gym => "gym",
            Self::Content => "content",
            Self::Uncategorized => "uncategorized",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "brand" => Some(Self::Brand),
            "personal" => Some(Self::Personal),
            "gym" => Some(Self::Gym),
            "content" => Some(Self::Content),
            "uncategorized" => Some(Self::Uncategorized),
            _ => None,
        }
    }
}

/// Child checklist item, completable independently of its parent task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
}

impl Subtask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            completed: false,
        }
    }
}

/// One-shot, time-triggered notification attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub enabled: bool,
    pub time: Option<NaiveDateTime>,
    pub notified: bool,
}

impl Reminder {
    pub fn at(time: NaiveDateTime) -> Self {
        Self {
            enabled: true,
            time: Some(time),
            notified: false,
        }
    }

    /// Whether this reminder should fire at `now`. Already-notified and
    /// disabled reminders never fire; neither do reminders without a time.
    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        self.enabled && !self.notified && self.time.is_some_and(|t| now >= t)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub due_time: Option<NaiveTime>,
    pub priority: Priority,
    pub status: TaskStatus,
    pub category: Category,
    pub tags: Vec<String>,
    pub subtasks: Vec<Subtask>,
    pub notes: Option<String>,
    pub add_to_calendar: bool,
    pub created_at: NaiveDateTime,
    pub recurrence: Option<Recurrence>,
    pub reminder: Option<Reminder>,
}

impl Task {
    /// Materialize a draft: fresh id, pending status, caller-supplied creation
    /// time. Duplicate tags are dropped, first occurrence wins.
    pub fn from_draft(draft: TaskDraft, created_at: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            due_time: draft.due_time,
            priority: draft.priority,
            status: TaskStatus::Pending,
            category: draft.category,
            tags: dedup_tags(draft.tags),
            subtasks: draft.subtasks,
            notes: draft.notes,
            add_to_calendar: draft.add_to_calendar,
            created_at,
            recurrence: draft.recurrence,
            reminder: draft.reminder,
        }
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    /// Whether the reminder scan should fire for this task at `now`.
    pub fn reminder_due(&self, now: NaiveDateTime) -> bool {
        !self.status.is_completed() && self.reminder.as_ref().is_some_and(|r| r.is_due(now))
    }
}

/// Caller-settable fields of a new task. `id`, `status`, and `created_at` are
/// assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub due_time: Option<NaiveTime>,
    pub priority: Priority,
    pub category: Category,
    pub tags: Vec<String>,
    pub subtasks: Vec<Subtask>,
    pub notes: Option<String>,
    pub add_to_calendar: bool,
    pub recurrence: Option<Recurrence>,
    pub reminder: Option<Reminder>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date,
            due_time: None,
            priority: Priority::Medium,
            category: Category::Uncategorized,
            tags: Vec::new(),
            subtasks: Vec::new(),
            notes: None,
            add_to_calendar: false,
            recurrence: None,
            reminder: None,
        }
    }
}

/// Partial update. `None` leaves a field alone; for optional fields the inner
/// option distinguishes "set" from "clear". Status is deliberately absent;
/// toggling through the store is the only status transition.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<Option<NaiveTime>>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    pub tags: Option<Vec<String>>,
    pub subtasks: Option<Vec<Subtask>>,
    pub notes: Option<Option<String>>,
    pub add_to_calendar: Option<bool>,
    pub recurrence: Option<Option<Recurrence>>,
    pub reminder: Option<Option<Reminder>>,
}

impl TaskPatch {
    pub fn apply_to(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(due_time) = self.due_time {
            task.due_time = due_time;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(category) = self.category {
            task.category = category;
        }
        if let Some(tags) = self.tags {
            task.tags = dedup_tags(tags);
        }
        if let Some(subtasks) = self.subtasks {
            task.subtasks = subtasks;
        }
        if let Some(notes) = self.notes {
            task.notes = notes;
        }
        if let Some(add_to_calendar) = self.add_to_calendar {
            task.add_to_calendar = add_to_calendar;
        }
        if let Some(recurrence) = self.recurrence {
            task.recurrence = recurrence;
        }
        if let Some(reminder) = self.reminder {
            task.reminder = reminder;
        }
    }
}

/// Drop duplicate tags, keeping first occurrences in order.
fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(tags.len());
    for tag in tags {
        if !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen
}
