use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::clock::Clock;
use crate::config::AppConfig;
use crate::core::filter::{CategoryFilter, TaskFilter};
use crate::core::recurrence::next_occurrence;
use crate::core::task::{Task, TaskDraft, TaskPatch, TaskStatus};
use crate::error::StoreError;
use crate::storage;

/// Delay before a completed recurring task's successor is created. The flip
/// itself is synchronous; the successor appears shortly after.
pub const RECURRENCE_DELAY: Duration = Duration::from_millis(500);

struct StoreInner {
    tasks: Vec<Task>,
    path: PathBuf,
}

/// Owner of the task list. Constructed once at startup and handed to
/// consumers by clone; all mutation funnels through the interior mutex, so
/// writes are serialized and reminder scans never interleave.
///
/// Every mutation rewrites the durable record. A failed write surfaces as
/// `StoreError::Storage` but never rolls back the in-memory change.
#[derive(Clone)]
pub struct TaskStore {
    inner: Arc<Mutex<StoreInner>>,
    clock: Arc<dyn Clock>,
}

impl TaskStore {
    /// Load the durable task record, falling back to the seed set when the
    /// record is missing or unreadable.
    pub fn open(config: &AppConfig, clock: Arc<dyn Clock>) -> Self {
        let path = config.tasks_path();
        let tasks = match storage::load_tasks(&path) {
            Ok(tasks) => tasks,
            Err(e) => {
                log::warn!("Could not load tasks from {}: {e}; seeding", path.display());
                seed_and_persist(&path, clock.now())
            }
        };
        Self {
            inner: Arc::new(Mutex::new(StoreInner { tasks, path })),
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add(&self, draft: TaskDraft) -> Result<Task, StoreError> {
        let task = Task::from_draft(draft, self.clock.now());
        let mut inner = self.lock();
        inner.tasks.push(task.clone());
        persist(&inner)?;
        Ok(task)
    }

    /// Merge a partial update into the matching task.
    pub fn update(&self, id: Uuid, patch: TaskPatch) -> Result<Task, StoreError> {
        let mut inner = self.lock();
        let task = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        patch.apply_to(task);
        let updated = task.clone();
        persist(&inner)?;
        Ok(updated)
    }

    pub fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let before = inner.tasks.len();
        inner.tasks.retain(|t| t.id != id);
        if inner.tasks.len() == before {
            return Err(StoreError::NotFound(id));
        }
        persist(&inner)?;
        Ok(())
    }

    pub fn get_by_id(&self, id: Uuid) -> Option<Task> {
        self.lock().tasks.iter().find(|t| t.id == id).cloned()
    }

    /// Flip pending ⇄ completed. Completing a recurring task schedules its
    /// successor as a deferred fire-and-forget step; if the runtime goes away
    /// before the delay elapses the successor is simply dropped. Without a
    /// runtime the successor is created inline instead.
    pub fn toggle_status(&self, id: Uuid) -> Result<Task, StoreError> {
        let (toggled, persisted) = {
            let mut inner = self.lock();
            let task = inner
                .tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or(StoreError::NotFound(id))?;
            task.status = task.status.toggled();
            let toggled = task.clone();
            (toggled, persist(&inner))
        };

        if toggled.status == TaskStatus::Completed && toggled.is_recurring() {
            self.schedule_next_occurrence(toggled.clone());
        }

        persisted?;
        Ok(toggled)
    }

    fn schedule_next_occurrence(&self, source: Task) {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let store = self.clone();
                handle.spawn(async move {
                    tokio::time::sleep(RECURRENCE_DELAY).await;
                    match store.create_next_occurrence(&source) {
                        Ok(Some(next)) => {
                            log::info!(
                                "Scheduled next occurrence of \"{}\" for {}",
                                next.title,
                                next.due_date
                            );
                        }
                        Ok(None) => {}
                        Err(e) => log::warn!("Failed to create recurring task: {e}"),
                    }
                });
            }
            Err(_) => {
                if let Err(e) = self.create_next_occurrence(&source) {
                    log::warn!("Failed to create recurring task: {e}");
                }
            }
        }
    }

    /// Insert the successor of a completed recurring task. `Ok(None)` once the
    /// series has passed its end date.
    pub fn create_next_occurrence(&self, source: &Task) -> Result<Option<Task>, StoreError> {
        match next_occurrence(source) {
            Some(draft) => self.add(draft).map(Some),
            None => Ok(None),
        }
    }

    /// One reminder scan: under a single lock, mark every due reminder
    /// notified and return the tasks to notify. Persistence here is
    /// best-effort; the notified flags stay set either way.
    pub fn take_due_reminders(&self, now: NaiveDateTime) -> Vec<Task> {
        let mut inner = self.lock();
        let mut due = Vec::new();
        for task in &mut inner.tasks {
            if task.reminder_due(now) {
                if let Some(reminder) = task.reminder.as_mut() {
                    reminder.notified = true;
                }
                due.push(task.clone());
            }
        }
        if !due.is_empty() {
            if let Err(e) = persist(&inner) {
                log::warn!("Failed to persist reminder flags: {e}");
            }
        }
        due
    }

    pub fn all(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    pub fn filtered(&self, filter: TaskFilter) -> Vec<Task> {
        filter.apply(&self.lock().tasks, self.clock.today())
    }

    pub fn by_category(&self, filter: CategoryFilter) -> Vec<Task> {
        filter.apply(&self.lock().tasks)
    }

    pub fn len(&self) -> usize {
        self.lock().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().tasks.is_empty()
    }
}

fn persist(inner: &StoreInner) -> Result<(), StoreError> {
    storage::save_tasks(&inner.path, &inner.tasks)?;
    Ok(())
}

fn seed_and_persist(path: &std::path::Path, now: NaiveDateTime) -> Vec<Task> {
    let tasks = super::seed::seed_tasks(now);
    if let Err(e) = storage::save_tasks(path, &tasks) {
        log::warn!("Could not persist seed tasks: {e}");
    }
    tasks
}
