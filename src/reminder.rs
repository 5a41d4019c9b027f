//! Timer-driven reminder scanning. A spawned scanner wakes on a fixed
//! interval, asks the task store for due reminders, and pushes each one
//! through the notifier seam. Cancellation is explicit: dropping the handle
//! kills the scanner with the scope that owns it.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::clock::Clock;
use crate::core::task::Task;
use crate::store::TaskStore;

/// How often pending reminders are checked.
pub const SCAN_INTERVAL: Duration = Duration::from_secs(60);

/// Sink for user-visible reminder notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, task: &Task);
}

/// Default sink: structured log output, for hosts without a notification
/// surface of their own.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, task: &Task) {
        log::info!("Reminder: \"{}\" is due soon", task.title);
    }
}

pub struct ReminderScanner {
    store: TaskStore,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
}

impl ReminderScanner {
    pub fn new(store: TaskStore, clock: Arc<dyn Clock>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            clock,
            notifier,
        }
    }

    /// Run one scan and return how many reminders fired. The store marks each
    /// reminder notified under a single lock before this returns, so a
    /// reminder fires at most once even across overlapping callers.
    pub fn scan_once(&self) -> usize {
        let due = self.store.take_due_reminders(self.clock.now());
        for task in &due {
            self.notifier.notify(task);
        }
        due.len()
    }

    /// Start scanning every [`SCAN_INTERVAL`] until the handle is stopped or
    /// dropped.
    pub fn spawn(self) -> ScannerHandle {
        self.spawn_every(SCAN_INTERVAL)
    }

    pub fn spawn_every(self, period: Duration) -> ScannerHandle {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // a stalled host should not trigger a burst of catch-up scans
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let fired = self.scan_once();
                if fired > 0 {
                    log::debug!("Reminder scan fired {fired} notification(s)");
                }
            }
        });
        ScannerHandle { handle }
    }
}

/// Cancellation handle for a running scanner.
pub struct ScannerHandle {
    handle: JoinHandle<()>,
}

impl ScannerHandle {
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for ScannerHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::test_support::ManualClock;
    use crate::config::AppConfig;
    use crate::core::task::{Reminder, TaskDraft};
    use crate::storage;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct CollectingNotifier {
        titles: Mutex<Vec<String>>,
    }

    impl CollectingNotifier {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                titles: Mutex::new(Vec::new()),
            })
        }

        fn titles(&self) -> Vec<String> {
            self.titles.lock().unwrap().clone()
        }
    }

    impl Notifier for CollectingNotifier {
        fn notify(&self, task: &Task) {
            self.titles.lock().unwrap().push(task.title.clone());
        }
    }

    fn base_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn empty_store(dir: &TempDir, clock: Arc<ManualClock>) -> TaskStore {
        let config = AppConfig::with_data_dir(dir.path());
        storage::save_tasks(&config.tasks_path(), &[]).unwrap();
        TaskStore::open(&config, clock)
    }

    #[test]
    fn scan_notifies_due_reminder_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let clock = Arc::new(ManualClock::at(base_now()));
        let store = empty_store(&dir, clock.clone());

        let mut draft = TaskDraft::new("Call supplier", base_now().date());
        draft.reminder = Some(Reminder::at(base_now() - chrono::Duration::minutes(5)));
        store.add(draft).unwrap();

        let notifier = CollectingNotifier::new();
        let scanner = ReminderScanner::new(store, clock, notifier.clone());

        assert_eq!(scanner.scan_once(), 1);
        assert_eq!(notifier.titles(), vec!["Call supplier".to_string()]);

        // second scan must not re-notify
        assert_eq!(scanner.scan_once(), 0);
        assert_eq!(notifier.titles().len(), 1);
    }

    #[test]
    fn scan_skips_future_disabled_and_completed() {
        let dir = tempfile::tempdir().unwrap();
        let clock = Arc::new(ManualClock::at(base_now()));
        let store = empty_store(&dir, clock.clone());

        let mut future = TaskDraft::new("future", base_now().date());
        future.reminder = Some(Reminder::at(base_now() + chrono::Duration::hours(2)));
        store.add(future).unwrap();

        let mut disabled = TaskDraft::new("disabled", base_now().date());
        let mut reminder = Reminder::at(base_now() - chrono::Duration::hours(1));
        reminder.enabled = false;
        disabled.reminder = Some(reminder);
        store.add(disabled).unwrap();

        let mut completed = TaskDraft::new("completed", base_now().date());
        completed.reminder = Some(Reminder::at(base_now() - chrono::Duration::hours(1)));
        let completed = store.add(completed).unwrap();
        store.toggle_status(completed.id).unwrap();

        let notifier = CollectingNotifier::new();
        let scanner = ReminderScanner::new(store, clock.clone(), notifier.clone());
        assert_eq!(scanner.scan_once(), 0);

        // the future reminder fires once its time arrives
        clock.advance(chrono::Duration::hours(3));
        assert_eq!(scanner.scan_once(), 1);
        assert_eq!(notifier.titles(), vec!["future".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn spawned_scanner_fires_and_stops_on_cancel() {
        let dir = tempfile::tempdir().unwrap();
        let clock = Arc::new(ManualClock::at(base_now()));
        let store = empty_store(&dir, clock.clone());

        let mut draft = TaskDraft::new("due now", base_now().date());
        draft.reminder = Some(Reminder::at(base_now() - chrono::Duration::minutes(1)));
        store.add(draft).unwrap();

        let mut later = TaskDraft::new("due later", base_now().date());
        later.reminder = Some(Reminder::at(base_now() + chrono::Duration::minutes(2)));
        store.add(later).unwrap();

        let notifier = CollectingNotifier::new();
        let handle = ReminderScanner::new(store, clock.clone(), notifier.clone()).spawn();

        // first tick happens immediately
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        assert_eq!(notifier.titles(), vec!["due now".to_string()]);

        handle.stop();
        clock.advance(chrono::Duration::minutes(5));
        tokio::time::advance(Duration::from_secs(300)).await;
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;

        // scanner is gone, the later reminder never fires
        assert_eq!(notifier.titles().len(), 1);
    }
}
