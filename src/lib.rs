pub mod clock;
pub mod config;
pub mod core;
pub mod error;
pub mod reminder;
pub mod storage;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use config::AppConfig;
pub use error::{AuthError, StorageError, StoreError};
pub use reminder::{LogNotifier, Notifier, ReminderScanner, ScannerHandle};
pub use store::{SessionStore, TaskStore};
