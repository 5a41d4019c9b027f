use chrono::{NaiveDate, NaiveDateTime};

/// Source of the current time, injected so timer-driven logic can be tested
/// without real wall-clock waits.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Local-naive system time, matching how task timestamps are recorded.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}
