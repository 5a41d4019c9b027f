use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::task::{Task, TaskDraft};

/// How often a task repeats.
///
/// A task without a recurrence rule simply has `recurrence: None`; there is no
/// sentinel "none" variant, so every `Recurrence` value repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecurrenceKind {
    Daily,
    Weekly,
    Monthly,
    /// Every `interval` days.
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    pub kind: RecurrenceKind,
    /// Day interval, only meaningful for `Custom`. Defaults to 1 when unset.
    pub interval: Option<u32>,
    /// Generation stops once the next due date would pass this bound.
    pub end_date: Option<NaiveDate>,
}

impl Recurrence {
    pub fn new(kind: RecurrenceKind) -> Self {
        Self {
            kind,
            interval: None,
            end_date: None,
        }
    }

    pub fn every_days(interval: u32) -> Self {
        Self {
            kind: RecurrenceKind::Custom,
            interval: Some(interval),
            end_date: None,
        }
    }

    pub fn until(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Due date of the occurrence after one due on `due_date`, ignoring the
    /// end bound.
    pub fn next_due_date(&self, due_date: NaiveDate) -> NaiveDate {
        match self.kind {
            RecurrenceKind::Daily => due_date + chrono::Duration::days(1),
            RecurrenceKind::Weekly => due_date + chrono::Duration::days(7),
            RecurrenceKind::Monthly => add_months(due_date, 1),
            RecurrenceKind::Custom => {
                due_date + chrono::Duration::days(i64::from(self.interval.unwrap_or(1)))
            }
        }
    }

    /// Next due date within the end bound, or `None` once the series has run
    /// out. Running out is a terminal condition, not an error.
    pub fn next_due_date_bounded(&self, due_date: NaiveDate) -> Option<NaiveDate> {
        let next = self.next_due_date(due_date);
        match self.end_date {
            Some(end) if next > end => None,
            _ => Some(next),
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RecurrenceKind::Daily => write!(f, "daily"),
            RecurrenceKind::Weekly => write!(f, "weekly"),
            RecurrenceKind::Monthly => write!(f, "monthly"),
            RecurrenceKind::Custom => write!(f, "every {} days", self.interval.unwrap_or(1)),
        }
    }
}

fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    let total_months = date.month0() + months;
    let new_year = date.year() + (total_months / 12) as i32;
    let new_month = (total_months % 12) + 1;
    // Clamp day to valid range for the new month
    let max_day = days_in_month(new_year, new_month);
    let new_day = date.day().min(max_day);
    NaiveDate::from_ymd_opt(new_year, new_month, new_day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(
        if month == 12 { year + 1 } else { year },
        if month == 12 { 1 } else { month + 1 },
        1,
    )
    .unwrap()
    .pred_opt()
    .unwrap()
    .day()
}

/// Build the successor draft for a just-completed recurring task.
///
/// Returns `None` when the task is not recurring or the series has reached
/// its end date. The draft copies the source task's scheduling and
/// categorization; the reminder carries over un-notified. Subtasks and notes
/// belong to the completed instance and stay behind.
pub fn next_occurrence(task: &Task) -> Option<TaskDraft> {
    let recurrence = task.recurrence.as_ref()?;
    let next_due = recurrence.next_due_date_bounded(task.due_date)?;

    let mut draft = TaskDraft::new(task.title.clone(), next_due);
    draft.description = task.description.clone();
    draft.due_time = task.due_time;
    draft.priority = task.priority;
    draft.category = task.category;
    draft.tags = task.tags.clone();
    draft.add_to_calendar = task.add_to_calendar;
    draft.recurrence = Some(recurrence.clone());
    draft.reminder = task.reminder.clone().map(|mut r| {
        r.notified = false;
        r
    });
    Some(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::task::{Category, Priority, Reminder, TaskStatus};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn daily_advances_one_day() {
        let r = Recurrence::new(RecurrenceKind::Daily);
        assert_eq!(r.next_due_date(date(2024, 1, 1)), date(2024, 1, 2));
    }

    #[test]
    fn weekly_advances_seven_days() {
        let r = Recurrence::new(RecurrenceKind::Weekly);
        assert_eq!(r.next_due_date(date(2024, 1, 1)), date(2024, 1, 8));
    }

    #[test]
    fn monthly_preserves_day_of_month() {
        let r = Recurrence::new(RecurrenceKind::Monthly);
        assert_eq!(r.next_due_date(date(2024, 3, 15)), date(2024, 4, 15));
    }

    #[test]
    fn monthly_clamps_to_month_end() {
        let r = Recurrence::new(RecurrenceKind::Monthly);
        // 2024 is a leap year
        assert_eq!(r.next_due_date(date(2024, 1, 31)), date(2024, 2, 29));
        assert_eq!(r.next_due_date(date(2023, 1, 31)), date(2023, 2, 28));
        assert_eq!(r.next_due_date(date(2024, 12, 15)), date(2025, 1, 15));
    }

    #[test]
    fn custom_uses_interval_with_default_one() {
        assert_eq!(
            Recurrence::every_days(3).next_due_date(date(2024, 1, 1)),
            date(2024, 1, 4)
        );
        let unset = Recurrence::new(RecurrenceKind::Custom);
        assert_eq!(unset.next_due_date(date(2024, 1, 1)), date(2024, 1, 2));
    }

    #[test]
    fn bounded_stops_past_end_date() {
        let r = Recurrence::new(RecurrenceKind::Daily).until(date(2024, 1, 1));
        assert_eq!(r.next_due_date_bounded(date(2024, 1, 1)), None);

        let open = Recurrence::new(RecurrenceKind::Daily).until(date(2024, 1, 5));
        assert_eq!(
            open.next_due_date_bounded(date(2024, 1, 1)),
            Some(date(2024, 1, 2))
        );
        // next date landing exactly on the bound still counts
        assert_eq!(
            open.next_due_date_bounded(date(2024, 1, 4)),
            Some(date(2024, 1, 5))
        );
    }

    #[test]
    fn next_occurrence_copies_fields_and_resets_reminder() {
        let created = date(2024, 1, 1).and_hms_opt(8, 0, 0).unwrap();
        let mut draft = TaskDraft::new("Water plants", date(2024, 1, 1));
        draft.priority = Priority::High;
        draft.category = Category::Personal;
        draft.tags = vec!["home".into()];
        draft.recurrence = Some(Recurrence::new(RecurrenceKind::Daily));
        let mut reminder = Reminder::at(date(2024, 1, 1).and_hms_opt(7, 0, 0).unwrap());
        reminder.notified = true;
        draft.reminder = Some(reminder);

        let mut task = Task::from_draft(draft, created);
        task.status = TaskStatus::Completed;

        let next = next_occurrence(&task).expect("series continues");
        assert_eq!(next.due_date, date(2024, 1, 2));
        assert_eq!(next.title, "Water plants");
        assert_eq!(next.priority, Priority::High);
        assert_eq!(next.category, Category::Personal);
        assert_eq!(next.tags, vec!["home".to_string()]);
        assert!(!next.reminder.unwrap().notified);
        assert!(next.subtasks.is_empty());
    }

    #[test]
    fn next_occurrence_none_past_end_date() {
        let created = date(2024, 1, 1).and_hms_opt(8, 0, 0).unwrap();
        let mut draft = TaskDraft::new("t", date(2024, 1, 1));
        draft.recurrence = Some(Recurrence::new(RecurrenceKind::Daily).until(date(2024, 1, 1)));
        let task = Task::from_draft(draft, created);
        assert!(next_occurrence(&task).is_none());
    }

    #[test]
    fn next_occurrence_none_without_recurrence() {
        let created = date(2024, 1, 1).and_hms_opt(8, 0, 0).unwrap();
        let task = Task::from_draft(TaskDraft::new("t", date(2024, 1, 1)), created);
        assert!(next_occurrence(&task).is_none());
    }
}
