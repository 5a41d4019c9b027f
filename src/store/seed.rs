//! Starter task set used when the durable task record is missing or
//! unreadable, positioned relative to the current date so the dashboard has
//! something sensible to show on first run.

use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::core::task::{Category, Priority, Subtask, Task, TaskDraft, TaskStatus};

fn time(h: u32, m: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, 0)
}

pub fn seed_tasks(now: NaiveDateTime) -> Vec<Task> {
    let today = now.date();
    let tomorrow = today + Duration::days(1);
    let next_week = today + Duration::days(7);
    let days_ago = |n: i64| now - Duration::days(n);

    let mut tasks = Vec::new();

    let mut draft = TaskDraft::new("Finalize Summer Collection Designs", today);
    draft.description = Some("Review and approve the final designs for the summer collection.".into());
    draft.due_time = time(14, 0);
    draft.priority = Priority::High;
    draft.category = Category::Brand;
    draft.tags = vec!["design".into(), "collection".into()];
    draft.subtasks = vec![
        Subtask {
            completed: true,
            ..Subtask::new("Review color palette")
        },
        Subtask::new("Approve fabric choices"),
        Subtask::new("Finalize pricing strategy"),
    ];
    draft.notes = Some("Need to focus on sustainability aspects in the marketing materials.".into());
    draft.add_to_calendar = true;
    tasks.push(Task::from_draft(draft, days_ago(1)));

    let mut draft = TaskDraft::new("Schedule Photoshoot for New Collection", tomorrow);
    draft.description =
        Some("Book photographer, models, and location for the upcoming collection photoshoot.".into());
    draft.due_time = time(10, 0);
    draft.category = Category::Content;
    draft.tags = vec!["marketing".into(), "photoshoot".into()];
    draft.add_to_calendar = true;
    tasks.push(Task::from_draft(draft, days_ago(2)));

    let mut draft = TaskDraft::new("Meet with Potential Retail Partner", today);
    draft.description = Some("Discuss collaboration opportunities with Urban Outfitters.".into());
    draft.due_time = time(16, 30);
    draft.priority = Priority::High;
    draft.category = Category::Brand;
    draft.tags = vec!["partnership".into(), "retail".into()];
    draft.notes = Some("Prepare sales figures and growth projections.".into());
    draft.add_to_calendar = true;
    tasks.push(Task::from_draft(draft, days_ago(3)));

    let mut draft = TaskDraft::new("Review Social Media Strategy", tomorrow);
    draft.description =
        Some("Analyze performance of recent campaigns and plan content for next month.".into());
    draft.due_time = time(13, 0);
    draft.category = Category::Content;
    draft.tags = vec!["marketing".into(), "social media".into()];
    tasks.push(Task::from_draft(draft, days_ago(4)));

    let mut draft = TaskDraft::new("Update Website Product Listings", next_week);
    draft.description = Some("Add new products and update inventory for existing items.".into());
    draft.priority = Priority::Low;
    draft.category = Category::Brand;
    draft.tags = vec!["website".into(), "inventory".into()];
    tasks.push(Task::from_draft(draft, days_ago(5)));

    let mut draft = TaskDraft::new("Brainstorm Fall Collection Concepts", next_week);
    draft.description = Some("Generate ideas and themes for the upcoming fall collection.".into());
    draft.category = Category::Brand;
    draft.tags = vec!["design".into(), "planning".into()];
    tasks.push(Task::from_draft(draft, days_ago(6)));

    let mut draft = TaskDraft::new("Order Business Cards", today);
    draft.description = Some("Design and order new business cards with updated branding.".into());
    draft.priority = Priority::Low;
    draft.category = Category::Personal;
    draft.tags = vec!["admin".into()];
    let mut done = Task::from_draft(draft, days_ago(7));
    done.status = TaskStatus::Completed;
    tasks.push(done);

    let mut draft = TaskDraft::new("Morning Workout Session", today);
    draft.description = Some("Complete 45-minute strength training routine.".into());
    draft.due_time = time(7, 30);
    draft.category = Category::Gym;
    draft.tags = vec!["fitness".into(), "routine".into()];
    tasks.push(Task::from_draft(draft, days_ago(3)));

    let mut draft = TaskDraft::new("Plan Content Calendar for Q3", next_week);
    draft.description = Some("Outline social media and blog content for next quarter.".into());
    draft.priority = Priority::High;
    draft.category = Category::Content;
    draft.tags = vec!["planning".into(), "social".into()];
    tasks.push(Task::from_draft(draft, days_ago(2)));

    let mut draft = TaskDraft::new("Schedule Annual Health Checkup", next_week);
    draft.description = Some("Book appointment with primary care physician.".into());
    draft.priority = Priority::Low;
    draft.category = Category::Personal;
    tasks.push(Task::from_draft(draft, days_ago(1)));

    tasks
}
