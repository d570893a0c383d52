//! Plain-text schedule export.

use chrono::NaiveDate;

use crate::deadline::Deadline;
use crate::task::Task;

/// Upper bound on tasks listed in an export.
pub const EXPORT_TASK_LIMIT: usize = 10;

const HEADER: &str = "DEADLINER - STUDY SCHEDULE";

/// Render deadlines and up to ten pending tasks (dated today or later).
pub fn render_schedule(deadlines: &[Deadline], tasks: &[Task], today: NaiveDate) -> String {
    let mut s = String::new();
    s.push_str(HEADER);
    s.push('\n');
    s.push_str(&"=".repeat(HEADER.len()));
    s.push_str("\n\nDeadlines:\n");

    for d in deadlines {
        s.push_str(&format!(
            "• {} ({}) - Due: {}\n",
            d.title,
            d.subject,
            crate::time::format_short_date(d.due_date)
        ));
    }

    let mut pending: Vec<&Task> = tasks
        .iter()
        .filter(|t| !t.completed && t.scheduled_date >= today)
        .collect();
    pending.sort_by_key(|t| t.scheduled_date);

    s.push_str("\nUpcoming Tasks:\n");
    for t in pending.into_iter().take(EXPORT_TASK_LIMIT) {
        s.push_str(&format!(
            "• {} - {} ({}min)\n",
            t.title,
            crate::time::format_short_date(t.scheduled_date),
            t.duration
        ));
    }

    s
}
