use chrono::NaiveDate;

use crate::model::task::Priority;
use crate::time::days_until;

/// Matched as case-insensitive substrings, not whole words.
pub const URGENCY_KEYWORDS: [&str; 3] = ["urgent", "critical", "important"];

// Weights
const KEYWORD_WEIGHT: Priority = 2;
const DUE_WITHIN_1_DAY: Priority = 3;
const DUE_WITHIN_3_DAYS: Priority = 2;
const DUE_WITHIN_7_DAYS: Priority = 1;

/// Priority for a task described by `description` and due on `due_date`,
/// as seen on `today`. Range is `0..=5`.
pub fn score(description: &str, due_date: Option<NaiveDate>, today: NaiveDate) -> Priority {
    keyword_component(description) + deadline_component(due_date, today)
}

pub fn keyword_component(description: &str) -> Priority {
    let lowered = description.to_lowercase();
    if URGENCY_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        KEYWORD_WEIGHT
    } else {
        0
    }
}

pub fn deadline_component(due_date: Option<NaiveDate>, today: NaiveDate) -> Priority {
    let Some(due) = due_date else {
        return 0;
    };

    // Boundaries fall into the stricter bucket; overdue counts as due now.
    let days_left = days_until(due, today);
    if days_left <= 1 {
        DUE_WITHIN_1_DAY
    } else if days_left <= 3 {
        DUE_WITHIN_3_DAYS
    } else if days_left <= 7 {
        DUE_WITHIN_7_DAYS
    } else {
        0
    }
}
