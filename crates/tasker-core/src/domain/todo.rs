//! Todo record, status/priority enums, and derived views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, OwnerId, TodoId};

/// Todo lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Draft,
    Active,
    Completed,
    Archived,
}

impl Default for Status {
    fn default() -> Self {
        Status::Draft
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Draft => "draft",
            Status::Active => "active",
            Status::Completed => "completed",
            Status::Archived => "archived",
        }
    }
}

/// Todo priority.
///
/// Ord follows urgency (Low < Medium < High) so priority sorting works
/// without a separate rank table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// Free-form metadata attached to a todo.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A task, owned by exactly one user.
///
/// Hierarchy is capped at one level: a todo with a parent can never itself
/// become a parent. The cap is a business rule enforced by the service, not
/// a storage constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub owner: OwnerId,
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub parent_todo_id: Option<TodoId>,
    pub category_id: Option<CategoryId>,
    pub metadata: Option<Metadata>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Subtasks cannot have subtasks.
    pub fn can_have_children(&self) -> bool {
        self.parent_todo_id.is_none()
    }

    /// Past its due date and still open.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        matches!(self.due_date, Some(due) if due < now)
            && !matches!(self.status, Status::Completed | Status::Archived)
    }

    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }
}

/// Category fields joined onto a todo for read paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub name: String,
    pub color: Option<String>,
}

/// A todo joined with its category and a comment summary.
///
/// This is the read shape returned by `get` and `list`; the write paths
/// return the bare `Todo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulatedTodo {
    #[serde(flatten)]
    pub todo: Todo,
    pub category: Option<CategorySummary>,
    pub comment_count: u64,
}

/// Aggregate counts over one owner's todos, computed on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoStats {
    pub total: u64,
    pub draft: u64,
    pub active: u64,
    pub completed: u64,
    pub archived: u64,
    pub low_priority: u64,
    pub medium_priority: u64,
    pub high_priority: u64,
    pub overdue: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use ulid::Ulid;

    fn sample(parent: Option<TodoId>) -> Todo {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        Todo {
            id: TodoId::from_ulid(Ulid::new()),
            owner: OwnerId::new("user-1"),
            title: "write report".to_string(),
            description: None,
            status: Status::Active,
            priority: Priority::Medium,
            due_date: None,
            parent_todo_id: parent,
            category_id: None,
            metadata: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn top_level_todo_can_have_children() {
        assert!(sample(None).can_have_children());
    }

    #[test]
    fn subtask_cannot_have_children() {
        let parent_id = TodoId::from_ulid(Ulid::new());
        assert!(!sample(Some(parent_id)).can_have_children());
    }

    #[test]
    fn overdue_requires_past_due_date_and_open_status() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

        let mut todo = sample(None);
        assert!(!todo.is_overdue(now)); // no due date

        todo.due_date = Some(now - Duration::hours(1));
        assert!(todo.is_overdue(now));

        todo.status = Status::Completed;
        assert!(!todo.is_overdue(now));

        todo.status = Status::Archived;
        assert!(!todo.is_overdue(now));

        todo.status = Status::Active;
        todo.due_date = Some(now + Duration::hours(1));
        assert!(!todo.is_overdue(now));
    }

    #[test]
    fn status_and_priority_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Draft).unwrap(), "\"draft\"");
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");

        let status: Status = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(status, Status::Archived);
    }

    #[test]
    fn priority_ord_follows_urgency() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
    }
}
