//! List query (filter/sort/pagination) and the paginated result shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, TodoId};
use super::todo::{Priority, Status};

/// Sort keys accepted by the list operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    CreatedAt,
    UpdatedAt,
    Title,
    Priority,
    DueDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Filter/sort/pagination parameters for listing todos.
///
/// Absent filter fields impose no constraint. Range bounds (page >= 1,
/// page_size 1..=100) are enforced upstream by request validation; the
/// repository clamps defensively anyway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_sort")]
    pub sort: SortKey,
    #[serde(default = "default_order")]
    pub order: SortOrder,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub parent_todo_id: Option<TodoId>,
    #[serde(default)]
    pub due_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub overdue: Option<bool>,
    #[serde(default)]
    pub completed: Option<bool>,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}

fn default_sort() -> SortKey {
    SortKey::CreatedAt
}

fn default_order() -> SortOrder {
    SortOrder::Desc
}

impl Default for TodoQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            sort: default_sort(),
            order: default_order(),
            search: None,
            status: None,
            priority: None,
            category_id: None,
            parent_todo_id: None,
            due_from: None,
            due_to: None,
            overdue: None,
            completed: None,
        }
    }
}

/// One page of results.
///
/// `total` is always a fresh count over the filtered set, never derived from
/// `page * page_size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, page_size: u32) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total.div_ceil(page_size as u64) as u32
        };
        Self {
            items,
            total,
            page,
            page_size,
            total_pages,
        }
    }
}
