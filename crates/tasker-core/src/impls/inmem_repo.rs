//! In-memory todo repository for development and tests.
//!
//! Implements the full `TodoRepo` contract: owner scoping on every method,
//! the filter/sort/pagination semantics of the list operation, partial
//! updates, cascading deletes, and aggregate stats. Queries run against a
//! `HashMap` behind a `Mutex`; no lock is held across an await.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::{
    Attachment, AttachmentId, Category, CategoryId, CategorySummary, CreateTodoPayload, OwnerId,
    Page, PopulatedTodo, RepoError, SortKey, SortOrder, Status, Todo, TodoId, TodoQuery,
    TodoStats, UpdateTodoPayload,
};
use crate::ports::TodoRepo;

use super::inmem_categories::InMemoryCategoryDirectory;

#[derive(Default)]
struct RepoState {
    todos: HashMap<TodoId, Todo>,
    attachments: HashMap<AttachmentId, Attachment>,
    comment_counts: HashMap<TodoId, u64>,
}

impl RepoState {
    /// Owner-scoped lookup. A foreign-owned row behaves like a missing one.
    fn owned_todo(&self, owner: &OwnerId, id: TodoId) -> Result<&Todo, RepoError> {
        self.todos
            .get(&id)
            .filter(|todo| todo.owner == *owner)
            .ok_or(RepoError::NotFound)
    }
}

#[derive(Default)]
pub struct InMemoryTodoRepo {
    state: Mutex<RepoState>,
    categories: Option<Arc<Mutex<HashMap<CategoryId, Category>>>>,
}

impl InMemoryTodoRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share a category map with the directory so populated reads can join
    /// category names, the way the SQL repository joins the categories table.
    pub fn with_categories(directory: &InMemoryCategoryDirectory) -> Self {
        Self {
            state: Mutex::new(RepoState::default()),
            categories: Some(directory.handle()),
        }
    }

    /// Test helper: pretend `count` comments exist on a todo.
    pub fn seed_comment_count(&self, todo_id: TodoId, count: u64) {
        let mut state = self.state.lock().unwrap();
        state.comment_counts.insert(todo_id, count);
    }

    fn category_summary(&self, id: CategoryId) -> Option<CategorySummary> {
        let categories = self.categories.as_ref()?;
        let categories = categories.lock().unwrap();
        categories.get(&id).map(|category| CategorySummary {
            id: category.id,
            name: category.name.clone(),
            color: category.color.clone(),
        })
    }

    fn populate(&self, state: &RepoState, todo: &Todo) -> PopulatedTodo {
        PopulatedTodo {
            todo: todo.clone(),
            category: todo.category_id.and_then(|id| self.category_summary(id)),
            comment_count: state.comment_counts.get(&todo.id).copied().unwrap_or(0),
        }
    }
}

/// Does a todo satisfy every constraint the query sets?
fn matches(todo: &Todo, query: &TodoQuery, now: DateTime<Utc>) -> bool {
    if let Some(search) = &query.search {
        let needle = search.to_lowercase();
        let in_title = todo.title.to_lowercase().contains(&needle);
        let in_description = todo
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle));
        if !in_title && !in_description {
            return false;
        }
    }
    if let Some(status) = query.status
        && todo.status != status
    {
        return false;
    }
    if let Some(priority) = query.priority
        && todo.priority != priority
    {
        return false;
    }
    if let Some(category_id) = query.category_id
        && todo.category_id != Some(category_id)
    {
        return false;
    }
    if let Some(parent_id) = query.parent_todo_id
        && todo.parent_todo_id != Some(parent_id)
    {
        return false;
    }
    if let Some(from) = query.due_from
        && !matches!(todo.due_date, Some(due) if due >= from)
    {
        return false;
    }
    if let Some(to) = query.due_to
        && !matches!(todo.due_date, Some(due) if due <= to)
    {
        return false;
    }
    if let Some(overdue) = query.overdue
        && todo.is_overdue(now) != overdue
    {
        return false;
    }
    if let Some(completed) = query.completed
        && todo.is_completed() != completed
    {
        return false;
    }
    true
}

fn compare(a: &Todo, b: &Todo, sort: SortKey, order: SortOrder) -> Ordering {
    let ordering = match sort {
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortKey::Title => a.title.cmp(&b.title),
        SortKey::Priority => a.priority.cmp(&b.priority),
        SortKey::DueDate => a.due_date.cmp(&b.due_date),
    };
    // Tie-break on id so pagination is stable.
    let ordering = ordering.then_with(|| a.id.cmp(&b.id));
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

#[async_trait]
impl TodoRepo for InMemoryTodoRepo {
    async fn check_exists(&self, owner: &OwnerId, id: TodoId) -> Result<Todo, RepoError> {
        let state = self.state.lock().unwrap();
        state.owned_todo(owner, id).cloned()
    }

    async fn create(
        &self,
        owner: &OwnerId,
        id: TodoId,
        payload: &CreateTodoPayload,
        now: DateTime<Utc>,
    ) -> Result<Todo, RepoError> {
        let todo = Todo {
            id,
            owner: owner.clone(),
            title: payload.title.clone(),
            description: payload.description.clone(),
            status: payload.status.unwrap_or_default(),
            priority: payload.priority.unwrap_or_default(),
            due_date: payload.due_date,
            parent_todo_id: payload.parent_todo_id,
            category_id: payload.category_id,
            metadata: payload.metadata.clone(),
            created_at: now,
            updated_at: now,
        };

        let mut state = self.state.lock().unwrap();
        state.todos.insert(id, todo.clone());
        Ok(todo)
    }

    async fn get_populated(&self, owner: &OwnerId, id: TodoId) -> Result<PopulatedTodo, RepoError> {
        let state = self.state.lock().unwrap();
        let todo = state.owned_todo(owner, id)?;
        Ok(self.populate(&state, todo))
    }

    async fn list(
        &self,
        owner: &OwnerId,
        query: &TodoQuery,
    ) -> Result<Page<PopulatedTodo>, RepoError> {
        let state = self.state.lock().unwrap();
        let now = Utc::now();

        let mut rows: Vec<&Todo> = state
            .todos
            .values()
            .filter(|todo| todo.owner == *owner)
            .filter(|todo| matches(todo, query, now))
            .collect();
        rows.sort_by(|a, b| compare(a, b, query.sort, query.order));

        // Fresh count before slicing; never derived from page * page_size.
        let total = rows.len() as u64;

        let page = query.page.max(1);
        let page_size = query.page_size.clamp(1, 100);
        let items = rows
            .into_iter()
            .skip(((page - 1) as usize) * page_size as usize)
            .take(page_size as usize)
            .map(|todo| self.populate(&state, todo))
            .collect();

        Ok(Page::new(items, total, page, page_size))
    }

    async fn update(
        &self,
        owner: &OwnerId,
        payload: &UpdateTodoPayload,
        now: DateTime<Utc>,
    ) -> Result<Todo, RepoError> {
        let mut state = self.state.lock().unwrap();
        let mut todo = state.owned_todo(owner, payload.id)?.clone();

        payload.title.apply_required(&mut todo.title);
        payload.description.apply_to(&mut todo.description);
        payload.status.apply_required(&mut todo.status);
        payload.priority.apply_required(&mut todo.priority);
        payload.due_date.apply_to(&mut todo.due_date);
        payload.parent_todo_id.apply_to(&mut todo.parent_todo_id);
        payload.category_id.apply_to(&mut todo.category_id);
        payload.metadata.apply_to(&mut todo.metadata);
        todo.updated_at = now;

        state.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn delete(&self, owner: &OwnerId, id: TodoId) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        state.owned_todo(owner, id)?;

        state.todos.remove(&id);
        // Cascade: dependent rows go with the todo.
        state.attachments.retain(|_, a| a.todo_id != id);
        state.comment_counts.remove(&id);
        Ok(())
    }

    async fn stats(&self, owner: &OwnerId) -> Result<TodoStats, RepoError> {
        let state = self.state.lock().unwrap();
        let now = Utc::now();

        let mut stats = TodoStats::default();
        for todo in state.todos.values().filter(|t| t.owner == *owner) {
            stats.total += 1;
            match todo.status {
                Status::Draft => stats.draft += 1,
                Status::Active => stats.active += 1,
                Status::Completed => stats.completed += 1,
                Status::Archived => stats.archived += 1,
            }
            match todo.priority {
                crate::domain::Priority::Low => stats.low_priority += 1,
                crate::domain::Priority::Medium => stats.medium_priority += 1,
                crate::domain::Priority::High => stats.high_priority += 1,
            }
            if todo.is_overdue(now) {
                stats.overdue += 1;
            }
        }
        Ok(stats)
    }

    async fn insert_attachment(
        &self,
        owner: &OwnerId,
        attachment: Attachment,
    ) -> Result<Attachment, RepoError> {
        let mut state = self.state.lock().unwrap();
        state.owned_todo(owner, attachment.todo_id)?;
        state.attachments.insert(attachment.id, attachment.clone());
        Ok(attachment)
    }

    async fn get_attachment(
        &self,
        owner: &OwnerId,
        todo_id: TodoId,
        attachment_id: AttachmentId,
    ) -> Result<Attachment, RepoError> {
        let state = self.state.lock().unwrap();
        state.owned_todo(owner, todo_id)?;
        state
            .attachments
            .get(&attachment_id)
            .filter(|a| a.todo_id == todo_id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn list_attachments(
        &self,
        owner: &OwnerId,
        todo_id: TodoId,
    ) -> Result<Vec<Attachment>, RepoError> {
        let state = self.state.lock().unwrap();
        state.owned_todo(owner, todo_id)?;

        let mut attachments: Vec<Attachment> = state
            .attachments
            .values()
            .filter(|a| a.todo_id == todo_id)
            .cloned()
            .collect();
        attachments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(attachments)
    }

    async fn delete_attachment(
        &self,
        owner: &OwnerId,
        todo_id: TodoId,
        attachment_id: AttachmentId,
    ) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        state.owned_todo(owner, todo_id)?;

        let belongs = state
            .attachments
            .get(&attachment_id)
            .is_some_and(|a| a.todo_id == todo_id);
        if !belongs {
            return Err(RepoError::NotFound);
        }
        state.attachments.remove(&attachment_id);
        Ok(())
    }
}
