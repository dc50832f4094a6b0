//! TodoRepo port - durable storage of todos and attachments.
//!
//! The repository is the source of truth for rows, query execution,
//! pagination, and aggregate statistics. Every method takes the owner as a
//! mandatory parameter so no operation can accidentally omit the scoping:
//! a row belonging to a different owner behaves exactly like a missing row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    Attachment, AttachmentId, CreateTodoPayload, OwnerId, Page, PopulatedTodo, RepoError, Todo,
    TodoId, TodoQuery, TodoStats, UpdateTodoPayload,
};

#[async_trait]
pub trait TodoRepo: Send + Sync {
    /// Ownership/existence check. Returns the row so callers can inspect it
    /// (the service uses this to test `can_have_children`).
    async fn check_exists(&self, owner: &OwnerId, id: TodoId) -> Result<Todo, RepoError>;

    /// Persist a new todo under `id` with server-assigned timestamps.
    /// Defaults (status draft, priority medium) are applied here.
    async fn create(
        &self,
        owner: &OwnerId,
        id: TodoId,
        payload: &CreateTodoPayload,
        now: DateTime<Utc>,
    ) -> Result<Todo, RepoError>;

    /// Single todo joined with category and comment summary.
    async fn get_populated(&self, owner: &OwnerId, id: TodoId) -> Result<PopulatedTodo, RepoError>;

    /// Filtered/sorted/paginated list. `total` in the returned page is a
    /// fresh count over the filtered set.
    async fn list(
        &self,
        owner: &OwnerId,
        query: &TodoQuery,
    ) -> Result<Page<PopulatedTodo>, RepoError>;

    /// Partial update; only `Patch::Set`/`Patch::Clear` fields change.
    async fn update(
        &self,
        owner: &OwnerId,
        payload: &UpdateTodoPayload,
        now: DateTime<Utc>,
    ) -> Result<Todo, RepoError>;

    /// Delete a todo. Dependent attachment and comment rows cascade here.
    async fn delete(&self, owner: &OwnerId, id: TodoId) -> Result<(), RepoError>;

    /// Aggregate counts by status, priority, and overdue state.
    async fn stats(&self, owner: &OwnerId) -> Result<TodoStats, RepoError>;

    /// Persist an attachment row. Called only after the object-storage write
    /// succeeded; the two writes are deliberately not atomic.
    async fn insert_attachment(
        &self,
        owner: &OwnerId,
        attachment: Attachment,
    ) -> Result<Attachment, RepoError>;

    async fn get_attachment(
        &self,
        owner: &OwnerId,
        todo_id: TodoId,
        attachment_id: AttachmentId,
    ) -> Result<Attachment, RepoError>;

    /// Attachments of one todo, ordered by creation.
    async fn list_attachments(
        &self,
        owner: &OwnerId,
        todo_id: TodoId,
    ) -> Result<Vec<Attachment>, RepoError>;

    async fn delete_attachment(
        &self,
        owner: &OwnerId,
        todo_id: TodoId,
        attachment_id: AttachmentId,
    ) -> Result<(), RepoError>;
}
