//! Domain events emitted by the todo service.
//!
//! Events describe facts that already happened; they are handed to an
//! `EventSink` after the corresponding write succeeds and carry the fields
//! the original business-event log recorded.

use serde::Serialize;

use super::ids::{AttachmentId, CategoryId, TodoId};
use super::todo::{Priority, Status};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DomainEvent {
    TodoCreated {
        todo_id: TodoId,
        title: String,
        category_id: Option<CategoryId>,
        priority: Priority,
    },
    TodoUpdated {
        todo_id: TodoId,
        title: String,
        status: Status,
        priority: Priority,
        category_id: Option<CategoryId>,
    },
    TodoDeleted {
        todo_id: TodoId,
    },
    TodoAttachmentUploaded {
        todo_id: TodoId,
        attachment_id: AttachmentId,
        download_key: String,
    },
    TodoAttachmentDeleted {
        todo_id: TodoId,
        attachment_id: AttachmentId,
    },
}

impl DomainEvent {
    /// Stable wire name, matching the serde tag.
    pub fn name(&self) -> &'static str {
        match self {
            DomainEvent::TodoCreated { .. } => "todo_created",
            DomainEvent::TodoUpdated { .. } => "todo_updated",
            DomainEvent::TodoDeleted { .. } => "todo_deleted",
            DomainEvent::TodoAttachmentUploaded { .. } => "todo_attachment_uploaded",
            DomainEvent::TodoAttachmentDeleted { .. } => "todo_attachment_deleted",
        }
    }
}
