//! Attachment record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{AttachmentId, OwnerId, TodoId};

/// A file attached to a todo.
///
/// Owned exclusively by its todo, created only through the upload flow and
/// never mutated afterwards. `download_key` points at the stored object; the
/// row itself is the source of truth for "does this attachment exist".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: AttachmentId,
    pub todo_id: TodoId,
    pub name: String,
    pub uploaded_by: OwnerId,
    pub download_key: String,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub created_at: DateTime<Utc>,
}
