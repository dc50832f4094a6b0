//! Attachment store adapter.
//!
//! Thin, stateless layer between the service and the `ObjectStore` port:
//! derives storage keys, sniffs content types from leading bytes, pins the
//! presign TTL, and dispatches best-effort background deletions.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{StoreError, TodoId};
use crate::ports::ObjectStore;

/// Presigned download URLs are valid for a fixed 15 minutes.
pub const PRESIGN_TTL: Duration = Duration::from_secs(15 * 60);

/// Object-storage settings for attachments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub bucket: String,
}

#[derive(Clone)]
pub struct AttachmentStore {
    objects: Arc<dyn ObjectStore>,
    bucket: String,
}

impl AttachmentStore {
    pub fn new(objects: Arc<dyn ObjectStore>, config: StorageConfig) -> Self {
        Self {
            objects,
            bucket: config.bucket,
        }
    }

    /// Storage key for an upload: `todos/attachments/<todoId>/<fileName>`.
    ///
    /// Deterministic on purpose. Re-uploading the same name to the same todo
    /// overwrites the stored object (last write wins); record identity lives
    /// in the attachment row, not the key.
    pub fn object_key(todo_id: TodoId, file_name: &str) -> String {
        format!("todos/attachments/{todo_id}/{file_name}")
    }

    /// Content type from the file's leading bytes. Client-supplied headers
    /// are not trusted; unknown signatures fall back to octet-stream.
    pub fn detect_content_type(bytes: &[u8]) -> &'static str {
        infer::get(bytes)
            .map(|kind| kind.mime_type())
            .unwrap_or("application/octet-stream")
    }

    /// Stream the bytes to object storage under the derived key.
    pub async fn upload(
        &self,
        todo_id: TodoId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StoreError> {
        let key = Self::object_key(todo_id, file_name);
        let content_type = Self::detect_content_type(&bytes);
        self.objects
            .put(&self.bucket, &key, bytes, content_type)
            .await
    }

    /// Fresh presigned URL for an existing key.
    pub async fn download_url(&self, key: &str) -> Result<String, StoreError> {
        self.objects
            .presigned_download_url(&self.bucket, key, PRESIGN_TTL)
            .await
    }

    /// Fire-and-forget deletion of a stored object.
    ///
    /// The outcome is isolated from the caller: failures are logged and
    /// swallowed, leaving at worst an orphaned object. The metadata row is
    /// the source of truth, so the orphan is invisible to users.
    pub fn spawn_delete(&self, key: String) {
        let objects = Arc::clone(&self.objects);
        let bucket = self.bucket.clone();
        tokio::spawn(async move {
            if let Err(err) = objects.delete(&bucket, &key).await {
                tracing::warn!(
                    bucket = %bucket,
                    key = %key,
                    error = %err,
                    "background attachment deletion failed; object left orphaned"
                );
            }
        });
    }
}
