//! TodoService - the domain service behind the HTTP layer.
//!
//! Enforces the hierarchy and category invariants, orchestrates the
//! attachment lifecycle against the repository and object storage, and emits
//! domain events. Holds no cross-request state; everything durable lives in
//! the repository and the object store.
//!
//! # Accepted races
//! No lock or transaction spans the precondition checks and the write that
//! follows them. A parent or category deleted in between surfaces as a
//! downstream `NotFound`/conflict instead of a clean validation error.

use std::sync::Arc;

use crate::domain::{
    Attachment, AttachmentId, CategoryId, CreateTodoPayload, DirectoryError, DomainEvent, OwnerId,
    Page, PopulatedTodo, RepoError, StoreError, Todo, TodoError, TodoId, TodoQuery, TodoStats,
    UpdateTodoPayload,
};
use crate::ports::{CategoryDirectory, Clock, EventSink, IdGenerator, TodoRepo};

use super::attachment_store::AttachmentStore;
use super::builder::TodoServiceBuilder;

pub struct TodoService {
    pub(super) todos: Arc<dyn TodoRepo>,
    pub(super) categories: Arc<dyn CategoryDirectory>,
    pub(super) attachments: AttachmentStore,
    pub(super) events: Arc<dyn EventSink>,
    pub(super) ids: Arc<dyn IdGenerator>,
    pub(super) clock: Arc<dyn Clock>,
}

impl TodoService {
    pub fn builder() -> TodoServiceBuilder {
        TodoServiceBuilder::new()
    }

    /// Create a todo.
    ///
    /// Preconditions: the parent (if referenced) must exist for this owner
    /// and must itself be a top-level todo; the category (if referenced)
    /// must exist for this owner.
    pub async fn create(
        &self,
        owner: &OwnerId,
        payload: CreateTodoPayload,
    ) -> Result<Todo, TodoError> {
        if let Some(parent_id) = payload.parent_todo_id {
            let parent = self.check_parent(owner, parent_id).await?;
            if !parent.can_have_children() {
                return Err(TodoError::InvalidHierarchy(
                    "parent todo cannot have children (subtasks can't have subtasks)".to_string(),
                ));
            }
        }

        if let Some(category_id) = payload.category_id {
            self.check_category(owner, category_id).await?;
        }

        let id = self.ids.new_todo_id();
        let now = self.clock.now();
        let todo = self.todos.create(owner, id, &payload, now).await?;

        self.events.emit(&DomainEvent::TodoCreated {
            todo_id: todo.id,
            title: todo.title.clone(),
            category_id: todo.category_id,
            priority: todo.priority,
        });

        Ok(todo)
    }

    /// Fetch one todo joined with its category/comment summary.
    pub async fn get(&self, owner: &OwnerId, id: TodoId) -> Result<PopulatedTodo, TodoError> {
        Ok(self.todos.get_populated(owner, id).await?)
    }

    /// Paginated, filtered, owner-scoped listing.
    pub async fn list(
        &self,
        owner: &OwnerId,
        query: &TodoQuery,
    ) -> Result<Page<PopulatedTodo>, TodoError> {
        Ok(self.todos.list(owner, query).await?)
    }

    /// Partially update a todo. Only fields present in the payload change.
    pub async fn update(
        &self,
        owner: &OwnerId,
        payload: UpdateTodoPayload,
    ) -> Result<Todo, TodoError> {
        if let Some(&parent_id) = payload.parent_todo_id.as_set() {
            if parent_id == payload.id {
                return Err(TodoError::InvalidHierarchy(
                    "todo cannot be its own parent".to_string(),
                ));
            }
            let parent = self.check_parent(owner, parent_id).await?;
            if !parent.can_have_children() {
                return Err(TodoError::InvalidHierarchy(
                    "parent todo cannot have children (subtasks can't have subtasks)".to_string(),
                ));
            }
        }

        if let Some(&category_id) = payload.category_id.as_set() {
            self.check_category(owner, category_id).await?;
        }

        let now = self.clock.now();
        let updated = self.todos.update(owner, &payload, now).await?;

        self.events.emit(&DomainEvent::TodoUpdated {
            todo_id: updated.id,
            title: updated.title.clone(),
            status: updated.status,
            priority: updated.priority,
            category_id: updated.category_id,
        });

        Ok(updated)
    }

    /// Delete a todo. Attachment and comment rows cascade in the repository;
    /// the stored objects behind the attachments are cleaned up best-effort
    /// in the background, never blocking the caller.
    pub async fn delete(&self, owner: &OwnerId, id: TodoId) -> Result<(), TodoError> {
        // Snapshot the storage keys before the rows cascade away. If the
        // lookup fails, the delete below reports the authoritative error.
        let keys: Vec<String> = match self.todos.list_attachments(owner, id).await {
            Ok(rows) => rows.into_iter().map(|a| a.download_key).collect(),
            Err(_) => Vec::new(),
        };

        self.todos.delete(owner, id).await?;

        for key in keys {
            self.attachments.spawn_delete(key);
        }

        self.events.emit(&DomainEvent::TodoDeleted { todo_id: id });

        Ok(())
    }

    /// Aggregate statistics; a pure read with no side effects.
    pub async fn stats(&self, owner: &OwnerId) -> Result<TodoStats, TodoError> {
        Ok(self.todos.stats(owner).await?)
    }

    /// Upload an attachment.
    ///
    /// Order matters: the object-storage write happens first, the metadata
    /// row second. A crash in between leaves an orphaned stored object,
    /// which is accepted — the row is the source of truth.
    pub async fn upload_attachment(
        &self,
        owner: &OwnerId,
        todo_id: TodoId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Attachment, TodoError> {
        self.todos.check_exists(owner, todo_id).await?;

        let file_size = bytes.len() as i64;
        let mime_type = AttachmentStore::detect_content_type(&bytes).to_string();

        let key = self
            .attachments
            .upload(todo_id, file_name, bytes)
            .await
            .map_err(TodoError::UploadFailure)?;

        let attachment = Attachment {
            id: self.ids.new_attachment_id(),
            todo_id,
            name: file_name.to_string(),
            uploaded_by: owner.clone(),
            download_key: key,
            file_size: Some(file_size),
            mime_type: Some(mime_type),
            created_at: self.clock.now(),
        };
        let attachment = self.todos.insert_attachment(owner, attachment).await?;

        self.events.emit(&DomainEvent::TodoAttachmentUploaded {
            todo_id,
            attachment_id: attachment.id,
            download_key: attachment.download_key.clone(),
        });

        Ok(attachment)
    }

    /// Attachments of one todo, ownership-checked.
    pub async fn list_attachments(
        &self,
        owner: &OwnerId,
        todo_id: TodoId,
    ) -> Result<Vec<Attachment>, TodoError> {
        self.todos.check_exists(owner, todo_id).await?;
        Ok(self.todos.list_attachments(owner, todo_id).await?)
    }

    /// Delete an attachment.
    ///
    /// The metadata row is deleted synchronously and its failure surfaces to
    /// the caller. The stored object is deleted in the background only after
    /// the row deletion is acknowledged; that outcome never reaches the
    /// caller.
    pub async fn delete_attachment(
        &self,
        owner: &OwnerId,
        todo_id: TodoId,
        attachment_id: AttachmentId,
    ) -> Result<(), TodoError> {
        self.todos.check_exists(owner, todo_id).await?;

        let attachment = self
            .todos
            .get_attachment(owner, todo_id, attachment_id)
            .await?;

        self.todos
            .delete_attachment(owner, todo_id, attachment_id)
            .await?;

        self.attachments.spawn_delete(attachment.download_key);

        self.events.emit(&DomainEvent::TodoAttachmentDeleted {
            todo_id,
            attachment_id,
        });

        Ok(())
    }

    /// Fresh presigned download URL, valid for 15 minutes.
    pub async fn attachment_download_url(
        &self,
        owner: &OwnerId,
        todo_id: TodoId,
        attachment_id: AttachmentId,
    ) -> Result<String, TodoError> {
        self.todos.check_exists(owner, todo_id).await?;

        let attachment = self
            .todos
            .get_attachment(owner, todo_id, attachment_id)
            .await?;

        self.attachments
            .download_url(&attachment.download_key)
            .await
            .map_err(|err| match err {
                StoreError::NotFound => TodoError::NotFound,
                other => TodoError::Storage(other),
            })
    }

    /// A missing parent is an invalid hierarchy reference, not a bare
    /// `NotFound`: the todo being written may well exist, the parent field
    /// is what's wrong.
    async fn check_parent(&self, owner: &OwnerId, parent_id: TodoId) -> Result<Todo, TodoError> {
        self.todos
            .check_exists(owner, parent_id)
            .await
            .map_err(|err| match err {
                RepoError::NotFound => {
                    TodoError::InvalidHierarchy(format!("parent todo {parent_id} not found"))
                }
                other => TodoError::Repository(other),
            })
    }

    async fn check_category(
        &self,
        owner: &OwnerId,
        category_id: CategoryId,
    ) -> Result<(), TodoError> {
        self.categories
            .get(owner, category_id)
            .await
            .map(|_| ())
            .map_err(|err| match err {
                DirectoryError::NotFound => {
                    TodoError::InvalidReference(format!("category {category_id} not found"))
                }
                DirectoryError::Backend(msg) => TodoError::Repository(RepoError::Backend(msg)),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::attachment_store::StorageConfig;
    use crate::domain::{Category, Patch, Priority, Status};
    use crate::impls::{
        InMemoryCategoryDirectory, InMemoryObjectStore, InMemoryTodoRepo, RecordingEventSink,
    };
    use crate::ports::ObjectStore;
    use std::time::Duration;
    use ulid::Ulid;

    const BUCKET: &str = "tasker-test";

    struct Harness {
        service: TodoService,
        store: Arc<InMemoryObjectStore>,
        events: Arc<RecordingEventSink>,
        directory: Arc<InMemoryCategoryDirectory>,
    }

    fn harness() -> Harness {
        let directory = Arc::new(InMemoryCategoryDirectory::new());
        let repo = Arc::new(InMemoryTodoRepo::with_categories(&directory));
        let store = Arc::new(InMemoryObjectStore::new());
        let events = Arc::new(RecordingEventSink::new());
        let service = TodoService::builder()
            .todos(repo)
            .categories(directory.clone())
            .object_store(store.clone())
            .storage(StorageConfig {
                bucket: BUCKET.to_string(),
            })
            .events(events.clone())
            .build()
            .unwrap();
        Harness {
            service,
            store,
            events,
            directory,
        }
    }

    fn alice() -> OwnerId {
        OwnerId::new("alice")
    }

    fn payload(title: &str) -> CreateTodoPayload {
        CreateTodoPayload {
            title: title.to_string(),
            ..Default::default()
        }
    }

    /// Let fire-and-forget tasks run to completion.
    async fn drain_background() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[tokio::test]
    async fn create_assigns_id_and_defaults_and_emits() {
        let h = harness();
        let todo = h.service.create(&alice(), payload("write report")).await.unwrap();

        assert_eq!(todo.status, Status::Draft);
        assert_eq!(todo.priority, Priority::Medium);

        // The emitted event carries the created row's fields.
        assert_eq!(
            h.events.snapshot(),
            vec![DomainEvent::TodoCreated {
                todo_id: todo.id,
                title: "write report".to_string(),
                category_id: None,
                priority: Priority::Medium,
            }]
        );
    }

    #[tokio::test]
    async fn subtask_of_a_subtask_is_rejected_on_create() {
        let h = harness();
        let owner = alice();
        let parent = h.service.create(&owner, payload("parent")).await.unwrap();

        let mut child_payload = payload("child");
        child_payload.parent_todo_id = Some(parent.id);
        let child = h.service.create(&owner, child_payload).await.unwrap();

        let mut grandchild_payload = payload("grandchild");
        grandchild_payload.parent_todo_id = Some(child.id);
        let result = h.service.create(&owner, grandchild_payload).await;

        assert!(matches!(result, Err(TodoError::InvalidHierarchy(_))));
    }

    #[tokio::test]
    async fn subtask_of_a_subtask_is_rejected_on_update() {
        let h = harness();
        let owner = alice();
        let parent = h.service.create(&owner, payload("parent")).await.unwrap();

        let mut child_payload = payload("child");
        child_payload.parent_todo_id = Some(parent.id);
        let child = h.service.create(&owner, child_payload).await.unwrap();

        let orphan = h.service.create(&owner, payload("orphan")).await.unwrap();
        let mut update = UpdateTodoPayload::new(orphan.id);
        update.parent_todo_id = Patch::Set(child.id);

        let result = h.service.update(&owner, update).await;
        assert!(matches!(result, Err(TodoError::InvalidHierarchy(_))));
    }

    #[tokio::test]
    async fn todo_cannot_become_its_own_parent() {
        let h = harness();
        let owner = alice();
        let todo = h.service.create(&owner, payload("t")).await.unwrap();

        let mut update = UpdateTodoPayload::new(todo.id);
        update.parent_todo_id = Patch::Set(todo.id);

        let result = h.service.update(&owner, update).await;
        assert!(matches!(result, Err(TodoError::InvalidHierarchy(_))));
    }

    #[tokio::test]
    async fn missing_parent_is_an_invalid_hierarchy() {
        let h = harness();
        let mut p = payload("child");
        p.parent_todo_id = Some(TodoId::from_ulid(Ulid::new()));

        let result = h.service.create(&alice(), p).await;
        assert!(matches!(result, Err(TodoError::InvalidHierarchy(_))));
    }

    #[tokio::test]
    async fn foreign_category_is_an_invalid_reference() {
        let h = harness();
        let bob_category = Category {
            id: CategoryId::from_ulid(Ulid::new()),
            owner: OwnerId::new("bob"),
            name: "bob's".to_string(),
            description: None,
            color: None,
        };
        h.directory.insert(bob_category.clone());

        let mut p = payload("t");
        p.category_id = Some(bob_category.id);
        let created = h.service.create(&alice(), p).await;
        assert!(matches!(created, Err(TodoError::InvalidReference(_))));

        let todo = h.service.create(&alice(), payload("t")).await.unwrap();
        let mut update = UpdateTodoPayload::new(todo.id);
        update.category_id = Patch::Set(bob_category.id);
        let updated = h.service.update(&alice(), update).await;
        assert!(matches!(updated, Err(TodoError::InvalidReference(_))));
    }

    #[tokio::test]
    async fn owned_category_reference_is_accepted_and_joined() {
        let h = harness();
        let owner = alice();
        let category = Category {
            id: CategoryId::from_ulid(Ulid::new()),
            owner: owner.clone(),
            name: "work".to_string(),
            description: None,
            color: Some("#00ff00".to_string()),
        };
        h.directory.insert(category.clone());

        let mut p = payload("t");
        p.category_id = Some(category.id);
        let todo = h.service.create(&owner, p).await.unwrap();

        let populated = h.service.get(&owner, todo.id).await.unwrap();
        let joined = populated.category.unwrap();
        assert_eq!(joined.name, "work");
        assert_eq!(joined.id, category.id);
    }

    #[tokio::test]
    async fn absent_and_foreign_ids_are_indistinguishable() {
        let h = harness();
        let owner = alice();
        let bob = OwnerId::new("bob");
        let bobs_todo = h.service.create(&bob, payload("bob's")).await.unwrap();
        let absent_id = TodoId::from_ulid(Ulid::new());

        for id in [bobs_todo.id, absent_id] {
            assert!(matches!(
                h.service.get(&owner, id).await,
                Err(TodoError::NotFound)
            ));
            assert!(matches!(
                h.service.delete(&owner, id).await,
                Err(TodoError::NotFound)
            ));
        }
    }

    #[tokio::test]
    async fn partial_update_keeps_untouched_fields() {
        let h = harness();
        let owner = alice();
        let mut p = payload("original");
        p.description = Some("A".to_string());
        let todo = h.service.create(&owner, p).await.unwrap();

        let mut update = UpdateTodoPayload::new(todo.id);
        update.title = Patch::Set("B".to_string());
        let updated = h.service.update(&owner, update).await.unwrap();

        assert_eq!(updated.title, "B");
        assert_eq!(updated.description.as_deref(), Some("A"));
        assert_eq!(h.events.names(), vec!["todo_created", "todo_updated"]);
    }

    #[tokio::test]
    async fn list_is_owner_scoped_with_any_filter() {
        let h = harness();
        let owner = alice();
        let bob = OwnerId::new("bob");
        h.service.create(&owner, payload("mine")).await.unwrap();
        h.service.create(&bob, payload("mine")).await.unwrap();

        let queries = [
            TodoQuery::default(),
            TodoQuery {
                search: Some("mine".to_string()),
                ..Default::default()
            },
            TodoQuery {
                status: Some(Status::Draft),
                completed: Some(false),
                ..Default::default()
            },
        ];
        for query in queries {
            let page = h.service.list(&owner, &query).await.unwrap();
            assert_eq!(page.total, 1);
            assert!(page.items.iter().all(|t| t.todo.owner == owner));
        }
    }

    #[tokio::test]
    async fn upload_then_list_returns_the_attachment() {
        let h = harness();
        let owner = alice();
        let todo = h.service.create(&owner, payload("t")).await.unwrap();

        let uploaded = h
            .service
            .upload_attachment(&owner, todo.id, "report.pdf", b"%PDF-1.7 fake".to_vec())
            .await
            .unwrap();

        assert_eq!(uploaded.name, "report.pdf");
        assert!(!uploaded.download_key.is_empty());
        assert_eq!(uploaded.file_size, Some(13));
        assert_eq!(uploaded.mime_type.as_deref(), Some("application/pdf"));

        let listed = h.service.list_attachments(&owner, todo.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "report.pdf");

        // Object landed in storage under the derived key, row written after.
        assert!(h.store.contains(BUCKET, &uploaded.download_key));
        assert!(h.events.names().contains(&"todo_attachment_uploaded"));
    }

    #[tokio::test]
    async fn upload_to_a_foreign_todo_is_not_found() {
        let h = harness();
        let bob = OwnerId::new("bob");
        let bobs_todo = h.service.create(&bob, payload("bob's")).await.unwrap();

        let result = h
            .service
            .upload_attachment(&alice(), bobs_todo.id, "a.txt", b"x".to_vec())
            .await;

        assert!(matches!(result, Err(TodoError::NotFound)));
        assert!(h.store.is_empty());
    }

    #[tokio::test]
    async fn delete_attachment_survives_background_storage_failure() {
        let h = harness();
        let owner = alice();
        let todo = h.service.create(&owner, payload("t")).await.unwrap();
        let attachment = h
            .service
            .upload_attachment(&owner, todo.id, "a.txt", b"x".to_vec())
            .await
            .unwrap();

        // Make the background storage delete fail: the object is already gone.
        h.store.delete(BUCKET, &attachment.download_key).await.unwrap();

        h.service
            .delete_attachment(&owner, todo.id, attachment.id)
            .await
            .unwrap();

        // Metadata is authoritative: the attachment is gone immediately.
        let listed = h.service.list_attachments(&owner, todo.id).await.unwrap();
        assert!(listed.is_empty());
        assert!(h.events.names().contains(&"todo_attachment_deleted"));

        drain_background().await;
    }

    #[tokio::test]
    async fn delete_attachment_cleans_up_the_stored_object() {
        let h = harness();
        let owner = alice();
        let todo = h.service.create(&owner, payload("t")).await.unwrap();
        let attachment = h
            .service
            .upload_attachment(&owner, todo.id, "a.txt", b"x".to_vec())
            .await
            .unwrap();
        assert!(h.store.contains(BUCKET, &attachment.download_key));

        h.service
            .delete_attachment(&owner, todo.id, attachment.id)
            .await
            .unwrap();
        drain_background().await;

        assert!(!h.store.contains(BUCKET, &attachment.download_key));
    }

    #[tokio::test]
    async fn deleting_a_todo_cleans_up_its_attachment_objects() {
        let h = harness();
        let owner = alice();
        let todo = h.service.create(&owner, payload("t")).await.unwrap();
        h.service
            .upload_attachment(&owner, todo.id, "a.txt", b"x".to_vec())
            .await
            .unwrap();
        h.service
            .upload_attachment(&owner, todo.id, "b.txt", b"y".to_vec())
            .await
            .unwrap();

        h.service.delete(&owner, todo.id).await.unwrap();
        drain_background().await;

        assert!(h.store.is_empty());
        assert!(h.events.names().contains(&"todo_deleted"));
    }

    #[tokio::test]
    async fn download_url_is_freshly_presigned() {
        let h = harness();
        let owner = alice();
        let todo = h.service.create(&owner, payload("t")).await.unwrap();
        let attachment = h
            .service
            .upload_attachment(&owner, todo.id, "a.txt", b"x".to_vec())
            .await
            .unwrap();

        let url = h
            .service
            .attachment_download_url(&owner, todo.id, attachment.id)
            .await
            .unwrap();

        // 15-minute TTL baked into the presigned URL.
        assert_eq!(
            url,
            format!("memory://{BUCKET}/{}?expires=900", attachment.download_key)
        );

        let missing = h
            .service
            .attachment_download_url(&owner, todo.id, AttachmentId::from_ulid(Ulid::new()))
            .await;
        assert!(matches!(missing, Err(TodoError::NotFound)));
    }

    #[tokio::test]
    async fn stats_reflect_owned_todos_only() {
        let h = harness();
        let owner = alice();
        let mut p = payload("t");
        p.status = Some(Status::Active);
        h.service.create(&owner, p).await.unwrap();
        h.service
            .create(&OwnerId::new("bob"), payload("other"))
            .await
            .unwrap();

        let stats = h.service.stats(&owner).await.unwrap();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.draft, 0);
    }
}
