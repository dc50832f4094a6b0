//! TodoServiceBuilder - wiring with fail-fast validation.
//!
//! The required ports (repository, category directory, object store, bucket)
//! must all be supplied; `build()` reports every missing one at once instead
//! of failing on the first. Clock, ID generation, and the event sink have
//! sensible production defaults.

use std::sync::Arc;

use crate::impls::TracingEventSink;
use crate::ports::{
    CategoryDirectory, Clock, EventSink, IdGenerator, ObjectStore, SystemClock, TodoRepo,
    UlidGenerator,
};

use super::attachment_store::{AttachmentStore, StorageConfig};
use super::todo_service::TodoService;

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("missing required components: {0:?}")]
    MissingComponents(Vec<&'static str>),
}

#[derive(Default)]
pub struct TodoServiceBuilder {
    todos: Option<Arc<dyn TodoRepo>>,
    categories: Option<Arc<dyn CategoryDirectory>>,
    objects: Option<Arc<dyn ObjectStore>>,
    storage: Option<StorageConfig>,
    events: Option<Arc<dyn EventSink>>,
    ids: Option<Arc<dyn IdGenerator>>,
    clock: Option<Arc<dyn Clock>>,
}

impl TodoServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn todos(mut self, todos: Arc<dyn TodoRepo>) -> Self {
        self.todos = Some(todos);
        self
    }

    pub fn categories(mut self, categories: Arc<dyn CategoryDirectory>) -> Self {
        self.categories = Some(categories);
        self
    }

    pub fn object_store(mut self, objects: Arc<dyn ObjectStore>) -> Self {
        self.objects = Some(objects);
        self
    }

    pub fn storage(mut self, config: StorageConfig) -> Self {
        self.storage = Some(config);
        self
    }

    pub fn events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> Result<TodoService, BuildError> {
        let mut missing = Vec::new();
        if self.todos.is_none() {
            missing.push("todos");
        }
        if self.categories.is_none() {
            missing.push("categories");
        }
        if self.objects.is_none() {
            missing.push("object_store");
        }
        if self.storage.is_none() {
            missing.push("storage");
        }
        if !missing.is_empty() {
            return Err(BuildError::MissingComponents(missing));
        }

        // Checked above; unwraps cannot fire.
        let todos = self.todos.unwrap();
        let categories = self.categories.unwrap();
        let objects = self.objects.unwrap();
        let storage = self.storage.unwrap();

        Ok(TodoService {
            todos,
            categories,
            attachments: AttachmentStore::new(objects, storage),
            events: self.events.unwrap_or_else(|| Arc::new(TracingEventSink)),
            ids: self
                .ids
                .unwrap_or_else(|| Arc::new(UlidGenerator::new(SystemClock))),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
        })
    }
}
