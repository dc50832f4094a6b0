//! In-memory category directory for development and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::{Category, CategoryId, DirectoryError, OwnerId};
use crate::ports::CategoryDirectory;

/// Seedable map of categories.
///
/// The map is shared behind an `Arc` so `InMemoryTodoRepo` can join category
/// names onto populated todos (see `InMemoryTodoRepo::with_categories`).
#[derive(Default)]
pub struct InMemoryCategoryDirectory {
    state: Arc<Mutex<HashMap<CategoryId, Category>>>,
}

impl InMemoryCategoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, category: Category) {
        let mut state = self.state.lock().unwrap();
        state.insert(category.id, category);
    }

    /// Shared handle for joining, used by the in-memory repo.
    pub(crate) fn handle(&self) -> Arc<Mutex<HashMap<CategoryId, Category>>> {
        Arc::clone(&self.state)
    }
}

#[async_trait]
impl CategoryDirectory for InMemoryCategoryDirectory {
    async fn get(&self, owner: &OwnerId, id: CategoryId) -> Result<Category, DirectoryError> {
        let state = self.state.lock().unwrap();
        state
            .get(&id)
            .filter(|category| category.owner == *owner)
            .cloned()
            .ok_or(DirectoryError::NotFound)
    }
}
