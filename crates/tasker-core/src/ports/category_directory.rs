//! CategoryDirectory port - category existence/ownership lookups.
//!
//! Category lifecycle is owned elsewhere; the todo core only needs to answer
//! "does this category exist for this owner" before accepting a reference.

use async_trait::async_trait;

use crate::domain::{Category, CategoryId, DirectoryError, OwnerId};

#[async_trait]
pub trait CategoryDirectory: Send + Sync {
    /// Resolve a category for this owner. A foreign-owned category is
    /// reported as `NotFound`, same as an absent one.
    async fn get(&self, owner: &OwnerId, id: CategoryId) -> Result<Category, DirectoryError>;
}
