//! ObjectStore port - blob storage (S3/MinIO/in-memory).
//!
//! Pure pass-through primitives. Key derivation and content-type detection
//! happen on the caller side (see `app::attachment_store`), not here.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::StoreError;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write an object. Last write wins for a given key. Returns the key.
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StoreError>;

    /// Mint a time-limited download URL. Never cached; every call signs a
    /// fresh one.
    async fn presigned_download_url(
        &self,
        bucket: &str,
        key: &str,
        ttl: Duration,
    ) -> Result<String, StoreError>;

    async fn delete(&self, bucket: &str, key: &str) -> Result<(), StoreError>;
}
