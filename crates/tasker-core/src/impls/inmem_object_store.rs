//! In-memory object store for development and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::StoreError;
use crate::ports::ObjectStore;

#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// Map of (bucket, key) to stored bytes. Last write wins, like S3.
#[derive(Default)]
pub struct InMemoryObjectStore {
    objects: Mutex<HashMap<(String, String), StoredObject>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observability hook for tests.
    pub fn contains(&self, bucket: &str, key: &str) -> bool {
        let objects = self.objects.lock().unwrap();
        objects.contains_key(&(bucket.to_string(), key.to_string()))
    }

    /// Stored bytes and content type, if present.
    pub fn object(&self, bucket: &str, key: &str) -> Option<(Vec<u8>, String)> {
        let objects = self.objects.lock().unwrap();
        objects
            .get(&(bucket.to_string(), key.to_string()))
            .map(|o| (o.bytes.clone(), o.content_type.clone()))
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StoreError> {
        let mut objects = self.objects.lock().unwrap();
        objects.insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(key.to_string())
    }

    async fn presigned_download_url(
        &self,
        bucket: &str,
        key: &str,
        ttl: Duration,
    ) -> Result<String, StoreError> {
        let objects = self.objects.lock().unwrap();
        if !objects.contains_key(&(bucket.to_string(), key.to_string())) {
            return Err(StoreError::NotFound);
        }
        Ok(format!("memory://{bucket}/{key}?expires={}", ttl.as_secs()))
    }

    async fn delete(&self, bucket: &str, key: &str) -> Result<(), StoreError> {
        let mut objects = self.objects.lock().unwrap();
        objects
            .remove(&(bucket.to_string(), key.to_string()))
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
