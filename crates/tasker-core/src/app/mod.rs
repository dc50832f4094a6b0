//! Application logic: the todo domain service and its wiring.

pub mod attachment_store;
pub mod builder;
pub mod todo_service;

pub use self::attachment_store::{AttachmentStore, PRESIGN_TTL, StorageConfig};
pub use self::builder::{BuildError, TodoServiceBuilder};
pub use self::todo_service::TodoService;
