//! Domain model (IDs, records, payloads, queries, events, errors).

pub mod attachment;
pub mod category;
pub mod errors;
pub mod events;
pub mod ids;
pub mod payload;
pub mod query;
pub mod todo;

pub use attachment::Attachment;
pub use category::Category;
pub use errors::{DirectoryError, RepoError, StoreError, TodoError};
pub use events::DomainEvent;
pub use ids::{AttachmentId, CategoryId, OwnerId, TodoId};
pub use payload::{CreateTodoPayload, Patch, UpdateTodoPayload};
pub use query::{Page, SortKey, SortOrder, TodoQuery};
pub use todo::{CategorySummary, Metadata, PopulatedTodo, Priority, Status, Todo, TodoStats};
