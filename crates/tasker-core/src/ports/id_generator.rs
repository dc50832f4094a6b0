//! IdGenerator port - server-assigned record IDs.
//!
//! IDs are ULIDs built from the clock plus randomness: sortable by creation
//! time and generatable on any node without coordination. The trait exists
//! so tests can substitute a deterministic generator.

use ulid::Ulid;

use crate::domain::{AttachmentId, CategoryId, TodoId};
use crate::ports::Clock;

pub trait IdGenerator: Send + Sync {
    fn new_todo_id(&self) -> TodoId;
    fn new_category_id(&self) -> CategoryId;
    fn new_attachment_id(&self) -> AttachmentId;
}

/// ULID-based generator driven by a `Clock`.
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    fn next_ulid(&self) -> Ulid {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        Ulid::from_parts(timestamp_ms, rand::random())
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn new_todo_id(&self) -> TodoId {
        TodoId::from(self.next_ulid())
    }

    fn new_category_id(&self) -> CategoryId {
        CategoryId::from(self.next_ulid())
    }

    fn new_attachment_id(&self) -> AttachmentId {
        AttachmentId::from(self.next_ulid())
    }
}
