//! Domain identifiers (strongly-typed IDs).
//!
//! Record IDs are ULID-based: sortable by creation time, generatable without
//! coordination, and UUID-sized. A phantom-typed `Id<T>` provides the shared
//! implementation while keeping `TodoId`, `CategoryId` and `AttachmentId`
//! distinct types that cannot be mixed up at compile time.
//!
//! `OwnerId` is different: it is the authenticated user identifier handed to
//! us by the transport layer. We treat it as an opaque string and never
//! generate one ourselves.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// Marker trait for each ID type.
///
/// Provides the prefix used by `Display` ("todo-", "category-", "attachment-").
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// Generic ID type.
///
/// `T` is a zero-sized marker; it costs nothing at runtime but makes the ID
/// types mutually incompatible at compile time.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

// ========================================
// Marker types
// ========================================

/// Marker for Todo IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Todo {}

impl IdMarker for Todo {
    fn prefix() -> &'static str {
        "todo-"
    }
}

/// Marker for Category IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {}

impl IdMarker for Category {
    fn prefix() -> &'static str {
        "category-"
    }
}

/// Marker for Attachment IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attachment {}

impl IdMarker for Attachment {
    fn prefix() -> &'static str {
        "attachment-"
    }
}

// ========================================
// Type aliases
// ========================================

/// Identifier of a Todo (task).
pub type TodoId = Id<Todo>;

/// Identifier of a Category.
pub type CategoryId = Id<Category>;

/// Identifier of an Attachment.
pub type AttachmentId = Id<Attachment>;

/// Authenticated user identifier, supplied by the caller.
///
/// Scopes every query and mutation; a lookup under the wrong owner is
/// indistinguishable from "not found".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OwnerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let ulid1 = Ulid::new();
        let ulid2 = Ulid::new();
        let ulid3 = Ulid::new();

        let todo = TodoId::from_ulid(ulid1);
        let category = CategoryId::from_ulid(ulid2);
        let attachment = AttachmentId::from_ulid(ulid3);

        assert_eq!(todo.as_ulid(), ulid1);
        assert_eq!(category.as_ulid(), ulid2);
        assert_eq!(attachment.as_ulid(), ulid3);

        assert!(todo.to_string().starts_with("todo-"));
        assert!(category.to_string().starts_with("category-"));
        assert!(attachment.to_string().starts_with("attachment-"));

        // The whole point: you can't accidentally mix these types.
        // (Compile-time property, so we just keep it as a comment.)
        // let _: TodoId = category; // <- does not compile
    }

    #[test]
    fn ulid_ids_are_sortable() {
        let id1 = TodoId::from_ulid(Ulid::new());
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = TodoId::from_ulid(Ulid::new());

        assert!(id1 < id2);
    }

    #[test]
    fn ulid_ids_can_be_serialized() {
        let todo_id = TodoId::from_ulid(Ulid::new());

        let serialized = serde_json::to_string(&todo_id).unwrap();
        let deserialized: TodoId = serde_json::from_str(&serialized).unwrap();

        assert_eq!(todo_id, deserialized);
    }

    #[test]
    fn owner_id_is_an_opaque_string() {
        let owner = OwnerId::new("user-42");
        assert_eq!(owner.as_str(), "user-42");
        assert_eq!(owner.to_string(), "user-42");

        let json = serde_json::to_string(&owner).unwrap();
        assert_eq!(json, "\"user-42\"");
    }

    #[test]
    fn phantom_data_does_not_consume_memory() {
        use std::mem::size_of;

        assert_eq!(size_of::<TodoId>(), size_of::<Ulid>());
        assert_eq!(size_of::<AttachmentId>(), size_of::<Ulid>());
        assert_eq!(size_of::<Ulid>(), 16);
    }
}
