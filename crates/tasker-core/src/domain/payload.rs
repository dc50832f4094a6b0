//! Create/update payloads and the `Patch` tri-state wrapper.
//!
//! Updates are partial: only fields present in the payload are applied. That
//! forces us to distinguish three cases per field — "not provided", "provided
//! as null" (clear it), and "provided with a value" — which a plain
//! `Option<T>` cannot express. `Patch<T>` is that tri-state.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ids::{CategoryId, TodoId};
use super::todo::{Metadata, Priority, Status};

/// Tri-state field for partial updates.
///
/// Serde mapping (with `#[serde(default)]` on the field):
/// - field missing  -> `Keep`
/// - field is null  -> `Clear`
/// - field has a value -> `Set(value)`
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
    /// Field absent from the payload; leave the stored value untouched.
    #[default]
    Keep,
    /// Field explicitly null; clear the stored value.
    Clear,
    /// Field present; replace the stored value.
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }

    /// The value, if this patch sets one.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(v) => Some(v),
            _ => None,
        }
    }

    /// Apply to a nullable slot. `Clear` empties it.
    pub fn apply_to(&self, slot: &mut Option<T>)
    where
        T: Clone,
    {
        match self {
            Patch::Keep => {}
            Patch::Clear => *slot = None,
            Patch::Set(v) => *slot = Some(v.clone()),
        }
    }

    /// Apply to a non-nullable slot. `Clear` is ignored: required fields
    /// cannot be nulled out, only replaced.
    pub fn apply_required(&self, slot: &mut T)
    where
        T: Clone,
    {
        if let Patch::Set(v) = self {
            *slot = v.clone();
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A missing field never reaches here (handled by #[serde(default)]),
        // so anything we see is either null or a value.
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Set(v),
            None => Patch::Clear,
        })
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Set(v) => serializer.serialize_some(v),
            _ => serializer.serialize_none(),
        }
    }
}

/// Payload for creating a todo. Field-level validation (title length and so
/// on) happens at the transport boundary before this payload is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoPayload {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to `Status::Draft` when absent.
    #[serde(default)]
    pub status: Option<Status>,
    /// Defaults to `Priority::Medium` when absent.
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub parent_todo_id: Option<TodoId>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

/// Payload for partially updating a todo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoPayload {
    pub id: TodoId,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub title: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub description: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub status: Patch<Status>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub priority: Patch<Priority>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub due_date: Patch<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub parent_todo_id: Patch<TodoId>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub category_id: Patch<CategoryId>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub metadata: Patch<Metadata>,
}

impl UpdateTodoPayload {
    pub fn new(id: TodoId) -> Self {
        Self {
            id,
            title: Patch::Keep,
            description: Patch::Keep,
            status: Patch::Keep,
            priority: Patch::Keep,
            due_date: Patch::Keep,
            parent_todo_id: Patch::Keep,
            category_id: Patch::Keep,
            metadata: Patch::Keep,
        }
    }
}
