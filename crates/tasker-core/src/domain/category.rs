//! Category record.
//!
//! Categories are referenced by todos but not owned by them. The only thing
//! this core needs from the category side is an existence/ownership lookup,
//! exposed through the `CategoryDirectory` port.

use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, OwnerId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub owner: OwnerId,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
}
