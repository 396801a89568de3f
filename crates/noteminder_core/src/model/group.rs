//! Group domain model.
//!
//! A group is a named container partitioning notes, akin to one notebook on
//! the shelf. The store guarantees at least one group exists at all times.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a group.
pub type GroupId = Uuid;

/// Named note container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub name: String,
}

impl Group {
    /// Creates a group with a generated stable ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
