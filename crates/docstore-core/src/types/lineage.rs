//! The `(owner, parent_url)` pair identifying a version lineage.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies every version of one logical document for one owner.
///
/// Two keys are equal only when both the owner and the exact
/// `parent_url` string match; no path normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineageKey {
    /// The owning user.
    pub owner_id: Uuid,
    /// The logical document path.
    pub parent_url: String,
}

impl LineageKey {
    /// Build a lineage key.
    pub fn new(owner_id: Uuid, parent_url: impl Into<String>) -> Self {
        Self {
            owner_id,
            parent_url: parent_url.into(),
        }
    }
}

impl fmt::Display for LineageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.owner_id, self.parent_url)
    }
}
