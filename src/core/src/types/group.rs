//! Group model

use crate::{GroupId, RoleId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

/// Group in a realm's group hierarchy
///
/// Parents are referenced by id, never owned. Equality is by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Internal group identifier
    pub id: GroupId,

    /// Group name
    pub name: String,

    /// Parent group, `None` for top-level groups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<GroupId>,

    /// Roles granted to every member of this group
    #[serde(default)]
    pub role_ids: BTreeSet<RoleId>,
}

impl Group {
    /// Create a new top-level group
    pub fn new(id: impl Into<GroupId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: None,
            role_ids: BTreeSet::new(),
        }
    }

    /// Nest this group under a parent
    pub fn with_parent(mut self, parent_id: impl Into<GroupId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Grant a role to members of this group
    pub fn with_role(mut self, role_id: impl Into<RoleId>) -> Self {
        self.role_ids.insert(role_id.into());
        self
    }

    /// Whether this group sits at the top of the hierarchy
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Group {}

impl Hash for Group {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
