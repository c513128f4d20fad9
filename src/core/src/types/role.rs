//! Role model

use crate::{ClientId, RealmId, RoleId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

/// Owner of a role
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum RoleContainer {
    /// Realm-level role
    Realm(RealmId),
    /// Client-level role
    Client(ClientId),
}

impl RoleContainer {
    /// Whether the role belongs to a realm rather than a client
    pub fn is_realm(&self) -> bool {
        matches!(self, RoleContainer::Realm(_))
    }

    /// Whether the role belongs to the given client
    pub fn is_client(&self, client_id: &str) -> bool {
        matches!(self, RoleContainer::Client(id) if id == client_id)
    }
}

/// Role defined in a realm or client
///
/// A composite role grants every role listed in `composite_ids` as well.
/// Equality is by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// Internal role identifier
    pub id: RoleId,

    /// Role name, unique within its container
    pub name: String,

    /// Realm or client owning this role
    pub container: RoleContainer,

    /// Roles implied by this one
    #[serde(default)]
    pub composite_ids: BTreeSet<RoleId>,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Role {
    /// Create a realm-level role
    pub fn realm(
        id: impl Into<RoleId>,
        name: impl Into<String>,
        realm_id: impl Into<RealmId>,
    ) -> Self {
        Self::new(id, name, RoleContainer::Realm(realm_id.into()))
    }

    /// Create a client-level role
    pub fn client(
        id: impl Into<RoleId>,
        name: impl Into<String>,
        client_id: impl Into<ClientId>,
    ) -> Self {
        Self::new(id, name, RoleContainer::Client(client_id.into()))
    }

    fn new(id: impl Into<RoleId>, name: impl Into<String>, container: RoleContainer) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            container,
            composite_ids: BTreeSet::new(),
            description: None,
        }
    }

    /// Add a role implied by this one
    pub fn with_composite(mut self, role_id: impl Into<RoleId>) -> Self {
        self.composite_ids.insert(role_id.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether this role implies other roles
    pub fn is_composite(&self) -> bool {
        !self.composite_ids.is_empty()
    }
}

impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Role {}

impl Hash for Role {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
