//! Thread-safe in-memory directory
//!
//! Backs records created without a durable store: demos, tests and
//! synthetic sessions. Lookups clone the stored model out of the lock.

use ephemera_core::{
    Client, ClientId, CoreError, Directory, Group, GroupId, Realm, RealmId, Result, Role,
    RoleContainer, RoleId,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// Everything stored for one realm
#[derive(Debug, Default)]
struct RealmEntry {
    realm: Option<Realm>,
    clients: HashMap<ClientId, Client>,
    groups: HashMap<GroupId, Group>,
    roles: HashMap<RoleId, Role>,
    default_group_ids: Vec<GroupId>,
    default_role_ids: Vec<RoleId>,
}

/// In-memory [`Directory`] shared through `Arc`
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    realms: RwLock<HashMap<RealmId, RealmEntry>>,
}

impl InMemoryDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a realm
    pub fn add_realm(&self, realm: Realm) {
        let mut realms = self.realms.write();
        let entry = realms.entry(realm.id.clone()).or_default();
        debug!(realm = %realm.id, "Registered realm");
        entry.realm = Some(realm);
    }

    pub fn realm(&self, realm_id: &str) -> Option<Realm> {
        self.realms.read().get(realm_id).and_then(|e| e.realm.clone())
    }

    /// Register a client in its realm
    pub fn add_client(&self, client: Client) -> Result<()> {
        let realm_id = client.realm_id.clone();
        self.with_realm(&realm_id, |entry| {
            entry.clients.insert(client.id.clone(), client);
            Ok(())
        })
    }

    pub fn client(&self, realm_id: &str, id: &str) -> Option<Client> {
        self.realms
            .read()
            .get(realm_id)
            .and_then(|e| e.clients.get(id).cloned())
    }

    /// Add or replace a group
    ///
    /// A parent, when given, must already exist in the realm.
    pub fn add_group(&self, realm_id: &str, group: Group) -> Result<()> {
        self.with_realm(realm_id, |entry| {
            if let Some(parent_id) = &group.parent_id {
                if !entry.groups.contains_key(parent_id) {
                    return Err(CoreError::not_found(format!(
                        "parent group '{}' of '{}'",
                        parent_id, group.id
                    )));
                }
            }
            entry.groups.insert(group.id.clone(), group);
            Ok(())
        })
    }

    /// Add or replace a role
    ///
    /// Realm roles must belong to this realm, client roles to one of its
    /// clients.
    pub fn add_role(&self, realm_id: &str, role: Role) -> Result<()> {
        self.with_realm(realm_id, |entry| {
            match &role.container {
                RoleContainer::Realm(id) if id != realm_id => {
                    return Err(CoreError::invalid(format!(
                        "role '{}' belongs to realm '{}', not '{}'",
                        role.id, id, realm_id
                    )));
                }
                RoleContainer::Client(id) if !entry.clients.contains_key(id) => {
                    return Err(CoreError::not_found(format!(
                        "client '{}' for role '{}'",
                        id, role.id
                    )));
                }
                _ => {}
            }
            entry.roles.insert(role.id.clone(), role);
            Ok(())
        })
    }

    /// Mark an existing group as joined by every new user
    pub fn add_default_group(&self, realm_id: &str, group_id: &str) -> Result<()> {
        self.with_realm(realm_id, |entry| {
            if !entry.groups.contains_key(group_id) {
                return Err(CoreError::not_found(format!("group '{}'", group_id)));
            }
            if !entry.default_group_ids.iter().any(|id| id == group_id) {
                entry.default_group_ids.push(group_id.to_string());
            }
            Ok(())
        })
    }

    /// Mark an existing role as granted to every new user
    pub fn add_default_role(&self, realm_id: &str, role_id: &str) -> Result<()> {
        self.with_realm(realm_id, |entry| {
            if !entry.roles.contains_key(role_id) {
                return Err(CoreError::not_found(format!("role '{}'", role_id)));
            }
            if !entry.default_role_ids.iter().any(|id| id == role_id) {
                entry.default_role_ids.push(role_id.to_string());
            }
            Ok(())
        })
    }

    /// Remove a group; records still holding its id will skip it
    pub fn remove_group(&self, realm_id: &str, group_id: &str) -> Option<Group> {
        let mut realms = self.realms.write();
        let entry = realms.get_mut(realm_id)?;
        entry.default_group_ids.retain(|id| id != group_id);
        entry.groups.remove(group_id)
    }

    /// Remove a role; records still holding its id will skip it
    pub fn remove_role(&self, realm_id: &str, role_id: &str) -> Option<Role> {
        let mut realms = self.realms.write();
        let entry = realms.get_mut(realm_id)?;
        entry.default_role_ids.retain(|id| id != role_id);
        entry.roles.remove(role_id)
    }

    fn with_realm<T>(
        &self,
        realm_id: &str,
        f: impl FnOnce(&mut RealmEntry) -> Result<T>,
    ) -> Result<T> {
        let mut realms = self.realms.write();
        match realms.get_mut(realm_id) {
            Some(entry) if entry.realm.is_some() => f(entry),
            _ => Err(CoreError::not_found(format!("realm '{}'", realm_id))),
        }
    }
}

impl Directory for InMemoryDirectory {
    fn group_by_id(&self, realm_id: &str, id: &str) -> Option<Group> {
        self.realms
            .read()
            .get(realm_id)
            .and_then(|e| e.groups.get(id).cloned())
    }

    fn role_by_id(&self, realm_id: &str, id: &str) -> Option<Role> {
        self.realms
            .read()
            .get(realm_id)
            .and_then(|e| e.roles.get(id).cloned())
    }

    fn default_groups(&self, realm_id: &str) -> Vec<Group> {
        let realms = self.realms.read();
        let Some(entry) = realms.get(realm_id) else {
            return Vec::new();
        };
        entry
            .default_group_ids
            .iter()
            .filter_map(|id| entry.groups.get(id).cloned())
            .collect()
    }

    fn default_roles(&self, realm_id: &str) -> Vec<Role> {
        let realms = self.realms.read();
        let Some(entry) = realms.get(realm_id) else {
            return Vec::new();
        };
        entry
            .default_role_ids
            .iter()
            .filter_map(|id| entry.roles.get(id).cloned())
            .collect()
    }
}
