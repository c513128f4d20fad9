//! Group and role resolution for user records
//!
//! Records store only group and role ids. Every read resolves them through
//! the record's directory; ids the directory no longer knows are left out
//! of the result instead of failing the call.

use super::record::UserRecord;
use crate::error::Result;
use ephemera_core::{Client, Group, Role, RoleContainer};
use std::collections::HashSet;
use tracing::debug;

impl UserRecord {
    /// Groups this record joined directly, resolved through the directory
    pub fn groups(&self) -> HashSet<Group> {
        self.group_ids
            .iter()
            .filter_map(|id| {
                let group = self.directory.group_by_id(&self.realm.id, id);
                if group.is_none() {
                    debug!(user_id = %self.id(), group_id = %id, "Omitting unresolved group");
                }
                group
            })
            .collect()
    }

    pub fn join_group(&mut self, group: &Group) -> Result<()> {
        self.check_readonly("join_group")?;
        self.group_ids.insert(group.id.clone());
        Ok(())
    }

    pub fn leave_group(&mut self, group: &Group) -> Result<()> {
        self.check_readonly("leave_group")?;
        self.group_ids.remove(&group.id);
        Ok(())
    }

    /// Whether the record belongs to `group` directly or through a subgroup
    pub fn is_member_of(&self, group: &Group) -> bool {
        if self.group_ids.contains(&group.id) {
            return true;
        }
        let groups = self.groups();
        self.directory.is_member(&self.realm.id, &groups, group)
    }

    /// Roles granted directly, resolved through the directory
    pub fn role_mappings(&self) -> HashSet<Role> {
        self.role_ids
            .iter()
            .filter_map(|id| {
                let role = self.directory.role_by_id(&self.realm.id, id);
                if role.is_none() {
                    debug!(user_id = %self.id(), role_id = %id, "Omitting unresolved role");
                }
                role
            })
            .collect()
    }

    /// Grant `role` directly
    ///
    /// Only subject to the read-only gate when
    /// [`RecordOptions::gate_role_mappings`](crate::RecordOptions) is set.
    pub fn grant_role(&mut self, role: &Role) -> Result<()> {
        self.check_role_mapping_gate("grant_role")?;
        self.role_ids.insert(role.id.clone());
        Ok(())
    }

    pub fn delete_role_mapping(&mut self, role: &Role) -> Result<()> {
        self.check_role_mapping_gate("delete_role_mapping")?;
        self.role_ids.remove(&role.id);
        Ok(())
    }

    /// Direct roles owned by this record's realm
    pub fn realm_role_mappings(&self) -> HashSet<Role> {
        let realm = RoleContainer::Realm(self.realm.id.clone());
        self.role_mappings()
            .into_iter()
            .filter(|role| role.container == realm)
            .collect()
    }

    /// Direct roles owned by `client`
    pub fn client_role_mappings(&self, client: &Client) -> HashSet<Role> {
        self.role_mappings()
            .into_iter()
            .filter(|role| role.container.is_client(&client.id))
            .collect()
    }

    /// Whether the record holds `role`
    ///
    /// Counts direct grants, composite expansion of direct grants, and roles
    /// mapped to any joined group or its ancestors.
    pub fn has_role(&self, role: &Role) -> bool {
        let realm_id = &self.realm.id;
        let roles = self.role_mappings();
        if self.directory.has_role(realm_id, &roles, role) {
            return true;
        }
        let groups = self.groups();
        self.directory.has_role_from_groups(realm_id, &groups, role, true)
    }

    fn check_role_mapping_gate(&self, operation: &'static str) -> Result<()> {
        if self.options.gate_role_mappings {
            self.check_readonly(operation)?;
        }
        Ok(())
    }
}
