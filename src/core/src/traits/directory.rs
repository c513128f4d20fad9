//! Directory trait: the realm/group/role lookups records resolve through

use crate::types::{Group, Role};
use crate::RoleId;
use std::collections::HashSet;
use tracing::trace;

/// Read-only view of a realm's groups and roles
///
/// Implementations only need the four lookups. The closure helpers
/// (group ancestry, composite expansion, group-granted roles) are built on
/// top of them and may be overridden by implementations that can answer
/// faster, e.g. from a precomputed closure table.
///
/// All calls are synchronous. A lookup that finds nothing returns `None`;
/// callers treat that as a dangling reference, not as a failure.
pub trait Directory: Send + Sync {
    /// Resolve a group id within a realm
    fn group_by_id(&self, realm_id: &str, id: &str) -> Option<Group>;

    /// Resolve a role id within a realm (realm or client roles)
    fn role_by_id(&self, realm_id: &str, id: &str) -> Option<Role>;

    /// Groups every new user of the realm joins
    fn default_groups(&self, realm_id: &str) -> Vec<Group>;

    /// Roles every new user of the realm is granted
    fn default_roles(&self, realm_id: &str) -> Vec<Role>;

    /// Parent chain of `group`, nearest parent first
    ///
    /// Stops at a dangling parent id or when the chain loops back on itself.
    fn group_ancestors(&self, realm_id: &str, group: &Group) -> Vec<Group> {
        let mut ancestors = Vec::new();
        let mut seen = HashSet::new();
        seen.insert(group.id.clone());

        let mut next = group.parent_id.clone();
        while let Some(parent_id) = next {
            if !seen.insert(parent_id.clone()) {
                trace!(group = %group.id, parent = %parent_id, "Group hierarchy loops, stopping ancestor walk");
                break;
            }
            let Some(parent) = self.group_by_id(realm_id, &parent_id) else {
                trace!(group = %group.id, parent = %parent_id, "Dangling parent group");
                break;
            };
            next = parent.parent_id.clone();
            ancestors.push(parent);
        }

        ancestors
    }

    /// Whether `target` is one of `groups` or an ancestor of any of them
    fn is_member(&self, realm_id: &str, groups: &HashSet<Group>, target: &Group) -> bool {
        if groups.contains(target) {
            return true;
        }
        groups.iter().any(|group| {
            self.group_ancestors(realm_id, group)
                .iter()
                .any(|ancestor| ancestor == target)
        })
    }

    /// Whether holding `role` grants `target`, directly or through composites
    fn role_implies(&self, realm_id: &str, role: &Role, target: &Role) -> bool {
        if role == target {
            return true;
        }
        if !role.is_composite() {
            return false;
        }

        let mut visited: HashSet<RoleId> = HashSet::new();
        visited.insert(role.id.clone());
        let mut pending: Vec<RoleId> = role.composite_ids.iter().cloned().collect();

        while let Some(id) = pending.pop() {
            if !visited.insert(id.clone()) {
                continue;
            }
            // Only composites the directory still resolves count
            let Some(child) = self.role_by_id(realm_id, &id) else {
                trace!(role = %role.id, composite = %id, "Dangling composite role");
                continue;
            };
            if &child == target {
                return true;
            }
            pending.extend(
                child
                    .composite_ids
                    .iter()
                    .filter(|c| !visited.contains(*c))
                    .cloned(),
            );
        }

        false
    }

    /// Whether any of `roles` grants `target`
    fn has_role(&self, realm_id: &str, roles: &HashSet<Role>, target: &Role) -> bool {
        roles
            .iter()
            .any(|role| self.role_implies(realm_id, role, target))
    }

    /// Whether the roles mapped to `group` itself grant `target`
    fn group_has_role(&self, realm_id: &str, group: &Group, target: &Role) -> bool {
        group.role_ids.iter().any(|id| {
            self.role_by_id(realm_id, id)
                .is_some_and(|role| self.role_implies(realm_id, &role, target))
        })
    }

    /// Whether membership in any of `groups` grants `target`
    ///
    /// With `check_parents`, roles mapped to ancestor groups count as well.
    fn has_role_from_groups(
        &self,
        realm_id: &str,
        groups: &HashSet<Group>,
        target: &Role,
        check_parents: bool,
    ) -> bool {
        groups.iter().any(|group| {
            self.group_has_role(realm_id, group, target)
                || (check_parents
                    && self
                        .group_ancestors(realm_id, group)
                        .iter()
                        .any(|ancestor| self.group_has_role(realm_id, ancestor, target)))
        })
    }
}
