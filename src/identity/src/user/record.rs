//! The in-memory user record
//!
//! A [`UserRecord`] holds scalar account fields, an attribute multimap,
//! required actions, and the ids of the groups and roles it is mapped to.
//! Groups and roles are resolved on demand through the [`Directory`] handed
//! in at construction (see the `membership` module).

use super::attributes::Attributes;
use crate::config::RecordOptions;
use crate::error::{IdentityError, Result};
use crate::types::{EMAIL, FIRST_NAME, LAST_NAME, USERNAME};
use ephemera_core::{Directory, GroupId, Realm, RoleId, UserId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// In-memory user record
///
/// Designed for a single owner: there is no internal locking. Two records
/// are equal when their ids are equal, whatever else they contain.
///
/// # Example
///
/// ```
/// use ephemera_core::{Realm, Role};
/// use ephemera_identity::{InMemoryDirectory, UserRecord};
/// use std::sync::Arc;
///
/// let directory = Arc::new(InMemoryDirectory::new());
/// let realm = Realm::new("realm-1", "demo");
/// directory.add_realm(realm.clone());
/// let role = Role::realm("r1", "reader", "realm-1");
/// directory.add_role("realm-1", role.clone()).unwrap();
///
/// let mut user = UserRecord::new(directory, realm, "u1");
/// user.set_username("Alice").unwrap();
/// user.grant_role(&role).unwrap();
///
/// assert_eq!(user.username(), Some("alice"));
/// assert!(user.has_role(&role));
/// ```
pub struct UserRecord {
    id: UserId,
    pub(super) realm: Realm,
    pub(super) directory: Arc<dyn Directory>,
    pub(super) options: RecordOptions,

    created_timestamp: i64,
    enabled: bool,
    email_verified: bool,
    attributes: Attributes,
    required_actions: HashSet<String>,
    pub(super) role_ids: HashSet<RoleId>,
    pub(super) group_ids: HashSet<GroupId>,
    federation_link: Option<String>,
    service_account_client_link: Option<String>,

    readonly: bool,
}

impl UserRecord {
    /// Create a record with default options
    pub fn new(directory: Arc<dyn Directory>, realm: Realm, id: impl Into<UserId>) -> Self {
        Self::with_options(directory, realm, id, RecordOptions::default())
    }

    /// Create a record with a random UUID id
    pub fn with_generated_id(directory: Arc<dyn Directory>, realm: Realm) -> Self {
        Self::new(directory, realm, Uuid::new_v4().to_string())
    }

    /// Create a record with explicit options
    pub fn with_options(
        directory: Arc<dyn Directory>,
        realm: Realm,
        id: impl Into<UserId>,
        options: RecordOptions,
    ) -> Self {
        let id = id.into();
        debug!(user_id = %id, realm = %realm.id, ?options, "Created in-memory user record");

        Self {
            id,
            realm,
            directory,
            options,
            created_timestamp: chrono::Utc::now().timestamp_millis(),
            enabled: false,
            email_verified: false,
            attributes: Attributes::new(),
            required_actions: HashSet::new(),
            role_ids: HashSet::new(),
            group_ids: HashSet::new(),
            federation_link: None,
            service_account_client_link: None,
            readonly: false,
        }
    }

    /// Grant the realm's default roles and join its default groups
    ///
    /// Already-present ids are absorbed; nothing is removed. Fails before
    /// any change when default groups exist and the record is read-only.
    pub fn add_defaults(&mut self) -> Result<()> {
        let roles = self.directory.default_roles(&self.realm.id);
        let groups = self.directory.default_groups(&self.realm.id);

        if !groups.is_empty() || (self.options.gate_role_mappings && !roles.is_empty()) {
            self.check_readonly("add_defaults")?;
        }

        for role in &roles {
            self.grant_role(role)?;
        }
        for group in &groups {
            self.join_group(group)?;
        }

        debug!(
            user_id = %self.id,
            roles = roles.len(),
            groups = groups.len(),
            "Applied realm defaults"
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read-only gate
    // ------------------------------------------------------------------

    /// Switch read-only mode on or off
    pub fn set_readonly(&mut self, flag: bool) {
        if self.readonly != flag {
            debug!(user_id = %self.id, readonly = flag, "Read-only mode changed");
        }
        self.readonly = flag;
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    pub fn options(&self) -> RecordOptions {
        self.options
    }

    pub(super) fn check_readonly(&self, operation: &'static str) -> Result<()> {
        if self.readonly {
            warn!(user_id = %self.id, operation, "Rejected mutation of read-only user record");
            return Err(IdentityError::read_only());
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Scalar fields
    // ------------------------------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn realm(&self) -> &Realm {
        &self.realm
    }

    /// Creation time in epoch milliseconds
    pub fn created_timestamp(&self) -> i64 {
        self.created_timestamp
    }

    pub fn set_created_timestamp(&mut self, timestamp: i64) -> Result<()> {
        self.check_readonly("set_created_timestamp")?;
        self.created_timestamp = timestamp;
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        self.check_readonly("set_enabled")?;
        self.enabled = enabled;
        Ok(())
    }

    pub fn is_email_verified(&self) -> bool {
        self.email_verified
    }

    pub fn set_email_verified(&mut self, verified: bool) -> Result<()> {
        self.check_readonly("set_email_verified")?;
        self.email_verified = verified;
        Ok(())
    }

    /// Id of the federation provider this record was imported from
    pub fn federation_link(&self) -> Option<&str> {
        self.federation_link.as_deref()
    }

    pub fn set_federation_link(&mut self, link: Option<String>) -> Result<()> {
        self.check_readonly("set_federation_link")?;
        self.federation_link = link;
        Ok(())
    }

    /// Internal id of the client this record is the service account of
    pub fn service_account_client_link(&self) -> Option<&str> {
        self.service_account_client_link.as_deref()
    }

    pub fn set_service_account_client_link(&mut self, client_internal_id: Option<String>) -> Result<()> {
        self.check_readonly("set_service_account_client_link")?;
        self.service_account_client_link = client_internal_id;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// Replace all values of `name` with one value
    pub fn set_single_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        self.check_readonly("set_single_attribute")?;
        self.attributes.set_single(name, value);
        Ok(())
    }

    /// Replace the full value sequence of `name`
    pub fn set_attribute(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        self.check_readonly("set_attribute")?;
        self.attributes.set(name, values);
        Ok(())
    }

    /// Delete `name`; removing an absent key is not an error
    pub fn remove_attribute(&mut self, name: &str) -> Result<()> {
        self.check_readonly("remove_attribute")?;
        self.attributes.remove(name);
        Ok(())
    }

    pub fn first_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.first(name)
    }

    /// Copy of the values of `name`; empty when absent
    pub fn attribute(&self, name: &str) -> Vec<String> {
        self.attributes.values(name).to_vec()
    }

    /// Borrowed values of `name`; empty when absent
    pub fn attribute_values(&self, name: &str) -> &[String] {
        self.attributes.values(name)
    }

    /// Copy of every attribute, in insertion order
    pub fn attributes(&self) -> IndexMap<String, Vec<String>> {
        self.attributes.to_map()
    }

    pub fn username(&self) -> Option<&str> {
        self.first_attribute(USERNAME)
    }

    pub fn set_username(&mut self, username: &str) -> Result<()> {
        self.set_single_attribute(USERNAME, username)
    }

    pub fn email(&self) -> Option<&str> {
        self.first_attribute(EMAIL)
    }

    pub fn set_email(&mut self, email: &str) -> Result<()> {
        self.set_single_attribute(EMAIL, email)
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_attribute(FIRST_NAME)
    }

    pub fn set_first_name(&mut self, first_name: &str) -> Result<()> {
        self.set_single_attribute(FIRST_NAME, first_name)
    }

    pub fn last_name(&self) -> Option<&str> {
        self.first_attribute(LAST_NAME)
    }

    pub fn set_last_name(&mut self, last_name: &str) -> Result<()> {
        self.set_single_attribute(LAST_NAME, last_name)
    }

    // ------------------------------------------------------------------
    // Required actions
    // ------------------------------------------------------------------

    /// Copy of the pending required actions
    pub fn required_actions(&self) -> HashSet<String> {
        self.required_actions.clone()
    }

    /// Add a required action by name or as a [`RequiredAction`](crate::RequiredAction)
    pub fn add_required_action(&mut self, action: impl Into<String>) -> Result<()> {
        self.check_readonly("add_required_action")?;
        self.required_actions.insert(action.into());
        Ok(())
    }

    pub fn remove_required_action(&mut self, action: impl Into<String>) -> Result<()> {
        self.check_readonly("remove_required_action")?;
        let action: String = action.into();
        self.required_actions.remove(&action);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Raw mappings
    // ------------------------------------------------------------------

    /// Ids of directly joined groups, resolved or not
    pub fn group_ids(&self) -> &HashSet<GroupId> {
        &self.group_ids
    }

    /// Ids of directly granted roles, resolved or not
    pub fn role_ids(&self) -> &HashSet<RoleId> {
        &self.role_ids
    }

    /// Serializable copy of the stored data
    pub fn snapshot(&self) -> UserSnapshot {
        UserSnapshot {
            id: self.id.clone(),
            realm_id: self.realm.id.clone(),
            created_timestamp: self.created_timestamp,
            enabled: self.enabled,
            email_verified: self.email_verified,
            attributes: self.attributes.clone(),
            required_actions: self.required_actions.iter().cloned().collect(),
            role_ids: self.role_ids.iter().cloned().collect(),
            group_ids: self.group_ids.iter().cloned().collect(),
            federation_link: self.federation_link.clone(),
            service_account_client_link: self.service_account_client_link.clone(),
            readonly: self.readonly,
        }
    }
}

impl PartialEq for UserRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for UserRecord {}

impl Hash for UserRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("realm", &self.realm.id)
            .field("enabled", &self.enabled)
            .field("readonly", &self.readonly)
            .field("groups", &self.group_ids.len())
            .field("roles", &self.role_ids.len())
            .finish_non_exhaustive()
    }
}

/// Point-in-time copy of a record's stored data
///
/// Set-valued fields are sorted so snapshots compare and print stably.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub id: UserId,
    pub realm_id: String,
    pub created_timestamp: i64,
    pub enabled: bool,
    pub email_verified: bool,
    pub attributes: Attributes,
    pub required_actions: BTreeSet<String>,
    pub role_ids: BTreeSet<RoleId>,
    pub group_ids: BTreeSet<GroupId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub federation_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_client_link: Option<String>,
    pub readonly: bool,
}
