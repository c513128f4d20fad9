//! Realm and client models

use crate::{ClientId, RealmId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Realm the record lives in
///
/// Realms own realm-level roles, groups and clients. Equality is by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Realm {
    /// Internal realm identifier
    pub id: RealmId,

    /// Human readable realm name (e.g., "master")
    pub name: String,
}

impl Realm {
    /// Create a new realm
    pub fn new(id: impl Into<RealmId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl PartialEq for Realm {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Realm {}

impl Hash for Realm {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Realm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Client (application) registered in a realm
///
/// Clients own client-level roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    /// Internal client identifier
    pub id: ClientId,

    /// Public client id (e.g., "account-console")
    pub client_id: String,

    /// Realm the client is registered in
    pub realm_id: RealmId,
}

impl Client {
    /// Create a new client
    pub fn new(
        id: impl Into<ClientId>,
        client_id: impl Into<String>,
        realm_id: impl Into<RealmId>,
    ) -> Self {
        Self {
            id: id.into(),
            client_id: client_id.into(),
            realm_id: realm_id.into(),
        }
    }
}

impl PartialEq for Client {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Client {}

impl Hash for Client {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
