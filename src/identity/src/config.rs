//! Record options

use crate::error::{IdentityError, Result};
use serde::{Deserialize, Serialize};

/// Behavioral options for a [`UserRecord`](crate::UserRecord)
///
/// ```
/// use ephemera_identity::RecordOptions;
///
/// let options = RecordOptions::from_json_str(r#"{"gate_role_mappings": true}"#).unwrap();
/// assert!(options.gate_role_mappings);
/// assert!(!RecordOptions::default().gate_role_mappings);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordOptions {
    /// Apply the read-only gate to `grant_role` and `delete_role_mapping`.
    ///
    /// Off by default: role mappings stay writable on a read-only record.
    pub gate_role_mappings: bool,
}

impl RecordOptions {
    /// Options with role-mapping mutations gated like every other mutator
    pub fn gated() -> Self {
        Self {
            gate_role_mappings: true,
        }
    }

    /// Parse options from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| IdentityError::InvalidConfig(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        let options = RecordOptions::from_json_str("{}").unwrap();
        assert_eq!(options, RecordOptions::default());
    }

    #[test]
    fn test_gated() {
        assert!(RecordOptions::gated().gate_role_mappings);
    }

    #[test]
    fn test_invalid_json() {
        let err = RecordOptions::from_json_str(r#"{"gate_role_mappings": "yes"}"#).unwrap_err();
        assert!(matches!(err, IdentityError::InvalidConfig(_)));
    }
}
