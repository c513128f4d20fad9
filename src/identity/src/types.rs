//! Reserved attribute names and required actions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reserved attribute holding the login name (stored lower-case)
pub const USERNAME: &str = "username";

/// Reserved attribute holding the email address (stored lower-case)
pub const EMAIL: &str = "email";

/// Attribute holding the given name
pub const FIRST_NAME: &str = "firstName";

/// Attribute holding the family name
pub const LAST_NAME: &str = "lastName";

/// Well-known pending account setup steps
///
/// Records store required actions as plain strings, so custom actions are
/// allowed too. These variants map to their canonical upper-snake names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequiredAction {
    /// Confirm ownership of the email address
    VerifyEmail,
    /// Review and complete the profile
    UpdateProfile,
    /// Set up a one-time password generator
    ConfigureTotp,
    /// Choose a new password
    UpdatePassword,
    /// Accept the terms and conditions
    TermsAndConditions,
}

impl RequiredAction {
    /// All well-known actions
    pub const ALL: [RequiredAction; 5] = [
        RequiredAction::VerifyEmail,
        RequiredAction::UpdateProfile,
        RequiredAction::ConfigureTotp,
        RequiredAction::UpdatePassword,
        RequiredAction::TermsAndConditions,
    ];

    /// Canonical stored name
    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredAction::VerifyEmail => "VERIFY_EMAIL",
            RequiredAction::UpdateProfile => "UPDATE_PROFILE",
            RequiredAction::ConfigureTotp => "CONFIGURE_TOTP",
            RequiredAction::UpdatePassword => "UPDATE_PASSWORD",
            RequiredAction::TermsAndConditions => "TERMS_AND_CONDITIONS",
        }
    }
}

impl fmt::Display for RequiredAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RequiredAction> for String {
    fn from(action: RequiredAction) -> Self {
        action.as_str().to_string()
    }
}

impl FromStr for RequiredAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RequiredAction::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| format!("Unknown required action: {}", s))
    }
}
