//! User roles chosen at sign-up.
//!
//! The identity provider stores the role in the `custom:role` attribute; the
//! database keeps managers and tenants in separate tables keyed by the
//! provider's user id.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_TENANT: &str = "tenant";

/// Roles offered on the sign-up form, in display order.
pub const SIGN_UP_ROLES: &[Role] = &[Role::Tenant, Role::Manager];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    Tenant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Manager => ROLE_MANAGER,
            Role::Tenant => ROLE_TENANT,
        }
    }

    /// Path prefix of the dashboard section owned by this role.
    pub fn dashboard_prefix(self) -> &'static str {
        match self {
            Role::Manager => "/managers",
            Role::Tenant => "/tenants",
        }
    }

    /// Landing page after sign-in, or after being bounced from the other role's section.
    pub fn home_path(self) -> &'static str {
        match self {
            Role::Manager => "/managers/properties",
            Role::Tenant => "/tenants/favorites",
        }
    }

    /// REST collection holding this role's user records.
    pub fn collection_path(self) -> &'static str {
        match self {
            Role::Manager => "/managers",
            Role::Tenant => "/tenants",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    /// Case-insensitive; the provider UI sends `Manager` / `Tenant`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            ROLE_MANAGER => Ok(Role::Manager),
            ROLE_TENANT => Ok(Role::Tenant),
            other => Err(CoreError::Validation(format!(
                "Unknown role '{other}'. Must be one of: {ROLE_MANAGER}, {ROLE_TENANT}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Manager".parse::<Role>().unwrap(), Role::Manager);
        assert_eq!(" tenant ".parse::<Role>().unwrap(), Role::Tenant);
        assert_eq!("TENANT".parse::<Role>().unwrap(), Role::Tenant);
    }

    #[test]
    fn rejects_unknown_role() {
        assert!("admin".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn home_path_lives_under_dashboard_prefix() {
        for role in SIGN_UP_ROLES {
            assert!(role.home_path().starts_with(role.dashboard_prefix()));
        }
    }
}
