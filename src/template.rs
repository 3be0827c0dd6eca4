//! Role templates and their default permission sets

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::constants::{GUEST_PERMISSIONS, MANAGER_PERMISSIONS, USER_PERMISSIONS};
use crate::error::Error;
use crate::selection::PermissionSet;

/// Archetypal role with a canonical default permission set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleTemplate {
    Admin,
    Manager,
    User,
    Guest,
}

impl RoleTemplate {
    pub const ALL: [RoleTemplate; 4] = [
        RoleTemplate::Admin,
        RoleTemplate::Manager,
        RoleTemplate::User,
        RoleTemplate::Guest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RoleTemplate::Admin => "admin",
            RoleTemplate::Manager => "manager",
            RoleTemplate::User => "user",
            RoleTemplate::Guest => "guest",
        }
    }

    /// Default permission set for this template
    pub fn resolve(self, catalog: &Catalog) -> PermissionSet {
        resolve_template(self, catalog)
    }
}

impl fmt::Display for RoleTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleTemplate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoleTemplate::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::UnknownTemplate(s.to_string()))
    }
}

/// Map a template to its default permission set.
///
/// `admin` is every permission the catalog defines, so catalog additions are
/// granted to it automatically. The other templates are fixed lists.
pub fn resolve_template(template: RoleTemplate, catalog: &Catalog) -> PermissionSet {
    match template {
        RoleTemplate::Admin => catalog.all_permission_ids(),
        RoleTemplate::Manager => MANAGER_PERMISSIONS.iter().copied().collect(),
        RoleTemplate::User => USER_PERMISSIONS.iter().copied().collect(),
        RoleTemplate::Guest => GUEST_PERMISSIONS.iter().copied().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip_names() {
        for t in RoleTemplate::ALL {
            assert_eq!(t.to_string().parse::<RoleTemplate>().unwrap(), t);
        }
        assert!(matches!("Admin".parse::<RoleTemplate>(), Err(Error::UnknownTemplate(_))));
    }
}
