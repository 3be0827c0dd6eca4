//! Permission catalog: the immutable table of permission groups.
//!
//! A catalog is validated once when it is built. Group ids are unique, every
//! group carries at least one permission, and a permission id belongs to
//! exactly one group. The process-wide catalog lives behind a `OnceLock` and
//! is never mutated after startup.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::selection::PermissionSet;

const BUILTIN_JSON: &str = include_str!("../data/catalog.json");
const BUILTIN_SOURCE: &str = "<builtin>";

/// An atomic, named capability such as `users.edit`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// A named collection of related permissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGroup {
    pub id: String,
    pub name: String,
    pub description: String,
    pub permissions: Vec<Permission>,
}

impl PermissionGroup {
    /// Permission ids in display order
    pub fn permission_ids(&self) -> impl Iterator<Item = &str> {
        self.permissions.iter().map(|p| p.id.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.permissions.iter().any(|p| p.id == id)
    }
}

/// Validated, ordered list of permission groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PermissionGroup>", into = "Vec<PermissionGroup>")]
pub struct Catalog {
    groups: Vec<PermissionGroup>,
    // permission id -> index into `groups`
    owner: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate groups, empty groups and
    /// permissions shared between groups.
    pub fn new(groups: Vec<PermissionGroup>) -> Result<Self> {
        let mut owner: HashMap<String, usize> = HashMap::new();
        for (idx, group) in groups.iter().enumerate() {
            if groups[..idx].iter().any(|g| g.id == group.id) {
                return Err(Error::DuplicateGroup(group.id.clone()));
            }
            if group.permissions.is_empty() {
                return Err(Error::EmptyGroup(group.id.clone()));
            }
            for perm in &group.permissions {
                if let Some(&first) = owner.get(&perm.id) {
                    return Err(Error::DuplicatePermission {
                        id: perm.id.clone(),
                        first: groups[first].id.clone(),
                        second: group.id.clone(),
                    });
                }
                owner.insert(perm.id.clone(), idx);
            }
        }
        Ok(Catalog { groups, owner })
    }

    /// The catalog embedded in the crate
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), groups = catalog.groups.len(), "loaded permission catalog");
        Ok(catalog)
    }

    pub fn groups(&self) -> &[PermissionGroup] {
        &self.groups
    }

    pub fn group(&self, id: &str) -> Option<&PermissionGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Group owning a permission id
    pub fn group_of(&self, permission: &str) -> Option<&PermissionGroup> {
        self.owner.get(permission).map(|&idx| &self.groups[idx])
    }

    pub fn permission(&self, id: &str) -> Option<&Permission> {
        self.group_of(id)?.permissions.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.owner.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.owner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owner.is_empty()
    }

    /// Every permission id across every group
    pub fn all_permission_ids(&self) -> PermissionSet {
        self.groups
            .iter()
            .flat_map(|g| g.permission_ids())
            .collect()
    }

    /// Ids in `set` that no group defines, sorted
    pub fn unknown_ids<'s>(&self, set: &'s PermissionSet) -> Vec<&'s str> {
        set.iter().filter(|id| !self.contains(id)).collect()
    }
}

impl TryFrom<Vec<PermissionGroup>> for Catalog {
    type Error = Error;

    fn try_from(groups: Vec<PermissionGroup>) -> Result<Self> {
        Catalog::new(groups)
    }
}

impl From<Catalog> for Vec<PermissionGroup> {
    fn from(catalog: Catalog) -> Self {
        catalog.groups
    }
}

// Global state
static CATALOG: OnceLock<Catalog> = OnceLock::new();
static INIT_PATH: OnceLock<String> = OnceLock::new();

/// Load the process-wide catalog from a JSON file.
///
/// Repeating the call with the same path is a no-op. Any other path, or a
/// call after the built-in catalog has already been handed out, fails.
pub fn init(path: &str) -> Result<&'static Catalog> {
    if let Some(p) = INIT_PATH.get() {
        return if p == path {
            catalog()
        } else {
            Err(Error::AlreadyInitialized(p.clone()))
        };
    }
    if CATALOG.get().is_some() {
        return Err(Error::AlreadyInitialized(BUILTIN_SOURCE.into()));
    }
    let loaded = Catalog::from_path(path)?;
    if CATALOG.set(loaded).is_err() {
        return Err(Error::AlreadyInitialized(BUILTIN_SOURCE.into()));
    }
    let _ = INIT_PATH.set(path.to_string());
    tracing::info!(path, "permission catalog initialized");
    catalog()
}

/// The process-wide catalog, falling back to the built-in one
pub fn catalog() -> Result<&'static Catalog> {
    if let Some(c) = CATALOG.get() {
        return Ok(c);
    }
    let builtin = Catalog::builtin()?;
    Ok(CATALOG.get_or_init(|| builtin))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perm(id: &str) -> Permission {
        Permission { id: id.into(), name: id.into(), description: String::new() }
    }

    fn group(id: &str, perms: &[&str]) -> PermissionGroup {
        PermissionGroup {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            permissions: perms.iter().map(|p| perm(p)).collect(),
        }
    }

    #[test]
    fn test_builtin_parses() {
        let c = Catalog::builtin().unwrap();
        assert_eq!(c.groups().len(), 4);
        assert_eq!(c.len(), 12);
        assert_eq!(c.group_of("settings.edit").unwrap().id, "settings");
        assert_eq!(c.permission("roles.delete").unwrap().name, "Delete Roles");
    }

    #[test]
    fn test_shared_permission_rejected() {
        let e = Catalog::new(vec![group("a", &["x.view"]), group("b", &["x.view"])]).unwrap_err();
        match e {
            Error::DuplicatePermission { id, first, second } => {
                assert_eq!((id.as_str(), first.as_str(), second.as_str()), ("x.view", "a", "b"));
            }
            other => panic!("unexpected {other}"),
        }
    }

    #[test]
    fn test_duplicate_within_group_rejected() {
        assert!(Catalog::new(vec![group("a", &["x.view", "x.view"])]).is_err());
    }

    #[test]
    fn test_serializes_as_group_list() {
        let c = Catalog::new(vec![group("a", &["a.one"])]).unwrap();
        let json = serde_json::to_value(&c).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["permissions"][0]["id"], "a.one");
    }
}
