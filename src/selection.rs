//! Group aggregation: selected permission sets and tri-state group checkboxes.
//!
//! Every operation here is a pure function from (current set, input) to the
//! next set. Group state is never stored; it is projected from the set each
//! time it is asked for.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, PermissionGroup};

/// The set of permission ids a form is currently configuring.
///
/// Ids are not required to exist in the catalog. Iteration is sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<String>);

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns false if the id was already present
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.0.insert(id.into())
    }

    /// Returns false if the id was absent
    pub fn remove(&mut self, id: &str) -> bool {
        self.0.remove(id)
    }

    pub fn is_subset(&self, other: &PermissionSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        PermissionSet(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for PermissionSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for PermissionSet {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Aggregate checkbox state of a permission group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupCheckState {
    Unchecked,
    Checked,
    Indeterminate,
}

impl GroupCheckState {
    pub fn is_checked(self) -> bool {
        self == GroupCheckState::Checked
    }
}

/// Project a group's tri-state from the selected set
pub fn derive_group_state(group: &PermissionGroup, selected: &PermissionSet) -> GroupCheckState {
    let total = group.permissions.len();
    let hits = group.permission_ids().filter(|id| selected.contains(id)).count();
    if hits == 0 {
        GroupCheckState::Unchecked
    } else if hits == total {
        GroupCheckState::Checked
    } else {
        GroupCheckState::Indeterminate
    }
}

#[inline]
fn apply(mut set: PermissionSet, id: &str, checked: bool) -> PermissionSet {
    if checked {
        set.insert(id);
    } else {
        set.remove(id);
    }
    set
}

/// Add (`is_checked`) or remove a single permission id
pub fn toggle_permission(id: &str, selected: &PermissionSet, is_checked: bool) -> PermissionSet {
    apply(selected.clone(), id, is_checked)
}

/// Select or deselect every permission of one group; other ids are untouched
pub fn toggle_group(group: &PermissionGroup, selected: &PermissionSet, set_checked: bool) -> PermissionSet {
    let next = group
        .permission_ids()
        .fold(selected.clone(), |set, id| apply(set, id, set_checked));
    tracing::debug!(group = %group.id, set_checked, selected = next.len(), "toggled permission group");
    next
}

/// Target value a click on the group checkbox applies.
///
/// A checked group is cleared; an unchecked or partial one is filled.
pub fn next_group_toggle(state: GroupCheckState) -> bool {
    !state.is_checked()
}

/// State of every catalog group, in catalog order
pub fn group_states<'c>(catalog: &'c Catalog, selected: &PermissionSet) -> Vec<(&'c PermissionGroup, GroupCheckState)> {
    catalog
        .groups()
        .iter()
        .map(|g| (g, derive_group_state(g, selected)))
        .collect()
}
