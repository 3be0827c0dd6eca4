//! Form-side owner of a selected permission set.
//!
//! The editor holds the working selection for one open role/key/request form
//! and threads every result of the pure selection functions into the next
//! call, so no update can observe a stale set.

use crate::catalog::{Catalog, PermissionGroup};
use crate::error::{Error, Result};
use crate::selection::{
    derive_group_state, group_states, next_group_toggle, toggle_group, toggle_permission,
    GroupCheckState, PermissionSet,
};
use crate::template::RoleTemplate;

#[derive(Debug, Clone)]
pub struct PermissionEditor<'c> {
    catalog: &'c Catalog,
    template: Option<RoleTemplate>,
    selected: PermissionSet,
}

impl<'c> PermissionEditor<'c> {
    /// Empty selection, no template chosen
    pub fn new(catalog: &'c Catalog) -> Self {
        Self::with_selection(catalog, PermissionSet::new())
    }

    /// Start from prior data, e.g. a role being edited
    pub fn with_selection(catalog: &'c Catalog, selected: PermissionSet) -> Self {
        PermissionEditor { catalog, template: None, selected }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn template(&self) -> Option<RoleTemplate> {
        self.template
    }

    pub fn selected(&self) -> &PermissionSet {
        &self.selected
    }

    /// Replace the whole selection with the template defaults.
    ///
    /// Manual edits made before the switch are discarded.
    pub fn apply_template(&mut self, template: RoleTemplate) -> &PermissionSet {
        let previous = self.selected.len();
        self.selected = template.resolve(self.catalog);
        self.template = Some(template);
        tracing::debug!(%template, previous, selected = self.selected.len(), "applied role template");
        &self.selected
    }

    pub fn set_permission(&mut self, id: &str, checked: bool) -> &PermissionSet {
        self.selected = toggle_permission(id, &self.selected, checked);
        &self.selected
    }

    pub fn set_group(&mut self, group_id: &str, checked: bool) -> Result<&PermissionSet> {
        let group = self.lookup(group_id)?;
        self.selected = toggle_group(group, &self.selected, checked);
        Ok(&self.selected)
    }

    /// Click on the group checkbox: clears a checked group, fills any other
    pub fn click_group(&mut self, group_id: &str) -> Result<GroupCheckState> {
        let group = self.lookup(group_id)?;
        let target = next_group_toggle(derive_group_state(group, &self.selected));
        self.selected = toggle_group(group, &self.selected, target);
        Ok(derive_group_state(group, &self.selected))
    }

    pub fn group_state(&self, group_id: &str) -> Result<GroupCheckState> {
        Ok(derive_group_state(self.lookup(group_id)?, &self.selected))
    }

    pub fn group_states(&self) -> Vec<(&'c PermissionGroup, GroupCheckState)> {
        group_states(self.catalog, &self.selected)
    }

    /// Hand the final selection to the submit collaborator
    pub fn finish(self) -> PermissionSet {
        self.selected
    }

    fn lookup(&self, group_id: &str) -> Result<&'c PermissionGroup> {
        self.catalog
            .group(group_id)
            .ok_or_else(|| Error::UnknownGroup(group_id.to_string()))
    }
}
