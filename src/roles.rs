//! Role records on the console

use crate::activity::Changes;
use crate::catalog::PermissionGroup;
use crate::console::{new_id, today, Console};
use crate::editor::PermissionEditor;
use crate::error::{Error, Result};
use crate::models::{AuditAction, AuditEntity, Role};
use crate::selection::{group_states, GroupCheckState, PermissionSet};
use crate::template::RoleTemplate;

impl<'c> Console<'c> {
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn role(&self, id: &str) -> Result<&Role> {
        self.roles
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::not_found("role", id))
    }

    pub fn role_by_name(&self, name: RoleTemplate) -> Option<&Role> {
        self.roles.iter().find(|r| r.name == name)
    }

    /// Editor for a new role form
    pub fn new_role_editor(&self) -> PermissionEditor<'c> {
        PermissionEditor::new(self.catalog)
    }

    /// Editor pre-loaded with an existing role's permissions
    pub fn role_editor(&self, id: &str) -> Result<PermissionEditor<'c>> {
        let role = self.role(id)?;
        Ok(PermissionEditor::with_selection(self.catalog, role.permissions.clone()))
    }

    pub fn role_group_states(&self, id: &str) -> Result<Vec<(&'c PermissionGroup, GroupCheckState)>> {
        Ok(group_states(self.catalog, &self.role(id)?.permissions))
    }

    pub fn create_role(
        &mut self,
        name: RoleTemplate,
        description: impl Into<String>,
        permissions: PermissionSet,
    ) -> &Role {
        self.warn_unknown(&permissions);
        let now = today();
        let role = Role {
            id: new_id(),
            name,
            description: description.into(),
            permissions,
            users_count: 0,
            created_at: now,
            updated_at: now,
        };
        tracing::info!(id = %role.id, %name, permissions = role.permissions.len(), "role created");
        let changes = Changes::default()
            .new_value("name", name)
            .new_value("permissions", &role.permissions);
        let id = role.id.clone();
        self.roles.push(role);
        self.record(AuditEntity::Role, &id, AuditAction::Create, changes, format!("Role {name} created"));
        &self.roles[self.roles.len() - 1]
    }

    /// Replace description and permissions; the template, creation date and
    /// user count are kept.
    pub fn update_role(
        &mut self,
        id: &str,
        description: impl Into<String>,
        permissions: PermissionSet,
    ) -> Result<&Role> {
        self.warn_unknown(&permissions);
        let idx = self
            .roles
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| Error::not_found("role", id))?;
        let role = &mut self.roles[idx];
        let mut changes = Changes::default();
        changes.set("description", &mut role.description, description.into());
        changes.set("permissions", &mut role.permissions, permissions);
        role.updated_at = today();
        let name = role.name;
        tracing::info!(id, permissions = role.permissions.len(), "role updated");
        if !changes.is_empty() {
            self.record(AuditEntity::Role, id, AuditAction::Update, changes, format!("Role {name} updated"));
        }
        Ok(&self.roles[idx])
    }

    pub fn delete_role(&mut self, id: &str) -> Result<Role> {
        let idx = self
            .roles
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| Error::not_found("role", id))?;
        let role = self.roles.remove(idx);
        tracing::info!(id, name = %role.name, "role deleted");
        let changes = Changes::default()
            .old_value("name", role.name)
            .old_value("permissions", &role.permissions);
        self.record(AuditEntity::Role, id, AuditAction::Delete, changes, format!("Role {} deleted", role.name));
        Ok(role)
    }

    fn warn_unknown(&self, permissions: &PermissionSet) {
        let unknown = self.catalog.unknown_ids(permissions);
        if !unknown.is_empty() {
            tracing::warn!(?unknown, "selection contains permissions outside the catalog");
        }
    }
}
