//! Role template and permission editor tests
//!
//! These tests verify template resolution, the overwrite semantics of
//! switching templates, and the editor's threading of selection updates.

use accessdeck::{
    resolve_template, Catalog, Error, GroupCheckState, Permission, PermissionEditor,
    PermissionGroup, PermissionSet, RoleTemplate,
};
use std::sync::Once;

static INIT: Once = Once::new();

fn setup() -> Catalog {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
    Catalog::builtin().unwrap()
}

fn set(ids: &[&str]) -> PermissionSet {
    ids.iter().copied().collect()
}

/// Catalog with `groups` groups of `per_group` permissions each
fn synthetic(groups: usize, per_group: usize) -> Catalog {
    let groups = (0..groups)
        .map(|g| PermissionGroup {
            id: format!("g{g}"),
            name: format!("Group {g}"),
            description: String::new(),
            permissions: (0..per_group)
                .map(|p| Permission {
                    id: format!("g{g}.p{p}"),
                    name: format!("Permission {p}"),
                    description: String::new(),
                })
                .collect(),
        })
        .collect();
    Catalog::new(groups).unwrap()
}

// ============================================================================
// Resolution
// ============================================================================

/// Verify admin resolves to every catalog permission, for any catalog size
#[test]
fn test_admin_is_whole_catalog() {
    let c = setup();
    assert_eq!(resolve_template(RoleTemplate::Admin, &c), c.all_permission_ids());
    assert_eq!(resolve_template(RoleTemplate::Admin, &c).len(), 12);

    for (groups, per_group) in [(1, 1), (3, 2), (10, 7), (25, 40)] {
        let c = synthetic(groups, per_group);
        let admin = resolve_template(RoleTemplate::Admin, &c);
        assert_eq!(admin.len(), groups * per_group);
        for g in c.groups() {
            for p in &g.permissions {
                assert!(admin.contains(&p.id));
            }
        }
    }
}

/// Verify manager is exactly the fixed list
#[test]
fn test_manager_literal_set() {
    let c = setup();
    assert_eq!(
        resolve_template(RoleTemplate::Manager, &c),
        set(&["users.view", "users.create", "users.edit", "roles.view", "settings.view"])
    );
}

/// Verify user and guest are exactly their fixed lists
#[test]
fn test_user_and_guest_literal_sets() {
    let c = setup();
    assert_eq!(resolve_template(RoleTemplate::User, &c), set(&["profile.view", "profile.edit"]));
    assert_eq!(resolve_template(RoleTemplate::Guest, &c), set(&["profile.view"]));
}

/// Verify fixed templates ignore catalog contents
#[test]
fn test_fixed_templates_do_not_depend_on_catalog() {
    let c = synthetic(2, 2);
    assert_eq!(resolve_template(RoleTemplate::Guest, &c), set(&["profile.view"]));
    assert_eq!(resolve_template(RoleTemplate::Manager, &c).len(), 5);
}

/// Verify resolution is deterministic
#[test]
fn test_resolution_is_deterministic() {
    let c = setup();
    for t in RoleTemplate::ALL {
        assert_eq!(t.resolve(&c), t.resolve(&c));
    }
}

/// Verify templates parse from their lowercase names only
#[test]
fn test_template_names() {
    assert_eq!("manager".parse::<RoleTemplate>().unwrap(), RoleTemplate::Manager);
    assert!(matches!("owner".parse::<RoleTemplate>(), Err(Error::UnknownTemplate(s)) if s == "owner"));
    assert_eq!(serde_json::to_string(&RoleTemplate::Guest).unwrap(), "\"guest\"");
}

// ============================================================================
// Editor
// ============================================================================

/// Verify switching template discards the manual selection
#[test]
fn test_template_overwrites_selection() {
    let c = setup();
    let mut editor = PermissionEditor::with_selection(&c, set(&["profile.view", "audit.view"]));
    editor.apply_template(RoleTemplate::User);
    assert_eq!(editor.selected(), &set(&["profile.view", "profile.edit"]));
    assert!(!editor.selected().contains("audit.view"));
    assert_eq!(editor.template(), Some(RoleTemplate::User));
}

/// Verify manual edits after a template survive until the next switch
#[test]
fn test_edits_after_template_then_switch() {
    let c = setup();
    let mut editor = PermissionEditor::new(&c);
    editor.apply_template(RoleTemplate::Guest);
    editor.set_permission("users.view", true);
    assert_eq!(editor.selected(), &set(&["profile.view", "users.view"]));

    editor.apply_template(RoleTemplate::Manager);
    assert!(!editor.selected().contains("profile.view"));
    assert_eq!(editor.group_state("users").unwrap(), GroupCheckState::Indeterminate);
    assert_eq!(editor.group_state("settings").unwrap(), GroupCheckState::Indeterminate);
    assert_eq!(editor.group_state("profile").unwrap(), GroupCheckState::Unchecked);
}

/// Verify group clicks fill partial groups and clear full ones
#[test]
fn test_click_group_cycle() {
    let c = setup();
    let mut editor = PermissionEditor::with_selection(&c, set(&["roles.view"]));
    assert_eq!(editor.click_group("roles").unwrap(), GroupCheckState::Checked);
    assert_eq!(editor.click_group("roles").unwrap(), GroupCheckState::Unchecked);
    assert_eq!(editor.click_group("roles").unwrap(), GroupCheckState::Checked);
    assert_eq!(editor.finish(), set(&["roles.view", "roles.create", "roles.edit", "roles.delete"]));
}

/// Verify group operations reject unknown groups and leave the set alone
#[test]
fn test_unknown_group() {
    let c = setup();
    let mut editor = PermissionEditor::with_selection(&c, set(&["users.view"]));
    assert!(matches!(editor.set_group("audit", true), Err(Error::UnknownGroup(g)) if g == "audit"));
    assert!(editor.click_group("audit").is_err());
    assert!(editor.group_state("audit").is_err());
    assert_eq!(editor.selected(), &set(&["users.view"]));
}

/// Verify admin template checks every group
#[test]
fn test_admin_checks_every_group() {
    let c = setup();
    let mut editor = PermissionEditor::new(&c);
    editor.apply_template(RoleTemplate::Admin);
    assert!(editor.group_states().iter().all(|(_, s)| *s == GroupCheckState::Checked));
    editor.set_group("profile", false).unwrap();
    assert_eq!(editor.group_state("profile").unwrap(), GroupCheckState::Unchecked);
    assert_eq!(editor.group_state("users").unwrap(), GroupCheckState::Checked);
}
