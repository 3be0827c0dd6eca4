//! Group aggregation tests
//!
//! These tests verify tri-state derivation, single permission toggles and
//! bulk group toggles against the built-in catalog.

use accessdeck::{
    derive_group_state, group_states, toggle_group, toggle_permission, Catalog, GroupCheckState,
    PermissionGroup, PermissionSet,
};
use std::sync::Once;

static INIT: Once = Once::new();

fn setup() -> Catalog {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
    Catalog::builtin().unwrap()
}

fn users_group(c: &Catalog) -> &PermissionGroup {
    c.group("users").unwrap()
}

fn set(ids: &[&str]) -> PermissionSet {
    ids.iter().copied().collect()
}

// ============================================================================
// Tri-state derivation
// ============================================================================

/// Verify the users group walks unchecked -> indeterminate -> checked
#[test]
fn test_users_group_tri_state() {
    let c = setup();
    let g = users_group(&c);

    assert_eq!(derive_group_state(g, &set(&[])), GroupCheckState::Unchecked);
    assert_eq!(derive_group_state(g, &set(&["users.view"])), GroupCheckState::Indeterminate);
    assert_eq!(
        derive_group_state(g, &set(&["users.view", "users.create", "users.edit", "users.delete"])),
        GroupCheckState::Checked
    );
}

/// Verify ids of other groups never count toward a group
#[test]
fn test_foreign_ids_do_not_count() {
    let c = setup();
    let g = users_group(&c);
    let s = set(&["roles.view", "roles.edit", "profile.view"]);
    assert_eq!(derive_group_state(g, &s), GroupCheckState::Unchecked);
}

/// Verify ids outside the catalog are inert for derivation
#[test]
fn test_unknown_ids_are_inert() {
    let c = setup();
    let g = users_group(&c);
    let s = set(&["audit.view", "users.view", "users.create", "users.edit", "users.delete"]);
    assert_eq!(derive_group_state(g, &s), GroupCheckState::Checked);
    assert_eq!(derive_group_state(g, &set(&["audit.view"])), GroupCheckState::Unchecked);
}

/// Verify group_states follows catalog order
#[test]
fn test_states_in_catalog_order() {
    let c = setup();
    let s = set(&["settings.view", "settings.edit", "profile.view"]);
    let states: Vec<(&str, GroupCheckState)> =
        group_states(&c, &s).into_iter().map(|(g, st)| (g.id.as_str(), st)).collect();
    assert_eq!(
        states,
        vec![
            ("users", GroupCheckState::Unchecked),
            ("roles", GroupCheckState::Unchecked),
            ("settings", GroupCheckState::Checked),
            ("profile", GroupCheckState::Indeterminate),
        ]
    );
}

// ============================================================================
// Single permission toggles
// ============================================================================

/// Verify adding or removing twice equals doing it once
#[test]
fn test_toggle_permission_is_idempotent() {
    let base = set(&["roles.view"]);

    let once = toggle_permission("users.view", &base, true);
    let twice = toggle_permission("users.view", &once, true);
    assert_eq!(once, twice);
    assert_eq!(once, set(&["roles.view", "users.view"]));

    let once = toggle_permission("roles.view", &base, false);
    let twice = toggle_permission("roles.view", &once, false);
    assert_eq!(once, twice);
    assert!(once.is_empty());
}

/// Verify removing an absent id and adding an unknown id both succeed
#[test]
fn test_toggle_permission_tolerates_any_id() {
    let base = set(&["users.view"]);
    assert_eq!(toggle_permission("users.delete", &base, false), base);
    assert!(toggle_permission("audit.view", &base, true).contains("audit.view"));
}

/// Verify the input set is left untouched
#[test]
fn test_toggle_permission_is_pure() {
    let base = set(&["users.view"]);
    let _ = toggle_permission("users.edit", &base, true);
    assert_eq!(base, set(&["users.view"]));
}

// ============================================================================
// Group toggles
// ============================================================================

/// Verify toggling a group on/off always lands on checked/unchecked
#[test]
fn test_group_round_trip_from_any_start() {
    let c = setup();
    let starts = [
        set(&[]),
        set(&["users.view"]),
        set(&["users.view", "users.create", "users.edit", "users.delete"]),
        set(&["roles.view", "audit.view"]),
        c.all_permission_ids(),
    ];
    for g in c.groups() {
        for s in &starts {
            assert_eq!(derive_group_state(g, &toggle_group(g, s, true)), GroupCheckState::Checked);
            assert_eq!(derive_group_state(g, &toggle_group(g, s, false)), GroupCheckState::Unchecked);
        }
    }
}

/// Verify ids outside the toggled group keep their membership
#[test]
fn test_group_toggle_is_isolated() {
    let c = setup();
    let s = set(&["roles.view", "profile.edit", "audit.view", "users.view"]);
    let g = users_group(&c);

    for value in [true, false] {
        let next = toggle_group(g, &s, value);
        let outside: Vec<&str> = next.iter().filter(|id| !g.contains(id)).collect();
        let before: Vec<&str> = s.iter().filter(|id| !g.contains(id)).collect();
        assert_eq!(outside, before);
    }
}

/// Verify bulk toggles equal a fold of single toggles
#[test]
fn test_group_toggle_matches_single_toggles() {
    let c = setup();
    let g = c.group("roles").unwrap();
    let s = set(&["roles.view", "users.view"]);
    let folded = g
        .permission_ids()
        .fold(s.clone(), |acc, id| toggle_permission(id, &acc, true));
    assert_eq!(toggle_group(g, &s, true), folded);
}

// ============================================================================
// State machine
// ============================================================================

/// Verify every transition of the group checkbox
#[test]
fn test_checkbox_transitions() {
    let c = setup();
    let g = c.group("settings").unwrap();
    let state = |s: &PermissionSet| derive_group_state(g, s);

    let s = PermissionSet::new();
    assert_eq!(state(&s), GroupCheckState::Unchecked);

    let s = toggle_permission("settings.view", &s, true);
    assert_eq!(state(&s), GroupCheckState::Indeterminate);

    let s = toggle_permission("settings.edit", &s, true);
    assert_eq!(state(&s), GroupCheckState::Checked);

    let s = toggle_permission("settings.view", &s, false);
    assert_eq!(state(&s), GroupCheckState::Indeterminate);

    let s = toggle_permission("settings.edit", &s, false);
    assert_eq!(state(&s), GroupCheckState::Unchecked);

    // direct jumps
    let s = toggle_group(g, &s, true);
    assert_eq!(state(&s), GroupCheckState::Checked);
    let s = toggle_group(g, &s, false);
    assert_eq!(state(&s), GroupCheckState::Unchecked);
}
