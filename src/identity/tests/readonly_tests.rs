//! Read-only mode tests
//!
//! Every scalar, attribute, required-action and group mutator must fail
//! with a read-only error and leave the record untouched. Reads keep working.

use ephemera_core::{Group, Realm, Role};
use ephemera_identity::{
    IdentityError, InMemoryDirectory, RecordOptions, RequiredAction, UserRecord,
};
use std::sync::Arc;

const REALM: &str = "realm-1";

// Rejections are logged at warn; RUST_LOG=warn shows them
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn populated(options: RecordOptions) -> (Arc<InMemoryDirectory>, UserRecord) {
    init_tracing();
    let directory = Arc::new(InMemoryDirectory::new());
    let realm = Realm::new(REALM, "test");
    directory.add_realm(realm.clone());
    directory.add_group(REALM, Group::new("g1", "staff")).unwrap();
    directory.add_role(REALM, Role::realm("r1", "reader", REALM)).unwrap();

    let mut user = UserRecord::with_options(directory.clone(), realm, "u1", options);
    user.set_username("alice").unwrap();
    user.set_single_attribute("team", "identity").unwrap();
    user.set_enabled(true).unwrap();
    user.set_created_timestamp(1_000).unwrap();
    user.add_required_action(RequiredAction::UpdatePassword).unwrap();
    user.join_group(&Group::new("g1", "staff")).unwrap();
    user.grant_role(&Role::realm("r1", "reader", REALM)).unwrap();
    user.set_readonly(true);

    (directory, user)
}

fn assert_read_only<T: std::fmt::Debug>(result: Result<T, IdentityError>) {
    match result {
        Err(IdentityError::ReadOnly(msg)) => {
            assert_eq!(msg, "In memory user model is not writable");
        }
        other => panic!("expected read-only error, got {:?}", other),
    }
}

#[test]
fn test_scalar_mutators_rejected() {
    let (_directory, mut user) = populated(RecordOptions::default());
    let before = user.snapshot();

    assert_read_only(user.set_created_timestamp(2_000));
    assert_read_only(user.set_enabled(false));
    assert_read_only(user.set_email_verified(true));
    assert_read_only(user.set_federation_link(Some("ldap".to_string())));
    assert_read_only(user.set_service_account_client_link(Some("c1".to_string())));

    assert_eq!(user.snapshot(), before);
}

#[test]
fn test_attribute_mutators_rejected() {
    let (_directory, mut user) = populated(RecordOptions::default());
    let before = user.snapshot();

    assert_read_only(user.set_single_attribute("team", "other"));
    assert_read_only(user.set_attribute("email", vec!["X@Y.Z".to_string()]));
    assert_read_only(user.remove_attribute("team"));
    assert_read_only(user.set_username("bob"));
    assert_read_only(user.set_email("bob@example.com"));
    assert_read_only(user.set_first_name("Bob"));
    assert_read_only(user.set_last_name("Builder"));

    assert_eq!(user.snapshot(), before);
}

#[test]
fn test_required_action_mutators_rejected() {
    let (_directory, mut user) = populated(RecordOptions::default());
    let before = user.snapshot();

    assert_read_only(user.add_required_action(RequiredAction::VerifyEmail));
    assert_read_only(user.remove_required_action("UPDATE_PASSWORD"));

    assert_eq!(user.snapshot(), before);
}

#[test]
fn test_group_mutators_rejected() {
    let (_directory, mut user) = populated(RecordOptions::default());
    let before = user.snapshot();

    assert_read_only(user.join_group(&Group::new("g2", "other")));
    assert_read_only(user.leave_group(&Group::new("g1", "staff")));

    assert_eq!(user.snapshot(), before);
}

#[test]
fn test_reads_unaffected() {
    let (_directory, user) = populated(RecordOptions::default());

    assert_eq!(user.username(), Some("alice"));
    assert_eq!(user.first_attribute("team"), Some("identity"));
    assert!(user.is_enabled());
    assert_eq!(user.created_timestamp(), 1_000);
    assert!(user.required_actions().contains("UPDATE_PASSWORD"));
    assert!(user.is_member_of(&Group::new("g1", "staff")));
    assert!(user.has_role(&Role::realm("r1", "reader", REALM)));
    assert_eq!(user.groups().len(), 1);
}

#[test]
fn test_role_mappings_writable_by_default() {
    let (directory, mut user) = populated(RecordOptions::default());
    directory.add_role(REALM, Role::realm("r2", "writer", REALM)).unwrap();
    let writer = Role::realm("r2", "writer", REALM);

    user.grant_role(&writer).unwrap();
    assert!(user.has_role(&writer));

    user.delete_role_mapping(&writer).unwrap();
    assert!(!user.has_role(&writer));
}

#[test]
fn test_role_mappings_gated_when_configured() {
    let (_directory, mut user) = populated(RecordOptions::gated());
    let before = user.snapshot();

    assert_read_only(user.grant_role(&Role::realm("r2", "writer", REALM)));
    assert_read_only(user.delete_role_mapping(&Role::realm("r1", "reader", REALM)));

    assert_eq!(user.snapshot(), before);
}

#[test]
fn test_readonly_can_be_lifted() {
    let (_directory, mut user) = populated(RecordOptions::default());
    assert!(user.is_readonly());

    user.set_readonly(false);
    user.set_username("Bob").unwrap();
    assert_eq!(user.username(), Some("bob"));
}

#[test]
fn test_add_defaults_rejected_without_partial_grant() {
    let (directory, mut user) = populated(RecordOptions::default());
    directory.add_role(REALM, Role::realm("r9", "offline", REALM)).unwrap();
    directory.add_default_role(REALM, "r9").unwrap();
    directory.add_default_group(REALM, "g1").unwrap();

    assert_read_only(user.add_defaults());
    assert!(!user.role_ids().contains("r9"));
}

#[test]
fn test_add_defaults_roles_only_rejected_when_gated() {
    let (directory, mut user) = populated(RecordOptions::gated());
    directory.add_role(REALM, Role::realm("r9", "offline", REALM)).unwrap();
    directory.add_default_role(REALM, "r9").unwrap();
    let before = user.snapshot();

    assert_read_only(user.add_defaults());
    assert!(!user.role_ids().contains("r9"));
    assert_eq!(user.snapshot(), before);
}

#[test]
fn test_add_defaults_roles_only_granted_when_ungated() {
    let (directory, mut user) = populated(RecordOptions::default());
    directory.add_role(REALM, Role::realm("r9", "offline", REALM)).unwrap();
    directory.add_default_role(REALM, "r9").unwrap();

    user.add_defaults().unwrap();

    assert!(user.role_ids().contains("r9"));
    assert!(user.has_role(&Role::realm("r9", "offline", REALM)));
    assert_eq!(user.group_ids().len(), 1);
}
