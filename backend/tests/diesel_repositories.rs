//! Integration tests for the Diesel repositories against embedded PostgreSQL.
//!
//! Each test boots a private cluster through `pg-embed-setup-unpriv`, applies
//! the embedded migrations to its `postgres` database and drives both
//! repositories on a dedicated Tokio runtime. Set `SKIP_TEST_CLUSTER=1` to
//! skip when the cluster cannot start; otherwise a setup failure fails the
//! test.

use roster::domain::ports::{GroupRepository, RepositoryError, UserRepository};
use roster::domain::{
    Email, GroupId, GroupName, GroupPatch, NewGroup, NewUser, UserId, UserPatch,
};
use roster::outbound::persistence::{
    DbPool, DieselGroupRepository, DieselUserRepository, PoolConfig, apply_migrations,
};
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

mod support;

use support::handle_cluster_setup_failure;
use support::pg_embed::test_cluster;

const DATABASE: &str = "postgres";

/// Repositories over one freshly migrated database.
///
/// Fields drop in order, so the pool closes before the cluster stops.
struct Store {
    groups: DieselGroupRepository,
    users: DieselUserRepository,
    runtime: Runtime,
    _cluster: TestCluster,
}

fn setup_store() -> Result<Store, String> {
    let cluster = test_cluster()?;
    let url = cluster.connection().database_url(DATABASE);
    let runtime = Runtime::new().map_err(|err| err.to_string())?;

    let pool = runtime.block_on(async {
        apply_migrations(&url).await.map_err(|err| err.to_string())?;
        let config = PoolConfig::new(url.as_str())
            .with_max_size(2)
            .with_min_idle(Some(1));
        DbPool::new(config).await.map_err(|err| err.to_string())
    })?;

    Ok(Store {
        groups: DieselGroupRepository::new(pool.clone()),
        users: DieselUserRepository::new(pool),
        runtime,
        _cluster: cluster,
    })
}

#[fixture]
fn store() -> Option<Store> {
    match setup_store() {
        Ok(store) => Some(store),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn new_group(name: &str) -> NewGroup {
    NewGroup {
        name: GroupName::new(name).expect("valid name"),
    }
}

fn new_user(name: &str, group_id: GroupId) -> NewUser {
    NewUser {
        name: name.to_owned().try_into().expect("valid name"),
        email: format!("{name}@example.com")
            .try_into()
            .expect("valid email"),
        password: "pw".to_owned().try_into().expect("valid password"),
        group_id,
    }
}

fn is_constraint<T: std::fmt::Debug>(result: &Result<T, RepositoryError>) -> bool {
    matches!(result, Err(RepositoryError::ConstraintViolation { .. }))
}

fn is_not_found<T: std::fmt::Debug>(result: &Result<T, RepositoryError>) -> bool {
    matches!(result, Err(RepositoryError::NotFound { .. }))
}

#[rstest]
fn group_names_are_unique(store: Option<Store>) {
    let Some(store) = store else { return };
    store.runtime.block_on(async {
        let first = store.groups.create(&new_group("admins")).await.expect("insert");
        let clash = store.groups.create(&new_group("admins")).await;

        assert_eq!(first.id().get(), 1);
        assert!(is_constraint(&clash), "{clash:?}");
        assert_eq!(store.groups.list().await.expect("list"), vec![first]);
    });
}

#[rstest]
fn whitespace_group_names_round_trip(store: Option<Store>) {
    let Some(store) = store else { return };
    store.runtime.block_on(async {
        let created = store.groups.create(&new_group("   ")).await.expect("insert");
        let loaded = store.groups.find_by_id(created.id()).await.expect("group");

        assert_eq!(loaded.name().as_str(), "   ");
    });
}

#[rstest]
fn groups_load_their_members(store: Option<Store>) {
    let Some(store) = store else { return };
    store.runtime.block_on(async {
        let group = store.groups.create(&new_group("staff")).await.expect("group");
        let user = store
            .users
            .create(&new_user("ada", group.id()))
            .await
            .expect("user");

        let loaded = store.groups.find_by_id(group.id()).await.expect("group");

        assert_eq!(loaded.users(), &[user]);
    });
}

#[rstest]
fn user_names_and_emails_are_unique(store: Option<Store>) {
    let Some(store) = store else { return };
    store.runtime.block_on(async {
        let group = store.groups.create(&new_group("staff")).await.expect("group");
        store
            .users
            .create(&new_user("ada", group.id()))
            .await
            .expect("user");

        let same_name = store.users.create(&new_user("ada", group.id())).await;
        let mut same_email = new_user("grace", group.id());
        same_email.email = Email::new("ada@example.com").expect("valid email");
        let same_email = store.users.create(&same_email).await;

        assert!(is_constraint(&same_name), "{same_name:?}");
        assert!(is_constraint(&same_email), "{same_email:?}");
    });
}

#[rstest]
fn missing_group_reference_is_a_constraint_violation(store: Option<Store>) {
    let Some(store) = store else { return };
    store.runtime.block_on(async {
        let group = store.groups.create(&new_group("staff")).await.expect("group");
        let user = store
            .users
            .create(&new_user("ada", group.id()))
            .await
            .expect("user");
        let missing = GroupId::new(99).expect("id");

        let created = store.users.create(&new_user("grace", missing)).await;
        let moved = store
            .users
            .update(
                user.id(),
                &UserPatch {
                    group_id: Some(missing),
                    ..UserPatch::default()
                },
            )
            .await;

        assert!(is_constraint(&created), "{created:?}");
        assert!(is_constraint(&moved), "{moved:?}");
        let stored = store.users.find_by_id(user.id()).await.expect("user");
        assert_eq!(stored, user);
    });
}

#[rstest]
fn partial_updates_merge_into_the_stored_row(store: Option<Store>) {
    let Some(store) = store else { return };
    store.runtime.block_on(async {
        let group = store.groups.create(&new_group("staff")).await.expect("group");
        let user = store
            .users
            .create(&new_user("ada", group.id()))
            .await
            .expect("user");

        store
            .users
            .update(
                user.id(),
                &UserPatch {
                    email: Some(Email::new("countess@example.com").expect("valid email")),
                    ..UserPatch::default()
                },
            )
            .await
            .expect("update");

        let stored = store.users.find_by_id(user.id()).await.expect("user");
        assert_eq!(stored.email().as_str(), "countess@example.com");
        assert_eq!(stored.name(), user.name());
        assert_eq!(stored.password(), user.password());
        assert_eq!(stored.group_id(), user.group_id());
    });
}

#[rstest]
fn renaming_onto_a_taken_name_leaves_the_group_unchanged(store: Option<Store>) {
    let Some(store) = store else { return };
    store.runtime.block_on(async {
        store.groups.create(&new_group("admins")).await.expect("group");
        let staff = store.groups.create(&new_group("staff")).await.expect("group");

        let renamed = store
            .groups
            .update(
                staff.id(),
                &GroupPatch {
                    name: Some(GroupName::new("admins").expect("name")),
                },
            )
            .await;

        assert!(is_constraint(&renamed), "{renamed:?}");
        let stored = store.groups.find_by_id(staff.id()).await.expect("group");
        assert_eq!(stored.name().as_str(), "staff");
    });
}

#[rstest]
fn referenced_group_delete_is_refused(store: Option<Store>) {
    let Some(store) = store else { return };
    store.runtime.block_on(async {
        let group = store.groups.create(&new_group("staff")).await.expect("group");
        let user = store
            .users
            .create(&new_user("ada", group.id()))
            .await
            .expect("user");

        let refused = store.groups.delete(group.id()).await;
        store.users.delete(user.id()).await.expect("user delete");
        store.groups.delete(group.id()).await.expect("group delete");

        assert!(is_constraint(&refused), "{refused:?}");
        let gone = store.groups.find_by_id(group.id()).await;
        assert!(is_not_found(&gone), "{gone:?}");
    });
}

#[rstest]
fn missing_records_are_not_found(store: Option<Store>) {
    let Some(store) = store else { return };
    store.runtime.block_on(async {
        let group_id = GroupId::new(5).expect("id");
        let user_id = UserId::new(5).expect("id");

        let renamed = store
            .groups
            .update(
                group_id,
                &GroupPatch {
                    name: Some(GroupName::new("x").expect("name")),
                },
            )
            .await;
        let empty_patch = store.users.update(user_id, &UserPatch::default()).await;
        let deleted = store.users.delete(user_id).await;

        assert!(is_not_found(&renamed), "{renamed:?}");
        assert!(is_not_found(&empty_patch), "{empty_patch:?}");
        assert!(is_not_found(&deleted), "{deleted:?}");
    });
}

#[rstest]
fn identifiers_are_not_reused_after_delete(store: Option<Store>) {
    let Some(store) = store else { return };
    store.runtime.block_on(async {
        let first = store.groups.create(&new_group("first")).await.expect("group");
        store.groups.delete(first.id()).await.expect("delete");

        let second = store.groups.create(&new_group("second")).await.expect("group");

        assert!(second.id().get() > first.id().get());
    });
}
