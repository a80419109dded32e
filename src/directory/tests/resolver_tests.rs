//! Service tests for peer-set resolution.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use crate::directory::{
    adapters::memory::InMemoryActorDirectory,
    domain::{Actor, ActorId, ActorRole, ActorStatus, GroupId, HierarchyScope},
    services::VisibilityResolver,
};
use rstest::{fixture, rstest};
use std::sync::Arc;

fn actor(status: ActorStatus, scope: HierarchyScope) -> Actor {
    Actor::new(ActorId::new(), ActorRole::Employee, status, None, scope)
}

#[fixture]
fn directory() -> Arc<InMemoryActorDirectory> {
    Arc::new(InMemoryActorDirectory::new())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_reference_actor_degrades_to_empty_set(directory: Arc<InMemoryActorDirectory>) {
    let resolver = VisibilityResolver::new(directory);

    let peers = resolver
        .peer_ids(ActorId::new())
        .await
        .expect("resolution should succeed");

    assert!(peers.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reference_actor_is_included_in_its_own_peer_set(
    directory: Arc<InMemoryActorDirectory>,
) {
    let scope = HierarchyScope {
        group_id: Some(GroupId::new()),
        ..HierarchyScope::unscoped()
    };
    let reference = actor(ActorStatus::Active, scope);
    directory.upsert(reference.clone()).expect("upsert should succeed");
    let resolver = VisibilityResolver::new(directory);

    let peers = resolver
        .peer_ids(reference.id())
        .await
        .expect("resolution should succeed");

    assert!(peers.contains(&reference.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inactive_actors_are_excluded_from_peer_sets(directory: Arc<InMemoryActorDirectory>) {
    let group = GroupId::new();
    let scope = HierarchyScope {
        group_id: Some(group),
        ..HierarchyScope::unscoped()
    };
    let reference = actor(ActorStatus::Active, scope);
    let inactive_peer = actor(ActorStatus::Inactive, scope);
    directory.upsert(reference.clone()).expect("upsert should succeed");
    directory
        .upsert(inactive_peer.clone())
        .expect("upsert should succeed");
    let resolver = VisibilityResolver::new(directory);

    let peers = resolver
        .peer_ids(reference.id())
        .await
        .expect("resolution should succeed");

    assert!(peers.contains(&reference.id()));
    assert!(!peers.contains(&inactive_peer.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn wildcard_actor_appears_in_every_peer_set(directory: Arc<InMemoryActorDirectory>) {
    let scoped_reference = actor(
        ActorStatus::Active,
        HierarchyScope {
            group_id: Some(GroupId::new()),
            ..HierarchyScope::unscoped()
        },
    );
    let group_hr = actor(ActorStatus::Active, HierarchyScope::unscoped());
    directory
        .upsert(scoped_reference.clone())
        .expect("upsert should succeed");
    directory.upsert(group_hr.clone()).expect("upsert should succeed");
    let resolver = VisibilityResolver::new(directory);

    let peers = resolver
        .peer_ids(scoped_reference.id())
        .await
        .expect("resolution should succeed");

    assert!(peers.contains(&group_hr.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mismatched_scope_is_not_visible(directory: Arc<InMemoryActorDirectory>) {
    let reference = actor(
        ActorStatus::Active,
        HierarchyScope {
            group_id: Some(GroupId::new()),
            ..HierarchyScope::unscoped()
        },
    );
    let other_group = actor(
        ActorStatus::Active,
        HierarchyScope {
            group_id: Some(GroupId::new()),
            ..HierarchyScope::unscoped()
        },
    );
    directory.upsert(reference.clone()).expect("upsert should succeed");
    directory.upsert(other_group.clone()).expect("upsert should succeed");
    let resolver = VisibilityResolver::new(directory);

    let peers = resolver
        .peer_ids(reference.id())
        .await
        .expect("resolution should succeed");

    assert!(!peers.contains(&other_group.id()));
}
