//! Unit tests for the null-wildcard hierarchy peer predicate.

use crate::directory::domain::{CompanyId, GroupId, HierarchyScope, LocationId, SubLocationId};
use rstest::{fixture, rstest};

#[fixture]
fn reference() -> HierarchyScope {
    HierarchyScope {
        group_id: Some(GroupId::new()),
        company_id: Some(CompanyId::new()),
        location_id: Some(LocationId::new()),
        sub_location_id: Some(SubLocationId::new()),
    }
}

#[rstest]
fn all_wildcard_candidate_is_peer_of_any_reference(reference: HierarchyScope) {
    let candidate = HierarchyScope::unscoped();
    assert!(candidate.is_peer_of(&reference));
    assert!(candidate.is_peer_of(&HierarchyScope::unscoped()));
}

#[rstest]
fn identical_scope_is_peer_of_itself(reference: HierarchyScope) {
    assert!(reference.is_peer_of(&reference));
}

#[rstest]
fn single_level_mismatch_breaks_peering(reference: HierarchyScope) {
    let candidate = HierarchyScope {
        company_id: Some(CompanyId::new()),
        ..reference
    };
    assert!(!candidate.is_peer_of(&reference));
}

#[rstest]
fn unset_candidate_level_acts_as_wildcard(reference: HierarchyScope) {
    let candidate = HierarchyScope {
        sub_location_id: None,
        ..reference
    };
    assert!(candidate.is_peer_of(&reference));
}

#[rstest]
fn set_candidate_level_does_not_match_unset_reference_level(reference: HierarchyScope) {
    let unset_reference = HierarchyScope {
        sub_location_id: None,
        ..reference
    };
    // Wildcarding is not symmetric: the candidate carries a sub-location the
    // reference does not share.
    assert!(!reference.is_peer_of(&unset_reference));
}

#[rstest]
fn conjunction_requires_every_level_to_hold(reference: HierarchyScope) {
    let candidate = HierarchyScope {
        group_id: None,
        company_id: reference.company_id,
        location_id: Some(LocationId::new()),
        sub_location_id: None,
    };
    assert!(!candidate.is_peer_of(&reference));
}
