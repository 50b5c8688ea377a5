#![allow(dead_code)]

extern crate std;

use crate::types::{Contribution, ContributionStatus};
use crate::MAX_HOURS;

/// INV-1: `approval_count` mirrors the approver list.
pub fn assert_count_matches_approvers(contribution: &Contribution) {
    assert_eq!(
        contribution.approval_count,
        contribution.approvers.len(),
        "INV-1 violated: contribution {} has approval_count {} but {} approvers",
        contribution.id,
        contribution.approval_count,
        contribution.approvers.len()
    );
}

/// INV-2: No address approves the same contribution twice.
pub fn assert_approvers_distinct(contribution: &Contribution) {
    let approvers = &contribution.approvers;
    for i in 0..approvers.len() {
        for j in (i + 1)..approvers.len() {
            assert_ne!(
                approvers.get_unchecked(i),
                approvers.get_unchecked(j),
                "INV-2 violated: contribution {} has a repeated approver",
                contribution.id
            );
        }
    }
}

/// INV-3: The approver list never grows past the cap in force when each
/// approval was cast. Callers pass the largest cap used during the test.
pub fn assert_within_cap(contribution: &Contribution, max_approvers: u32) {
    assert!(
        contribution.approvers.len() <= max_approvers,
        "INV-3 violated: contribution {} has {} approvers, cap {}",
        contribution.id,
        contribution.approvers.len(),
        max_approvers
    );
}

/// INV-4: Logged fields stay inside their validated ranges.
pub fn assert_fields_valid(contribution: &Contribution) {
    assert!(
        contribution.project_id > 0,
        "INV-4 violated: contribution {} has project_id 0",
        contribution.id
    );
    assert!(
        contribution.hours >= 1 && contribution.hours <= MAX_HOURS,
        "INV-4 violated: contribution {} has {} hours",
        contribution.id,
        contribution.hours
    );
    assert!(
        !contribution.evidence_hash.is_empty(),
        "INV-4 violated: contribution {} has empty evidence",
        contribution.id
    );
}

/// INV-5: Contribution IDs are sequential starting from 0.
pub fn assert_sequential_ids(contributions: &[Contribution]) {
    for (i, contribution) in contributions.iter().enumerate() {
        assert_eq!(
            contribution.id, i as u64,
            "INV-5 violated: expected id {}, got {}",
            i, contribution.id
        );
    }
}

/// INV-6: Status transition validity. Only these are allowed:
///   Pending -> Pending | Verified | Rejected
///   Verified -> Verified
///   Rejected -> Rejected
pub fn assert_valid_status_transition(from: &ContributionStatus, to: &ContributionStatus) {
    let valid = from == to
        || matches!(
            (from, to),
            (ContributionStatus::Pending, ContributionStatus::Verified)
                | (ContributionStatus::Pending, ContributionStatus::Rejected)
        );

    assert!(
        valid,
        "INV-6 violated: invalid status transition from {:?} to {:?}",
        from, to
    );
}

/// INV-7: Fields written at logging time never change.
pub fn assert_immutable_fields(original: &Contribution, current: &Contribution) {
    assert_eq!(original.id, current.id, "INV-7 violated: id changed");
    assert_eq!(
        original.volunteer, current.volunteer,
        "INV-7 violated: volunteer changed"
    );
    assert_eq!(
        original.project_id, current.project_id,
        "INV-7 violated: project_id changed"
    );
    assert_eq!(original.hours, current.hours, "INV-7 violated: hours changed");
    assert_eq!(
        original.evidence_hash, current.evidence_hash,
        "INV-7 violated: evidence_hash changed"
    );
    assert_eq!(
        original.timestamp, current.timestamp,
        "INV-7 violated: timestamp changed"
    );
}

/// INV-8: Approvers are append-only. `before` must be a prefix of `after`.
pub fn assert_approvers_append_only(before: &Contribution, after: &Contribution) {
    assert!(
        after.approvers.len() >= before.approvers.len(),
        "INV-8 violated: contribution {} lost approvers",
        before.id
    );
    for i in 0..before.approvers.len() {
        assert_eq!(
            before.approvers.get_unchecked(i),
            after.approvers.get_unchecked(i),
            "INV-8 violated: contribution {} reordered approvers",
            before.id
        );
    }
}

/// Run all stateless contribution invariants.
pub fn assert_all_contribution_invariants(contribution: &Contribution, max_approvers: u32) {
    assert_count_matches_approvers(contribution);
    assert_approvers_distinct(contribution);
    assert_within_cap(contribution, max_approvers);
    assert_fields_valid(contribution);
}

/// Run all invariants relating a snapshot to a later one.
pub fn assert_all_transition_invariants(before: &Contribution, after: &Contribution) {
    assert_valid_status_transition(&before.status, &after.status);
    assert_immutable_fields(before, after);
    assert_approvers_append_only(before, after);
}
