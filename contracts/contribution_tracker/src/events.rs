//! # Events
//!
//! Every successful state change publishes exactly one event, except an
//! approval that reaches quorum, which publishes `approved` followed by
//! `verified`. Events are published after storage writes.
//!
//! | Topics                  | Data                     |
//! |-------------------------|--------------------------|
//! | `("logged", id)`        | [`ContributionLogged`]   |
//! | `("approved", id)`      | [`ContributionApproved`] |
//! | `("verified", id)`      | [`ContributionVerified`] |
//! | `("rejected", id)`      | [`ContributionRejected`] |
//! | `("auth_set",)`         | [`AuthorityBound`]       |
//! | `("min_set",)`          | [`MinApprovalsUpdated`]  |
//! | `("max_set",)`          | [`MaxApproversUpdated`]  |

use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionLogged {
    pub contribution_id: u64,
    pub volunteer: Address,
    pub project_id: u64,
    pub hours: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionApproved {
    pub contribution_id: u64,
    pub approver: Address,
    pub approval_count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionVerified {
    pub contribution_id: u64,
    pub approval_count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionRejected {
    pub contribution_id: u64,
    pub rejected_by: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthorityBound {
    pub authority: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MinApprovalsUpdated {
    pub authority: Address,
    pub min_approvals: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MaxApproversUpdated {
    pub authority: Address,
    pub max_approvers: u32,
}

pub fn emit_contribution_logged(
    env: &Env,
    contribution_id: u64,
    volunteer: Address,
    project_id: u64,
    hours: u32,
) {
    env.events().publish(
        (symbol_short!("logged"), contribution_id),
        ContributionLogged {
            contribution_id,
            volunteer,
            project_id,
            hours,
        },
    );
}

pub fn emit_contribution_approved(
    env: &Env,
    contribution_id: u64,
    approver: Address,
    approval_count: u32,
) {
    env.events().publish(
        (symbol_short!("approved"), contribution_id),
        ContributionApproved {
            contribution_id,
            approver,
            approval_count,
        },
    );
}

pub fn emit_contribution_verified(env: &Env, contribution_id: u64, approval_count: u32) {
    env.events().publish(
        (symbol_short!("verified"), contribution_id),
        ContributionVerified {
            contribution_id,
            approval_count,
        },
    );
}

pub fn emit_contribution_rejected(env: &Env, contribution_id: u64, rejected_by: Address) {
    env.events().publish(
        (symbol_short!("rejected"), contribution_id),
        ContributionRejected {
            contribution_id,
            rejected_by,
        },
    );
}

pub fn emit_authority_bound(env: &Env, authority: Address) {
    env.events()
        .publish((symbol_short!("auth_set"),), AuthorityBound { authority });
}

pub fn emit_min_approvals_updated(env: &Env, authority: Address, min_approvals: u32) {
    env.events().publish(
        (symbol_short!("min_set"),),
        MinApprovalsUpdated {
            authority,
            min_approvals,
        },
    );
}

pub fn emit_max_approvers_updated(env: &Env, authority: Address, max_approvers: u32) {
    env.events().publish(
        (symbol_short!("max_set"),),
        MaxApproversUpdated {
            authority,
            max_approvers,
        },
    );
}
