//! # Contribution Tracker Contract
//!
//! Tracks volunteer hours logged against projects and the multi-party
//! approval each contribution needs before it counts as verified. The single
//! Soroban contract `ContributionTracker` exposes:
//!
//! | Phase         | Entry Point(s)                                          |
//! |---------------|---------------------------------------------------------|
//! | Governance    | [`ContributionTracker::bind_authority`]                 |
//! | Configuration | `set_min_approvals`, `set_max_approvers`                |
//! | Logging       | [`ContributionTracker::log_contribution`]               |
//! | Decision      | `verify_contribution`, `reject_contribution`            |
//! | Queries       | `get_contribution`, `get_contribution_by_volunteer`, `get_min_approvals`, `get_max_approvers`, `get_authority`, `get_contribution_count`, `has_approved` |
//!
//! ## Architecture
//!
//! Storage access is fully delegated to [`storage`] and event emission to
//! [`events`]. This file holds the entry points and their validation; every
//! check runs before the first write, so a failed call leaves storage as it
//! found it.
//!
//! ## Governance
//!
//! Logging and approving need no authority. Changing the quorum or the
//! approver cap, and rejecting a contribution, fail with
//! `Error::Unauthorized` until an authority is bound, and from then on need
//! that authority's signature. The authority can be bound once.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Bytes, Env, String, Vec};

pub mod events;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;

use storage::{
    find_by_volunteer, get_and_increment_contribution_id, get_authority, load_contribution,
    load_contribution_state, peek_contribution_id, save_contribution, save_contribution_state,
    set_authority,
};
pub use storage::{DEFAULT_MAX_APPROVERS, DEFAULT_MIN_APPROVALS};
pub use types::{Contribution, ContributionStatus};

/// Ceiling for `max_approvers`.
pub const MAX_APPROVERS_CEILING: u32 = 10;
/// Inclusive upper bound on hours per contribution.
pub const MAX_HOURS: u32 = 1000;
/// Longest accepted evidence hash, in bytes.
pub const MAX_EVIDENCE_LEN: u32 = 64;
/// Strkey of the all-zero Stellar account, reserved as the burn identity.
pub const BURN_ADDRESS: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    Unauthorized = 100,
    AlreadyBound = 101,
    InvalidVolunteer = 102,
    InvalidHours = 103,
    InvalidEvidence = 104,
    DuplicateContribution = 105,
    NotFound = 106,
    InvalidIdentity = 107,
    AlreadyDecided = 108,
    InvalidThreshold = 109,
    InvalidCap = 110,
    InvalidApprover = 111,
    InvalidProject = 112,
    ApproverCapExceeded = 113,
}

#[contract]
pub struct ContributionTracker;

#[contractimpl]
impl ContributionTracker {
    // ─────────────────────────────────────────────────────────
    // Governance
    // ─────────────────────────────────────────────────────────

    /// Bind the administrative authority.
    ///
    /// - Fails with `InvalidIdentity` for the burn address.
    /// - Fails with `AlreadyBound` once any authority is bound.
    /// - `authority` must sign the transaction.
    pub fn bind_authority(env: Env, authority: Address) -> Result<(), Error> {
        if is_burn_address(&env, &authority) {
            return Err(Error::InvalidIdentity);
        }
        if get_authority(&env).is_some() {
            return Err(Error::AlreadyBound);
        }
        authority.require_auth();

        set_authority(&env, &authority);
        events::emit_authority_bound(&env, authority);
        Ok(())
    }

    /// Set the number of approvals needed to verify a contribution.
    ///
    /// Must lie in `1..=max_approvers`. Only affects approvals cast after
    /// the change.
    pub fn set_min_approvals(env: Env, min_approvals: u32) -> Result<(), Error> {
        let authority = Self::require_authority(&env)?;

        if min_approvals == 0 || min_approvals > storage::get_max_approvers(&env) {
            return Err(Error::InvalidThreshold);
        }

        storage::set_min_approvals(&env, min_approvals);
        events::emit_min_approvals_updated(&env, authority, min_approvals);
        Ok(())
    }

    /// Set the maximum number of approvers a contribution may collect.
    ///
    /// Must lie in `1..=MAX_APPROVERS_CEILING`. Lowering the cap is not
    /// checked against existing contributions or the current quorum; it only
    /// limits approvals cast afterwards.
    pub fn set_max_approvers(env: Env, max_approvers: u32) -> Result<(), Error> {
        let authority = Self::require_authority(&env)?;

        if max_approvers == 0 || max_approvers > MAX_APPROVERS_CEILING {
            return Err(Error::InvalidCap);
        }

        storage::set_max_approvers(&env, max_approvers);
        events::emit_max_approvers_updated(&env, authority, max_approvers);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Contributions
    // ─────────────────────────────────────────────────────────

    /// Log `hours` of work by `volunteer` on `project_id`.
    ///
    /// Returns the new contribution ID. Each (volunteer, project) pair may
    /// log once; the pair stays taken even if the contribution is rejected.
    pub fn log_contribution(
        env: Env,
        volunteer: Address,
        project_id: u64,
        hours: u32,
        evidence_hash: Bytes,
    ) -> Result<u64, Error> {
        if project_id == 0 {
            return Err(Error::InvalidProject);
        }
        if is_burn_address(&env, &volunteer) {
            return Err(Error::InvalidVolunteer);
        }
        volunteer.require_auth();

        if hours == 0 || hours > MAX_HOURS {
            return Err(Error::InvalidHours);
        }
        if evidence_hash.is_empty() || evidence_hash.len() > MAX_EVIDENCE_LEN {
            return Err(Error::InvalidEvidence);
        }
        if find_by_volunteer(&env, &volunteer, project_id).is_some() {
            return Err(Error::DuplicateContribution);
        }

        let id = get_and_increment_contribution_id(&env);
        let contribution = Contribution {
            id,
            volunteer: volunteer.clone(),
            project_id,
            hours,
            evidence_hash,
            timestamp: env.ledger().sequence(),
            status: ContributionStatus::Pending,
            approvers: Vec::new(&env),
            approval_count: 0,
        };

        save_contribution(&env, &contribution);
        events::emit_contribution_logged(&env, id, volunteer, project_id, hours);
        Ok(id)
    }

    /// Cast `approver`'s vote for a pending contribution.
    ///
    /// Returns the status after the vote: `Verified` once the approval count
    /// reaches the current quorum, `Pending` otherwise. Any non-burn address
    /// may approve, once per contribution, up to `max_approvers` in total.
    pub fn verify_contribution(
        env: Env,
        approver: Address,
        contribution_id: u64,
    ) -> Result<ContributionStatus, Error> {
        let mut state =
            load_contribution_state(&env, contribution_id).ok_or(Error::NotFound)?;
        if is_burn_address(&env, &approver) {
            return Err(Error::InvalidApprover);
        }
        approver.require_auth();

        if state.status.is_decided() {
            return Err(Error::AlreadyDecided);
        }
        if state.approvers.contains(&approver) {
            return Err(Error::InvalidApprover);
        }
        if state.approvers.len() >= storage::get_max_approvers(&env) {
            return Err(Error::ApproverCapExceeded);
        }

        state.approvers.push_back(approver.clone());
        state.approval_count += 1;
        if state.approval_count >= storage::get_min_approvals(&env) {
            state.status = ContributionStatus::Verified;
        }

        save_contribution_state(&env, contribution_id, &state);
        events::emit_contribution_approved(&env, contribution_id, approver, state.approval_count);
        if state.status == ContributionStatus::Verified {
            events::emit_contribution_verified(&env, contribution_id, state.approval_count);
        }
        Ok(state.status)
    }

    /// Reject a pending contribution.
    ///
    /// Needs a bound authority, whose signature is required alongside the
    /// caller's.
    pub fn reject_contribution(env: Env, caller: Address, contribution_id: u64) -> Result<(), Error> {
        let mut state =
            load_contribution_state(&env, contribution_id).ok_or(Error::NotFound)?;
        if is_burn_address(&env, &caller) {
            return Err(Error::InvalidApprover);
        }
        caller.require_auth();

        if state.status.is_decided() {
            return Err(Error::AlreadyDecided);
        }
        let authority = get_authority(&env).ok_or(Error::Unauthorized)?;
        if authority != caller {
            authority.require_auth();
        }

        state.status = ContributionStatus::Rejected;
        save_contribution_state(&env, contribution_id, &state);
        events::emit_contribution_rejected(&env, contribution_id, caller);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// Retrieve a contribution by its ID.
    pub fn get_contribution(env: Env, contribution_id: u64) -> Option<Contribution> {
        load_contribution(&env, contribution_id)
    }

    /// Retrieve the ID of the contribution `volunteer` logged for `project_id`.
    pub fn get_contribution_by_volunteer(
        env: Env,
        volunteer: Address,
        project_id: u64,
    ) -> Option<u64> {
        find_by_volunteer(&env, &volunteer, project_id)
    }

    /// Current quorum; defaults to 2.
    pub fn get_min_approvals(env: Env) -> u32 {
        storage::get_min_approvals(&env)
    }

    /// Current approver cap; defaults to 5.
    pub fn get_max_approvers(env: Env) -> u32 {
        storage::get_max_approvers(&env)
    }

    /// The bound authority, or `None` before `bind_authority`.
    pub fn get_authority(env: Env) -> Option<Address> {
        storage::get_authority(&env)
    }

    /// Number of contributions logged so far, which is also the next ID.
    pub fn get_contribution_count(env: Env) -> u64 {
        peek_contribution_id(&env)
    }

    /// Return `true` if `approver` has approved `contribution_id`.
    pub fn has_approved(env: Env, contribution_id: u64, approver: Address) -> bool {
        load_contribution_state(&env, contribution_id)
            .map(|state| state.approvers.contains(&approver))
            .unwrap_or(false)
    }
}

// ─────────────────────────────────────────────────────────
// Internal Helpers
// ─────────────────────────────────────────────────────────

impl ContributionTracker {
    /// Load the bound authority and require its signature.
    fn require_authority(env: &Env) -> Result<Address, Error> {
        let authority = get_authority(env).ok_or(Error::Unauthorized)?;
        authority.require_auth();
        Ok(authority)
    }
}

/// The reserved burn identity as an `Address`.
pub fn burn_address(env: &Env) -> Address {
    Address::from_string(&String::from_str(env, BURN_ADDRESS))
}

fn is_burn_address(env: &Env, address: &Address) -> bool {
    *address == burn_address(env)
}
