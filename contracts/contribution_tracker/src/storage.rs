//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers used by the tracker:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key              | Type      | Description                              |
//! |------------------|-----------|------------------------------------------|
//! | `ContribCount`   | `u64`     | Auto-increment contribution ID counter   |
//! | `MinApprovals`   | `u32`     | Quorum; defaults to 2 when unset         |
//! | `MaxApprovers`   | `u32`     | Approver cap; defaults to 5 when unset   |
//! | `Authority`      | `Address` | Bound authority, write-once              |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                         | Type                 | Description                  |
//! |-----------------------------|----------------------|------------------------------|
//! | `ContribConfig(id)`         | `ContributionConfig` | Immutable contribution data  |
//! | `ContribState(id)`          | `ContributionState`  | Status and approvers         |
//! | `ByVolunteer(addr, proj)`   | `u64`                | (volunteer, project) index   |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! The `ByVolunteer` index is never removed, so a (volunteer, project) pair
//! can log at most one contribution for the lifetime of the contract, even
//! after that contribution is rejected.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{Contribution, ContributionConfig, ContributionState};

// ── Defaults ─────────────────────────────────────────────────────────

pub const DEFAULT_MIN_APPROVALS: u32 = 2;
pub const DEFAULT_MAX_APPROVERS: u32 = 5;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
///
/// Instance-tier keys hold the counter and registry configuration and are
/// extended together. Persistent-tier keys hold per-contribution data with
/// independent TTLs.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Next contribution ID (Instance).
    ContribCount,
    /// Approvals required to verify (Instance).
    MinApprovals,
    /// Maximum approvers per contribution (Instance).
    MaxApprovers,
    /// Bound authority address (Instance).
    Authority,
    /// Immutable contribution data keyed by ID (Persistent).
    ContribConfig(u64),
    /// Mutable contribution state keyed by ID (Persistent).
    ContribState(u64),
    /// Uniqueness index keyed by (volunteer, project) (Persistent).
    ByVolunteer(Address, u64),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Reads the next contribution ID without consuming it.
pub fn peek_contribution_id(env: &Env) -> u64 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::ContribCount)
        .unwrap_or(0)
}

/// Atomically reads, increments, and stores the contribution counter.
/// Returns the ID to use for the *current* contribution (pre-increment value).
pub fn get_and_increment_contribution_id(env: &Env) -> u64 {
    let current = peek_contribution_id(env);
    env.storage()
        .instance()
        .set(&DataKey::ContribCount, &(current + 1));
    current
}

pub fn get_min_approvals(env: &Env) -> u32 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::MinApprovals)
        .unwrap_or(DEFAULT_MIN_APPROVALS)
}

pub fn set_min_approvals(env: &Env, value: u32) {
    env.storage().instance().set(&DataKey::MinApprovals, &value);
    bump_instance(env);
}

pub fn get_max_approvers(env: &Env) -> u32 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::MaxApprovers)
        .unwrap_or(DEFAULT_MAX_APPROVERS)
}

pub fn set_max_approvers(env: &Env, value: u32) {
    env.storage().instance().set(&DataKey::MaxApprovers, &value);
    bump_instance(env);
}

/// Retrieve the bound authority, if any.
pub fn get_authority(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Authority)
}

/// Store the authority address. Callers must check it is not already bound.
pub fn set_authority(env: &Env, authority: &Address) {
    env.storage().instance().set(&DataKey::Authority, authority);
    bump_instance(env);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Save the immutable config, initial state and uniqueness index for a new
/// contribution.
pub fn save_contribution(env: &Env, contribution: &Contribution) {
    let config_key = DataKey::ContribConfig(contribution.id);
    let state_key = DataKey::ContribState(contribution.id);
    let index_key = DataKey::ByVolunteer(
        contribution.volunteer.clone(),
        contribution.project_id,
    );

    let config = ContributionConfig {
        id: contribution.id,
        volunteer: contribution.volunteer.clone(),
        project_id: contribution.project_id,
        hours: contribution.hours,
        evidence_hash: contribution.evidence_hash.clone(),
        timestamp: contribution.timestamp,
    };

    let state = ContributionState {
        status: contribution.status,
        approvers: contribution.approvers.clone(),
        approval_count: contribution.approval_count,
    };

    let persistent = env.storage().persistent();
    persistent.set(&config_key, &config);
    persistent.set(&state_key, &state);
    persistent.set(&index_key, &contribution.id);
    bump_persistent(env, &config_key);
    bump_persistent(env, &state_key);
    bump_persistent(env, &index_key);
}

/// Load the full `Contribution` by combining config and state.
pub fn load_contribution(env: &Env, id: u64) -> Option<Contribution> {
    let config = load_contribution_config(env, id)?;
    let state = load_contribution_state(env, id)?;
    Some(Contribution {
        id: config.id,
        volunteer: config.volunteer,
        project_id: config.project_id,
        hours: config.hours,
        evidence_hash: config.evidence_hash,
        timestamp: config.timestamp,
        status: state.status,
        approvers: state.approvers,
        approval_count: state.approval_count,
    })
}

/// Load only the immutable contribution data.
pub fn load_contribution_config(env: &Env, id: u64) -> Option<ContributionConfig> {
    let key = DataKey::ContribConfig(id);
    let config: Option<ContributionConfig> = env.storage().persistent().get(&key);
    if config.is_some() {
        bump_persistent(env, &key);
    }
    config
}

/// Load only the mutable contribution state.
pub fn load_contribution_state(env: &Env, id: u64) -> Option<ContributionState> {
    let key = DataKey::ContribState(id);
    let state: Option<ContributionState> = env.storage().persistent().get(&key);
    if state.is_some() {
        bump_persistent(env, &key);
    }
    state
}

/// Save only the mutable contribution state (approvals and rejection).
pub fn save_contribution_state(env: &Env, id: u64, state: &ContributionState) {
    let key = DataKey::ContribState(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

/// Look up the contribution logged by `volunteer` for `project_id`.
pub fn find_by_volunteer(env: &Env, volunteer: &Address, project_id: u64) -> Option<u64> {
    let key = DataKey::ByVolunteer(volunteer.clone(), project_id);
    let id: Option<u64> = env.storage().persistent().get(&key);
    if id.is_some() {
        bump_persistent(env, &key);
    }
    id
}
