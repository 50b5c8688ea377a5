//! # Types
//!
//! Shared data structures used across all modules of the contribution tracker.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! A `Contribution` is internally stored as two separate ledger entries:
//!
//! - [`ContributionConfig`]: written once when the work is logged; never mutated.
//! - [`ContributionState`]: rewritten on every approval and on rejection.
//!
//! The public API exposes the reconstructed [`Contribution`] struct for convenience.
//!
//! ### Status as a Finite-State Machine
//!
//! [`ContributionStatus`] enforces a strict forward-only lifecycle:
//!
//! ```text
//! Pending ──► Verified
//!     └─────► Rejected
//! ```
//!
//! Both `Verified` and `Rejected` are terminal. Any approval or rejection of a
//! decided contribution fails with `Error::AlreadyDecided`.

use soroban_sdk::{contracttype, Address, Bytes, Vec};

/// Decision status of a contribution.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContributionStatus {
    /// Awaiting enough approvals.
    Pending,
    /// Quorum reached.
    Verified,
    /// Rejected under the bound authority.
    Rejected,
}

impl ContributionStatus {
    pub fn is_decided(&self) -> bool {
        !matches!(self, ContributionStatus::Pending)
    }
}

/// Immutable contribution data, written once by `log_contribution`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionConfig {
    pub id: u64,
    pub volunteer: Address,
    pub project_id: u64,
    pub hours: u32,
    pub evidence_hash: Bytes,
    pub timestamp: u32,
}

/// Mutable decision state, updated by approvals and rejection.
///
/// `approval_count` always equals `approvers.len()`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionState {
    pub status: ContributionStatus,
    pub approvers: Vec<Address>,
    pub approval_count: u32,
}

/// Full on-chain representation of a logged contribution.
///
/// Used as the public API return type; reconstructed internally from
/// the split `ContributionConfig` + `ContributionState` storage entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contribution {
    /// Sequential identifier, starting at 0.
    pub id: u64,
    /// Address that logged the work.
    pub volunteer: Address,
    /// Project the hours were worked on (always > 0).
    pub project_id: u64,
    /// Hours worked, 1..=1000.
    pub hours: u32,
    /// Opaque proof reference (e.g. an IPFS CID digest).
    pub evidence_hash: Bytes,
    /// Ledger sequence at which the contribution was logged.
    pub timestamp: u32,
    /// Current decision status.
    pub status: ContributionStatus,
    /// Distinct approvers, in approval order.
    pub approvers: Vec<Address>,
    /// Number of approvals, equal to `approvers.len()`.
    pub approval_count: u32,
}
