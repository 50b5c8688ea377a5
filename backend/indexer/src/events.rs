//! Canonical event types emitted by the contribution tracker contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/contribution_tracker/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the contribution tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A volunteer logged hours (`logged` topic).
    ContributionLogged,
    /// An approver voted for a contribution (`approved` topic).
    ContributionApproved,
    /// A contribution reached quorum (`verified` topic).
    ContributionVerified,
    /// A contribution was rejected (`rejected` topic).
    ContributionRejected,
    /// The administrative authority was bound (`auth_set` topic).
    AuthorityBound,
    /// The quorum was changed (`min_set` topic).
    MinApprovalsSet,
    /// The approver cap was changed (`max_set` topic).
    MaxApproversSet,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "logged" => Self::ContributionLogged,
            "approved" => Self::ContributionApproved,
            "verified" => Self::ContributionVerified,
            "rejected" => Self::ContributionRejected,
            "auth_set" => Self::AuthorityBound,
            "min_set" => Self::MinApprovalsSet,
            "max_set" => Self::MaxApproversSet,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ContributionLogged => "contribution_logged",
            Self::ContributionApproved => "contribution_approved",
            Self::ContributionVerified => "contribution_verified",
            Self::ContributionRejected => "contribution_rejected",
            Self::AuthorityBound => "authority_bound",
            Self::MinApprovalsSet => "min_approvals_set",
            Self::MaxApproversSet => "max_approvers_set",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the event's second topic carries a contribution ID.
    pub fn has_contribution_topic(&self) -> bool {
        matches!(
            self,
            Self::ContributionLogged
                | Self::ContributionApproved
                | Self::ContributionVerified
                | Self::ContributionRejected
        )
    }
}

/// A fully decoded tracker event, ready to be stored in the database.
///
/// `detail` holds the event's numeric payload: hours for `logged`, the
/// approval count for `approved`/`verified`, the new value for config changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerEvent {
    /// Unique event id assigned by the RPC, used for deduplication.
    pub event_id: String,
    pub event_type: String,
    pub contribution_id: Option<String>,
    pub actor: Option<String>,
    pub detail: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: String,
    pub event_type: String,
    pub contribution_id: Option<String>,
    pub actor: Option<String>,
    pub detail: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
