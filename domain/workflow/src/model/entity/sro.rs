use chrono::{DateTime, Utc};
use num_derive::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// # Service Request Order
/// The approved, numbered work order derived from a callout. Exactly one per
/// callout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sro {
    pub id: Uuid,
    pub callout_id: Uuid,
    /// Allocated in the owning customer's scope.
    pub sequence: u32,
    /// `SRO-<CUSTOMER>-<sequence>`, immutable after first persistence.
    pub display_number: String,
    pub status: SroStatus,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Variant order is the workflow progression order; `advance` relies on it.
/// `Cancelled` sorts above everything so it stays reachable from any
/// non-terminal state.
#[derive(
    FromPrimitive,
    ToPrimitive,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
pub enum SroStatus {
    #[default]
    Created,
    /// Every newly generated SRO starts here.
    Active,
    Approved,
    ReadyForScheduling,
    Scheduled,
    Assigned,
    Executed,
    QcApproved,
    Closed,
    Cancelled,
}

impl SroStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Cancelled)
    }

    /// Move forward to `target`, reporting whether the status changed.
    /// Terminal states never change; backward moves are ignored.
    pub fn advance(&mut self, target: Self) -> bool {
        if !self.is_terminal() && target > *self {
            *self = target;
            true
        } else {
            false
        }
    }
}
