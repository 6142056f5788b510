use chrono::{DateTime, Utc};
use num_derive::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// # Callout
/// Initial service request capturing the well, rig and pipe parameters the
/// customer called in with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Callout {
    pub id: Uuid,
    /// Allocated once at creation, never recomputed.
    pub sequence: u32,
    /// `CALL_OUT_<sequence>_<customer>`, immutable after first persistence.
    pub display_number: String,
    pub customer_id: Option<Uuid>,
    pub well_id: Option<Uuid>,
    pub hole_section_id: Option<Uuid>,
    pub pipe_selection: PipeSelection,
    /// Set only when `pipe_selection` is `Casing`.
    pub casing_size_id: Option<Uuid>,
    /// Set only when `pipe_selection` is `Drillpipe`.
    pub drillpipe_size_id: Option<Uuid>,
    /// Strictly smaller than the selected pipe size when set.
    pub minimum_id_size_id: Option<Uuid>,
    pub status: CalloutStatus,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(
    FromPrimitive, ToPrimitive, Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq,
)]
pub enum PipeSelection {
    #[default]
    None,
    Casing,
    Drillpipe,
}

/// Variant order is the workflow progression order; `advance` relies on it.
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
pub enum CalloutStatus {
    /// Being edited by the operator.
    #[default]
    Draft,
    /// Fields frozen for review.
    Locked,
    /// An SRO has been generated from this callout.
    SroActivated,
    /// The SRO has been placed on a schedule.
    Scheduled,
    /// Crew and assets are assigned.
    Assigned,
}

impl CalloutStatus {
    /// Move forward to `target`, reporting whether the status changed.
    /// Backward moves are ignored.
    pub fn advance(&mut self, target: Self) -> bool {
        if target > *self {
            *self = target;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_is_forward_only() {
        let mut status = CalloutStatus::Draft;
        assert!(status.advance(CalloutStatus::Scheduled));
        assert_eq!(status, CalloutStatus::Scheduled);

        assert!(!status.advance(CalloutStatus::Locked));
        assert_eq!(status, CalloutStatus::Scheduled);

        assert!(!status.advance(CalloutStatus::Scheduled));
    }
}
