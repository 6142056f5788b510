use chrono::{DateTime, Utc};
use num_derive::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// # Assigned service
/// The concrete crew and asset assignment fulfilling a schedule. Exactly one
/// per schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignedService {
    pub id: Uuid,
    pub schedule_id: Uuid,
    /// Non-empty.
    pub employee_ids: Vec<Uuid>,
    /// Derived from `cost_centers`, never set directly by the caller.
    pub asset_ids: Vec<Uuid>,
    /// Non-empty, trimmed.
    pub cost_centers: Vec<String>,
    pub status: AssignedServiceStatus,
    pub note: Option<String>,
    pub equipment_required_at: Option<DateTime<Utc>>,
    pub crew_required_at: Option<DateTime<Utc>>,
    pub assigned_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
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
pub enum AssignedServiceStatus {
    #[default]
    Pending,
    Assigned,
    Completed,
    Cancelled,
}

impl AssignedServiceStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Move forward to `target`, reporting whether the status changed.
    pub fn advance(&mut self, target: Self) -> bool {
        if !self.is_terminal() && target > *self {
            *self = target;
            true
        } else {
            false
        }
    }
}
