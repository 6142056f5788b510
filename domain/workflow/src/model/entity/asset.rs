use chrono::{DateTime, Utc};
use num_derive::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// # Asset
/// A physical piece of equipment. Shared mutable resource: assignments mark
/// assets on duty and release them back to green on reassignment.
///
/// Descriptive fields default to empty; bulk import fills them in and only
/// overwrites with non-empty, changed values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: Uuid,
    /// Unique natural key used by bulk import.
    pub asset_code: String,
    pub status: AssetStatus,
    /// Grouping key used to resolve assignment eligibility.
    pub cost_center: String,
    pub department: String,
    pub physical_location: String,
    pub account_code: String,
    pub description: String,
    pub serial_no: String,
    pub manufacturer: String,
    pub created_at: DateTime<Utc>,
}

#[derive(
    FromPrimitive, ToPrimitive, Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq,
)]
pub enum AssetStatus {
    OnDuty,
    Yellow,
    /// Available for assignment.
    #[default]
    Green,
    Upgraded,
    OffDuty,
    Maintenance,
    Breakdown,
}
