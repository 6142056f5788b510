use chrono::{DateTime, NaiveDate, Utc};
use num_derive::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// # Schedule
/// The dated, prioritized slot allocated to an SRO. Exactly one per SRO.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: Uuid,
    pub sro_id: Uuid,
    /// Allocated in the global schedule scope.
    pub sequence: u32,
    /// `SCHDL_<sequence>`, immutable after first persistence.
    pub display_number: String,
    pub finance_priority: Option<u8>,
    pub operations_priority: Option<u8>,
    pub qa_priority: Option<u8>,
    /// Mean of the priorities present, one decimal place.
    pub average_priority: Option<f64>,
    pub scheduled_date: Option<NaiveDate>,
    pub status: ScheduleStatus,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Schedule {
    /// Arithmetic mean of whichever priorities are present, rounded to one
    /// decimal place. `None` when none are present.
    pub fn average_of(
        finance: Option<u8>,
        operations: Option<u8>,
        qa: Option<u8>,
    ) -> Option<f64> {
        let present: Vec<f64> =
            [finance, operations, qa].into_iter().flatten().map(f64::from).collect();
        if present.is_empty() {
            return None;
        }
        let mean = present.iter().sum::<f64>() / present.len() as f64;
        Some((mean * 10.0).round() / 10.0)
    }
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
pub enum ScheduleStatus {
    #[default]
    Draft,
    Planned,
    Approved,
    Assigned,
    Cancelled,
}

impl ScheduleStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_rounds_to_one_decimal() {
        assert_eq!(Schedule::average_of(Some(3), Some(5), None), Some(4.0));
        assert_eq!(Schedule::average_of(Some(1), Some(2), Some(2)), Some(1.7));
        assert_eq!(Schedule::average_of(Some(2), None, None), Some(2.0));
    }

    #[test]
    fn average_absent_when_no_priority_present() {
        assert_eq!(Schedule::average_of(None, None, None), None);
    }
}
