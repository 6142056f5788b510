use chrono::{DateTime, Utc};
use num_derive::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// # Job
/// A dated execution window booked against an SRO. The job number comes from
/// the field ticket and is caller-supplied, unlike the minted identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub sro_id: Uuid,
    /// Unique natural key.
    pub job_number: String,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub scheduled_end: Option<DateTime<Utc>>,
    pub status: JobStatus,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(
    FromPrimitive, ToPrimitive, Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq,
)]
pub enum JobStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

/// One logged action during job execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionLogEntry {
    pub id: Uuid,
    pub job_id: Uuid,
    pub action: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl ExecutionLogEntry {
    /// Whole minutes between start and end; `None` while the action is open.
    pub fn duration_minutes(&self) -> Option<i64> {
        self.ended_at.map(|ended| (ended - self.started_at).num_minutes())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn duration_counts_whole_minutes() {
        let started_at = Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap();
        let entry = ExecutionLogEntry {
            id: Uuid::new_v4(),
            job_id: Uuid::new_v4(),
            action: "rig up".into(),
            started_at,
            ended_at: Some(started_at + chrono::Duration::seconds(95 * 60 + 30)),
            created_by: None,
            created_at: started_at,
        };
        assert_eq!(entry.duration_minutes(), Some(95));

        let open = ExecutionLogEntry { ended_at: None, ..entry };
        assert_eq!(open.duration_minutes(), None);
    }
}
