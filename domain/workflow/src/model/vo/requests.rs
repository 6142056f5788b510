//! Request payloads accepted by the orchestration services. The API layer
//! shapes these from user input; no business logic lives there.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::model::entity::{assigned_service::AssignedServiceStatus, callout::PipeSelection};

#[derive(Debug, Clone, Default)]
pub struct NewCallout {
    pub customer_id: Option<Uuid>,
    pub well_id: Option<Uuid>,
    pub hole_section_id: Option<Uuid>,
    pub pipe_selection: PipeSelection,
    pub casing_size_id: Option<Uuid>,
    pub drillpipe_size_id: Option<Uuid>,
    pub minimum_id_size_id: Option<Uuid>,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
}

/// Full replacement for a callout's mutable fields. The sequence and display
/// number are never part of an update.
#[derive(Debug, Clone, Default)]
pub struct CalloutChanges {
    pub customer_id: Option<Uuid>,
    pub well_id: Option<Uuid>,
    pub hole_section_id: Option<Uuid>,
    pub pipe_selection: PipeSelection,
    pub casing_size_id: Option<Uuid>,
    pub drillpipe_size_id: Option<Uuid>,
    pub minimum_id_size_id: Option<Uuid>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewSchedule {
    pub sro_id: Uuid,
    pub finance_priority: Option<u8>,
    pub operations_priority: Option<u8>,
    pub qa_priority: Option<u8>,
    pub scheduled_date: Option<NaiveDate>,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub schedule_id: Uuid,
    pub employee_ids: Vec<Uuid>,
    pub cost_centers: Vec<String>,
    pub status: AssignedServiceStatus,
    pub note: Option<String>,
    pub equipment_required_at: Option<DateTime<Utc>>,
    pub crew_required_at: Option<DateTime<Utc>>,
}

impl Default for NewAssignment {
    fn default() -> Self {
        Self {
            schedule_id: Uuid::nil(),
            employee_ids: Vec::new(),
            cost_centers: Vec::new(),
            status: AssignedServiceStatus::Assigned,
            note: None,
            equipment_required_at: None,
            crew_required_at: None,
        }
    }
}

/// Only the fields present are changed.
#[derive(Debug, Clone, Default)]
pub struct AssignmentChanges {
    pub employee_ids: Option<Vec<Uuid>>,
    pub cost_centers: Option<Vec<String>>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewJob {
    pub sro_id: Uuid,
    pub job_number: String,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub scheduled_end: Option<DateTime<Utc>>,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct NewLogEntry {
    pub job_id: Uuid,
    pub action: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub created_by: Option<Uuid>,
}
