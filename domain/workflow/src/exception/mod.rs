use thiserror::Error;
use uuid::Uuid;

use crate::model::vo::NominalSize;

pub type WorkflowResult<T> = Result<T, WorkflowException>;

#[derive(Error, Debug)]
pub enum WorkflowException {
    #[error("Pipe selection requires a {kind} size.")]
    MissingPipeSize { kind: &'static str },

    #[error("{kind} size {size} is not permitted in hole section: {hole_section_id}.")]
    IncompatiblePipeSize {
        kind: &'static str,
        size: NominalSize,
        hole_section_id: Uuid,
    },

    #[error("Minimum bore {minimum} must be smaller than the selected pipe size {pipe}.")]
    MinimumBoreTooLarge {
        minimum: NominalSize,
        pipe: NominalSize,
    },

    #[error("{field} priority {value} is outside the 1-5 range.")]
    PriorityOutOfRange { field: &'static str, value: u8 },

    #[error("An assignment needs at least one employee.")]
    EmptyEmployees,

    #[error("An assignment needs at least one cost center.")]
    EmptyCostCenters,

    #[error("A {entity} already exists for {owner} {owner_id}.")]
    AlreadyExists {
        entity: &'static str,
        owner: &'static str,
        owner_id: Uuid,
    },

    #[error("Schedule {schedule_id} already has an assigned service.")]
    AlreadyAssigned { schedule_id: Uuid },

    #[error("A job numbered {job_number} already exists.")]
    DuplicateJobNumber { job_number: String },

    #[error("Cannot {action} {entity} {id} while it is {status}.")]
    InvalidState {
        entity: &'static str,
        action: &'static str,
        id: Uuid,
        status: String,
    },

    #[error("No assets found in cost centers: {}.", .cost_centers.join(", "))]
    NoAssetsFound { cost_centers: Vec<String> },

    #[error("There is no {entity} with id: {id}.")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Concurrent sequence allocation in scope: {scope}.")]
    AllocationConflict { scope: String },

    #[error("Workflow internal error: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for WorkflowException {
    fn from(e: anyhow::Error) -> Self {
        // Store adapters report through anyhow; unwrap a domain exception
        // raised below the boundary instead of burying it.
        match e.downcast::<WorkflowException>() {
            Ok(domain) => domain,
            Err(source) => Self::InternalError { source },
        }
    }
}
