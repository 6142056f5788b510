use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    exception::WorkflowResult,
    model::{
        entity::{ExecutionLogEntry, Job},
        vo::{NewJob, NewLogEntry},
    },
};

#[async_trait]
pub trait JobService: Send + Sync {
    /// Book an execution window against a non-terminal SRO. The job number
    /// is caller-supplied and must be unique.
    async fn create(&self, new: NewJob) -> WorkflowResult<Job>;

    /// Append an execution log entry to a job.
    async fn log(&self, entry: NewLogEntry) -> WorkflowResult<ExecutionLogEntry>;

    /// Mark the job completed and advance its SRO to `Executed`.
    async fn complete(&self, job_id: Uuid) -> WorkflowResult<Job>;
}
