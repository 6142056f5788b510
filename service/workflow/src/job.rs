use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use domain_workflow::{
    exception::{WorkflowException, WorkflowResult},
    model::{
        entity::{job::JobStatus, sro::SroStatus, ExecutionLogEntry, Job},
        vo::{NewJob, NewLogEntry},
    },
    repository::{StoreTxn, WorkflowStore},
    service::JobService,
};
use typed_builder::TypedBuilder;
use uuid::Uuid;

#[derive(TypedBuilder)]
pub struct JobServiceImpl {
    store: Arc<dyn WorkflowStore>,
}

#[async_trait]
impl JobService for JobServiceImpl {
    async fn create(&self, new: NewJob) -> WorkflowResult<Job> {
        let mut txn = self.store.begin().await?;
        let sro = txn
            .sro(new.sro_id)
            .await?
            .ok_or(WorkflowException::NotFound { entity: "sro", id: new.sro_id })?;
        if sro.status.is_terminal() {
            return Err(WorkflowException::InvalidState {
                entity: "sro",
                action: "book a job against",
                id: sro.id,
                status: format!("{:?}", sro.status),
            });
        }

        let job_number = new.job_number.trim().to_owned();
        if txn.job_by_number(&job_number).await?.is_some() {
            return Err(WorkflowException::DuplicateJobNumber { job_number });
        }

        let job = Job {
            id: Uuid::new_v4(),
            sro_id: new.sro_id,
            job_number,
            scheduled_start: new.scheduled_start,
            scheduled_end: new.scheduled_end,
            status: JobStatus::Scheduled,
            created_by: new.created_by,
            created_at: Utc::now(),
        };
        txn.insert_job(job.clone()).await?;
        txn.commit().await?;

        tracing::info!(id = %job.id, number = %job.job_number, "job created");
        Ok(job)
    }

    async fn log(&self, entry: NewLogEntry) -> WorkflowResult<ExecutionLogEntry> {
        let mut txn = self.store.begin().await?;
        txn.job(entry.job_id)
            .await?
            .ok_or(WorkflowException::NotFound { entity: "job", id: entry.job_id })?;

        let entry = ExecutionLogEntry {
            id: Uuid::new_v4(),
            job_id: entry.job_id,
            action: entry.action,
            started_at: entry.started_at,
            ended_at: entry.ended_at,
            created_by: entry.created_by,
            created_at: Utc::now(),
        };
        txn.insert_log_entry(entry.clone()).await?;
        txn.commit().await?;
        Ok(entry)
    }

    async fn complete(&self, job_id: Uuid) -> WorkflowResult<Job> {
        let mut txn = self.store.begin().await?;
        let mut job = txn
            .job(job_id)
            .await?
            .ok_or(WorkflowException::NotFound { entity: "job", id: job_id })?;
        if job.status != JobStatus::Scheduled {
            return Err(WorkflowException::InvalidState {
                entity: "job",
                action: "complete",
                id: job_id,
                status: format!("{:?}", job.status),
            });
        }

        job.status = JobStatus::Completed;
        txn.set_job_status(job_id, job.status).await?;
        let mut sro = txn
            .sro(job.sro_id)
            .await?
            .ok_or(WorkflowException::NotFound { entity: "sro", id: job.sro_id })?;
        if sro.status.advance(SroStatus::Executed) {
            txn.set_sro_status(sro.id, sro.status).await?;
        }
        txn.commit().await?;

        tracing::info!(id = %job.id, "job completed");
        Ok(job)
    }
}
