use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use domain_workflow::{
    exception::{WorkflowException, WorkflowResult},
    model::{
        entity::{
            callout::CalloutStatus, schedule::ScheduleStatus, sro::SroStatus, Schedule,
        },
        vo::{display_number, NewSchedule, SequenceScope},
    },
    repository::{StoreTxn, WorkflowStore},
    service::ScheduleService,
};
use typed_builder::TypedBuilder;
use uuid::Uuid;

use crate::{config::OrchestratorConfig, retry};

#[derive(TypedBuilder)]
pub struct ScheduleServiceImpl {
    store: Arc<dyn WorkflowStore>,
    #[builder(default)]
    config: OrchestratorConfig,
}

impl ScheduleServiceImpl {
    async fn transition(
        &self,
        id: Uuid,
        action: &'static str,
        target: ScheduleStatus,
    ) -> WorkflowResult<Schedule> {
        let mut txn = self.store.begin().await?;
        let mut schedule = txn
            .schedule(id)
            .await?
            .ok_or(WorkflowException::NotFound { entity: "schedule", id })?;
        if !schedule.status.advance(target) {
            return Err(WorkflowException::InvalidState {
                entity: "schedule",
                action,
                id,
                status: format!("{:?}", schedule.status),
            });
        }
        txn.set_schedule_status(id, schedule.status).await?;
        txn.commit().await?;
        tracing::info!(%id, status = ?schedule.status, "schedule transitioned");
        Ok(schedule)
    }
}

#[async_trait]
impl ScheduleService for ScheduleServiceImpl {
    async fn create(&self, new: NewSchedule) -> WorkflowResult<Schedule> {
        for (field, value) in [
            ("finance", new.finance_priority),
            ("operations", new.operations_priority),
            ("qa", new.qa_priority),
        ] {
            if let Some(value) = value {
                if !(1..=5).contains(&value) {
                    return Err(WorkflowException::PriorityOutOfRange { field, value });
                }
            }
        }

        let new = &new;
        retry::with_allocation_retry(&self.config, move || async move {
            let mut txn = self.store.begin().await?;
            let mut sro = txn
                .sro(new.sro_id)
                .await?
                .ok_or(WorkflowException::NotFound { entity: "sro", id: new.sro_id })?;
            if txn.schedule_by_sro(new.sro_id).await?.is_some() {
                return Err(WorkflowException::AlreadyExists {
                    entity: "schedule",
                    owner: "sro",
                    owner_id: new.sro_id,
                });
            }

            let sequence = txn.next_sequence(SequenceScope::Schedule).await?;
            let schedule = Schedule {
                id: Uuid::new_v4(),
                sro_id: new.sro_id,
                sequence,
                display_number: display_number::schedule(sequence),
                finance_priority: new.finance_priority,
                operations_priority: new.operations_priority,
                qa_priority: new.qa_priority,
                average_priority: Schedule::average_of(
                    new.finance_priority,
                    new.operations_priority,
                    new.qa_priority,
                ),
                scheduled_date: new.scheduled_date,
                status: ScheduleStatus::Draft,
                created_by: new.created_by,
                created_at: Utc::now(),
            };
            txn.insert_schedule(schedule.clone()).await?;

            // Status-only cascade: nothing is revalidated and no further
            // identifiers are minted.
            if sro.status.advance(SroStatus::Scheduled) {
                txn.set_sro_status(sro.id, sro.status).await?;
            }
            let mut callout = txn
                .callout(sro.callout_id)
                .await?
                .ok_or(WorkflowException::NotFound { entity: "callout", id: sro.callout_id })?;
            if callout.status.advance(CalloutStatus::Scheduled) {
                txn.set_callout_status(callout.id, callout.status).await?;
            }
            txn.commit().await?;

            tracing::info!(id = %schedule.id, number = %schedule.display_number, "schedule created");
            Ok(schedule)
        })
        .await
    }

    async fn plan(&self, id: Uuid) -> WorkflowResult<Schedule> {
        self.transition(id, "plan", ScheduleStatus::Planned).await
    }

    async fn approve(&self, id: Uuid) -> WorkflowResult<Schedule> {
        self.transition(id, "approve", ScheduleStatus::Approved).await
    }

    async fn cancel(&self, id: Uuid) -> WorkflowResult<Schedule> {
        self.transition(id, "cancel", ScheduleStatus::Cancelled).await
    }
}
