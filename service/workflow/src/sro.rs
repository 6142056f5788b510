use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use domain_workflow::{
    exception::{WorkflowException, WorkflowResult},
    model::{
        entity::{callout::CalloutStatus, sro::SroStatus, Sro},
        vo::{display_number, SequenceScope},
    },
    repository::{StoreTxn, WorkflowStore},
    service::SroService,
};
use typed_builder::TypedBuilder;
use uuid::Uuid;

use crate::{config::OrchestratorConfig, retry};

#[derive(TypedBuilder)]
pub struct SroServiceImpl {
    store: Arc<dyn WorkflowStore>,
    #[builder(default)]
    config: OrchestratorConfig,
}

impl SroServiceImpl {
    async fn transition(
        &self,
        id: Uuid,
        action: &'static str,
        target: SroStatus,
    ) -> WorkflowResult<Sro> {
        let mut txn = self.store.begin().await?;
        let mut sro =
            txn.sro(id).await?.ok_or(WorkflowException::NotFound { entity: "sro", id })?;
        if !sro.status.advance(target) {
            return Err(WorkflowException::InvalidState {
                entity: "sro",
                action,
                id,
                status: format!("{:?}", sro.status),
            });
        }
        txn.set_sro_status(id, sro.status).await?;
        txn.commit().await?;
        tracing::info!(%id, status = ?sro.status, "sro transitioned");
        Ok(sro)
    }
}

#[async_trait]
impl SroService for SroServiceImpl {
    async fn generate(&self, callout_id: Uuid, created_by: Option<Uuid>) -> WorkflowResult<Sro> {
        retry::with_allocation_retry(&self.config, move || async move {
            let mut txn = self.store.begin().await?;
            let mut callout = txn
                .callout(callout_id)
                .await?
                .ok_or(WorkflowException::NotFound { entity: "callout", id: callout_id })?;
            if txn.sro_by_callout(callout_id).await?.is_some() {
                return Err(WorkflowException::AlreadyExists {
                    entity: "sro",
                    owner: "callout",
                    owner_id: callout_id,
                });
            }

            let customer = match callout.customer_id {
                Some(id) => txn.customer(id).await?,
                None => None,
            };
            let sequence =
                txn.next_sequence(SequenceScope::Sro(callout.customer_id)).await?;
            let display_number =
                display_number::sro(sequence, customer.as_ref().map(|c| c.name.as_str()));

            // Every newly generated SRO begins active, regardless of what
            // the caller asked for.
            let sro = Sro {
                id: Uuid::new_v4(),
                callout_id,
                sequence,
                display_number,
                status: SroStatus::Active,
                created_by,
                created_at: Utc::now(),
            };
            txn.insert_sro(sro.clone()).await?;
            if callout.status.advance(CalloutStatus::SroActivated) {
                txn.set_callout_status(callout_id, callout.status).await?;
            }
            txn.commit().await?;

            tracing::info!(id = %sro.id, number = %sro.display_number, "sro generated");
            Ok(sro)
        })
        .await
    }

    async fn approve(&self, id: Uuid) -> WorkflowResult<Sro> {
        let mut txn = self.store.begin().await?;
        let mut sro =
            txn.sro(id).await?.ok_or(WorkflowException::NotFound { entity: "sro", id })?;
        if sro.status.is_terminal() {
            return Err(WorkflowException::InvalidState {
                entity: "sro",
                action: "approve",
                id,
                status: format!("{:?}", sro.status),
            });
        }
        // Idempotent: an SRO that is already approved or further along is
        // returned unchanged.
        if sro.status >= SroStatus::Approved {
            return Ok(sro);
        }

        sro.status = SroStatus::Approved;
        txn.set_sro_status(id, sro.status).await?;
        let mut callout = txn
            .callout(sro.callout_id)
            .await?
            .ok_or(WorkflowException::NotFound { entity: "callout", id: sro.callout_id })?;
        if callout.status.advance(CalloutStatus::SroActivated) {
            txn.set_callout_status(callout.id, callout.status).await?;
        }
        txn.commit().await?;
        tracing::info!(%id, "sro approved");
        Ok(sro)
    }

    async fn mark_ready_for_scheduling(&self, id: Uuid) -> WorkflowResult<Sro> {
        self.transition(id, "mark ready for scheduling", SroStatus::ReadyForScheduling).await
    }

    async fn mark_executed(&self, id: Uuid) -> WorkflowResult<Sro> {
        self.transition(id, "mark executed", SroStatus::Executed).await
    }

    async fn qc_approve(&self, id: Uuid) -> WorkflowResult<Sro> {
        self.transition(id, "qc approve", SroStatus::QcApproved).await
    }

    async fn close(&self, id: Uuid) -> WorkflowResult<Sro> {
        self.transition(id, "close", SroStatus::Closed).await
    }

    async fn cancel(&self, id: Uuid) -> WorkflowResult<Sro> {
        self.transition(id, "cancel", SroStatus::Cancelled).await
    }
}
