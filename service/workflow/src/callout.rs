use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use domain_workflow::{
    exception::{WorkflowException, WorkflowResult},
    model::{
        entity::{callout::CalloutStatus, Callout},
        vo::{
            display_number, CalloutChanges, NewCallout, PipeOptions, PipeSelectionFields,
            SequenceScope,
        },
    },
    repository::{StoreTxn, WorkflowStore},
    service::CalloutService,
};
use typed_builder::TypedBuilder;
use uuid::Uuid;

use crate::{compatibility::CompatibilityValidator, config::OrchestratorConfig, retry};

#[derive(TypedBuilder)]
pub struct CalloutServiceImpl {
    store: Arc<dyn WorkflowStore>,
    #[builder(default)]
    config: OrchestratorConfig,
}

#[async_trait]
impl CalloutService for CalloutServiceImpl {
    async fn create(&self, new: NewCallout) -> WorkflowResult<Callout> {
        let new = &new;
        retry::with_allocation_retry(&self.config, move || async move {
            let mut txn = self.store.begin().await?;

            let customer = match new.customer_id {
                Some(id) => Some(
                    txn.customer(id)
                        .await?
                        .ok_or(WorkflowException::NotFound { entity: "customer", id })?,
                ),
                None => None,
            };
            if let Some(id) = new.well_id {
                txn.well(id).await?.ok_or(WorkflowException::NotFound { entity: "well", id })?;
            }

            let sequence = txn.next_sequence(SequenceScope::Callout).await?;
            let display_number =
                display_number::callout(sequence, customer.as_ref().map(|c| c.name.as_str()));

            let mut fields = PipeSelectionFields {
                hole_section_id: new.hole_section_id,
                selection: new.pipe_selection,
                casing_size_id: new.casing_size_id,
                drillpipe_size_id: new.drillpipe_size_id,
                minimum_id_size_id: new.minimum_id_size_id,
            };
            CompatibilityValidator::apply(txn.as_mut(), &mut fields).await?;

            let callout = Callout {
                id: Uuid::new_v4(),
                sequence,
                display_number,
                customer_id: new.customer_id,
                well_id: new.well_id,
                hole_section_id: fields.hole_section_id,
                pipe_selection: fields.selection,
                casing_size_id: fields.casing_size_id,
                drillpipe_size_id: fields.drillpipe_size_id,
                minimum_id_size_id: fields.minimum_id_size_id,
                status: CalloutStatus::Draft,
                notes: new.notes.clone(),
                created_by: new.created_by,
                created_at: Utc::now(),
            };
            txn.insert_callout(callout.clone()).await?;
            txn.commit().await?;

            tracing::info!(id = %callout.id, number = %callout.display_number, "callout created");
            Ok(callout)
        })
        .await
    }

    async fn update(&self, id: Uuid, changes: CalloutChanges) -> WorkflowResult<Callout> {
        let mut txn = self.store.begin().await?;
        let mut callout = txn
            .callout(id)
            .await?
            .ok_or(WorkflowException::NotFound { entity: "callout", id })?;
        if callout.status != CalloutStatus::Draft {
            return Err(WorkflowException::InvalidState {
                entity: "callout",
                action: "update",
                id,
                status: format!("{:?}", callout.status),
            });
        }

        if let Some(customer_id) = changes.customer_id {
            txn.customer(customer_id)
                .await?
                .ok_or(WorkflowException::NotFound { entity: "customer", id: customer_id })?;
        }
        if let Some(well_id) = changes.well_id {
            txn.well(well_id)
                .await?
                .ok_or(WorkflowException::NotFound { entity: "well", id: well_id })?;
        }

        let mut fields = PipeSelectionFields {
            hole_section_id: changes.hole_section_id,
            selection: changes.pipe_selection,
            casing_size_id: changes.casing_size_id,
            drillpipe_size_id: changes.drillpipe_size_id,
            minimum_id_size_id: changes.minimum_id_size_id,
        };
        CompatibilityValidator::apply(txn.as_mut(), &mut fields).await?;

        // The display number keeps whatever customer it was minted with.
        callout.customer_id = changes.customer_id;
        callout.well_id = changes.well_id;
        callout.hole_section_id = fields.hole_section_id;
        callout.pipe_selection = fields.selection;
        callout.casing_size_id = fields.casing_size_id;
        callout.drillpipe_size_id = fields.drillpipe_size_id;
        callout.minimum_id_size_id = fields.minimum_id_size_id;
        callout.notes = changes.notes;

        txn.update_callout(callout.clone()).await?;
        txn.commit().await?;
        Ok(callout)
    }

    async fn lock(&self, id: Uuid) -> WorkflowResult<Callout> {
        let mut txn = self.store.begin().await?;
        let mut callout = txn
            .callout(id)
            .await?
            .ok_or(WorkflowException::NotFound { entity: "callout", id })?;
        match callout.status {
            CalloutStatus::Locked => Ok(callout),
            CalloutStatus::Draft => {
                callout.status = CalloutStatus::Locked;
                txn.set_callout_status(id, callout.status).await?;
                txn.commit().await?;
                tracing::info!(%id, "callout locked");
                Ok(callout)
            }
            status => Err(WorkflowException::InvalidState {
                entity: "callout",
                action: "lock",
                id,
                status: format!("{status:?}"),
            }),
        }
    }

    async fn pipe_options(&self, hole_section_id: Uuid) -> WorkflowResult<PipeOptions> {
        let txn = self.store.begin().await?;
        CompatibilityValidator::pipe_options(txn.as_ref(), hole_section_id).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use domain_workflow::mock::{MockStoreTxn, MockWorkflowStore};

    use super::*;

    fn conflicting_txn() -> MockStoreTxn {
        let mut txn = MockStoreTxn::new();
        txn.expect_next_sequence().returning(|scope| {
            Err(anyhow::Error::new(WorkflowException::AllocationConflict { scope: scope.key() }))
        });
        txn
    }

    fn happy_txn() -> MockStoreTxn {
        let mut txn = MockStoreTxn::new();
        txn.expect_next_sequence().returning(|_| Ok(1101));
        txn.expect_insert_callout().returning(|_| Ok(()));
        txn.expect_commit().returning(|| Ok(()));
        txn
    }

    #[tokio::test]
    async fn create_retries_the_whole_operation_on_conflict() {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();
        let mut store = MockWorkflowStore::new();
        store.expect_begin().returning(move || {
            let txn: Box<dyn StoreTxn> = if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Box::new(conflicting_txn())
            } else {
                Box::new(happy_txn())
            };
            Ok(txn)
        });

        let service = CalloutServiceImpl::builder()
            .store(Arc::new(store))
            .config(OrchestratorConfig { retry_backoff_ms: 1, ..Default::default() })
            .build();
        let callout = service.create(NewCallout::default()).await.unwrap();
        assert_eq!(callout.sequence, 1101);
        assert_eq!(callout.display_number, "CALL_OUT_1101_UNKNOWN");
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn create_surfaces_exhausted_conflicts() {
        let mut store = MockWorkflowStore::new();
        store
            .expect_begin()
            .returning(|| Ok(Box::new(conflicting_txn()) as Box<dyn StoreTxn>));

        let service = CalloutServiceImpl::builder()
            .store(Arc::new(store))
            .config(OrchestratorConfig { retry_backoff_ms: 1, ..Default::default() })
            .build();
        let result = service.create(NewCallout::default()).await;
        assert!(matches!(result, Err(WorkflowException::AllocationConflict { .. })));
    }
}
