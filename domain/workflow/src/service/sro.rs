use async_trait::async_trait;
use uuid::Uuid;

use crate::{exception::WorkflowResult, model::entity::Sro};

#[async_trait]
pub trait SroService: Send + Sync {
    /// Generate the SRO for a callout. Fails with `AlreadyExists` when the
    /// callout already has one. The new SRO starts in `Active` status and
    /// the callout advances to `SroActivated`.
    async fn generate(&self, callout_id: Uuid, created_by: Option<Uuid>) -> WorkflowResult<Sro>;

    /// Idempotent approval: a no-op when the SRO is already approved or
    /// further along.
    async fn approve(&self, id: Uuid) -> WorkflowResult<Sro>;

    /// Release the SRO for scheduling.
    async fn mark_ready_for_scheduling(&self, id: Uuid) -> WorkflowResult<Sro>;

    async fn mark_executed(&self, id: Uuid) -> WorkflowResult<Sro>;

    async fn qc_approve(&self, id: Uuid) -> WorkflowResult<Sro>;

    async fn close(&self, id: Uuid) -> WorkflowResult<Sro>;

    async fn cancel(&self, id: Uuid) -> WorkflowResult<Sro>;
}
