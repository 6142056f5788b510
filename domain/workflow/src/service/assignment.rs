use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    exception::WorkflowResult,
    model::{
        entity::AssignedService,
        vo::{AssignmentChanges, NewAssignment},
    },
};

#[async_trait]
pub trait AssignmentService: Send + Sync {
    /// Assign crew and assets to a planned or approved schedule. Resolves
    /// assets by cost-center membership, marks them on duty, and cascades
    /// the schedule, SRO and callout to `Assigned` as one unit.
    async fn assign(&self, new: NewAssignment) -> WorkflowResult<AssignedService>;

    /// Change crew or cost centers. When the cost centers change, the
    /// previously linked assets revert to green and the newly resolved set
    /// is marked on duty.
    async fn reassign(
        &self,
        id: Uuid,
        changes: AssignmentChanges,
    ) -> WorkflowResult<AssignedService>;

    async fn complete(&self, id: Uuid) -> WorkflowResult<AssignedService>;

    async fn cancel(&self, id: Uuid) -> WorkflowResult<AssignedService>;
}
