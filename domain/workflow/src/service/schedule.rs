use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    exception::WorkflowResult,
    model::{entity::Schedule, vo::NewSchedule},
};

#[async_trait]
pub trait ScheduleService: Send + Sync {
    /// Place an SRO on the schedule. Fails with `AlreadyExists` when the SRO
    /// already has one. Cascades the SRO and its callout to `Scheduled`
    /// within the same transaction.
    async fn create(&self, new: NewSchedule) -> WorkflowResult<Schedule>;

    async fn plan(&self, id: Uuid) -> WorkflowResult<Schedule>;

    async fn approve(&self, id: Uuid) -> WorkflowResult<Schedule>;

    async fn cancel(&self, id: Uuid) -> WorkflowResult<Schedule>;
}
