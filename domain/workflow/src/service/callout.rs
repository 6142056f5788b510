use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    exception::WorkflowResult,
    model::{
        entity::Callout,
        vo::{CalloutChanges, NewCallout, PipeOptions},
    },
};

#[async_trait]
pub trait CalloutService: Send + Sync {
    /// Create a callout: allocate its sequence, render the display number,
    /// validate the pipe selection and persist, atomically.
    async fn create(&self, new: NewCallout) -> WorkflowResult<Callout>;

    /// Replace the mutable fields and revalidate. Never recomputes the
    /// sequence or display number.
    async fn update(&self, id: Uuid, changes: CalloutChanges) -> WorkflowResult<Callout>;

    /// Freeze the callout for review.
    async fn lock(&self, id: Uuid) -> WorkflowResult<Callout>;

    /// Pipe sizes offered for a hole section: the allow-list when one is
    /// defined, otherwise the advisory numeric fallback.
    async fn pipe_options(&self, hole_section_id: Uuid) -> WorkflowResult<PipeOptions>;
}
