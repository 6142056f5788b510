use async_trait::async_trait;

use crate::{
    exception::WorkflowResult,
    model::vo::{AssetRecord, EmployeeRecord, ImportOutcome},
};

/// Upsert-by-natural-key sink for the bulk import collaborator. Unmatched
/// keys create new records; matched keys update only fields whose incoming
/// value is non-empty and different from the current value.
#[async_trait]
pub trait ImportService: Send + Sync {
    async fn upsert_assets(&self, records: Vec<AssetRecord>) -> WorkflowResult<ImportOutcome>;

    async fn upsert_employees(
        &self,
        records: Vec<EmployeeRecord>,
    ) -> WorkflowResult<ImportOutcome>;
}
