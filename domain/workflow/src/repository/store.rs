use async_trait::async_trait;
use uuid::Uuid;

use crate::model::{
    entity::{
        asset::AssetStatus, assigned_service::AssignedServiceStatus, callout::CalloutStatus,
        job::JobStatus, schedule::ScheduleStatus, sro::SroStatus, Asset, AssignedService, Callout,
        CasingSize, Customer, DrillpipeSize, Employee, ExecutionLogEntry, HoleSection,
        HoleSectionRelationship, Job, MinimumIdSize, Schedule, Sro, Well,
    },
    vo::{NominalSize, SequenceScope},
};

/// Transactional persistent store for the workflow aggregates.
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Open a transaction. Writes made through the returned handle become
    /// visible to other callers only after `commit`; dropping the handle
    /// without committing discards them.
    async fn begin(&self) -> anyhow::Result<Box<dyn StoreTxn>>;
}

/// The flat read/write surface of one store transaction.
///
/// Implementations must serialize `next_sequence` against concurrent
/// transactions in the same scope: two transactions may never observe the
/// same "next" value. An adapter that cannot serialize must fail the later
/// writer with [`WorkflowException::AllocationConflict`], which callers
/// retry.
///
/// [`WorkflowException::AllocationConflict`]: crate::exception::WorkflowException::AllocationConflict
#[async_trait]
pub trait StoreTxn: Send + Sync {
    async fn commit(&mut self) -> anyhow::Result<()>;

    /// Smallest integer ≥ [`SequenceScope::FLOOR`] strictly greater than
    /// every value already allocated in `scope`.
    async fn next_sequence(&mut self, scope: SequenceScope) -> anyhow::Result<u32>;

    // callouts
    async fn callout(&self, id: Uuid) -> anyhow::Result<Option<Callout>>;
    async fn insert_callout(&mut self, callout: Callout) -> anyhow::Result<()>;
    async fn update_callout(&mut self, callout: Callout) -> anyhow::Result<()>;
    async fn set_callout_status(&mut self, id: Uuid, status: CalloutStatus)
        -> anyhow::Result<()>;

    // sros
    async fn sro(&self, id: Uuid) -> anyhow::Result<Option<Sro>>;
    async fn sro_by_callout(&self, callout_id: Uuid) -> anyhow::Result<Option<Sro>>;
    async fn insert_sro(&mut self, sro: Sro) -> anyhow::Result<()>;
    async fn set_sro_status(&mut self, id: Uuid, status: SroStatus) -> anyhow::Result<()>;

    // schedules
    async fn schedule(&self, id: Uuid) -> anyhow::Result<Option<Schedule>>;
    async fn schedule_by_sro(&self, sro_id: Uuid) -> anyhow::Result<Option<Schedule>>;
    async fn insert_schedule(&mut self, schedule: Schedule) -> anyhow::Result<()>;
    async fn set_schedule_status(
        &mut self,
        id: Uuid,
        status: ScheduleStatus,
    ) -> anyhow::Result<()>;

    // assigned services
    async fn assignment(&self, id: Uuid) -> anyhow::Result<Option<AssignedService>>;
    async fn assignment_by_schedule(
        &self,
        schedule_id: Uuid,
    ) -> anyhow::Result<Option<AssignedService>>;
    async fn insert_assignment(&mut self, assignment: AssignedService) -> anyhow::Result<()>;
    async fn update_assignment(&mut self, assignment: AssignedService) -> anyhow::Result<()>;
    async fn set_assignment_status(
        &mut self,
        id: Uuid,
        status: AssignedServiceStatus,
    ) -> anyhow::Result<()>;

    // jobs
    async fn job(&self, id: Uuid) -> anyhow::Result<Option<Job>>;
    async fn job_by_number(&self, job_number: &str) -> anyhow::Result<Option<Job>>;
    async fn insert_job(&mut self, job: Job) -> anyhow::Result<()>;
    async fn set_job_status(&mut self, id: Uuid, status: JobStatus) -> anyhow::Result<()>;
    async fn insert_log_entry(&mut self, entry: ExecutionLogEntry) -> anyhow::Result<()>;
    async fn log_entries_by_job(&self, job_id: Uuid) -> anyhow::Result<Vec<ExecutionLogEntry>>;

    // lookups
    async fn customer(&self, id: Uuid) -> anyhow::Result<Option<Customer>>;
    async fn insert_customer(&mut self, customer: Customer) -> anyhow::Result<()>;
    async fn well(&self, id: Uuid) -> anyhow::Result<Option<Well>>;
    async fn insert_well(&mut self, well: Well) -> anyhow::Result<()>;
    async fn hole_section(&self, id: Uuid) -> anyhow::Result<Option<HoleSection>>;
    async fn insert_hole_section(&mut self, section: HoleSection) -> anyhow::Result<()>;
    async fn relationship_of(
        &self,
        hole_section_id: Uuid,
    ) -> anyhow::Result<Option<HoleSectionRelationship>>;
    async fn insert_relationship(
        &mut self,
        relationship: HoleSectionRelationship,
    ) -> anyhow::Result<()>;
    async fn casing_size(&self, id: Uuid) -> anyhow::Result<Option<CasingSize>>;
    async fn casing_sizes(&self) -> anyhow::Result<Vec<CasingSize>>;
    async fn insert_casing_size(&mut self, size: CasingSize) -> anyhow::Result<()>;
    async fn drillpipe_size(&self, id: Uuid) -> anyhow::Result<Option<DrillpipeSize>>;
    async fn drillpipe_sizes(&self) -> anyhow::Result<Vec<DrillpipeSize>>;
    async fn insert_drillpipe_size(&mut self, size: DrillpipeSize) -> anyhow::Result<()>;
    async fn minimum_id_size(&self, id: Uuid) -> anyhow::Result<Option<MinimumIdSize>>;
    async fn minimum_id_by_size(
        &self,
        size: NominalSize,
    ) -> anyhow::Result<Option<MinimumIdSize>>;
    async fn insert_minimum_id_size(&mut self, size: MinimumIdSize) -> anyhow::Result<()>;

    // assets and employees
    async fn asset(&self, id: Uuid) -> anyhow::Result<Option<Asset>>;
    async fn asset_by_code(&self, asset_code: &str) -> anyhow::Result<Option<Asset>>;
    /// Every asset whose cost center is in `cost_centers`, regardless of
    /// current status.
    async fn assets_in_cost_centers(
        &self,
        cost_centers: &[String],
    ) -> anyhow::Result<Vec<Asset>>;
    async fn insert_asset(&mut self, asset: Asset) -> anyhow::Result<()>;
    async fn update_asset(&mut self, asset: Asset) -> anyhow::Result<()>;
    async fn set_asset_status(&mut self, id: Uuid, status: AssetStatus) -> anyhow::Result<()>;
    async fn employee(&self, id: Uuid) -> anyhow::Result<Option<Employee>>;
    async fn employee_by_number(&self, emp_number: &str) -> anyhow::Result<Option<Employee>>;
    async fn insert_employee(&mut self, employee: Employee) -> anyhow::Result<()>;
    async fn update_employee(&mut self, employee: Employee) -> anyhow::Result<()>;
}
