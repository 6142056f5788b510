use std::{collections::HashMap, sync::Arc};

use anyhow::bail;
use async_trait::async_trait;
use domain_workflow::{
    model::{
        entity::{
            asset::AssetStatus, assigned_service::AssignedServiceStatus, callout::CalloutStatus,
            job::JobStatus, schedule::ScheduleStatus, sro::SroStatus, Asset, AssignedService,
            Callout, CasingSize, Customer, DrillpipeSize, Employee, ExecutionLogEntry,
            HoleSection, HoleSectionRelationship, Job, MinimumIdSize, Schedule, Sro, Well,
        },
        vo::{NominalSize, SequenceScope},
    },
    repository::{StoreTxn, WorkflowStore},
};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// In-memory reference implementation of the workflow store.
///
/// One writer at a time: `begin` takes the state lock and clones the state,
/// every read and write inside the transaction hits the clone, and `commit`
/// swaps the clone back in. Dropping the transaction without committing
/// discards the clone. Full serialization trivially provides the sequence
/// allocation and cascade atomicity the store contract asks for.
#[derive(Default)]
pub struct MemoryWorkflowStore {
    state: Arc<Mutex<WorkflowState>>,
}

#[derive(Clone, Default)]
struct WorkflowState {
    sequences: HashMap<String, u32>,
    callouts: HashMap<Uuid, Callout>,
    sros: HashMap<Uuid, Sro>,
    schedules: HashMap<Uuid, Schedule>,
    assignments: HashMap<Uuid, AssignedService>,
    jobs: HashMap<Uuid, Job>,
    log_entries: Vec<ExecutionLogEntry>,
    customers: HashMap<Uuid, Customer>,
    wells: HashMap<Uuid, Well>,
    hole_sections: HashMap<Uuid, HoleSection>,
    /// Keyed by hole section id; at most one relationship per section.
    relationships: HashMap<Uuid, HoleSectionRelationship>,
    casing_sizes: HashMap<Uuid, CasingSize>,
    drillpipe_sizes: HashMap<Uuid, DrillpipeSize>,
    minimum_id_sizes: HashMap<Uuid, MinimumIdSize>,
    assets: HashMap<Uuid, Asset>,
    employees: HashMap<Uuid, Employee>,
}

struct MemoryTxn {
    working: WorkflowState,
    committed: bool,
    guard: OwnedMutexGuard<WorkflowState>,
}

#[async_trait]
impl WorkflowStore for MemoryWorkflowStore {
    async fn begin(&self) -> anyhow::Result<Box<dyn StoreTxn>> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryTxn { working, committed: false, guard }))
    }
}

#[async_trait]
impl StoreTxn for MemoryTxn {
    async fn commit(&mut self) -> anyhow::Result<()> {
        if self.committed {
            bail!("transaction already committed");
        }
        *self.guard = std::mem::take(&mut self.working);
        self.committed = true;
        Ok(())
    }

    async fn next_sequence(&mut self, scope: SequenceScope) -> anyhow::Result<u32> {
        let key = scope.key();
        let next = match self.working.sequences.get(&key) {
            Some(last) => last + 1,
            None => SequenceScope::FLOOR,
        };
        self.working.sequences.insert(key, next);
        Ok(next)
    }

    async fn callout(&self, id: Uuid) -> anyhow::Result<Option<Callout>> {
        Ok(self.working.callouts.get(&id).cloned())
    }

    async fn insert_callout(&mut self, callout: Callout) -> anyhow::Result<()> {
        if self.working.callouts.contains_key(&callout.id) {
            bail!("duplicate callout id: {}", callout.id);
        }
        self.working.callouts.insert(callout.id, callout);
        Ok(())
    }

    async fn update_callout(&mut self, callout: Callout) -> anyhow::Result<()> {
        if !self.working.callouts.contains_key(&callout.id) {
            bail!("unknown callout id: {}", callout.id);
        }
        self.working.callouts.insert(callout.id, callout);
        Ok(())
    }

    async fn set_callout_status(
        &mut self,
        id: Uuid,
        status: CalloutStatus,
    ) -> anyhow::Result<()> {
        match self.working.callouts.get_mut(&id) {
            Some(callout) => {
                callout.status = status;
                Ok(())
            }
            None => bail!("unknown callout id: {id}"),
        }
    }

    async fn sro(&self, id: Uuid) -> anyhow::Result<Option<Sro>> {
        Ok(self.working.sros.get(&id).cloned())
    }

    async fn sro_by_callout(&self, callout_id: Uuid) -> anyhow::Result<Option<Sro>> {
        Ok(self.working.sros.values().find(|sro| sro.callout_id == callout_id).cloned())
    }

    async fn insert_sro(&mut self, sro: Sro) -> anyhow::Result<()> {
        if self.working.sros.contains_key(&sro.id) {
            bail!("duplicate sro id: {}", sro.id);
        }
        self.working.sros.insert(sro.id, sro);
        Ok(())
    }

    async fn set_sro_status(&mut self, id: Uuid, status: SroStatus) -> anyhow::Result<()> {
        match self.working.sros.get_mut(&id) {
            Some(sro) => {
                sro.status = status;
                Ok(())
            }
            None => bail!("unknown sro id: {id}"),
        }
    }

    async fn schedule(&self, id: Uuid) -> anyhow::Result<Option<Schedule>> {
        Ok(self.working.schedules.get(&id).cloned())
    }

    async fn schedule_by_sro(&self, sro_id: Uuid) -> anyhow::Result<Option<Schedule>> {
        Ok(self
            .working
            .schedules
            .values()
            .find(|schedule| schedule.sro_id == sro_id)
            .cloned())
    }

    async fn insert_schedule(&mut self, schedule: Schedule) -> anyhow::Result<()> {
        if self.working.schedules.contains_key(&schedule.id) {
            bail!("duplicate schedule id: {}", schedule.id);
        }
        self.working.schedules.insert(schedule.id, schedule);
        Ok(())
    }

    async fn set_schedule_status(
        &mut self,
        id: Uuid,
        status: ScheduleStatus,
    ) -> anyhow::Result<()> {
        match self.working.schedules.get_mut(&id) {
            Some(schedule) => {
                schedule.status = status;
                Ok(())
            }
            None => bail!("unknown schedule id: {id}"),
        }
    }

    async fn assignment(&self, id: Uuid) -> anyhow::Result<Option<AssignedService>> {
        Ok(self.working.assignments.get(&id).cloned())
    }

    async fn assignment_by_schedule(
        &self,
        schedule_id: Uuid,
    ) -> anyhow::Result<Option<AssignedService>> {
        Ok(self
            .working
            .assignments
            .values()
            .find(|assignment| assignment.schedule_id == schedule_id)
            .cloned())
    }

    async fn insert_assignment(&mut self, assignment: AssignedService) -> anyhow::Result<()> {
        if self.working.assignments.contains_key(&assignment.id) {
            bail!("duplicate assignment id: {}", assignment.id);
        }
        self.working.assignments.insert(assignment.id, assignment);
        Ok(())
    }

    async fn update_assignment(&mut self, assignment: AssignedService) -> anyhow::Result<()> {
        if !self.working.assignments.contains_key(&assignment.id) {
            bail!("unknown assignment id: {}", assignment.id);
        }
        self.working.assignments.insert(assignment.id, assignment);
        Ok(())
    }

    async fn set_assignment_status(
        &mut self,
        id: Uuid,
        status: AssignedServiceStatus,
    ) -> anyhow::Result<()> {
        match self.working.assignments.get_mut(&id) {
            Some(assignment) => {
                assignment.status = status;
                Ok(())
            }
            None => bail!("unknown assignment id: {id}"),
        }
    }

    async fn job(&self, id: Uuid) -> anyhow::Result<Option<Job>> {
        Ok(self.working.jobs.get(&id).cloned())
    }

    async fn job_by_number(&self, job_number: &str) -> anyhow::Result<Option<Job>> {
        Ok(self.working.jobs.values().find(|job| job.job_number == job_number).cloned())
    }

    async fn insert_job(&mut self, job: Job) -> anyhow::Result<()> {
        if self.working.jobs.contains_key(&job.id) {
            bail!("duplicate job id: {}", job.id);
        }
        self.working.jobs.insert(job.id, job);
        Ok(())
    }

    async fn set_job_status(&mut self, id: Uuid, status: JobStatus) -> anyhow::Result<()> {
        match self.working.jobs.get_mut(&id) {
            Some(job) => {
                job.status = status;
                Ok(())
            }
            None => bail!("unknown job id: {id}"),
        }
    }

    async fn insert_log_entry(&mut self, entry: ExecutionLogEntry) -> anyhow::Result<()> {
        self.working.log_entries.push(entry);
        Ok(())
    }

    async fn log_entries_by_job(&self, job_id: Uuid) -> anyhow::Result<Vec<ExecutionLogEntry>> {
        Ok(self
            .working
            .log_entries
            .iter()
            .filter(|entry| entry.job_id == job_id)
            .cloned()
            .collect())
    }

    async fn customer(&self, id: Uuid) -> anyhow::Result<Option<Customer>> {
        Ok(self.working.customers.get(&id).cloned())
    }

    async fn insert_customer(&mut self, customer: Customer) -> anyhow::Result<()> {
        self.working.customers.insert(customer.id, customer);
        Ok(())
    }

    async fn well(&self, id: Uuid) -> anyhow::Result<Option<Well>> {
        Ok(self.working.wells.get(&id).cloned())
    }

    async fn insert_well(&mut self, well: Well) -> anyhow::Result<()> {
        self.working.wells.insert(well.id, well);
        Ok(())
    }

    async fn hole_section(&self, id: Uuid) -> anyhow::Result<Option<HoleSection>> {
        Ok(self.working.hole_sections.get(&id).cloned())
    }

    async fn insert_hole_section(&mut self, section: HoleSection) -> anyhow::Result<()> {
        self.working.hole_sections.insert(section.id, section);
        Ok(())
    }

    async fn relationship_of(
        &self,
        hole_section_id: Uuid,
    ) -> anyhow::Result<Option<HoleSectionRelationship>> {
        Ok(self.working.relationships.get(&hole_section_id).cloned())
    }

    async fn insert_relationship(
        &mut self,
        relationship: HoleSectionRelationship,
    ) -> anyhow::Result<()> {
        if self.working.relationships.contains_key(&relationship.hole_section_id) {
            bail!(
                "hole section {} already has a relationship",
                relationship.hole_section_id
            );
        }
        self.working.relationships.insert(relationship.hole_section_id, relationship);
        Ok(())
    }

    async fn casing_size(&self, id: Uuid) -> anyhow::Result<Option<CasingSize>> {
        Ok(self.working.casing_sizes.get(&id).cloned())
    }

    async fn casing_sizes(&self) -> anyhow::Result<Vec<CasingSize>> {
        Ok(self.working.casing_sizes.values().cloned().collect())
    }

    async fn insert_casing_size(&mut self, size: CasingSize) -> anyhow::Result<()> {
        self.working.casing_sizes.insert(size.id, size);
        Ok(())
    }

    async fn drillpipe_size(&self, id: Uuid) -> anyhow::Result<Option<DrillpipeSize>> {
        Ok(self.working.drillpipe_sizes.get(&id).cloned())
    }

    async fn drillpipe_sizes(&self) -> anyhow::Result<Vec<DrillpipeSize>> {
        Ok(self.working.drillpipe_sizes.values().cloned().collect())
    }

    async fn insert_drillpipe_size(&mut self, size: DrillpipeSize) -> anyhow::Result<()> {
        self.working.drillpipe_sizes.insert(size.id, size);
        Ok(())
    }

    async fn minimum_id_size(&self, id: Uuid) -> anyhow::Result<Option<MinimumIdSize>> {
        Ok(self.working.minimum_id_sizes.get(&id).cloned())
    }

    async fn minimum_id_by_size(
        &self,
        size: NominalSize,
    ) -> anyhow::Result<Option<MinimumIdSize>> {
        Ok(self
            .working
            .minimum_id_sizes
            .values()
            .find(|minimum| minimum.size == size)
            .cloned())
    }

    async fn insert_minimum_id_size(&mut self, size: MinimumIdSize) -> anyhow::Result<()> {
        if self.working.minimum_id_sizes.values().any(|m| m.size == size.size) {
            bail!("duplicate minimum id size: {}", size.size);
        }
        self.working.minimum_id_sizes.insert(size.id, size);
        Ok(())
    }

    async fn asset(&self, id: Uuid) -> anyhow::Result<Option<Asset>> {
        Ok(self.working.assets.get(&id).cloned())
    }

    async fn asset_by_code(&self, asset_code: &str) -> anyhow::Result<Option<Asset>> {
        Ok(self.working.assets.values().find(|asset| asset.asset_code == asset_code).cloned())
    }

    async fn assets_in_cost_centers(
        &self,
        cost_centers: &[String],
    ) -> anyhow::Result<Vec<Asset>> {
        let mut assets: Vec<Asset> = self
            .working
            .assets
            .values()
            .filter(|asset| cost_centers.iter().any(|center| *center == asset.cost_center))
            .cloned()
            .collect();
        assets.sort_by(|a, b| a.asset_code.cmp(&b.asset_code));
        Ok(assets)
    }

    async fn insert_asset(&mut self, asset: Asset) -> anyhow::Result<()> {
        if self.working.assets.values().any(|a| a.asset_code == asset.asset_code) {
            bail!("duplicate asset code: {}", asset.asset_code);
        }
        self.working.assets.insert(asset.id, asset);
        Ok(())
    }

    async fn update_asset(&mut self, asset: Asset) -> anyhow::Result<()> {
        if !self.working.assets.contains_key(&asset.id) {
            bail!("unknown asset id: {}", asset.id);
        }
        self.working.assets.insert(asset.id, asset);
        Ok(())
    }

    async fn set_asset_status(&mut self, id: Uuid, status: AssetStatus) -> anyhow::Result<()> {
        match self.working.assets.get_mut(&id) {
            Some(asset) => {
                asset.status = status;
                Ok(())
            }
            None => bail!("unknown asset id: {id}"),
        }
    }

    async fn employee(&self, id: Uuid) -> anyhow::Result<Option<Employee>> {
        Ok(self.working.employees.get(&id).cloned())
    }

    async fn employee_by_number(&self, emp_number: &str) -> anyhow::Result<Option<Employee>> {
        Ok(self
            .working
            .employees
            .values()
            .find(|employee| employee.emp_number == emp_number)
            .cloned())
    }

    async fn insert_employee(&mut self, employee: Employee) -> anyhow::Result<()> {
        if self.working.employees.values().any(|e| e.emp_number == employee.emp_number) {
            bail!("duplicate employee number: {}", employee.emp_number);
        }
        self.working.employees.insert(employee.id, employee);
        Ok(())
    }

    async fn update_employee(&mut self, employee: Employee) -> anyhow::Result<()> {
        if !self.working.employees.contains_key(&employee.id) {
            bail!("unknown employee id: {}", employee.id);
        }
        self.working.employees.insert(employee.id, employee);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use domain_workflow::model::entity::callout::PipeSelection;

    use super::*;

    fn callout(id: Uuid, sequence: u32) -> Callout {
        Callout {
            id,
            sequence,
            display_number: format!("CALL_OUT_{sequence}_UNKNOWN"),
            customer_id: None,
            well_id: None,
            hole_section_id: None,
            pipe_selection: PipeSelection::None,
            casing_size_id: None,
            drillpipe_size_id: None,
            minimum_id_size_id: None,
            status: CalloutStatus::Draft,
            notes: None,
            created_by: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn commit_publishes_and_drop_discards() {
        let store = MemoryWorkflowStore::default();
        let id = Uuid::new_v4();

        let mut txn = store.begin().await.unwrap();
        txn.insert_callout(callout(id, 1101)).await.unwrap();
        txn.commit().await.unwrap();
        drop(txn);

        let discarded = Uuid::new_v4();
        let mut txn = store.begin().await.unwrap();
        txn.insert_callout(callout(discarded, 1102)).await.unwrap();
        drop(txn);

        let txn = store.begin().await.unwrap();
        assert!(txn.callout(id).await.unwrap().is_some());
        assert!(txn.callout(discarded).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn sequences_start_at_the_floor_and_stay_scoped() {
        let store = MemoryWorkflowStore::default();
        let customer = Uuid::new_v4();

        let mut txn = store.begin().await.unwrap();
        assert_eq!(txn.next_sequence(SequenceScope::Callout).await.unwrap(), 1101);
        assert_eq!(txn.next_sequence(SequenceScope::Callout).await.unwrap(), 1102);
        assert_eq!(
            txn.next_sequence(SequenceScope::Sro(Some(customer))).await.unwrap(),
            1101
        );
        assert_eq!(txn.next_sequence(SequenceScope::Sro(None)).await.unwrap(), 1101);
        txn.commit().await.unwrap();
        drop(txn);

        let mut txn = store.begin().await.unwrap();
        assert_eq!(txn.next_sequence(SequenceScope::Callout).await.unwrap(), 1103);
    }

    #[tokio::test]
    async fn aborted_transactions_release_their_sequence_values() {
        let store = MemoryWorkflowStore::default();

        let mut txn = store.begin().await.unwrap();
        assert_eq!(txn.next_sequence(SequenceScope::Schedule).await.unwrap(), 1101);
        drop(txn);

        // The allocation rolled back with the rest of the transaction, so
        // the value is handed out again rather than leaving a gap.
        let mut txn = store.begin().await.unwrap();
        assert_eq!(txn.next_sequence(SequenceScope::Schedule).await.unwrap(), 1101);
    }

    #[tokio::test]
    async fn duplicate_inserts_are_rejected() {
        let store = MemoryWorkflowStore::default();
        let id = Uuid::new_v4();

        let mut txn = store.begin().await.unwrap();
        txn.insert_callout(callout(id, 1101)).await.unwrap();
        assert!(txn.insert_callout(callout(id, 1102)).await.is_err());
    }
}
