use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use domain_workflow::{
    exception::{WorkflowException, WorkflowResult},
    model::{
        entity::{
            asset::AssetStatus, assigned_service::AssignedServiceStatus,
            callout::CalloutStatus, schedule::ScheduleStatus, sro::SroStatus, AssignedService,
        },
        vo::{AssignmentChanges, NewAssignment},
    },
    repository::{StoreTxn, WorkflowStore},
    service::AssignmentService,
};
use typed_builder::TypedBuilder;
use uuid::Uuid;

#[derive(TypedBuilder)]
pub struct AssignmentServiceImpl {
    store: Arc<dyn WorkflowStore>,
}

/// Trimmed, de-duplicated cost centers in caller order.
fn normalize_cost_centers(cost_centers: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(cost_centers.len());
    for cost_center in cost_centers {
        let cost_center = cost_center.trim();
        if !cost_center.is_empty() && !normalized.iter().any(|seen| seen == cost_center) {
            normalized.push(cost_center.to_owned());
        }
    }
    normalized
}

impl AssignmentServiceImpl {
    async fn check_employees(
        txn: &dyn StoreTxn,
        employee_ids: &[Uuid],
    ) -> WorkflowResult<Vec<Uuid>> {
        if employee_ids.is_empty() {
            return Err(WorkflowException::EmptyEmployees);
        }
        let mut employee_ids = employee_ids.to_vec();
        employee_ids.sort();
        employee_ids.dedup();
        for id in &employee_ids {
            txn.employee(*id)
                .await?
                .ok_or(WorkflowException::NotFound { entity: "employee", id: *id })?;
        }
        Ok(employee_ids)
    }

    /// Resolve every asset in the cost-center set and mark it on duty. Runs
    /// under the transaction's write serialization, so two concurrent
    /// assignments can never double-book an asset.
    async fn book_assets(
        txn: &mut dyn StoreTxn,
        cost_centers: &[String],
    ) -> WorkflowResult<Vec<Uuid>> {
        let assets = txn.assets_in_cost_centers(cost_centers).await?;
        if assets.is_empty() {
            return Err(WorkflowException::NoAssetsFound {
                cost_centers: cost_centers.to_vec(),
            });
        }
        let mut asset_ids = Vec::with_capacity(assets.len());
        for asset in assets {
            txn.set_asset_status(asset.id, AssetStatus::OnDuty).await?;
            asset_ids.push(asset.id);
        }
        Ok(asset_ids)
    }

    async fn transition(
        &self,
        id: Uuid,
        action: &'static str,
        target: AssignedServiceStatus,
    ) -> WorkflowResult<AssignedService> {
        let mut txn = self.store.begin().await?;
        let mut assignment = txn
            .assignment(id)
            .await?
            .ok_or(WorkflowException::NotFound { entity: "assigned service", id })?;
        if !assignment.status.advance(target) {
            return Err(WorkflowException::InvalidState {
                entity: "assigned service",
                action,
                id,
                status: format!("{:?}", assignment.status),
            });
        }
        txn.set_assignment_status(id, assignment.status).await?;
        txn.commit().await?;
        tracing::info!(%id, status = ?assignment.status, "assigned service transitioned");
        Ok(assignment)
    }
}

#[async_trait]
impl AssignmentService for AssignmentServiceImpl {
    async fn assign(&self, new: NewAssignment) -> WorkflowResult<AssignedService> {
        let cost_centers = normalize_cost_centers(&new.cost_centers);
        if cost_centers.is_empty() {
            return Err(WorkflowException::EmptyCostCenters);
        }

        let mut txn = self.store.begin().await?;
        let mut schedule = txn
            .schedule(new.schedule_id)
            .await?
            .ok_or(WorkflowException::NotFound { entity: "schedule", id: new.schedule_id })?;
        if !matches!(schedule.status, ScheduleStatus::Planned | ScheduleStatus::Approved) {
            return Err(WorkflowException::InvalidState {
                entity: "schedule",
                action: "assign",
                id: schedule.id,
                status: format!("{:?}", schedule.status),
            });
        }
        if txn.assignment_by_schedule(schedule.id).await?.is_some() {
            return Err(WorkflowException::AlreadyAssigned { schedule_id: schedule.id });
        }

        let employee_ids = Self::check_employees(txn.as_ref(), &new.employee_ids).await?;
        let asset_ids = Self::book_assets(txn.as_mut(), &cost_centers).await?;

        let now = Utc::now();
        let assignment = AssignedService {
            id: Uuid::new_v4(),
            schedule_id: schedule.id,
            employee_ids,
            asset_ids,
            cost_centers,
            status: new.status,
            note: new.note,
            equipment_required_at: new.equipment_required_at,
            crew_required_at: new.crew_required_at,
            assigned_at: Some(now),
            created_at: now,
        };
        txn.insert_assignment(assignment.clone()).await?;

        // Three-level cascade, committed as one unit with the insert.
        if schedule.status.advance(ScheduleStatus::Assigned) {
            txn.set_schedule_status(schedule.id, schedule.status).await?;
        }
        let mut sro = txn
            .sro(schedule.sro_id)
            .await?
            .ok_or(WorkflowException::NotFound { entity: "sro", id: schedule.sro_id })?;
        if sro.status.advance(SroStatus::Assigned) {
            txn.set_sro_status(sro.id, sro.status).await?;
        }
        let mut callout = txn
            .callout(sro.callout_id)
            .await?
            .ok_or(WorkflowException::NotFound { entity: "callout", id: sro.callout_id })?;
        if callout.status.advance(CalloutStatus::Assigned) {
            txn.set_callout_status(callout.id, callout.status).await?;
        }
        txn.commit().await?;

        tracing::info!(
            id = %assignment.id,
            schedule = %schedule.display_number,
            assets = assignment.asset_ids.len(),
            "service assigned"
        );
        Ok(assignment)
    }

    async fn reassign(
        &self,
        id: Uuid,
        changes: AssignmentChanges,
    ) -> WorkflowResult<AssignedService> {
        let mut txn = self.store.begin().await?;
        let mut assignment = txn
            .assignment(id)
            .await?
            .ok_or(WorkflowException::NotFound { entity: "assigned service", id })?;
        if assignment.status.is_terminal() {
            return Err(WorkflowException::InvalidState {
                entity: "assigned service",
                action: "reassign",
                id,
                status: format!("{:?}", assignment.status),
            });
        }

        if let Some(employee_ids) = &changes.employee_ids {
            assignment.employee_ids = Self::check_employees(txn.as_ref(), employee_ids).await?;
        }

        if let Some(cost_centers) = &changes.cost_centers {
            let cost_centers = normalize_cost_centers(cost_centers);
            if cost_centers.is_empty() {
                return Err(WorkflowException::EmptyCostCenters);
            }
            if cost_centers != assignment.cost_centers {
                // Release the old set first; assets in both sets end up on
                // duty again through the re-booking below.
                for asset_id in &assignment.asset_ids {
                    txn.set_asset_status(*asset_id, AssetStatus::Green).await?;
                }
                assignment.asset_ids = Self::book_assets(txn.as_mut(), &cost_centers).await?;
                assignment.cost_centers = cost_centers;
            }
        }

        if let Some(note) = changes.note {
            assignment.note = Some(note);
        }

        txn.update_assignment(assignment.clone()).await?;
        txn.commit().await?;
        tracing::info!(%id, "service reassigned");
        Ok(assignment)
    }

    async fn complete(&self, id: Uuid) -> WorkflowResult<AssignedService> {
        self.transition(id, "complete", AssignedServiceStatus::Completed).await
    }

    async fn cancel(&self, id: Uuid) -> WorkflowResult<AssignedService> {
        self.transition(id, "cancel", AssignedServiceStatus::Cancelled).await
    }
}
