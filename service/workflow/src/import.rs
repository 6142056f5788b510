use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use domain_workflow::{
    exception::WorkflowResult,
    model::{
        entity::{asset::AssetStatus, Asset, Employee},
        vo::{AssetRecord, EmployeeRecord, ImportOutcome},
    },
    repository::{StoreTxn, WorkflowStore},
    service::ImportService,
};
use typed_builder::TypedBuilder;
use uuid::Uuid;

#[derive(TypedBuilder)]
pub struct ImportServiceImpl {
    store: Arc<dyn WorkflowStore>,
}

/// Overwrite `target` only when the incoming value is non-empty and
/// different; reports whether anything changed.
fn merge(target: &mut String, incoming: &str) -> bool {
    let incoming = incoming.trim();
    if incoming.is_empty() || incoming == target {
        return false;
    }
    *target = incoming.to_owned();
    true
}

#[async_trait]
impl ImportService for ImportServiceImpl {
    async fn upsert_assets(&self, records: Vec<AssetRecord>) -> WorkflowResult<ImportOutcome> {
        let mut txn = self.store.begin().await?;
        let mut outcome = ImportOutcome::default();
        for record in &records {
            let asset_code = record.asset_code.trim();
            if asset_code.is_empty() {
                outcome.skipped += 1;
                continue;
            }
            match txn.asset_by_code(asset_code).await? {
                Some(mut asset) => {
                    let mut changed = false;
                    changed |= merge(&mut asset.cost_center, &record.cost_center);
                    changed |= merge(&mut asset.department, &record.department);
                    changed |= merge(&mut asset.physical_location, &record.physical_location);
                    changed |= merge(&mut asset.account_code, &record.account_code);
                    changed |= merge(&mut asset.description, &record.description);
                    changed |= merge(&mut asset.serial_no, &record.serial_no);
                    changed |= merge(&mut asset.manufacturer, &record.manufacturer);
                    if changed {
                        txn.update_asset(asset).await?;
                        outcome.updated += 1;
                    } else {
                        outcome.unchanged += 1;
                    }
                }
                None => {
                    txn.insert_asset(Asset {
                        id: Uuid::new_v4(),
                        asset_code: asset_code.to_owned(),
                        status: AssetStatus::default(),
                        cost_center: record.cost_center.trim().to_owned(),
                        department: record.department.trim().to_owned(),
                        physical_location: record.physical_location.trim().to_owned(),
                        account_code: record.account_code.trim().to_owned(),
                        description: record.description.trim().to_owned(),
                        serial_no: record.serial_no.trim().to_owned(),
                        manufacturer: record.manufacturer.trim().to_owned(),
                        created_at: Utc::now(),
                    })
                    .await?;
                    outcome.created += 1;
                }
            }
        }
        txn.commit().await?;

        tracing::info!(
            created = outcome.created,
            updated = outcome.updated,
            unchanged = outcome.unchanged,
            skipped = outcome.skipped,
            "asset import finished"
        );
        Ok(outcome)
    }

    async fn upsert_employees(
        &self,
        records: Vec<EmployeeRecord>,
    ) -> WorkflowResult<ImportOutcome> {
        let mut txn = self.store.begin().await?;
        let mut outcome = ImportOutcome::default();
        for record in &records {
            let emp_number = record.emp_number.trim();
            if emp_number.is_empty() {
                outcome.skipped += 1;
                continue;
            }
            match txn.employee_by_number(emp_number).await? {
                Some(mut employee) => {
                    let mut changed = false;
                    changed |= merge(&mut employee.name, &record.name);
                    changed |= merge(&mut employee.designation, &record.designation);
                    changed |= merge(&mut employee.nationality, &record.nationality);
                    changed |= merge(&mut employee.department, &record.department);
                    changed |= merge(&mut employee.tel_number, &record.tel_number);
                    changed |= merge(&mut employee.email, &record.email);
                    if changed {
                        txn.update_employee(employee).await?;
                        outcome.updated += 1;
                    } else {
                        outcome.unchanged += 1;
                    }
                }
                None => {
                    txn.insert_employee(Employee {
                        id: Uuid::new_v4(),
                        emp_number: emp_number.to_owned(),
                        name: record.name.trim().to_owned(),
                        designation: record.designation.trim().to_owned(),
                        nationality: record.nationality.trim().to_owned(),
                        department: record.department.trim().to_owned(),
                        tel_number: record.tel_number.trim().to_owned(),
                        email: record.email.trim().to_owned(),
                        created_at: Utc::now(),
                    })
                    .await?;
                    outcome.created += 1;
                }
            }
        }
        txn.commit().await?;

        tracing::info!(
            created = outcome.created,
            updated = outcome.updated,
            unchanged = outcome.unchanged,
            skipped = outcome.skipped,
            "employee import finished"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_ignores_empty_and_identical_values() {
        let mut value = "Muscat".to_owned();
        assert!(!merge(&mut value, ""));
        assert!(!merge(&mut value, "  "));
        assert!(!merge(&mut value, "Muscat"));
        assert!(merge(&mut value, "Nizwa"));
        assert_eq!(value, "Nizwa");
    }
}
