use std::sync::Arc;

use chrono::Utc;
use domain_workflow::{
    model::{
        entity::{
            asset::AssetStatus, Asset, CasingSize, Customer, DrillpipeSize, Employee,
            HoleSection, HoleSectionRelationship, MinimumIdSize, Well,
        },
        vo::NominalSize,
    },
    repository::{StoreTxn, WorkflowStore},
};
use infrastructure_persistence::MemoryWorkflowStore;
use service_workflow::{
    AssignmentServiceImpl, CalloutServiceImpl, ImportServiceImpl, JobServiceImpl,
    ScheduleServiceImpl, SroServiceImpl,
};
use uuid::Uuid;

/// Seeded lookups and master data shared by the orchestration tests.
pub struct Fixture {
    pub store: Arc<MemoryWorkflowStore>,
    pub pdo_id: Uuid,
    pub oq_id: Uuid,
    pub well_id: Uuid,
    /// `12 1/4"` section with an allow-list: casing 9 5/8, drillpipe 5.
    pub section_12_id: Uuid,
    /// `8 1/2"` section without an allow-list.
    pub section_8_id: Uuid,
    pub casing_9_id: Uuid,
    pub casing_7_id: Uuid,
    pub drillpipe_5_id: Uuid,
    /// 7" minimum-id lookup, deliberately too large for a 7" casing.
    pub minimum_7_id: Uuid,
    pub employee_ids: Vec<Uuid>,
    pub assets_cc100: Vec<Uuid>,
    pub assets_cc200: Vec<Uuid>,
}

fn asset(code: &str, cost_center: &str) -> Asset {
    Asset {
        id: Uuid::new_v4(),
        asset_code: code.to_owned(),
        status: AssetStatus::Green,
        cost_center: cost_center.to_owned(),
        department: "Wireline".to_owned(),
        physical_location: "Yard 2".to_owned(),
        account_code: String::new(),
        description: String::new(),
        serial_no: String::new(),
        manufacturer: String::new(),
        created_at: Utc::now(),
    }
}

fn employee(number: &str, name: &str) -> Employee {
    Employee {
        id: Uuid::new_v4(),
        emp_number: number.to_owned(),
        name: name.to_owned(),
        designation: "Field Engineer".to_owned(),
        nationality: String::new(),
        department: "Operations".to_owned(),
        tel_number: String::new(),
        email: String::new(),
        created_at: Utc::now(),
    }
}

pub async fn fixture() -> Fixture {
    let store = Arc::new(MemoryWorkflowStore::default());
    let mut txn = store.begin().await.unwrap();

    let pdo = Customer { id: Uuid::new_v4(), name: "Petroleum Development Oman".to_owned() };
    let oq = Customer { id: Uuid::new_v4(), name: "Oman Oil".to_owned() };
    let well = Well {
        id: Uuid::new_v4(),
        name: "Fahud-101".to_owned(),
        well_code: "FHD-101".to_owned(),
    };
    let section_12 = HoleSection {
        id: Uuid::new_v4(),
        name: "12 1/4\"".to_owned(),
        description: Some("Intermediate section".to_owned()),
    };
    let section_8 =
        HoleSection { id: Uuid::new_v4(), name: "8 1/2\"".to_owned(), description: None };
    let casing_9 = CasingSize {
        id: Uuid::new_v4(),
        size: NominalSize::from_thousandths(9_625),
        label: "9 5/8\"".to_owned(),
    };
    let casing_7 = CasingSize {
        id: Uuid::new_v4(),
        size: NominalSize::from_thousandths(7_000),
        label: "7\"".to_owned(),
    };
    let drillpipe_5 = DrillpipeSize {
        id: Uuid::new_v4(),
        size: NominalSize::from_thousandths(5_000),
        label: "5\"".to_owned(),
    };
    let minimum_7 = MinimumIdSize {
        id: Uuid::new_v4(),
        size: NominalSize::from_thousandths(7_000),
        label: "7\"".to_owned(),
    };

    txn.insert_customer(pdo.clone()).await.unwrap();
    txn.insert_customer(oq.clone()).await.unwrap();
    txn.insert_well(well.clone()).await.unwrap();
    txn.insert_hole_section(section_12.clone()).await.unwrap();
    txn.insert_hole_section(section_8.clone()).await.unwrap();
    txn.insert_casing_size(casing_9.clone()).await.unwrap();
    txn.insert_casing_size(casing_7.clone()).await.unwrap();
    txn.insert_drillpipe_size(drillpipe_5.clone()).await.unwrap();
    txn.insert_minimum_id_size(minimum_7.clone()).await.unwrap();
    txn.insert_relationship(HoleSectionRelationship {
        id: Uuid::new_v4(),
        hole_section_id: section_12.id,
        casing_size_ids: vec![casing_9.id],
        drillpipe_size_ids: vec![drillpipe_5.id],
    })
    .await
    .unwrap();

    let employees = vec![employee("E-1001", "Said"), employee("E-1002", "Fatma")];
    for employee in &employees {
        txn.insert_employee(employee.clone()).await.unwrap();
    }
    let assets_cc100 = vec![asset("A-100", "CC-100"), asset("A-101", "CC-100")];
    let assets_cc200 = vec![asset("A-200", "CC-200")];
    for asset in assets_cc100.iter().chain(&assets_cc200) {
        txn.insert_asset(asset.clone()).await.unwrap();
    }

    txn.commit().await.unwrap();
    drop(txn);

    Fixture {
        store,
        pdo_id: pdo.id,
        oq_id: oq.id,
        well_id: well.id,
        section_12_id: section_12.id,
        section_8_id: section_8.id,
        casing_9_id: casing_9.id,
        casing_7_id: casing_7.id,
        drillpipe_5_id: drillpipe_5.id,
        minimum_7_id: minimum_7.id,
        employee_ids: employees.iter().map(|e| e.id).collect(),
        assets_cc100: assets_cc100.iter().map(|a| a.id).collect(),
        assets_cc200: assets_cc200.iter().map(|a| a.id).collect(),
    }
}

pub struct Services {
    pub callouts: CalloutServiceImpl,
    pub sros: SroServiceImpl,
    pub schedules: ScheduleServiceImpl,
    pub assignments: AssignmentServiceImpl,
    pub jobs: JobServiceImpl,
    pub imports: ImportServiceImpl,
}

pub fn services(fixture: &Fixture) -> Services {
    let store: Arc<dyn WorkflowStore> = fixture.store.clone();
    Services {
        callouts: CalloutServiceImpl::builder().store(store.clone()).build(),
        sros: SroServiceImpl::builder().store(store.clone()).build(),
        schedules: ScheduleServiceImpl::builder().store(store.clone()).build(),
        assignments: AssignmentServiceImpl::builder().store(store.clone()).build(),
        jobs: JobServiceImpl::builder().store(store.clone()).build(),
        imports: ImportServiceImpl::builder().store(store).build(),
    }
}
