pub mod asset;
pub mod assigned_service;
pub mod callout;
pub mod employee;
pub mod job;
pub mod lookup;
pub mod schedule;
pub mod sro;

#[rustfmt::skip]
pub use {
    asset::Asset,
    assigned_service::AssignedService,
    callout::Callout,
    employee::Employee,
    job::{ExecutionLogEntry, Job},
    lookup::{
        CasingSize, Customer, DrillpipeSize, HoleSection, HoleSectionRelationship, MinimumIdSize,
        Well,
    },
    schedule::Schedule,
    sro::Sro,
};
