pub mod display_number;
mod import;
mod nominal_size;
mod requests;

use std::fmt;

use uuid::Uuid;

use crate::model::entity::{
    callout::PipeSelection,
    lookup::{CasingSize, DrillpipeSize},
};

#[rustfmt::skip]
pub use {
    import::{AssetRecord, EmployeeRecord, ImportOutcome},
    nominal_size::NominalSize,
    requests::{
        AssignmentChanges, CalloutChanges, NewAssignment, NewCallout, NewJob, NewLogEntry,
        NewSchedule,
    },
};

/// An independent counter series for business identifier allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SequenceScope {
    Callout,
    /// Scoped per customer; `None` covers SROs generated without a customer.
    Sro(Option<Uuid>),
    Schedule,
}

impl SequenceScope {
    /// Lowest value ever issued, in every scope.
    pub const FLOOR: u32 = 1101;

    pub fn key(&self) -> String {
        match self {
            Self::Callout => "callout".into(),
            Self::Sro(Some(customer_id)) => format!("sro:{customer_id}"),
            Self::Sro(None) => "sro:general".into(),
            Self::Schedule => "schedule".into(),
        }
    }
}

impl fmt::Display for SequenceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// The pipe-related fields of a callout, as the compatibility validator sees
/// and mutates them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipeSelectionFields {
    pub hole_section_id: Option<Uuid>,
    pub selection: PipeSelection,
    pub casing_size_id: Option<Uuid>,
    pub drillpipe_size_id: Option<Uuid>,
    pub minimum_id_size_id: Option<Uuid>,
}

/// What the validator changed to make a selection consistent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipeAdjustments {
    pub cleared_casing: bool,
    pub cleared_drillpipe: bool,
    /// Minimum-id lookup assigned because the caller supplied none.
    pub defaulted_minimum_id: Option<Uuid>,
}

impl PipeAdjustments {
    pub fn is_noop(&self) -> bool {
        !self.cleared_casing && !self.cleared_drillpipe && self.defaulted_minimum_id.is_none()
    }
}

/// Pipe sizes offered for a hole section, sorted ascending.
#[derive(Debug, Clone, Default)]
pub struct PipeOptions {
    pub casing: Vec<CasingSize>,
    pub drillpipe: Vec<DrillpipeSize>,
}
