use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::vo::NominalSize;

/// Shared lookup entities referenced by callouts. Never owned, never deleted
/// by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Well {
    pub id: Uuid,
    pub name: String,
    pub well_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoleSection {
    pub id: Uuid,
    /// Unique; carries the nominal size as text, e.g. `12 1/4"`.
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CasingSize {
    pub id: Uuid,
    /// Unique.
    pub size: NominalSize,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillpipeSize {
    pub id: Uuid,
    /// Unique.
    pub size: NominalSize,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinimumIdSize {
    pub id: Uuid,
    /// Unique.
    pub size: NominalSize,
    pub label: String,
}

/// Per hole-section allow-list of permitted pipe sizes. At most one record
/// per hole section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoleSectionRelationship {
    pub id: Uuid,
    pub hole_section_id: Uuid,
    pub casing_size_ids: Vec<Uuid>,
    pub drillpipe_size_ids: Vec<Uuid>,
}
