//! Bulk import boundary. Records arrive already normalized from the
//! spreadsheet collaborator; an empty field means "no value supplied" and
//! never overwrites existing data.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Natural key; records without one are skipped.
    pub asset_code: String,
    pub cost_center: String,
    pub department: String,
    pub physical_location: String,
    pub account_code: String,
    pub description: String,
    pub serial_no: String,
    pub manufacturer: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Natural key; records without one are skipped.
    pub emp_number: String,
    pub name: String,
    pub designation: String,
    pub nationality: String,
    pub department: String,
    pub tel_number: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    /// Records dropped for a missing natural key.
    pub skipped: usize,
}
