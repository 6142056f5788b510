use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// # Employee
/// A crew member eligible for assignment. Descriptive fields default to
/// empty; bulk import fills them in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    /// Unique natural key used by bulk import.
    pub emp_number: String,
    pub name: String,
    pub designation: String,
    pub nationality: String,
    pub department: String,
    pub tel_number: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
