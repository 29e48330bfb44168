use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for school
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct School {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

/// Validated, normalized input for a new school
#[derive(Debug, Clone, PartialEq)]
pub struct NewSchool {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A school annotated with its distance from a reference point
#[derive(Debug, Clone, PartialEq)]
pub struct SchoolDistance {
    pub school: School,
    pub distance_km: f64,
}
