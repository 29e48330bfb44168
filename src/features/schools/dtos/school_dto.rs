use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::core::error::{AppError, Result};
use crate::features::schools::models::{NewSchool, School, SchoolDistance};
use crate::shared::constants::{
    LATITUDE_RANGE, LONGITUDE_RANGE, MAX_ADDRESS_LENGTH, MAX_NAME_LENGTH,
};
use crate::shared::validation::FieldRules;

/// Request DTO for adding a school
///
/// Fields are kept loosely typed so that every problem with the body can be
/// reported together instead of failing on the first deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateSchoolDto {
    /// School name (1-255 characters after trimming)
    #[schema(value_type = String, example = "Lincoln High")]
    pub name: Option<Value>,

    /// Postal address (1-500 characters after trimming)
    #[schema(value_type = String, example = "1 Main St")]
    pub address: Option<Value>,

    /// Latitude in degrees, -90 to 90
    #[schema(value_type = f64, example = 40.0)]
    pub latitude: Option<Value>,

    /// Longitude in degrees, -180 to 180
    #[schema(value_type = f64, example = -75.0)]
    pub longitude: Option<Value>,
}

impl CreateSchoolDto {
    /// Check every field and return the normalized school
    pub fn validate(&self) -> Result<NewSchool> {
        let mut rules = FieldRules::new();
        let name = rules.text("name", self.name.as_ref(), MAX_NAME_LENGTH);
        let address = rules.text("address", self.address.as_ref(), MAX_ADDRESS_LENGTH);
        let latitude = rules.float_in_range("latitude", self.latitude.as_ref(), LATITUDE_RANGE);
        let longitude =
            rules.float_in_range("longitude", self.longitude.as_ref(), LONGITUDE_RANGE);
        rules.finish()?;

        match (name, address, latitude, longitude) {
            (Some(name), Some(address), Some(latitude), Some(longitude)) => Ok(NewSchool {
                name,
                address,
                latitude,
                longitude,
            }),
            _ => Err(AppError::Internal(
                "validated school is missing a field".to_string(),
            )),
        }
    }
}

/// Query parameters for listing schools by distance
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListSchoolsQuery {
    /// Reference latitude, -90 to 90
    #[param(value_type = f64, example = 40.0)]
    pub latitude: Option<String>,

    /// Reference longitude, -180 to 180
    #[param(value_type = f64, example = -75.0)]
    pub longitude: Option<String>,
}

/// A validated reference point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferencePoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl ListSchoolsQuery {
    pub fn validate(&self) -> Result<ReferencePoint> {
        let latitude_raw = self.latitude.clone().map(Value::String);
        let longitude_raw = self.longitude.clone().map(Value::String);

        let mut rules = FieldRules::new();
        let latitude = rules.float_in_range("latitude", latitude_raw.as_ref(), LATITUDE_RANGE);
        let longitude =
            rules.float_in_range("longitude", longitude_raw.as_ref(), LONGITUDE_RANGE);
        rules.finish()?;

        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Ok(ReferencePoint {
                latitude,
                longitude,
            }),
            _ => Err(AppError::Internal(
                "validated reference point is missing a coordinate".to_string(),
            )),
        }
    }
}

/// Response DTO for a created school
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SchoolResponseDto {
    #[schema(example = 1)]
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<School> for SchoolResponseDto {
    fn from(school: School) -> Self {
        Self {
            id: school.id,
            name: school.name,
            address: school.address,
            latitude: school.latitude,
            longitude: school.longitude,
        }
    }
}

/// A school with its distance from the requested point
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SchoolDistanceDto {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Great-circle distance in kilometers, rounded to 3 decimals
    #[schema(example = 111.195)]
    pub distance_km: f64,
}

impl From<SchoolDistance> for SchoolDistanceDto {
    fn from(entry: SchoolDistance) -> Self {
        Self {
            id: entry.school.id,
            name: entry.school.name,
            address: entry.school.address,
            latitude: entry.school.latitude,
            longitude: entry.school.longitude,
            distance_km: entry.distance_km,
        }
    }
}

/// Response DTO for the distance-sorted listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListSchoolsResponseDto {
    pub count: usize,
    pub schools: Vec<SchoolDistanceDto>,
}

impl From<Vec<SchoolDistance>> for ListSchoolsResponseDto {
    fn from(entries: Vec<SchoolDistance>) -> Self {
        let schools: Vec<SchoolDistanceDto> = entries.into_iter().map(Into::into).collect();
        Self {
            count: schools.len(),
            schools,
        }
    }
}
