use std::sync::Arc;

use crate::core::error::Result;
use crate::features::schools::dtos::ReferencePoint;
use crate::features::schools::models::{NewSchool, School, SchoolDistance};
use crate::features::schools::repositories::SchoolRepository;
use crate::shared::geo::{haversine_distance_km, round_to};

/// Decimal places kept on `distance_km`
const DISTANCE_DECIMALS: i32 = 3;

/// Service for recording schools and ranking them by distance
pub struct SchoolService {
    repository: Arc<dyn SchoolRepository>,
}

impl SchoolService {
    pub fn new(repository: Arc<dyn SchoolRepository>) -> Self {
        Self { repository }
    }

    /// Persist a validated school
    pub async fn create(&self, school: NewSchool) -> Result<School> {
        let created = self.repository.insert(&school).await?;

        tracing::info!(
            "School created: id={}, name={:?}, at ({}, {})",
            created.id,
            created.name,
            created.latitude,
            created.longitude
        );

        Ok(created)
    }

    /// Every stored school, nearest to `origin` first
    pub async fn list_by_distance(&self, origin: ReferencePoint) -> Result<Vec<SchoolDistance>> {
        let schools = self.repository.fetch_all().await?;

        tracing::debug!(
            "Ranking {} schools from ({}, {})",
            schools.len(),
            origin.latitude,
            origin.longitude
        );

        Ok(rank_by_distance(origin, schools))
    }
}

/// Annotate each school with its rounded distance from `origin` and sort ascending.
///
/// The sort is stable, so equal distances keep the order they were given in.
pub fn rank_by_distance(origin: ReferencePoint, schools: Vec<School>) -> Vec<SchoolDistance> {
    let mut ranked: Vec<SchoolDistance> = schools
        .into_iter()
        .map(|school| {
            let distance = haversine_distance_km(
                origin.latitude,
                origin.longitude,
                school.latitude,
                school.longitude,
            );
            SchoolDistance {
                distance_km: round_to(distance, DISTANCE_DECIMALS),
                school,
            }
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked
}
