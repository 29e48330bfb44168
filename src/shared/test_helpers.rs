use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::core::app::{build_router, RouterOptions};
use crate::core::error::{AppError, Result};
use crate::features::schools::models::{NewSchool, School};
use crate::features::schools::repositories::SchoolRepository;
use crate::features::schools::SchoolService;

pub fn school_at(id: i64, latitude: f64, longitude: f64) -> School {
    School {
        id,
        name: format!("School {}", id),
        address: format!("{} Test Street", id),
        latitude,
        longitude,
        created_at: Utc::now(),
    }
}

/// Keeps schools in insertion order and hands out sequential ids
#[derive(Default)]
pub struct InMemorySchoolRepository {
    schools: Mutex<Vec<School>>,
}

impl InMemorySchoolRepository {
    pub fn with_schools(schools: Vec<School>) -> Self {
        Self {
            schools: Mutex::new(schools),
        }
    }
}

#[async_trait]
impl SchoolRepository for InMemorySchoolRepository {
    async fn insert(&self, school: &NewSchool) -> Result<School> {
        let mut schools = self.schools.lock().await;
        let id = schools.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let stored = School {
            id,
            name: school.name.clone(),
            address: school.address.clone(),
            latitude: school.latitude,
            longitude: school.longitude,
            created_at: Utc::now(),
        };
        schools.push(stored.clone());
        Ok(stored)
    }

    async fn fetch_all(&self) -> Result<Vec<School>> {
        Ok(self.schools.lock().await.clone())
    }
}

/// Behaves like a store that cannot be reached
pub struct FailingSchoolRepository;

#[async_trait]
impl SchoolRepository for FailingSchoolRepository {
    async fn insert(&self, _school: &NewSchool) -> Result<School> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn fetch_all(&self) -> Result<Vec<School>> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
}

pub fn test_server_with_options(
    repository: Arc<dyn SchoolRepository>,
    options: RouterOptions,
) -> TestServer {
    let service = Arc::new(SchoolService::new(repository));
    TestServer::new(build_router(service, options)).unwrap()
}

pub fn test_server(repository: Arc<dyn SchoolRepository>) -> TestServer {
    test_server_with_options(repository, RouterOptions::default())
}
