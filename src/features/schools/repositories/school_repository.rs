use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::error::{AppError, Result};
use crate::features::schools::models::{NewSchool, School};

/// Persistence seam for schools
#[async_trait]
pub trait SchoolRepository: Send + Sync {
    /// Store a validated school; the store assigns `id` and `created_at`
    async fn insert(&self, school: &NewSchool) -> Result<School>;

    /// Every stored school in primary-key order
    async fn fetch_all(&self) -> Result<Vec<School>>;
}

/// MySQL-backed repository
pub struct MySqlSchoolRepository {
    pool: MySqlPool,
}

impl MySqlSchoolRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchoolRepository for MySqlSchoolRepository {
    async fn insert(&self, school: &NewSchool) -> Result<School> {
        let result = sqlx::query(
            r#"
            INSERT INTO schools (name, address, latitude, longitude)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&school.name)
        .bind(&school.address)
        .bind(school.latitude)
        .bind(school.longitude)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert school: {:?}", e);
            AppError::Database(e)
        })?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| AppError::Internal("school id out of range".to_string()))?;

        sqlx::query_as::<_, School>(
            r#"
            SELECT id, name, address, latitude, longitude, created_at
            FROM schools
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to read back school {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn fetch_all(&self) -> Result<Vec<School>> {
        sqlx::query_as::<_, School>(
            r#"
            SELECT id, name, address, latitude, longitude, created_at
            FROM schools
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch schools: {:?}", e);
            AppError::Database(e)
        })
    }
}
