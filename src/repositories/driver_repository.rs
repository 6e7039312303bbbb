use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::driver::Driver;
use crate::repositories::DriverRepository;
use crate::utils::errors::{map_db_error, not_found_error, AppResult};

pub struct PgDriverRepository {
    pool: PgPool,
}

impl PgDriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DriverRepository for PgDriverRepository {
    async fn insert(&self, driver: &Driver) -> AppResult<Driver> {
        sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (id, name, license_number, phone, category, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(driver.id)
        .bind(&driver.name)
        .bind(&driver.license_number)
        .bind(&driver.phone)
        .bind(&driver.category)
        .bind(driver.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("Error creating driver", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Driver>> {
        sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Error finding driver", e))
    }

    async fn list(&self) -> AppResult<Vec<Driver>> {
        sqlx::query_as::<_, Driver>("SELECT * FROM drivers ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error("Error listing drivers", e))
    }

    async fn update(&self, driver: &Driver) -> AppResult<Driver> {
        sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET name = $2, license_number = $3, phone = $4, category = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(driver.id)
        .bind(&driver.name)
        .bind(&driver.license_number)
        .bind(&driver.phone)
        .bind(&driver.category)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("Error updating driver", e))?
        .ok_or_else(|| not_found_error("Driver", driver.id))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Error deleting driver", e))?;

        Ok(result.rows_affected() > 0)
    }
}
