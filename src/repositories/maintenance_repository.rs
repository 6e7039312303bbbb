use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::maintenance::{Maintenance, MaintenanceFilters};
use crate::repositories::MaintenanceRepository;
use crate::utils::errors::{map_db_error, not_found_error, AppResult};

pub struct PgMaintenanceRepository {
    pool: PgPool,
}

impl PgMaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MaintenanceRepository for PgMaintenanceRepository {
    async fn insert(&self, maintenance: &Maintenance) -> AppResult<Maintenance> {
        sqlx::query_as::<_, Maintenance>(
            r#"
            INSERT INTO maintenances (id, vehicle_id, maintenance_type, odometer_km, cost, notes, status, date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(maintenance.id)
        .bind(maintenance.vehicle_id)
        .bind(&maintenance.maintenance_type)
        .bind(maintenance.odometer_km)
        .bind(maintenance.cost)
        .bind(&maintenance.notes)
        .bind(maintenance.status)
        .bind(maintenance.date)
        .bind(maintenance.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("Error creating maintenance", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Maintenance>> {
        sqlx::query_as::<_, Maintenance>("SELECT * FROM maintenances WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Error finding maintenance", e))
    }

    async fn list(&self, filters: &MaintenanceFilters) -> AppResult<Vec<Maintenance>> {
        sqlx::query_as::<_, Maintenance>(
            r#"
            SELECT * FROM maintenances
            WHERE ($1::uuid IS NULL OR vehicle_id = $1)
              AND ($2::maintenance_status IS NULL OR status = $2)
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(filters.vehicle_id)
        .bind(filters.status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Error listing maintenances", e))
    }

    async fn update(&self, maintenance: &Maintenance) -> AppResult<Maintenance> {
        sqlx::query_as::<_, Maintenance>(
            r#"
            UPDATE maintenances
            SET vehicle_id = $2, maintenance_type = $3, odometer_km = $4, cost = $5,
                notes = $6, status = $7, date = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(maintenance.id)
        .bind(maintenance.vehicle_id)
        .bind(&maintenance.maintenance_type)
        .bind(maintenance.odometer_km)
        .bind(maintenance.cost)
        .bind(&maintenance.notes)
        .bind(maintenance.status)
        .bind(maintenance.date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("Error updating maintenance", e))?
        .ok_or_else(|| not_found_error("Maintenance", maintenance.id))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM maintenances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Error deleting maintenance", e))?;

        Ok(result.rows_affected() > 0)
    }
}
