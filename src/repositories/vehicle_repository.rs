use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::vehicle::Vehicle;
use crate::repositories::VehicleRepository;
use crate::utils::errors::{map_db_error, not_found_error, AppResult};

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn insert(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, model, plate, odometer_km, last_update, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.model)
        .bind(&vehicle.plate)
        .bind(vehicle.odometer_km)
        .bind(vehicle.last_update)
        .bind(vehicle.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("Error creating vehicle", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Error finding vehicle", e))
    }

    async fn list(&self) -> AppResult<Vec<Vehicle>> {
        sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY model, plate")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error("Error listing vehicles", e))
    }

    async fn update(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET model = $2, plate = $3, odometer_km = $4, last_update = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.model)
        .bind(&vehicle.plate)
        .bind(vehicle.odometer_km)
        .bind(vehicle.last_update)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("Error updating vehicle", e))?
        .ok_or_else(|| not_found_error("Vehicle", vehicle.id))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Error deleting vehicle", e))?;

        Ok(result.rows_affected() > 0)
    }
}
