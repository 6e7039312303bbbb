use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::refuel::{Refuel, RefuelFilters};
use crate::models::vehicle::Vehicle;
use crate::repositories::RefuelRepository;
use crate::utils::errors::{map_db_error, not_found_error, AppResult};

pub struct PgRefuelRepository {
    pool: PgPool,
}

impl PgRefuelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefuelRepository for PgRefuelRepository {
    async fn insert_with_odometer(&self, refuel: &Refuel) -> AppResult<(Refuel, Vehicle)> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_db_error("Error opening transaction", e))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET odometer_km = $2, last_update = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(refuel.vehicle_id)
        .bind(refuel.odometer_km)
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_db_error("Error updating vehicle odometer", e))?
        .ok_or_else(|| not_found_error("Vehicle", refuel.vehicle_id))?;

        let saved = sqlx::query_as::<_, Refuel>(
            r#"
            INSERT INTO refuels (id, vehicle_id, odometer_km, liters, price_per_liter, total_price, store, station, date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(refuel.id)
        .bind(refuel.vehicle_id)
        .bind(refuel.odometer_km)
        .bind(refuel.liters)
        .bind(refuel.price_per_liter)
        .bind(refuel.total_price)
        .bind(&refuel.store)
        .bind(&refuel.station)
        .bind(refuel.date)
        .bind(refuel.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_db_error("Error creating refuel", e))?;

        tx.commit()
            .await
            .map_err(|e| map_db_error("Error committing refuel", e))?;

        Ok((saved, vehicle))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Refuel>> {
        sqlx::query_as::<_, Refuel>("SELECT * FROM refuels WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Error finding refuel", e))
    }

    async fn list(&self, filters: &RefuelFilters) -> AppResult<Vec<Refuel>> {
        sqlx::query_as::<_, Refuel>(
            r#"
            SELECT * FROM refuels
            WHERE ($1::int IS NULL OR EXTRACT(YEAR FROM date)::int = $1)
              AND ($2::int IS NULL OR EXTRACT(MONTH FROM date)::int = $2)
              AND ($3::text IS NULL OR store = $3)
              AND ($4::uuid IS NULL OR vehicle_id = $4)
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(filters.year)
        .bind(filters.month.map(|m| m as i32))
        .bind(filters.store.as_deref())
        .bind(filters.vehicle_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Error listing refuels", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM refuels WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Error deleting refuel", e))?;

        Ok(result.rows_affected() > 0)
    }
}
